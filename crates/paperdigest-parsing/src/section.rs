use once_cell::sync::Lazy;
use regex::Regex;

use paperdigest_core::{SectionKind, SectionMap};

/// A heading matcher plus the boundary that ends its span.
struct SectionPattern {
    kind: SectionKind,
    /// Matches the section heading keyword (or its numeric-prefix
    /// alias, e.g. "1." for the introduction).
    heading: Regex,
    /// Matches the start of the next section's heading; the span ends
    /// at the first boundary match, or at end-of-text.
    boundary: Regex,
}

static PATTERNS: Lazy<[SectionPattern; 6]> = Lazy::new(|| {
    let pattern = |kind, heading: &str, boundary: &str| SectionPattern {
        kind,
        heading: Regex::new(heading).unwrap(),
        boundary: Regex::new(boundary).unwrap(),
    };
    [
        pattern(
            SectionKind::Abstract,
            r"(?i)abstract",
            r"(?i)\n\s*(?:introduction|1\.)",
        ),
        pattern(
            SectionKind::Introduction,
            r"(?i)(?:introduction|1\.)",
            r"(?i)\n\s*(?:methodology|methods|2\.)",
        ),
        pattern(
            SectionKind::Methodology,
            r"(?i)(?:methodology|methods|2\.)",
            r"(?i)\n\s*(?:results|3\.)",
        ),
        pattern(
            SectionKind::Results,
            r"(?i)(?:results|findings|3\.)",
            r"(?i)\n\s*(?:discussion|4\.)",
        ),
        pattern(
            SectionKind::Discussion,
            r"(?i)(?:discussion|4\.)",
            r"(?i)\n\s*(?:conclusion|5\.)",
        ),
        pattern(
            SectionKind::Conclusion,
            r"(?i)(?:conclusion|5\.)",
            r"(?i)\n\s*(?:references|bibliography)",
        ),
    ]
});

/// Split extracted paper text into the six canonical sections.
///
/// Each pattern is evaluated independently against the full text: the
/// first heading occurrence opens the span, the whitespace run after
/// the heading is skipped, and the first boundary occurrence after
/// that (the next section's heading, or references/bibliography for
/// the conclusion) closes it. Repeated or
/// out-of-order headings can therefore produce overlapping captures;
/// that is a known limitation of the heuristic, and downstream
/// consumers depend on these exact semantics.
///
/// Sections with no matching heading keep the empty string. This
/// function never fails; absence of a section is a valid outcome.
pub fn segment_sections(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();

    for pattern in PATTERNS.iter() {
        if let Some(m) = pattern.heading.find(text) {
            let after = &text[m.end()..];
            // The whitespace run after the heading is consumed greedily
            // before the boundary search begins, so a next-section
            // heading on the immediately following line does not
            // terminate the span; the capture then runs to the boundary
            // after that, or to end-of-text.
            let rest = after.trim_start();
            let end = pattern
                .boundary
                .find(rest)
                .map(|b| b.start())
                .unwrap_or(rest.len());
            sections.set(pattern.kind, rest[..end].trim_end().to_string());
        }
    }

    sections
}
