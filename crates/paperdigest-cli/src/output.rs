use std::io::Write;

use owo_colors::OwoColorize;

use paperdigest_core::{SectionMap, SummaryMap, SummaryOutcome};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the per-section summaries, one block per section.
pub fn print_summaries(
    w: &mut dyn Write,
    summaries: &SummaryMap,
    color: ColorMode,
) -> std::io::Result<()> {
    for (kind, outcome) in summaries.iter() {
        let heading = kind.as_str().to_uppercase();
        if color.enabled() {
            match outcome {
                SummaryOutcome::Summarized(_) => writeln!(w, "{}", heading.green().bold())?,
                SummaryOutcome::Empty => writeln!(w, "{}", heading.dimmed())?,
                SummaryOutcome::Failed(_) => writeln!(w, "{}", heading.red().bold())?,
            }
        } else {
            writeln!(w, "{}", heading)?;
        }
        writeln!(w, "{}", outcome.render())?;
        writeln!(w)?;
    }
    Ok(())
}

/// Print the raw segmented sections (sections-only mode).
pub fn print_sections(
    w: &mut dyn Write,
    sections: &SectionMap,
    color: ColorMode,
) -> std::io::Result<()> {
    for (kind, text) in sections.iter() {
        let heading = kind.as_str().to_uppercase();
        if color.enabled() {
            if text.is_empty() {
                writeln!(w, "{}", heading.dimmed())?;
            } else {
                writeln!(w, "{}", heading.cyan().bold())?;
            }
        } else {
            writeln!(w, "{}", heading)?;
        }
        if text.is_empty() {
            writeln!(w, "(not found)")?;
        } else {
            writeln!(w, "{}", text)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperdigest_core::SectionKind;

    #[test]
    fn summaries_print_each_section_heading() {
        let mut map = SummaryMap::default();
        map.set(
            SectionKind::Abstract,
            SummaryOutcome::Summarized("short".into()),
        );
        let mut buf = Vec::new();
        print_summaries(&mut buf, &map, ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("ABSTRACT\nshort"));
        assert!(out.contains("CONCLUSION\nNo content available for summarization."));
    }

    #[test]
    fn sections_marks_missing_sections() {
        let sections = SectionMap::default();
        let mut buf = Vec::new();
        print_sections(&mut buf, &sections, ColorMode(false)).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out.matches("(not found)").count(), 6);
    }
}
