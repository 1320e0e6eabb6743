use std::borrow::Cow;

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::summarize::NO_CONTENT_SENTINEL;

/// The six canonical sections of a research paper, in the fixed
/// evaluation order used throughout the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Abstract,
    Introduction,
    Methodology,
    Results,
    Discussion,
    Conclusion,
}

impl SectionKind {
    /// All section kinds in evaluation order.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Abstract,
        SectionKind::Introduction,
        SectionKind::Methodology,
        SectionKind::Results,
        SectionKind::Discussion,
        SectionKind::Conclusion,
    ];

    /// The JSON key / display name for this section.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Abstract => "abstract",
            SectionKind::Introduction => "introduction",
            SectionKind::Methodology => "methodology",
            SectionKind::Results => "results",
            SectionKind::Discussion => "discussion",
            SectionKind::Conclusion => "conclusion",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Section texts keyed by [`SectionKind`]. All six keys are always
/// present; unmatched sections hold the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    texts: [String; 6],
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> &str {
        &self.texts[kind.index()]
    }

    pub fn set(&mut self, kind: SectionKind, text: String) {
        self.texts[kind.index()] = text;
    }

    /// Iterate sections in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &str)> {
        SectionKind::ALL
            .iter()
            .map(|&kind| (kind, self.get(kind)))
    }

    /// True when no pattern matched anything.
    pub fn is_empty(&self) -> bool {
        self.texts.iter().all(|t| t.is_empty())
    }
}

/// The outcome of summarizing a single section.
///
/// A failed section never aborts its siblings; the failure is carried
/// here and rendered into the output mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The model produced a summary.
    Summarized(String),
    /// The section text was empty; the model was not invoked.
    Empty,
    /// Model inference failed with the given message.
    Failed(String),
}

impl SummaryOutcome {
    /// Render the outcome into the user-visible string.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            SummaryOutcome::Summarized(s) => Cow::Borrowed(s.as_str()),
            SummaryOutcome::Empty => Cow::Borrowed(NO_CONTENT_SENTINEL),
            SummaryOutcome::Failed(msg) => {
                Cow::Owned(format!("Error during summarization: {}", msg))
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SummaryOutcome::Failed(_))
    }
}

/// Per-section summary outcomes; the terminal output of the pipeline.
///
/// Serializes to a JSON object with exactly the six section names as
/// keys, in evaluation order, each mapped to its rendered string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryMap {
    outcomes: [SummaryOutcome; 6],
}

impl Default for SummaryMap {
    fn default() -> Self {
        Self {
            outcomes: [const { SummaryOutcome::Empty }; 6],
        }
    }
}

impl SummaryMap {
    pub fn get(&self, kind: SectionKind) -> &SummaryOutcome {
        &self.outcomes[kind.index()]
    }

    pub fn set(&mut self, kind: SectionKind, outcome: SummaryOutcome) {
        self.outcomes[kind.index()] = outcome;
    }

    /// Iterate outcomes in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &SummaryOutcome)> {
        SectionKind::ALL
            .iter()
            .map(|&kind| (kind, self.get(kind)))
    }
}

impl Serialize for SummaryMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(6))?;
        for (kind, outcome) in self.iter() {
            map.serialize_entry(kind.as_str(), outcome.render().as_ref())?;
        }
        map.end()
    }
}
