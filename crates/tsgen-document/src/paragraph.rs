//! Paragraphs and styled text runs.

use serde::{Deserialize, Serialize};

/// Character formatting carried by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStyle {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Font size in half-points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Hex RGB, e.g. `1F3864`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RunStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A span of text sharing one style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_plain")]
    pub style: RunStyle,
}

fn is_plain(style: &RunStyle) -> bool {
    *style == RunStyle::default()
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: RunStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// An ordered sequence of runs with an optional paragraph style name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { style: None, runs }
    }

    /// Single plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(vec![Run::new(text)])
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenated text of every run.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }

    /// Split around the first occurrence of `token` in the paragraph text.
    ///
    /// The token may span several runs. Runs keep their style on both sides,
    /// the token text itself is dropped, and both halves keep the paragraph
    /// style. Returns `None` when the token does not occur.
    pub fn split_around(&self, token: &str) -> Option<(Paragraph, Paragraph)> {
        if token.is_empty() {
            return None;
        }
        let start = self.text().find(token)?;
        let end = start + token.len();

        let mut before = Vec::new();
        let mut after = Vec::new();
        let mut offset = 0;
        for run in &self.runs {
            let run_start = offset;
            let run_end = offset + run.text.len();
            offset = run_end;

            if run_start < start {
                let cut = start.min(run_end) - run_start;
                push_nonempty(&mut before, &run.text[..cut], &run.style);
            }
            if run_end > end {
                let cut = end.max(run_start) - run_start;
                push_nonempty(&mut after, &run.text[cut..], &run.style);
            }
        }

        Some((
            Paragraph {
                style: self.style.clone(),
                runs: before,
            },
            Paragraph {
                style: self.style.clone(),
                runs: after,
            },
        ))
    }
}

fn push_nonempty(runs: &mut Vec<Run>, text: &str, style: &RunStyle) {
    if !text.is_empty() {
        runs.push(Run::styled(text, style.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_inside_single_run() {
        let paragraph = Paragraph::plain("prefix {{TBL}} suffix");
        let (before, after) = paragraph.split_around("{{TBL}}").unwrap();
        assert_eq!(before.text(), "prefix ");
        assert_eq!(after.text(), " suffix");
    }

    #[test]
    fn split_across_runs_keeps_styles() {
        let italic = RunStyle {
            italic: true,
            ..RunStyle::default()
        };
        let mut paragraph = Paragraph::new(vec![
            Run::styled("See {{T", RunStyle::bold()),
            Run::new("BL}}"),
            Run::styled(" below", italic.clone()),
        ]);
        paragraph.style = Some("Body".to_string());

        let (before, after) = paragraph.split_around("{{TBL}}").unwrap();
        assert_eq!(before.runs, vec![Run::styled("See ", RunStyle::bold())]);
        assert_eq!(after.runs, vec![Run::styled(" below", italic)]);
        assert_eq!(after.style.as_deref(), Some("Body"));
    }

    #[test]
    fn token_filling_paragraph_leaves_empty_halves() {
        let (before, after) = Paragraph::plain("{{TBL}}").split_around("{{TBL}}").unwrap();
        assert!(before.is_empty());
        assert!(after.is_empty());
        assert!(before.runs.is_empty());
    }

    #[test]
    fn split_only_at_first_occurrence() {
        let (before, after) = Paragraph::plain("a [[T]] b [[T]] c").split_around("[[T]]").unwrap();
        assert_eq!(before.text(), "a ");
        assert_eq!(after.text(), " b [[T]] c");
    }

    #[test]
    fn missing_token_is_none() {
        assert!(Paragraph::plain("nothing here").split_around("[[T]]").is_none());
        assert!(Paragraph::plain("x").split_around("").is_none());
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let paragraph = Paragraph::new(vec![Run::new("Prämie: [["), Run::new("P]] €")]);
        let (before, after) = paragraph.split_around("[[P]]").unwrap();
        assert_eq!(before.text(), "Prämie: ");
        assert_eq!(after.text(), " €");
    }
}
