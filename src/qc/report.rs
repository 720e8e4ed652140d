use serde::Serialize;
use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::screening::{OverrangeFlag, RatioFlag};
use super::FailureTable;

/// QC check result status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum CheckStatus {
    /// Nothing flagged
    Ok,
    /// Flags worth reviewing that do not qualify data
    Warning(String),
    /// Flags that produce qualifier lines
    Failed(String),
}

impl CheckStatus {
    fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }

    fn is_warning(&self) -> bool {
        matches!(self, CheckStatus::Warning(_))
    }

    fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// Outcome of one screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QcCheck {
    /// Screen name
    pub name: String,
    #[serde(flatten)]
    pub status: CheckStatus,
    /// MDVR lines this screen produced; `None` for advisory screens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier_lines: Option<usize>,
}

impl QcCheck {
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
            qualifier_lines: None,
        }
    }

    pub fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Warning(message.into()),
            qualifier_lines: None,
        }
    }

    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Failed(message.into()),
            qualifier_lines: None,
        }
    }

    /// Summarize a blank or recovery screen
    ///
    /// Failed when any sample was flagged; a warning when there was nothing
    /// of that sample type to screen.
    pub fn from_failures(name: impl Into<String>, failures: &FailureTable) -> Self {
        let failing = failures.failing_row_count();
        if failures.is_empty() {
            Self::warning(name, "no samples to screen")
        } else if failing > 0 {
            Self::failed(name, format!("{} of {} samples flagged", failing, failures.len()))
        } else {
            Self::ok(name)
        }
    }

    /// Attach the number of qualifier lines built from this screen
    pub fn with_qualifier_lines(mut self, lines: usize) -> Self {
        self.qualifier_lines = Some(lines);
        self
    }

    /// Summarize the ratio battery (advisory)
    pub fn from_ratios(flags: &[RatioFlag]) -> Self {
        if flags.is_empty() {
            return Self::ok("Ratio screening");
        }
        let mut reasons: Vec<&str> = flags.iter().map(|f| f.screen_reason).collect();
        reasons.dedup();
        Self::warning(
            "Ratio screening",
            format!("{} matches ({})", flags.len(), reasons.join(", ")),
        )
    }

    /// Summarize overrange detection (advisory)
    pub fn from_overrange(flags: &[OverrangeFlag], upper_cal_point: f64) -> Self {
        if flags.is_empty() {
            Self::ok("Overrange values")
        } else {
            Self::warning(
                "Overrange values",
                format!("{} values above {} ppbC", flags.len(), upper_cal_point),
            )
        }
    }
}

/// Summary of every screen run over one site-month
#[derive(Debug, Serialize)]
pub struct QcSummary {
    /// Data source the screens ran on
    pub source: String,
    pub checks: Vec<QcCheck>,
}

impl QcSummary {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            checks: Vec::new(),
        }
    }

    pub fn add_check(&mut self, check: QcCheck) {
        self.checks.push(check);
    }

    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_failed())
    }

    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.status.is_warning())
    }

    pub fn success_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_ok()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_warning()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.checks.iter().filter(|c| c.status.is_failed()).count()
    }

    /// Total qualifier lines across all screens
    pub fn qualifier_count(&self) -> usize {
        self.checks.iter().filter_map(|c| c.qualifier_lines).sum()
    }

    /// Render the per-screen table; `paint` styles an already padded cell
    fn render(&self, paint: impl Fn(&CheckStatus, String) -> String) -> String {
        let width = self
            .checks
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(SCREEN_HEADER.len());

        let mut out = format!("AutoGC QC: {}\n\n", self.source);
        out.push_str(&format!("{:<width$}  {:<7}  {:>5}  Detail\n", SCREEN_HEADER, "Status", "Lines"));
        for check in &self.checks {
            let (tag, detail) = match &check.status {
                CheckStatus::Ok => ("ok", ""),
                CheckStatus::Warning(msg) => ("review", msg.as_str()),
                CheckStatus::Failed(msg) => ("FLAGGED", msg.as_str()),
            };
            let lines = check.qualifier_lines.map_or_else(|| "-".to_string(), |n| n.to_string());
            out.push_str(&format!(
                "{:<width$}  {}  {:>5}  {}\n",
                check.name,
                paint(&check.status, format!("{:<7}", tag)),
                lines,
                detail
            ));
        }

        out.push('\n');
        let verdict = if self.has_failures() {
            format!(
                "{} qualifier lines from {} flagged screens",
                self.qualifier_count(),
                self.failure_count()
            )
        } else if self.has_warnings() {
            format!("No qualifiers; {} screens need review", self.warning_count())
        } else {
            "No qualifiers; all screens passed".to_string()
        };
        let overall = self
            .checks
            .iter()
            .map(|c| &c.status)
            .max_by_key(|status| match status {
                CheckStatus::Ok => 0,
                CheckStatus::Warning(_) => 1,
                CheckStatus::Failed(_) => 2,
            })
            .cloned()
            .unwrap_or(CheckStatus::Ok);
        out.push_str(&paint(&overall, verdict));
        out.push('\n');
        out
    }

    /// Format the summary with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            self.render(|status, text| match status {
                CheckStatus::Ok => style(text).green().to_string(),
                CheckStatus::Warning(_) => style(text).yellow().to_string(),
                CheckStatus::Failed(_) => style(text).red().bold().to_string(),
            })
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            self.to_string()
        }
    }
}

const SCREEN_HEADER: &str = "Screen";

impl fmt::Display for QcSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_, text| text))
    }
}
