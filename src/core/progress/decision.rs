use std::str::FromStr;

use super::event::ProgressEvent;
use crate::core::error::AnalyzerResult;

/// Answer to an `*_OPTION` checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
    /// Install this one and every later item of the same kind.
    All,
}

impl Decision {
    pub fn installs(&self) -> bool {
        !matches!(self, Decision::No)
    }
}

impl FromStr for Decision {
    type Err = ();

    /// Case-insensitive `Y`/`N`/`A`, or the full word.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" => Ok(Decision::Yes),
            "N" | "NO" => Ok(Decision::No),
            "A" | "ALL" => Ok(Decision::All),
            _ => Err(()),
        }
    }
}

/// Steering side of the progress channel.
///
/// Called once per checkpoint and may block for as long as it needs. The
/// returned string is only read for `*_OPTION` (a decision token) and
/// `INSTANCE_INSTALL_PATH` (an absolute directory). An `Err` aborts the run.
pub trait DecisionSource {
    fn notify(&mut self, event: &ProgressEvent) -> AnalyzerResult<Option<String>>;
}

impl<F> DecisionSource for F
where
    F: FnMut(&ProgressEvent) -> Option<String>,
{
    fn notify(&mut self, event: &ProgressEvent) -> AnalyzerResult<Option<String>> {
        Ok(self(event))
    }
}
