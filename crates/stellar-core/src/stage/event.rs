use std::fmt;

use crate::consts::{OUTCOME_DONE, STAGE_ASTROMETRIC_SOLUTION, STAGE_AUTOCROP, STAGE_INTEGRATION};
use crate::group::ProcessingGroup;

/// Host pipeline stages this crate reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    AstrometricSolution,
    Integration,
    Autocrop,
}

impl Stage {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            STAGE_ASTROMETRIC_SOLUTION => Some(Self::AstrometricSolution),
            STAGE_INTEGRATION => Some(Self::Integration),
            STAGE_AUTOCROP => Some(Self::Autocrop),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AstrometricSolution => write!(f, "{STAGE_ASTROMETRIC_SOLUTION}"),
            Self::Integration => write!(f, "{STAGE_INTEGRATION}"),
            Self::Autocrop => write!(f, "{STAGE_AUTOCROP}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    Other(String),
}

impl StageOutcome {
    pub fn parse(outcome: &str) -> Self {
        if outcome == OUTCOME_DONE {
            Self::Completed
        } else {
            Self::Other(outcome.to_string())
        }
    }
}

/// One host callback: a stage name, its outcome and, for per-group events,
/// the group concerned. Borrowed for the duration of the call only.
pub struct StageEvent<'a> {
    pub stage: &'a str,
    pub outcome: StageOutcome,
    pub group: Option<&'a dyn ProcessingGroup>,
}

impl<'a> StageEvent<'a> {
    pub fn new(stage: &'a str, outcome: &str) -> Self {
        Self {
            stage,
            outcome: StageOutcome::parse(outcome),
            group: None,
        }
    }

    pub fn with_group(mut self, group: &'a dyn ProcessingGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// The recognised stage, if this event finished it.
    pub fn completed_stage(&self) -> Option<Stage> {
        match self.outcome {
            StageOutcome::Completed => Stage::from_name(self.stage),
            StageOutcome::Other(_) => None,
        }
    }
}
