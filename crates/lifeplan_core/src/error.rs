use std::fmt;

/// Errors raised while sampling a statistical distribution
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    InvalidParameters {
        kind: &'static str,
        a: f64,
        b: f64,
        reason: &'static str,
    },
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionError::InvalidParameters { kind, a, b, reason } => {
                write!(f, "invalid {kind} parameters ({a}, {b}): {reason}")
            }
        }
    }
}

impl std::error::Error for DistributionError {}

/// Errors raised while resolving event timing
#[derive(Debug, Clone, PartialEq)]
pub enum TimingError {
    /// A referential timing spec names an event that does not exist
    UnknownEvent(String),
    /// The referential timing graph contains a cycle through this event
    CircularDependency(String),
    Distribution(DistributionError),
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::UnknownEvent(name) => {
                write!(f, "timing spec references unknown event {name:?}")
            }
            TimingError::CircularDependency(name) => {
                write!(f, "circular timing dependency through event {name:?}")
            }
            TimingError::Distribution(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TimingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimingError::Distribution(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DistributionError> for TimingError {
    fn from(e: DistributionError) -> Self {
        TimingError::Distribution(e)
    }
}

/// Structural problems in a scenario definition
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    DuplicateEventName(String),
    DuplicateInvestmentName(String),
    UnknownInvestmentType { investment: String, type_name: String },
    MissingSpouse,
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::DuplicateEventName(name) => {
                write!(f, "duplicate event name {name:?}")
            }
            ScenarioError::DuplicateInvestmentName(name) => {
                write!(f, "duplicate investment name {name:?}")
            }
            ScenarioError::UnknownInvestmentType {
                investment,
                type_name,
            } => {
                write!(
                    f,
                    "investment {investment:?} references unknown type {type_name:?}"
                )
            }
            ScenarioError::MissingSpouse => {
                write!(f, "married scenario has no spouse definition")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Any error that aborts a single trial.
///
/// These never propagate past the trial boundary; the driver records them in
/// the trial log and returns a partial result.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialError {
    Scenario(ScenarioError),
    Timing(TimingError),
    Distribution(DistributionError),
    UnknownInvestmentType { investment: String, type_name: String },
}

impl fmt::Display for TrialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialError::Scenario(e) => write!(f, "{e}"),
            TrialError::Timing(e) => write!(f, "{e}"),
            TrialError::Distribution(e) => write!(f, "{e}"),
            TrialError::UnknownInvestmentType {
                investment,
                type_name,
            } => {
                write!(
                    f,
                    "investment {investment:?} references unknown type {type_name:?}"
                )
            }
        }
    }
}

impl std::error::Error for TrialError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrialError::Scenario(e) => Some(e),
            TrialError::Timing(e) => Some(e),
            TrialError::Distribution(e) => Some(e),
            TrialError::UnknownInvestmentType { .. } => None,
        }
    }
}

impl From<ScenarioError> for TrialError {
    fn from(e: ScenarioError) -> Self {
        TrialError::Scenario(e)
    }
}

impl From<TimingError> for TrialError {
    fn from(e: TimingError) -> Self {
        TrialError::Timing(e)
    }
}

impl From<DistributionError> for TrialError {
    fn from(e: DistributionError) -> Self {
        TrialError::Distribution(e)
    }
}
