use sapling_planner::core::problem::ProblemError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InstanceError {
    #[error("failed to read problem file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode problem file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the problem is misconfigured: {0}")]
    Problem(#[from] ProblemError),

    #[error("use of undefined variable '{0}'")]
    UndefinedVariable(String),

    #[error("the variable '{0}' is declared more than once")]
    DuplicateVariable(String),

    #[error("the state '{state}' does not assign the variable '{variable}'")]
    MissingValue { state: String, variable: String },

    #[error("'{0}' is the name of the initial state and cannot be used for another state")]
    ReservedStateName(String),
}
