use thiserror::Error;

use crate::instance::InstanceError;

pub(crate) type PlannerResult<T> = Result<T, PlannerError>;

#[derive(Error, Debug)]
pub(crate) enum PlannerError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to load the problem file, more details: {0}")]
    Instance(#[from] InstanceError),
    #[error("The problem file does not define a state named '{0}'.")]
    UnknownState(String),
}
