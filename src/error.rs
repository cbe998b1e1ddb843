use thiserror::Error;

/// Hard failures surfaced by the mutation API. Structurally recoverable
/// problems (dangling references, one-sided links) never reach this type;
/// normalization repairs them silently.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("linking '{id}' would make it its own ancestor")]
    CycleDetected { id: String },
    #[error("no person with id '{id}'")]
    UnknownNode { id: String },
}
