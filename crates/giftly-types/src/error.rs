use thiserror::Error;

/// A label that does not belong to the closed set it was parsed against.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

/// Errors raised by the guided wizard state machine.
///
/// None of these are fatal: the wizard state is left untouched whenever one
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("step {0} is not complete")]
    StepIncomplete(u8),

    #[error("at most {max} interests can be selected")]
    InterestLimit { max: usize },

    #[error("wizard session already completed")]
    AlreadyCompleted,

    #[error("operation requires {expected} mode")]
    WrongMode { expected: &'static str },

    #[error(transparent)]
    UnknownValue(#[from] UnknownValue),
}

/// Errors related to product feedback collection and submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Please provide a rating")]
    MissingRating,

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("at most {max} reasons can be selected")]
    ReasonLimit { max: usize },

    #[error("a feedback submission is already in progress")]
    SubmissionInProgress,

    #[error("feedback request failed: {0}")]
    Transport(String),

    #[error("feedback API rejected the request with status {status}")]
    Rejected { status: u16 },
}
