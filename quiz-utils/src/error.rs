#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Upstream(String),
    #[error("Invalid response format from Gemini: {0}")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("{0}")]
    InvalidQuizShape(#[from] ShapeError),
}

impl Error {
    /// Message that may be shown to the person who asked for the quiz.
    ///
    /// Never includes upstream content.
    pub fn public_message(&self) -> String {
        match self {
            Error::InvalidRequest(msg) | Error::Upstream(msg) => msg.clone(),
            Error::MalformedResponse(_) => "Invalid response format from Gemini".to_string(),
            Error::InvalidQuizShape(shape) => shape.public_message().to_string(),
        }
    }

    /// `true` if the caller can fix the error by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}

/// Why a generated quiz did not match the expected shape
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("`questions` is missing or is not an array")]
    Questions,
    #[error("`questions` is empty")]
    NoQuestions,
    #[error("question {index}: `{field}` {problem}")]
    Question {
        index: usize,
        field: &'static str,
        problem: &'static str,
    },
}

impl ShapeError {
    pub fn public_message(&self) -> &'static str {
        match self {
            ShapeError::Questions | ShapeError::NoQuestions => "Invalid quiz format received",
            ShapeError::Question { .. } => "Invalid question format in quiz",
        }
    }
}
