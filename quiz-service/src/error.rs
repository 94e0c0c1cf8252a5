use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{1}")]
    Server(StatusCode, String),
    // Froms
    #[error(transparent)]
    Quiz(#[from] quiz_utils::error::Error),
}

impl Error {
    /// Message sent in the `error` field of the response body
    pub fn public_message(&self) -> String {
        match self {
            Error::Server(_, msg) => msg.clone(),
            Error::Quiz(e) => e.public_message(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let msg = self.public_message();
        let status: StatusCode = self.into();

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

impl From<Error> for StatusCode {
    fn from(error: Error) -> Self {
        match error {
            Error::Server(c, _) => c,
            Error::Quiz(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Error::Quiz(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
