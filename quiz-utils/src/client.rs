use serde_json::Value;

use crate::quiz::{Difficulty, Quiz, QuizRequest};
use crate::session::QuizSession;

pub const DEFAULT_NUM_QUESTIONS: u8 = 5;

/// Shown when the server gives no usable error message
pub const GENERIC_FAILURE: &str = "Failed to generate quiz";

/// The quiz request form. Fields stay filled in after a failed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizForm {
    pub topic: String,
    pub subject: String,
    pub grade: String,
    pub num_questions: u8,
    pub difficulty: Difficulty,
    loading: bool,
    error: Option<String>,
}

impl Default for QuizForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            subject: String::new(),
            grade: String::new(),
            num_questions: DEFAULT_NUM_QUESTIONS,
            difficulty: Difficulty::default(),
            loading: false,
            error: None,
        }
    }
}

impl QuizForm {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Last failure, cleared on the next submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn to_request(&self) -> QuizRequest {
        QuizRequest {
            topic: Some(self.topic.clone()),
            subject: Some(self.subject.clone()),
            grade: Some(self.grade.clone()),
            num_questions: Some(Value::from(self.num_questions)),
            difficulty: Some(self.difficulty.to_string()),
            question_type: None,
        }
    }

    /// Returns the request to send, or `None` while a request is already pending.
    pub fn submit(&mut self) -> Option<QuizRequest> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.to_request())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Form(QuizForm),
    Quiz(QuizSession),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Form(QuizForm::default())
    }
}

impl Screen {
    /// Applies the outcome of a submitted request.
    ///
    /// Responses that arrive when nothing is pending are dropped.
    pub fn receive(&mut self, result: Result<Quiz, String>) {
        let Screen::Form(form) = self else {
            return;
        };
        if !form.loading {
            return;
        }
        form.loading = false;

        let session =
            result.and_then(|quiz| QuizSession::new(quiz).map_err(|e| e.public_message()));
        match session {
            Ok(session) => *self = Screen::Quiz(session),
            Err(message) => {
                if let Screen::Form(form) = self {
                    form.error = Some(message);
                }
            }
        }
    }

    /// Discards the finished quiz and goes back to an empty form.
    ///
    /// Only available once the quiz is completed.
    pub fn restart(&mut self) -> bool {
        if !matches!(self, Screen::Quiz(session) if session.is_completed()) {
            return false;
        }
        *self = Screen::default();
        true
    }

    pub fn form_mut(&mut self) -> Option<&mut QuizForm> {
        match self {
            Screen::Form(form) => Some(form),
            Screen::Quiz(_) => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        match self {
            Screen::Quiz(session) => Some(session),
            Screen::Form(_) => None,
        }
    }
}
