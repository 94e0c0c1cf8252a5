use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

pub const MIN_QUESTIONS: u8 = 1;
pub const MAX_QUESTIONS: u8 = 10;

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const QUESTION_COUNT_OUT_OF_RANGE: &str = "Number of questions must be between 1 and 10";
pub const INVALID_DIFFICULTY: &str = "Difficulty must be one of easy, medium or hard";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidRequest(INVALID_DIFFICULTY.to_string())),
        }
    }
}

/// Quiz parameters as submitted by the form.
///
/// Every field is optional on the wire, so presence is checked by [`QuizRequest::validate`]
/// instead of failing deserialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Number or numeric string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_questions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Sent by some forms, not used for generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
}

/// Validated parameters, ready to be turned into a prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizParams {
    pub topic: String,
    pub subject: String,
    pub grade: String,
    pub num_questions: u8,
    pub difficulty: Difficulty,
}

impl QuizRequest {
    /// Reads a request from any JSON body without failing.
    ///
    /// Numbers given for text fields are used as text. Anything that is not an object, and any
    /// field of an unusable type, ends up missing.
    pub fn from_json(body: &Value) -> Self {
        Self {
            topic: text_field(body, "topic"),
            subject: text_field(body, "subject"),
            grade: text_field(body, "grade"),
            num_questions: body.get("numQuestions").cloned(),
            difficulty: text_field(body, "difficulty"),
            question_type: text_field(body, "questionType"),
        }
    }

    /// Checks the request in order:
    /// 1) All required fields present
    /// 2) `numQuestions` within `MIN_QUESTIONS..=MAX_QUESTIONS`
    /// 3) `difficulty` is known
    pub fn validate(&self) -> Result<QuizParams, Error> {
        let (Some(topic), Some(subject), Some(grade), Some(num_questions), Some(difficulty)) = (
            present(&self.topic),
            present(&self.subject),
            present(&self.grade),
            present_value(&self.num_questions),
            present(&self.difficulty),
        ) else {
            return Err(Error::InvalidRequest(MISSING_FIELDS.to_string()));
        };

        let num_questions = question_count(num_questions)
            .ok_or_else(|| Error::InvalidRequest(QUESTION_COUNT_OUT_OF_RANGE.to_string()))?;
        let difficulty = difficulty.parse()?;

        Ok(QuizParams {
            topic: topic.to_string(),
            subject: subject.to_string(),
            grade: grade.to_string(),
            num_questions,
            difficulty,
        })
    }
}

fn text_field(body: &Value, name: &str) -> Option<String> {
    match body.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn present_value(field: &Option<Value>) -> Option<&Value> {
    match field {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

/// Whole numbers only, so `5.0` is accepted and `2.5` is not
fn question_count(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.fract() != 0.0 || n < f64::from(MIN_QUESTIONS) || n > f64::from(MAX_QUESTIONS) {
        return None;
    }
    Some(n as u8)
}

/// Answer label, the leading character of an option such as `"B) Paris"`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    A,
    B,
    C,
    D,
}

impl Label {
    pub const ALL: [Label; 4] = [Label::A, Label::B, Label::C, Label::D];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Label::A),
            'B' => Some(Label::B),
            'C' => Some(Label::C),
            'D' => Some(Label::D),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Label::A => 'A',
            Label::B => 'B',
            Label::C => 'C',
            Label::D => 'D',
        }
    }

    /// Label of an option, taken from its first character
    pub fn of_option(option: &str) -> Option<Self> {
        option.chars().next().and_then(Label::from_char)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next().and_then(Label::from_char), chars.next()) {
            (Some(label), None) => Ok(label),
            _ => Err(Error::InvalidRequest(format!("{s:?} is not an answer label"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    /// Each option starts with its label: `"A) ..."` through `"D) ..."`
    pub options: [String; 4],
    pub correct_answer: Label,
    pub explanation: String,
}

impl Question {
    pub fn option(&self, label: Label) -> Option<&str> {
        self.options
            .iter()
            .find(|o| Label::of_option(o) == Some(label))
            .map(String::as_str)
    }

    pub fn is_correct(&self, label: Label) -> bool {
        self.correct_answer == label
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
