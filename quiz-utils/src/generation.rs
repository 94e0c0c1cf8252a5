use serde_json::Value;
use tracing::trace;

use crate::error::{Error, ShapeError};
use crate::quiz::{Label, Question, Quiz};

/// Removes a surrounding markdown code fence, e.g. ```` ```json\n{...}\n``` ````.
///
/// Models sometimes wrap the JSON despite being told not to.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Cleans, parses and validates raw generator output.
pub fn parse_quiz(raw: &str) -> Result<Quiz, Error> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned).map_err(Error::MalformedResponse)?;
    let quiz = validate_quiz(&value)?;
    Ok(quiz)
}

/// Given parsed generator output, validate it for basic properties:
/// 1) `questions` is a non-empty array
/// 2) Each question has non-empty `question` and `explanation` strings
/// 3) Each question has exactly 4 string options, labelled A-D without duplicates
/// 4) Each `correctAnswer` is one of A, B, C, D
///
/// The content is kept as is. Whether `correctAnswer` is actually right is not checked.
pub fn validate_quiz(value: &Value) -> Result<Quiz, ShapeError> {
    let questions = value
        .get("questions")
        .and_then(Value::as_array)
        .ok_or(ShapeError::Questions)?;

    if questions.is_empty() {
        return Err(ShapeError::NoQuestions);
    }

    let questions = questions
        .iter()
        .enumerate()
        .map(|(index, q)| validate_question(index, q))
        .collect::<Result<Vec<_>, _>>()?;

    trace!(questions = questions.len(), "quiz passed validation");

    Ok(Quiz { questions })
}

fn validate_question(index: usize, value: &Value) -> Result<Question, ShapeError> {
    let invalid = |field, problem| ShapeError::Question {
        index,
        field,
        problem,
    };

    let question = non_empty_str(value, "question")
        .ok_or_else(|| invalid("question", "must be a non-empty string"))?;

    let options = value
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("options", "must be an array"))?;
    if options.len() != 4 {
        return Err(invalid("options", "must contain exactly 4 entries"));
    }
    let options = options
        .iter()
        .map(|o| o.as_str().map(str::to_string))
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| invalid("options", "must only contain strings"))?;

    let mut labels = Vec::with_capacity(4);
    for option in &options {
        match Label::of_option(option) {
            Some(label) if labels.contains(&label) => {
                return Err(invalid("options", "must not repeat a label"));
            }
            Some(label) => labels.push(label),
            None => return Err(invalid("options", "must start with a label A-D")),
        }
    }

    let correct_answer = value
        .get("correctAnswer")
        .and_then(Value::as_str)
        .and_then(exact_label)
        .ok_or_else(|| invalid("correctAnswer", "must be one of A, B, C, D"))?;

    let explanation = non_empty_str(value, "explanation")
        .ok_or_else(|| invalid("explanation", "must be a non-empty string"))?;

    let options: [String; 4] = options
        .try_into()
        .map_err(|_| invalid("options", "must contain exactly 4 entries"))?;

    Ok(Question {
        question: question.to_string(),
        options,
        correct_answer,
        explanation: explanation.to_string(),
    })
}

/// The answer is echoed back, so it must already be exactly one label letter
fn exact_label(answer: &str) -> Option<Label> {
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Label::from_char(c),
        _ => None,
    }
}

fn non_empty_str<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
