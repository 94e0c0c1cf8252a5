use quiz_utils::{
    error::Error,
    generation::parse_quiz,
    prompt::build_prompt,
    quiz::{Quiz, QuizRequest},
};
use tracing::{debug, error, info, warn};

use crate::gemini::TextGenerator;

/// Validates the request, asks the generator for a quiz and validates the answer.
///
/// Invalid requests never reach the generator. The raw generator output is only
/// logged when it cannot be used.
#[tracing::instrument(skip_all)]
pub async fn generate_quiz(
    generator: &dyn TextGenerator,
    request: &QuizRequest,
) -> Result<Quiz, Error> {
    let params = request.validate().inspect_err(|e| {
        warn!("Rejected quiz request: {e}");
    })?;

    info!(
        topic = %params.topic,
        subject = %params.subject,
        grade = %params.grade,
        num_questions = params.num_questions,
        difficulty = %params.difficulty,
        "generating quiz"
    );
    let prompt = build_prompt(&params);
    debug!(len = prompt.len(), "built prompt");

    let raw = generator.generate(&prompt).await?;

    let quiz = parse_quiz(&raw).inspect_err(|e| {
        error!(raw = %raw, "Error parsing generated quiz: {e}");
    })?;

    info!(questions = quiz.len(), "quiz generated");
    Ok(quiz)
}
