use crate::quiz::{Difficulty, QuizParams};

const RESPONSE_SCHEMA: &str = r#"{
  "questions": [
    {
      "question": "What is the question?",
      "options": [
        "A) First option",
        "B) Second option",
        "C) Third option",
        "D) Fourth option"
      ],
      "correctAnswer": "A",
      "explanation": "Explanation for why A is correct"
    }
  ]
}"#;

impl Difficulty {
    /// Kind of thinking questions of this difficulty should ask for
    pub fn cognitive_focus(&self) -> &'static str {
        match self {
            Difficulty::Easy => "recall of basic facts and definitions",
            Difficulty::Medium => "application and analysis of concepts",
            Difficulty::Hard => "synthesis and evaluation",
        }
    }
}

/// Builds the generation prompt.
///
/// Same parameters always produce the same prompt.
pub fn build_prompt(params: &QuizParams) -> String {
    let QuizParams {
        topic,
        subject,
        grade,
        num_questions,
        difficulty,
    } = params;

    let tiers = Difficulty::ALL
        .iter()
        .map(|d| format!("   - {d}: {}", d.cognitive_focus()))
        .collect::<Vec<_>>()
        .join("\n");
    let focus = difficulty.cognitive_focus();

    format!(
        r#"You are an expert quiz generator. Create a {num_questions}-question multiple-choice quiz about {topic} in {subject} for {grade} level students with {difficulty} difficulty.

Instructions:
1. Each question should be clear, focused, and appropriate for the grade level
2. Provide exactly 4 options, written as "A) ...", "B) ...", "C) ..." and "D) ..."
3. Exactly one option is correct; put its label (A, B, C or D) in "correctAnswer"
4. Add a brief explanation for the correct answer
5. Make sure the questions and answers are accurate and educational
6. Match the cognitive demand to the difficulty level:
{tiers}
7. This quiz is {difficulty}, so focus on {focus}

Return the response in this exact JSON format:
{RESPONSE_SCHEMA}

Important: Return ONLY the JSON object, with no other text, no markdown and no code fences."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(difficulty: Difficulty) -> QuizParams {
        QuizParams {
            topic: "World War II".to_string(),
            subject: "History".to_string(),
            grade: "College".to_string(),
            num_questions: 3,
            difficulty,
        }
    }

    #[test]
    fn prompt_embeds_parameters() {
        let prompt = build_prompt(&params(Difficulty::Hard));
        assert!(prompt.contains(
            "Create a 3-question multiple-choice quiz about World War II in History for College level students with hard difficulty."
        ));
        assert!(prompt.contains("This quiz is hard, so focus on synthesis and evaluation"));
        assert!(prompt.contains("\"correctAnswer\": \"A\""));
        assert!(prompt.ends_with("no markdown and no code fences."));
    }

    #[test]
    fn prompt_lists_every_difficulty_tier() {
        let prompt = build_prompt(&params(Difficulty::Easy));
        assert!(prompt.contains("   - easy: recall of basic facts and definitions"));
        assert!(prompt.contains("   - medium: application and analysis of concepts"));
        assert!(prompt.contains("   - hard: synthesis and evaluation"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(
            build_prompt(&params(Difficulty::Medium)),
            build_prompt(&params(Difficulty::Medium))
        );
        assert_ne!(
            build_prompt(&params(Difficulty::Medium)),
            build_prompt(&params(Difficulty::Easy))
        );
    }
}
