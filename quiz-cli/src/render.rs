use std::fmt::Write;

use quiz_utils::session::{OptionMark, QuestionView, View};

pub fn render(view: &View<'_>) -> String {
    match view {
        View::Question(question) => render_question(question),
        View::Completed { score, band } => {
            format!("\nQuiz Completed!\n\n  {score}\n  {}\n", band.message())
        }
    }
}

fn render_question(view: &QuestionView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nQuestion {} of {}", view.number, view.total);
    let _ = writeln!(out, "{}\n", view.question);

    for option in &view.options {
        let marker = match option.mark {
            OptionMark::Selectable | OptionMark::Neutral => ' ',
            OptionMark::Correct => '✓',
            OptionMark::Incorrect => '✗',
        };
        let _ = writeln!(out, "  {marker} {}", option.text);
    }

    if let Some(feedback) = &view.feedback {
        let verdict = if feedback.correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect. The answer is {}.", feedback.correct_answer)
        };
        let _ = writeln!(out, "\n{verdict}\n{}", feedback.explanation);
    }

    let _ = writeln!(out, "\nScore: {}", view.score);
    out
}
