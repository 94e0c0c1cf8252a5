use std::io;

use clap::Parser;
use quiz_utils::{
    client::{DEFAULT_NUM_QUESTIONS, QuizForm, Screen},
    quiz::Difficulty,
    session::{Phase, View},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod render;
mod terminal;

use api::Api;
use terminal::Prompt;

/// Generate a multiple-choice quiz and take it in the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Base URL of the quiz service
    #[arg(long, env = "QUIZ_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,
    #[arg(long, default_value = "")]
    topic: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    grade: String,
    #[arg(short, long, default_value_t = DEFAULT_NUM_QUESTIONS)]
    num_questions: u8,
    #[arg(short, long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
}

impl Args {
    fn form(&self) -> QuizForm {
        let mut form = QuizForm::default();
        form.topic = self.topic.clone();
        form.subject = self.subject.clone();
        form.grade = self.grade.clone();
        form.num_questions = self.num_questions;
        form.difficulty = self.difficulty;
        form
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    info!(server = %args.server, "starting");
    let api = Api::new(&args.server);
    let mut prompt = Prompt::new(io::stdin().lock(), io::stdout());
    let mut screen = Screen::Form(args.form());

    loop {
        match &mut screen {
            Screen::Form(form) => {
                if let Some(error) = form.error() {
                    prompt.say(&format!("\n✗ {error}\n"))?;
                }
                if !prompt.fill_form(form)? {
                    break;
                }
                let Some(request) = form.submit() else {
                    continue;
                };
                prompt.say("Generating Quiz...")?;
                let result = api.generate_quiz(&request).await;
                screen.receive(result);
                if matches!(screen, Screen::Quiz(_)) {
                    prompt.say("Quiz generated successfully!")?;
                }
            }
            Screen::Quiz(session) => {
                prompt.say(&render::render(&session.view()))?;
                match session.phase() {
                    Phase::Answering(_) => {
                        let Some(label) = prompt.answer()? else {
                            break;
                        };
                        session.select_answer(label);
                    }
                    Phase::Reviewing { .. } => {
                        let action = match session.view() {
                            View::Question(view) => view.next_action(),
                            View::Completed { .. } => "Continue",
                        };
                        if prompt.line(&format!("[Enter] {action} "))?.is_none() {
                            break;
                        }
                        session.advance();
                    }
                    Phase::Completed => {
                        if !prompt.confirm("Start a new quiz?")? {
                            break;
                        }
                        screen.restart();
                    }
                }
            }
        }
    }

    Ok(())
}
