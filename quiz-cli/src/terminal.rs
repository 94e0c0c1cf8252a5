use std::io::{self, BufRead, Write};

use quiz_utils::{
    client::QuizForm,
    quiz::{Difficulty, Label, MAX_QUESTIONS, MIN_QUESTIONS},
};

/// Line-based prompts over any reader and writer
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Reads one trimmed line. `None` at end of input.
    pub fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for a value, keeping `current` when the answer is empty.
    pub fn ask(&mut self, question: &str, current: &str) -> io::Result<Option<String>> {
        let prompt = if current.is_empty() {
            format!("{question}: ")
        } else {
            format!("{question} [{current}]: ")
        };
        Ok(self
            .line(&prompt)?
            .map(|answer| if answer.is_empty() { current.to_string() } else { answer }))
    }

    /// Asks until the answer parses.
    fn ask_parsed<T: std::str::FromStr>(
        &mut self,
        question: &str,
        current: &str,
        hint: &str,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question, current)? else {
                return Ok(None);
            };
            match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(hint)?,
            }
        }
    }

    /// Lets the user confirm or edit every form field. `false` at end of input.
    pub fn fill_form(&mut self, form: &mut QuizForm) -> io::Result<bool> {
        let Some(topic) = self.ask("Topic", &form.topic)? else {
            return Ok(false);
        };
        let Some(subject) = self.ask("Subject", &form.subject)? else {
            return Ok(false);
        };
        let Some(grade) = self.ask("Grade", &form.grade)? else {
            return Ok(false);
        };
        let count_hint = format!("Enter a number from {MIN_QUESTIONS} to {MAX_QUESTIONS}");
        let Some(num_questions) =
            self.ask_parsed("Number of questions", &form.num_questions.to_string(), &count_hint)?
        else {
            return Ok(false);
        };
        let difficulty_hint = format!(
            "Enter one of {}",
            Difficulty::ALL.map(|d| d.as_str()).join(", ")
        );
        let Some(difficulty) =
            self.ask_parsed("Difficulty", form.difficulty.as_str(), &difficulty_hint)?
        else {
            return Ok(false);
        };

        form.topic = topic;
        form.subject = subject;
        form.grade = grade;
        form.num_questions = num_questions;
        form.difficulty = difficulty;
        Ok(true)
    }

    /// Reads an answer letter, re-asking on anything else.
    pub fn answer(&mut self) -> io::Result<Option<Label>> {
        loop {
            let Some(answer) = self.line("Your answer (A-D): ")? else {
                return Ok(None);
            };
            match answer.to_uppercase().parse() {
                Ok(label) => return Ok(Some(label)),
                Err(_) => self.say("Choose A, B, C or D")?,
            }
        }
    }

    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.line(&format!("{question} [y/N]: "))?;
        Ok(answer.is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes")))
    }
}
