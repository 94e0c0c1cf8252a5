//! Taking a generated quiz.
//!
//! A [`QuizSession`] walks through the questions of one [`Quiz`]:
//!
//! ```text
//! Answering(i) --select_answer--> Reviewing(i) --advance--> Answering(i + 1)
//!                                              \--advance--> Completed (after the last question)
//! ```
//!
//! The quiz itself is never modified. Restarting is handled one level up, by
//! [`crate::client::Screen::restart`].
use std::fmt;

use crate::error::{Error, ShapeError};
use crate::quiz::{Label, Question, Quiz};

/// Minimum percentage of correct answers to pass
pub const PASS_PERCENT: usize = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Answering(usize),
    /// Answer locked in, explanation visible
    Reviewing { index: usize, selected: Label },
    Completed,
}

/// Result of trying to answer the current question
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Correct,
    Incorrect,
    /// Question already answered, or quiz completed
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub out_of: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.out_of)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreBand {
    Perfect,
    Pass,
    NeedsPractice,
}

impl ScoreBand {
    pub fn from_score(score: Score) -> Self {
        if score.correct >= score.out_of {
            ScoreBand::Perfect
        } else if score.correct * 100 >= score.out_of * PASS_PERCENT {
            ScoreBand::Pass
        } else {
            ScoreBand::NeedsPractice
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Perfect => "Perfect score! Excellent job!",
            ScoreBand::Pass => "Good job! You passed the quiz!",
            ScoreBand::NeedsPractice => "Keep practicing! You can do better next time.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSession {
    quiz: Quiz,
    phase: Phase,
    correct: usize,
}

impl QuizSession {
    /// Starts at the first question. A quiz without questions cannot be taken.
    pub fn new(quiz: Quiz) -> Result<Self, Error> {
        if quiz.is_empty() {
            return Err(ShapeError::NoQuestions.into());
        }
        Ok(Self {
            quiz,
            phase: Phase::Answering(0),
            correct: 0,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Answering(index) | Phase::Reviewing { index, .. } => {
                self.quiz.questions.get(index)
            }
            Phase::Completed => None,
        }
    }

    /// Locks in an answer for the current question.
    ///
    /// Only the first selection per question counts.
    pub fn select_answer(&mut self, label: Label) -> Selection {
        let Phase::Answering(index) = self.phase else {
            return Selection::Ignored;
        };
        let Some(question) = self.quiz.questions.get(index) else {
            return Selection::Ignored;
        };

        let selection = if question.is_correct(label) {
            self.correct += 1;
            Selection::Correct
        } else {
            Selection::Incorrect
        };
        self.phase = Phase::Reviewing {
            index,
            selected: label,
        };
        selection
    }

    /// Selects an option by position, using the label the option text starts with.
    pub fn select_option(&mut self, position: usize) -> Selection {
        let label = self
            .current_question()
            .and_then(|q| q.options.get(position))
            .and_then(|o| Label::of_option(o));
        match label {
            Some(label) => self.select_answer(label),
            None => Selection::Ignored,
        }
    }

    /// Moves past a reviewed question. Does nothing in any other phase.
    pub fn advance(&mut self) -> Phase {
        if let Phase::Reviewing { index, .. } = self.phase {
            self.phase = if index + 1 < self.quiz.len() {
                Phase::Answering(index + 1)
            } else {
                Phase::Completed
            };
        }
        self.phase
    }

    /// Running score while in progress, final score once completed
    pub fn score(&self) -> Score {
        let out_of = match self.phase {
            Phase::Answering(index) | Phase::Reviewing { index, .. } => index + 1,
            Phase::Completed => self.quiz.len(),
        };
        Score {
            correct: self.correct,
            out_of,
        }
    }

    pub fn band(&self) -> Option<ScoreBand> {
        self.is_completed().then(|| ScoreBand::from_score(self.score()))
    }

    /// Describes what should be on screen right now
    pub fn view(&self) -> View<'_> {
        let (index, selected) = match self.phase {
            Phase::Answering(index) => (index, None),
            Phase::Reviewing { index, selected } => (index, Some(selected)),
            Phase::Completed => {
                let score = self.score();
                return View::Completed {
                    score,
                    band: ScoreBand::from_score(score),
                };
            }
        };
        let question = &self.quiz.questions[index];

        let options = question
            .options
            .iter()
            .map(|text| {
                let label = Label::of_option(text);
                let mark = match (selected, label) {
                    (None, _) => OptionMark::Selectable,
                    (Some(_), Some(l)) if question.is_correct(l) => OptionMark::Correct,
                    (Some(s), Some(l)) if s == l => OptionMark::Incorrect,
                    (Some(_), _) => OptionMark::Neutral,
                };
                OptionView { label, text, mark }
            })
            .collect();

        let feedback = selected.map(|s| Feedback {
            correct: question.is_correct(s),
            correct_answer: question.correct_answer,
            explanation: &question.explanation,
        });

        View::Question(QuestionView {
            number: index + 1,
            total: self.quiz.len(),
            question: &question.question,
            options,
            score: self.score(),
            feedback,
            is_last: index + 1 == self.quiz.len(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View<'a> {
    Question(QuestionView<'a>),
    Completed { score: Score, band: ScoreBand },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionView<'a> {
    /// 1-based
    pub number: usize,
    pub total: usize,
    pub question: &'a str,
    pub options: Vec<OptionView<'a>>,
    pub score: Score,
    /// Present once an answer is selected
    pub feedback: Option<Feedback<'a>>,
    pub is_last: bool,
}

impl QuestionView<'_> {
    /// Label of the button that moves on
    pub fn next_action(&self) -> &'static str {
        if self.is_last {
            "Finish Quiz"
        } else {
            "Next Question"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView<'a> {
    pub label: Option<Label>,
    pub text: &'a str,
    pub mark: OptionMark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    /// No answer yet
    Selectable,
    Neutral,
    Correct,
    /// The wrong option that was selected
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub correct: bool,
    pub correct_answer: Label,
    pub explanation: &'a str,
}
