//! Turns one chat message into quiz transitions plus what to send back.
//!
//! Kept free of Telegram types so the conversation can be driven in tests.

use rand::Rng;

use crate::messages;
use crate::quiz::error::QuizError;
use crate::quiz::session::{QuizSession, Step};
use crate::quiz::Gender;
use crate::sponsor::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyboard {
    Start,
    Gender,
    Answers,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Intro,
    GenderPrompt,
    Question,
    Result,
    Hint(&'static str, Option<Keyboard>),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub replies: Vec<Reply>,
    /// Sponsor slots to queue. A slot is queued when its screen first
    /// appears, never on a re-prompt.
    pub ads: Vec<Placement>,
    /// Whether the session moved and has to be stored again.
    pub advanced: bool,
}

impl Outcome {
    fn hint(text: &'static str, keyboard: Option<Keyboard>) -> Self {
        Self {
            replies: vec![Reply::Hint(text, keyboard)],
            ..Self::default()
        }
    }
}

pub fn is_restart(text: &str) -> bool {
    text == messages::RESTART_BUTTON || text == "/restart" || text == "/start"
}

pub fn handle_text<R: Rng + ?Sized>(
    session: &mut QuizSession,
    text: &str,
    rng: &mut R,
) -> Result<Outcome, QuizError> {
    if is_restart(text) {
        session.restart();
        return Ok(Outcome {
            replies: vec![Reply::Intro],
            ads: vec![Placement::Intro],
            advanced: true,
        });
    }

    match session.step() {
        Step::Intro => {
            if text != messages::START_BUTTON {
                return Ok(Outcome::hint(messages::PRESS_START, Some(Keyboard::Start)));
            }
            session.start()?;
            Ok(Outcome {
                replies: vec![Reply::GenderPrompt],
                ads: vec![],
                advanced: true,
            })
        }
        Step::GenderSelect => {
            let gender = match text {
                messages::MALE_BUTTON => Gender::Male,
                messages::FEMALE_BUTTON => Gender::Female,
                _ => {
                    return Ok(Outcome::hint(
                        messages::PICK_A_GENDER,
                        Some(Keyboard::Gender),
                    ))
                }
            };
            session.select_gender(gender, rng)?;
            Ok(new_question(session))
        }
        Step::InProgress => {
            let Some(choice) = session
                .displayed_answers()
                .iter()
                .position(|a| a.text == text)
            else {
                return Ok(Outcome {
                    replies: vec![Reply::Hint(messages::PICK_AN_ANSWER, None), Reply::Question],
                    ads: vec![],
                    advanced: false,
                });
            };
            match session.answer(choice, rng)? {
                Step::Complete => Ok(Outcome {
                    replies: vec![Reply::Result],
                    ads: vec![Placement::Result],
                    advanced: true,
                }),
                _ => Ok(new_question(session)),
            }
        }
        Step::Complete => Ok(Outcome::hint(
            messages::PRESS_RESTART,
            Some(Keyboard::Restart),
        )),
    }
}

fn new_question(session: &QuizSession) -> Outcome {
    Outcome {
        replies: vec![Reply::Question],
        ads: Placement::for_question(session.current_question_index())
            .into_iter()
            .collect(),
        advanced: true,
    }
}
