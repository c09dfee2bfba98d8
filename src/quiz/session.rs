use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::quiz::catalog::Catalog;
use crate::quiz::error::{CatalogError, QuizError};
use crate::quiz::resolver;
use crate::quiz::{Answer, Gender, PersonalityType, Question, Scores};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Intro,
    GenderSelect,
    InProgress,
    Complete,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Intro => "intro",
            Step::GenderSelect => "gender-select",
            Step::InProgress => "in-progress",
            Step::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based number of the question on screen.
    pub number: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone)]
enum Phase {
    Intro,
    GenderSelect,
    InProgress {
        gender: Gender,
        index: usize,
        scores: Scores,
        displayed: Vec<Answer>,
    },
    Complete {
        gender: Gender,
        index: usize,
        scores: Scores,
        result: PersonalityType,
    },
}

/// One run through the quiz: intro, gender, the questions, then the result.
///
/// Every operation that is not legal in the current step returns
/// [`QuizError::InvalidTransition`] and leaves the session untouched.
#[derive(Debug, Clone)]
pub struct QuizSession {
    catalog: Arc<Catalog>,
    phase: Phase,
}

impl QuizSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            phase: Phase::Intro,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn step(&self) -> Step {
        match self.phase {
            Phase::Intro => Step::Intro,
            Phase::GenderSelect => Step::GenderSelect,
            Phase::InProgress { .. } => Step::InProgress,
            Phase::Complete { .. } => Step::Complete,
        }
    }

    /// 0 before the questions start; frozen at the last index once complete.
    pub fn current_question_index(&self) -> usize {
        match self.phase {
            Phase::InProgress { index, .. } | Phase::Complete { index, .. } => index,
            _ => 0,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress { index, .. } => self.catalog.question(index),
            _ => None,
        }
    }

    /// Answers of the current question in the order they are shown.
    pub fn displayed_answers(&self) -> &[Answer] {
        match &self.phase {
            Phase::InProgress { displayed, .. } => displayed,
            _ => &[],
        }
    }

    pub fn scores(&self) -> Scores {
        match self.phase {
            Phase::InProgress { scores, .. } | Phase::Complete { scores, .. } => scores,
            _ => Scores::default(),
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        match self.phase {
            Phase::InProgress { gender, .. } | Phase::Complete { gender, .. } => Some(gender),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&PersonalityType> {
        match &self.phase {
            Phase::Complete { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<Progress> {
        let Phase::InProgress { index, .. } = self.phase else {
            return None;
        };
        let total = self.catalog.question_count();
        Some(Progress {
            number: index + 1,
            total,
            percent: ((index + 1) * 100 / total) as u32,
        })
    }

    pub fn start(&mut self) -> Result<(), QuizError> {
        if !matches!(self.phase, Phase::Intro) {
            return Err(self.invalid("start"));
        }
        self.phase = Phase::GenderSelect;
        log::debug!("quiz started, waiting for gender");
        Ok(())
    }

    pub fn select_gender<R: Rng + ?Sized>(
        &mut self,
        gender: Gender,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        if !matches!(self.phase, Phase::GenderSelect) {
            return Err(self.invalid("select a gender"));
        }
        let first = self
            .catalog
            .questions()
            .first()
            .ok_or(CatalogError::NoQuestions)?;

        self.phase = Phase::InProgress {
            gender,
            index: 0,
            scores: Scores::default(),
            displayed: shuffled(&first.answers, rng),
        };
        log::debug!("gender {} selected, first question shown", gender.key());
        Ok(())
    }

    /// Scores the displayed answer at `choice` and moves on. Returns the step
    /// the session is in afterwards.
    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        choice: usize,
        rng: &mut R,
    ) -> Result<Step, QuizError> {
        let step = self.step();
        let Phase::InProgress {
            gender,
            index,
            scores,
            displayed,
        } = &mut self.phase
        else {
            return Err(QuizError::InvalidTransition {
                action: "answer a question",
                step,
            });
        };

        let picked = displayed
            .get(choice)
            .ok_or(QuizError::AnswerOutOfRange {
                index: choice,
                len: displayed.len(),
            })?
            .scores;
        let mut total = *scores;
        total += picked;

        if *index + 1 < self.catalog.question_count() {
            *scores = total;
            *index += 1;
            *displayed = shuffled(&self.catalog.questions()[*index].answers, rng);
            log::debug!(
                "moved to question {} (teto={} egen={})",
                *index + 1,
                total.teto,
                total.egen
            );
            return Ok(Step::InProgress);
        }

        let (gender, index) = (*gender, *index);
        let result = resolver::resolve(&self.catalog, gender, total)?.clone();
        log::info!(
            "quiz complete: {} (teto={} egen={})",
            result.id,
            total.teto,
            total.egen
        );
        self.phase = Phase::Complete {
            gender,
            index,
            scores: total,
            result,
        };
        Ok(Step::Complete)
    }

    /// Back to the intro from any step, dropping everything collected so far.
    pub fn restart(&mut self) {
        log::info!("quiz restarted from step {}", self.step());
        self.phase = Phase::Intro;
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            step: self.step(),
        }
    }
}

/// Fresh copy of `items` in a uniformly random order (Fisher–Yates).
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut items = items.to_vec();
    items.shuffle(rng);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> QuizSession {
        QuizSession::new(Arc::new(Catalog::builtin().unwrap()))
    }

    fn in_progress(gender: Gender, rng: &mut StdRng) -> QuizSession {
        let mut session = session();
        session.start().unwrap();
        session.select_gender(gender, rng).unwrap();
        session
    }

    /// Index of the displayed answer that maximizes `key`.
    fn best_by(session: &QuizSession, key: impl Fn(&Scores) -> u32) -> usize {
        session
            .displayed_answers()
            .iter()
            .enumerate()
            .max_by_key(|(_, a)| key(&a.scores))
            .map(|(i, _)| i)
            .unwrap()
    }

    fn sorted_texts(answers: &[Answer]) -> Vec<String> {
        let mut texts: Vec<String> = answers.iter().map(|a| a.text.clone()).collect();
        texts.sort();
        texts
    }

    #[test]
    fn new_session_is_at_intro_with_nothing_collected() {
        let session = session();
        assert_eq!(session.step(), Step::Intro);
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.scores(), Scores::default());
        assert_eq!(session.gender(), None);
        assert!(session.result().is_none());
        assert!(session.displayed_answers().is_empty());
        assert!(session.progress().is_none());
    }

    #[test]
    fn start_moves_to_gender_select_once() {
        let mut session = session();
        session.start().unwrap();
        assert_eq!(session.step(), Step::GenderSelect);

        let err = session.start().unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidTransition {
                action: "start",
                step: Step::GenderSelect
            }
        );
    }

    #[test]
    fn gender_cannot_be_selected_from_intro() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = session();
        let err = session.select_gender(Gender::Male, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                step: Step::Intro,
                ..
            }
        ));
        assert_eq!(session.step(), Step::Intro);
    }

    #[test]
    fn answer_is_rejected_before_questions_start() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = session();
        session.start().unwrap();

        let err = session.answer(0, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                step: Step::GenderSelect,
                ..
            }
        ));
        assert_eq!(session.scores(), Scores::default());
    }

    #[test]
    fn selecting_gender_shows_first_question_shuffled() {
        let mut rng = StdRng::seed_from_u64(3);
        let session = in_progress(Gender::Female, &mut rng);

        assert_eq!(session.step(), Step::InProgress);
        assert_eq!(session.gender(), Some(Gender::Female));
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.scores(), Scores::default());

        let question = session.current_question().unwrap();
        assert_eq!(question.id, 1);
        assert_eq!(
            sorted_texts(session.displayed_answers()),
            sorted_texts(&question.answers)
        );
    }

    #[test]
    fn shuffle_keeps_every_answer_of_every_question() {
        let mut rng = StdRng::seed_from_u64(4);
        let catalog = Catalog::builtin().unwrap();
        for question in catalog.questions() {
            for _ in 0..20 {
                let shown = shuffled(&question.answers, &mut rng);
                assert_eq!(shown.len(), question.answers.len());
                for answer in &question.answers {
                    assert_eq!(
                        shown.iter().filter(|a| *a == answer).count(),
                        1,
                        "question {} lost or duplicated '{}'",
                        question.id,
                        answer.text
                    );
                }
            }
        }
    }

    #[test]
    fn shuffle_spreads_each_item_over_all_positions() {
        const TRIALS: usize = 8000;
        let mut rng = StdRng::seed_from_u64(5);
        let items = [0usize, 1, 2, 3];
        let mut counts = [[0usize; 4]; 4];

        for _ in 0..TRIALS {
            for (position, item) in shuffled(&items, &mut rng).into_iter().enumerate() {
                counts[item][position] += 1;
            }
        }

        // Expected 2000 per cell; a uniform shuffle stays well inside ±10%.
        for (item, row) in counts.iter().enumerate() {
            for (position, &count) in row.iter().enumerate() {
                assert!(
                    (1800..=2200).contains(&count),
                    "item {} landed at position {} {} times",
                    item,
                    position,
                    count
                );
            }
        }
    }

    #[test]
    fn answering_adds_the_displayed_answer_and_advances() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = in_progress(Gender::Male, &mut rng);
        let expected = session.displayed_answers()[2].scores;

        let step = session.answer(2, &mut rng).unwrap();

        assert_eq!(step, Step::InProgress);
        assert_eq!(session.scores(), expected);
        assert_eq!(session.current_question_index(), 1);
        assert_eq!(session.current_question().unwrap().id, 2);
        assert_eq!(
            sorted_texts(session.displayed_answers()),
            sorted_texts(&session.current_question().unwrap().answers)
        );
    }

    #[test]
    fn out_of_range_answer_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = in_progress(Gender::Male, &mut rng);
        session.answer(0, &mut rng).unwrap();
        let scores = session.scores();
        let shown = session.displayed_answers().to_vec();

        let err = session.answer(4, &mut rng).unwrap_err();

        assert_eq!(err, QuizError::AnswerOutOfRange { index: 4, len: 4 });
        assert_eq!(session.scores(), scores);
        assert_eq!(session.current_question_index(), 1);
        assert_eq!(session.displayed_answers(), shown.as_slice());
    }

    #[test]
    fn progress_tracks_the_question_on_screen() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut session = in_progress(Gender::Female, &mut rng);
        assert_eq!(
            session.progress(),
            Some(Progress {
                number: 1,
                total: 10,
                percent: 10
            })
        );

        for _ in 0..4 {
            session.answer(0, &mut rng).unwrap();
        }
        assert_eq!(session.progress().unwrap().number, 5);
        assert_eq!(session.progress().unwrap().percent, 50);
    }

    #[test]
    fn all_teto_answers_as_male_give_teto_male() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = in_progress(Gender::Male, &mut rng);

        for _ in 0..9 {
            let choice = best_by(&session, |s| s.teto);
            assert_eq!(session.answer(choice, &mut rng).unwrap(), Step::InProgress);
        }
        let choice = best_by(&session, |s| s.teto);
        assert_eq!(session.answer(choice, &mut rng).unwrap(), Step::Complete);

        assert_eq!(session.step(), Step::Complete);
        assert_eq!(session.scores(), Scores::new(30, 0));
        assert!(session.scores().teto > session.scores().egen);
        assert_eq!(session.result().unwrap().id, "teto_male");
        assert_eq!(session.current_question_index(), 9);
        assert!(session.displayed_answers().is_empty());
    }

    #[test]
    fn all_egen_answers_as_female_give_egen_female() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut session = in_progress(Gender::Female, &mut rng);

        while session.step() == Step::InProgress {
            let choice = best_by(&session, |s| s.egen);
            session.answer(choice, &mut rng).unwrap();
        }

        assert_eq!(session.scores(), Scores::new(0, 30));
        assert_eq!(session.result().unwrap().id, "egen_female");
    }

    #[test]
    fn final_scores_do_not_depend_on_display_order() {
        // Same answer text per question, different shuffles.
        let wanted = |question: &Question| question.answers[2].text.clone();
        let mut finals = Vec::new();

        for seed in [11, 12, 13] {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = in_progress(Gender::Male, &mut rng);
            while session.step() == Step::InProgress {
                let text = wanted(session.current_question().unwrap());
                let choice = session
                    .displayed_answers()
                    .iter()
                    .position(|a| a.text == text)
                    .unwrap();
                session.answer(choice, &mut rng).unwrap();
            }
            finals.push(session.scores());
        }

        let catalog = Catalog::builtin().unwrap();
        let mut forward = Scores::default();
        for question in catalog.questions() {
            forward += question.answers[2].scores;
        }
        let mut backward = Scores::default();
        for question in catalog.questions().iter().rev() {
            backward += question.answers[2].scores;
        }

        assert_eq!(forward, backward);
        assert!(finals.iter().all(|s| *s == forward));
    }

    #[test]
    fn answer_after_completion_is_rejected() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut session = in_progress(Gender::Male, &mut rng);
        while session.step() == Step::InProgress {
            session.answer(1, &mut rng).unwrap();
        }
        let scores = session.scores();

        let err = session.answer(0, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            QuizError::InvalidTransition {
                step: Step::Complete,
                ..
            }
        ));
        assert_eq!(session.scores(), scores);
    }

    #[test]
    fn restart_after_completion_resets_everything() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut session = in_progress(Gender::Female, &mut rng);
        while session.step() == Step::InProgress {
            session.answer(0, &mut rng).unwrap();
        }
        assert!(session.result().is_some());

        session.restart();

        assert_eq!(session.step(), Step::Intro);
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.scores(), Scores::default());
        assert_eq!(session.gender(), None);
        assert!(session.result().is_none());
        assert!(session.displayed_answers().is_empty());
    }

    #[test]
    fn restart_mid_quiz_allows_a_new_run() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut session = in_progress(Gender::Male, &mut rng);
        session.answer(0, &mut rng).unwrap();

        session.restart();
        session.start().unwrap();
        session.select_gender(Gender::Female, &mut rng).unwrap();

        assert_eq!(session.gender(), Some(Gender::Female));
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.scores(), Scores::default());
    }
}
