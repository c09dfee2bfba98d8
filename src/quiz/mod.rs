pub mod catalog;
pub mod error;
pub mod food_chain;
pub mod resolver;
pub mod session;

use std::fmt;
use std::ops::AddAssign;

/// One of the two latent trait axes the quiz scores against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trait {
    /// Testosterone-leaning disposition.
    Teto,
    /// Estrogen-leaning disposition.
    Egen,
}

impl Trait {
    pub fn key(self) -> &'static str {
        match self {
            Trait::Teto => "teto",
            Trait::Egen => "egen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn key(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Accumulated points on both axes. Only ever grows during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub teto: u32,
    pub egen: u32,
}

impl Scores {
    pub const fn new(teto: u32, egen: u32) -> Self {
        Self { teto, egen }
    }

    /// Axis with the strictly higher score. A tie goes to `Egen`.
    // NOTE: the tie-break is inherited as-is and may not be intentional.
    pub fn dominant(&self) -> Trait {
        if self.teto > self.egen {
            Trait::Teto
        } else {
            Trait::Egen
        }
    }

    pub fn is_empty(&self) -> bool {
        self.teto == 0 && self.egen == 0
    }
}

impl AddAssign for Scores {
    fn add_assign(&mut self, rhs: Self) {
        self.teto += rhs.teto;
        self.egen += rhs.egen;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn new(id: u32, text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            id,
            text: text.into(),
            answers,
        }
    }
}

/// A selectable answer. The score payload travels with the answer, so
/// reordering answers for display never changes what they are worth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub scores: Scores,
}

impl Answer {
    pub fn new(text: impl Into<String>, scores: Scores) -> Self {
        Self {
            text: text.into(),
            scores,
        }
    }
}

/// Identifies one of the four result profiles, written as `{trait}_{gender}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonalityKey {
    pub dominant: Trait,
    pub gender: Gender,
}

impl PersonalityKey {
    pub const fn new(dominant: Trait, gender: Gender) -> Self {
        Self { dominant, gender }
    }

    pub fn id(&self) -> String {
        self.to_string()
    }

    pub fn all() -> [PersonalityKey; 4] {
        [
            PersonalityKey::new(Trait::Teto, Gender::Male),
            PersonalityKey::new(Trait::Egen, Gender::Male),
            PersonalityKey::new(Trait::Teto, Gender::Female),
            PersonalityKey::new(Trait::Egen, Gender::Female),
        ]
    }
}

impl fmt::Display for PersonalityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.dominant.key(), self.gender.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalityType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub characteristics: Vec<String>,
    pub color: String,
    pub emoji: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_add_element_wise() {
        let mut scores = Scores::default();
        scores += Scores::new(3, 0);
        scores += Scores::new(1, 2);
        assert_eq!(scores, Scores::new(4, 2));
    }

    #[test]
    fn dominant_requires_strictly_higher_teto() {
        assert_eq!(Scores::new(6, 5).dominant(), Trait::Teto);
        assert_eq!(Scores::new(5, 6).dominant(), Trait::Egen);
        assert_eq!(Scores::new(5, 5).dominant(), Trait::Egen);
        assert_eq!(Scores::default().dominant(), Trait::Egen);
    }

    #[test]
    fn personality_key_formats_as_trait_then_gender() {
        assert_eq!(
            PersonalityKey::new(Trait::Teto, Gender::Male).id(),
            "teto_male"
        );
        assert_eq!(
            PersonalityKey::new(Trait::Egen, Gender::Female).id(),
            "egen_female"
        );
    }
}
