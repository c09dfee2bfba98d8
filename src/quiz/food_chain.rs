//! The "dating food chain": the four profiles form a clockwise cycle and
//! each one is drawn to the next.

use crate::quiz::{Gender, PersonalityKey, Trait};

/// Clockwise order, starting from the top of the circle.
pub const CYCLE: [PersonalityKey; 4] = [
    PersonalityKey::new(Trait::Egen, Gender::Female),
    PersonalityKey::new(Trait::Egen, Gender::Male),
    PersonalityKey::new(Trait::Teto, Gender::Female),
    PersonalityKey::new(Trait::Teto, Gender::Male),
];

pub const INTRO_CAPTION: &str = "각 유형은 시계방향으로 다음 유형에게 끌리는 순환 구조를 가집니다";

/// Who `key` tends to be attracted to.
pub fn attraction_of(key: PersonalityKey) -> PersonalityKey {
    let position = CYCLE.iter().position(|k| *k == key).unwrap_or(0);
    CYCLE[(position + 1) % CYCLE.len()]
}

pub fn attraction_blurb(key: PersonalityKey) -> &'static str {
    match (key.dominant, key.gender) {
        (Trait::Teto, Gender::Male) => "테토남은 에겐녀에게 끌리는 경향이 있습니다. 자신에게 없는 부드러운 여성성과 섬세한 감수성에 매력을 느낍니다.",
        (Trait::Egen, Gender::Male) => "에겐남은 테토녀에게 끌리는 경향이 있습니다. 자신에게 부족한 추진력과 에너지를 지닌 상대에게 매력을 느낍니다.",
        (Trait::Teto, Gender::Female) => "테토녀는 테토남에게 끌리는 경향이 있습니다. 자신보다 더 강한 양기와 남성적인 매력을 가진 상대를 선호합니다.",
        (Trait::Egen, Gender::Female) => "에겐녀는 에겐남에게 끌리는 경향이 있습니다. 자신의 감수성과 정서를 잘 이해해주는 상대에게 매력을 느낍니다.",
    }
}

/// Parses a profile id such as `teto_male`.
pub fn key_from_id(id: &str) -> Option<PersonalityKey> {
    PersonalityKey::all().into_iter().find(|k| k.id() == id)
}

/// One line per profile in cycle order, the active one highlighted.
pub fn render_cycle(
    active: Option<PersonalityKey>,
    label: impl Fn(PersonalityKey) -> String,
) -> String {
    CYCLE
        .iter()
        .map(|key| {
            let marker = if Some(*key) == active { "👉" } else { "▫️" };
            format!("{} {} → {}", marker, label(*key), label(attraction_of(*key)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
