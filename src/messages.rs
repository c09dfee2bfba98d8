//! Chat texts for each step of the quiz. All of them use HTML parse mode.

use crate::quiz::catalog::Catalog;
use crate::quiz::food_chain;
use crate::quiz::session::QuizSession;
use crate::quiz::{PersonalityKey, PersonalityType};

pub const START_BUTTON: &str = "테스트 시작하기";
pub const MALE_BUTTON: &str = "👨 남성";
pub const FEMALE_BUTTON: &str = "👩 여성";
pub const RESTART_BUTTON: &str = "다시 테스트하기";

pub const GENDER_PROMPT: &str = "<b>성별을 선택해주세요</b>\n\n테토-에겐 유형은 성별에 따라 구분됩니다.\n본인의 성별을 선택해주세요.";
pub const PICK_AN_ANSWER: &str = "아래 선택지 중 하나를 골라주세요";
pub const PICK_A_GENDER: &str = "아래 버튼으로 성별을 선택해주세요";
pub const PRESS_START: &str = "\"테스트 시작하기\"를 눌러 시작해주세요";
pub const PRESS_RESTART: &str = "\"다시 테스트하기\"를 눌러 새로 시작할 수 있어요";

const DISCLAIMER: &str =
    "⚠️ 이 테스트는 재미를 위한 것으로, 과학적 근거는 없습니다.\n실제 성격은 훨씬 복합적이고 다면적입니다.";

const PROGRESS_CELLS: u32 = 10;

fn profile_label(catalog: &Catalog, key: PersonalityKey) -> String {
    catalog
        .personality(&key.id())
        .map(|p| format!("{} {}", p.emoji, p.name))
        .unwrap_or_else(|| key.id())
}

pub fn intro_text(catalog: &Catalog) -> String {
    format!(
        "<b>🧬 테토-에겐 성격 유형 테스트</b>\n\n\
         테스토스테론과 에스트로겐 성향을 바탕으로 한 성격 유형 테스트입니다.\n\
         총 {}개의 질문에 답하시면 4가지 유형 중 하나의 결과를 받으실 수 있습니다.\n\
         <b>테토남, 에겐남, 테토녀, 에겐녀</b> 중 어떤 유형인지 알아보세요!\n\n\
         <b>💕 연애 먹이사슬 구조</b>\n{}\n<i>{}</i>",
        catalog.question_count(),
        food_chain::render_cycle(None, |key| profile_label(catalog, key)),
        food_chain::INTRO_CAPTION,
    )
}

pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) * PROGRESS_CELLS / 100) as usize;
    format!(
        "{}{}",
        "▰".repeat(filled),
        "▱".repeat(PROGRESS_CELLS as usize - filled)
    )
}

/// `None` unless the session is showing a question.
pub fn question_text(session: &QuizSession) -> Option<String> {
    let question = session.current_question()?;
    let progress = session.progress()?;
    Some(format!(
        "{}\n질문 {} / {}\n\n<b>{}</b>",
        progress_bar(progress.percent),
        progress.number,
        progress.total,
        question.text
    ))
}

pub fn result_text(catalog: &Catalog, result: &PersonalityType) -> String {
    let characteristics = result
        .characteristics
        .iter()
        .map(|c| format!("✨ {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    let food_chain = match food_chain::key_from_id(&result.id) {
        Some(key) => format!(
            "\n\n<b>💕 연애 먹이사슬에서의 위치</b>\n{}\n{}",
            food_chain::render_cycle(Some(key), |k| profile_label(catalog, k)),
            food_chain::attraction_blurb(key)
        ),
        None => String::new(),
    };

    format!(
        "<b>테스트 결과</b>\n\n<b>{} {}</b>\n{}{}\n\n{}\n\n<i>{}</i>",
        result.emoji, result.name, result.description, food_chain, characteristics, DISCLAIMER
    )
}
