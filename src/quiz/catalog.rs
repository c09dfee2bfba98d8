use std::collections::{HashMap, HashSet};

use crate::quiz::error::CatalogError;
use crate::quiz::{Answer, PersonalityKey, PersonalityType, Question, Scores};

pub const ANSWERS_PER_QUESTION: usize = 4;

/// Immutable quiz content: the ordered questions and the result profiles.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    personalities: HashMap<String, PersonalityType>,
}

impl Catalog {
    /// Builds a catalog, rejecting content the quiz could not run on.
    pub fn new(
        questions: Vec<Question>,
        personalities: Vec<PersonalityType>,
    ) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::NoQuestions);
        }

        let mut seen_ids = HashSet::new();
        for question in &questions {
            if !seen_ids.insert(question.id) {
                return Err(CatalogError::DuplicateQuestion(question.id));
            }
            if question.answers.len() != ANSWERS_PER_QUESTION {
                return Err(CatalogError::WrongAnswerCount {
                    question_id: question.id,
                    count: question.answers.len(),
                    expected: ANSWERS_PER_QUESTION,
                });
            }
            if let Some(answer) = question.answers.iter().position(|a| a.scores.is_empty()) {
                return Err(CatalogError::EmptyScores {
                    question_id: question.id,
                    answer,
                });
            }
        }

        let mut by_id = HashMap::with_capacity(personalities.len());
        for personality in personalities {
            if by_id.contains_key(&personality.id) {
                return Err(CatalogError::DuplicatePersonality(personality.id));
            }
            by_id.insert(personality.id.clone(), personality);
        }
        for key in PersonalityKey::all() {
            if !by_id.contains_key(&key.id()) {
                return Err(CatalogError::MissingPersonality(key.id()));
            }
        }

        Ok(Self {
            questions,
            personalities: by_id,
        })
    }

    /// Skips validation so tests can exercise a broken catalog.
    #[cfg(test)]
    pub(crate) fn unchecked(
        questions: Vec<Question>,
        personalities: Vec<PersonalityType>,
    ) -> Self {
        Self {
            questions,
            personalities: personalities
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    /// The compiled-in teto/egen test content.
    pub fn builtin() -> Result<Self, CatalogError> {
        let questions = QUESTIONS
            .iter()
            .map(|(id, text, answers)| {
                Question::new(
                    *id,
                    *text,
                    answers
                        .iter()
                        .map(|(text, teto, egen)| Answer::new(*text, Scores::new(*teto, *egen)))
                        .collect(),
                )
            })
            .collect();

        let personalities = PERSONALITIES
            .iter()
            .map(|p| PersonalityType {
                id: p.id.to_string(),
                name: p.name.to_string(),
                description: p.description.to_string(),
                characteristics: p.characteristics.iter().map(|c| c.to_string()).collect(),
                color: p.color.to_string(),
                emoji: p.emoji.to_string(),
            })
            .collect();

        Self::new(questions, personalities)
    }

    /// Questions in their fixed order. Only answers are ever shuffled.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn personality_types(&self) -> impl Iterator<Item = &PersonalityType> {
        self.personalities.values()
    }

    pub fn personality(&self, id: &str) -> Option<&PersonalityType> {
        self.personalities.get(id)
    }
}

struct PersonalityRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    characteristics: &'static [&'static str],
    color: &'static str,
    emoji: &'static str,
}

const PERSONALITIES: [PersonalityRow; 4] = [
    PersonalityRow {
        id: "teto_male",
        name: "테토남",
        description: "테스토스테론 남성 - 공격성과 사냥 본능이 강하고, 주도적이며 현실 지향적인 남성",
        characteristics: &[
            "공격성과 사냥 본능이 강함",
            "자기주장이 강하며 리더십 있음",
            "감정보다 논리를 우선시",
            "친구가 많고 무리 생활에 익숙",
            "외부 세계(정치, 사회적 지위)에 관심 많음",
            "단순하고 한 번 결정하면 밀어붙이는 스타일",
            "도전과 모험을 좋아함",
            "패션보다는 실용성 중시",
            "감정보다 행동으로 표현하는 연애 스타일",
        ],
        color: "#e74c3c",
        emoji: "💪",
    },
    PersonalityRow {
        id: "egen_male",
        name: "에겐남",
        description: "에스트로겐 남성 - 감수성과 섬세함이 뛰어나며, 예민하고 부드러운 남성",
        characteristics: &[
            "감수성과 섬세함이 뛰어남",
            "자기 감정과 타인 감정에 민감",
            "추상적 개념(예술, 철학)에 흥미",
            "내면지향적이며 개인적 세계 중시",
            "활동성보다 정적인 취미 선호",
            "트렌드에 민감하고 미적 감각 뛰어남",
            "SNS 꾸미기에 능숙",
            "혼자만의 시간을 중요하게 여김",
            "연애에서 수동적이고 감성적 교류 중시",
        ],
        color: "#9b59b6",
        emoji: "🎨",
    },
    PersonalityRow {
        id: "teto_female",
        name: "테토녀",
        description: "테스토스테론 여성 - 활발하고 적극적이며, 독립적이고 도전적인 여성",
        characteristics: &[
            "활발하고 적극적인 성격",
            "독립심이 강함",
            "단순한 사고 구조, 빠른 판단력",
            "유쾌하고 건강한 에너지",
            "주눅들지 않는 강한 멘탈",
            "성취나 커리어 중심적 사고",
            "운동이나 활동적 취미 선호",
            "스트릿 패션이나 힙한 스타일 선호",
            "호감 있는 이성에게 먼저 대시 가능",
        ],
        color: "#f39c12",
        emoji: "🔥",
    },
    PersonalityRow {
        id: "egen_female",
        name: "에겐녀",
        description: "에스트로겐 여성 - 부드럽고 감성적이며, 섬세하고 정적인 분위기의 여성",
        characteristics: &[
            "주장이나 기가 강하지 않음",
            "복잡한 내면 구조를 가짐",
            "타인의 감정에 민감하고 공감 능력 높음",
            "감성적 유대와 안정감 중시",
            "부드럽고 정적인 분위기",
            "여성스럽고 클래식한 스타일 선호",
            "예술, 문학, 디자인 등에 깊은 몰입",
            "연애에서 수동적이고 이끌리는 편",
            "감정의 여운이 오래 지속됨",
        ],
        color: "#e91e63",
        emoji: "🌸",
    },
];

// (text, teto, egen)
type AnswerRow = (&'static str, u32, u32);

const QUESTIONS: [(u32, &str, [AnswerRow; 4]); 10] = [
    (
        1,
        "친구들과 있을 때 당신의 모습은?",
        [
            ("적극적으로 대화를 이끌고 분위기를 주도한다", 3, 0),
            ("조용히 듣고 있다가 필요할 때만 의견을 말한다", 0, 3),
            ("재미있는 이야기나 농담으로 분위기를 띄운다", 2, 1),
            ("다른 사람들의 기분을 살피며 배려한다", 1, 2),
        ],
    ),
    (
        2,
        "스트레스를 받을 때 어떻게 해소하나요?",
        [
            ("운동이나 격렬한 활동으로 풀어낸다", 3, 0),
            ("혼자만의 시간을 가지며 생각을 정리한다", 0, 3),
            ("친한 사람과 이야기하며 감정을 털어놓는다", 1, 2),
            ("술이나 게임 등으로 현실을 잠시 잊는다", 2, 1),
        ],
    ),
    (
        3,
        "연애할 때 당신의 스타일은?",
        [
            ("적극적으로 대시하고 주도권을 잡는다", 3, 0),
            ("상대방이 먼저 다가오기를 기다린다", 0, 3),
            ("감정적인 교감과 대화를 중시한다", 1, 2),
            ("실질적인 행동으로 사랑을 표현한다", 2, 1),
        ],
    ),
    (
        4,
        "패션이나 외모 관리에 대한 당신의 생각은?",
        [
            ("실용적이고 편한 것이 최고다", 3, 0),
            ("트렌드를 따라가며 세심하게 관리한다", 1, 2),
            ("클래식하고 우아한 스타일을 선호한다", 0, 3),
            ("개성 있고 힙한 스타일을 추구한다", 2, 1),
        ],
    ),
    (
        5,
        "갈등 상황에서 어떻게 대처하나요?",
        [
            ("직접적으로 맞서서 해결한다", 3, 0),
            ("조용히 피하거나 시간이 해결해주길 기다린다", 0, 3),
            ("중재자 역할을 하며 양쪽을 이해시킨다", 1, 2),
            ("감정적으로 반응하고 솔직하게 표현한다", 2, 1),
        ],
    ),
    (
        6,
        "여가 시간에 주로 무엇을 하나요?",
        [
            ("친구들과 만나거나 활동적인 취미 활동", 3, 0),
            ("혼자서 책을 읽거나 영화를 본다", 0, 3),
            ("예술 활동이나 창작 활동을 한다", 1, 2),
            ("새로운 도전이나 모험을 시도한다", 2, 1),
        ],
    ),
    (
        7,
        "의사결정을 할 때 가장 중요하게 생각하는 것은?",
        [
            ("빠른 결정과 즉시 실행", 3, 0),
            ("충분한 고민과 신중한 판단", 0, 3),
            ("다른 사람들의 의견과 조화", 1, 2),
            ("직감과 감정에 따른 선택", 2, 1),
        ],
    ),
    (
        8,
        "이상형에 대한 당신의 기준은?",
        [
            ("외모가 예쁘고/잘생기고 성격이 착한 사람", 3, 0),
            ("나를 이해해주고 감성적 교감이 가능한 사람", 0, 3),
            ("강하고 매력적인 사람", 2, 1),
            ("센스 있고 트렌디한 감각을 가진 사람", 1, 2),
        ],
    ),
    (
        9,
        "SNS 사용 패턴은 어떤가요?",
        [
            ("별로 관심 없고 가끔 보는 정도", 3, 0),
            ("세심하게 꾸미고 자주 업데이트한다", 0, 3),
            ("일상을 소소하게 기록하는 편", 1, 2),
            ("힙하고 트렌디한 콘텐츠를 올린다", 2, 1),
        ],
    ),
    (
        10,
        "새로운 환경에 적응하는 당신의 방식은?",
        [
            ("빠르게 적응하고 적극적으로 사람들과 어울린다", 3, 0),
            ("천천히 관찰하며 조심스럽게 적응한다", 0, 3),
            ("몇몇 사람과 깊은 관계를 만든다", 1, 2),
            ("자신만의 방식으로 독립적으로 지낸다", 2, 1),
        ],
    ),
];
