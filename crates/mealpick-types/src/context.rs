//! Fixed-order, human-readable rendering of a [`FormRecord`].
//!
//! ```text
//!
//! 인원 수: 2
//! 관계: 친구
//! 식사 시간대: 점심
//! 최근 먹은 음식:
//! 식사 형태: 외식
//! 1인당 예산: 1~2만 원
//! 매운맛 선호: 보통
//! 알레르기/금지 음식:
//! 기타 요청사항:
//! ```
//!
//! The block opens with an empty line and every label line ends in `\n`.
//! Empty free-text fields keep their line with an empty value.

use std::fmt;

use mealpick_prompt::builder::PromptBuilder;

use crate::form::{FormChoice, FormRecord};

pub const LABEL_PARTY_SIZE: &str = "인원 수";
pub const LABEL_RELATIONSHIP: &str = "관계";
pub const LABEL_MEAL_TIME: &str = "식사 시간대";
pub const LABEL_LAST_MEAL: &str = "최근 먹은 음식";
pub const LABEL_DINING_MODE: &str = "식사 형태";
pub const LABEL_BUDGET: &str = "1인당 예산";
pub const LABEL_SPICE: &str = "매운맛 선호";
pub const LABEL_RESTRICTIONS: &str = "알레르기/금지 음식";
pub const LABEL_NOTES: &str = "기타 요청사항";

/// Serialization order of the context lines.
pub const LABELS: [&str; 9] = [
    LABEL_PARTY_SIZE,
    LABEL_RELATIONSHIP,
    LABEL_MEAL_TIME,
    LABEL_LAST_MEAL,
    LABEL_DINING_MODE,
    LABEL_BUDGET,
    LABEL_SPICE,
    LABEL_RESTRICTIONS,
    LABEL_NOTES,
];

/// Text rendering of one submitted [`FormRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializedContext(String);

impl SerializedContext {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SerializedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render `record` into its context block. Pure and deterministic.
pub fn serialize(record: &FormRecord) -> SerializedContext {
    let text = PromptBuilder::new()
        .add_blank_line()
        .add_labeled(LABEL_PARTY_SIZE, record.party_size)
        .add_labeled(LABEL_RELATIONSHIP, record.relationship.label())
        .add_labeled(LABEL_MEAL_TIME, record.meal_time.label())
        .add_labeled(LABEL_LAST_MEAL, &record.last_meal)
        .add_labeled(LABEL_DINING_MODE, record.dining_mode.label())
        .add_labeled(LABEL_BUDGET, record.budget.label())
        .add_labeled(LABEL_SPICE, record.spice.label())
        .add_labeled(LABEL_RESTRICTIONS, &record.restrictions)
        .add_labeled(LABEL_NOTES, &record.notes)
        .finalize();

    SerializedContext(text)
}

impl FormRecord {
    pub fn to_context(&self) -> SerializedContext {
        serialize(self)
    }
}
