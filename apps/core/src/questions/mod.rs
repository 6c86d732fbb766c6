//! Offline interview question generation.
//!
//! Used when the remote question service fails: a role typed by the
//! candidate is matched against a catalog of popular roles, mapped to a
//! category bank, and a tier of questions is picked from the expected salary.

mod catalog;
mod difficulty;
mod matcher;
mod offline;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use catalog::{catalog, Catalog, CategoryBank, CategoryMatcher, QuestionTemplate, GENERAL_CATEGORY};
pub use difficulty::Difficulty;
pub use matcher::{fuzzy_match_role, normalize_text, role_category, suggest_roles, DEFAULT_ROLE};
pub use offline::{
    generate_role_question_bank, letter_for_index, make_fallback, make_offline_set,
    parse_question_datas, rand_id, QUESTION_SCORE, QUESTION_TYPE_QA,
};

/// One interview question as the interview page consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub keyword: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub title: String,
    /// Choice questions from the remote service carry options; offline ones
    /// never do.
    #[serde(default)]
    pub options: Vec<Value>,
    #[serde(default = "empty_answer")]
    pub correct_answer: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

fn empty_answer() -> Value {
    Value::String(String::new())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionDatas {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A generated question set, local or remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub rand_id: String,
    pub question_datas: QuestionDatas,
}
