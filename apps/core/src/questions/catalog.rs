use std::sync::OnceLock;

use serde::Deserialize;

use super::Difficulty;

const CATALOG_JSON: &str = include_str!("../../data/question_bank.json");

/// Category used when no matcher applies. Its bank is always present.
pub const GENERAL_CATEGORY: &str = "general";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Popular roles, in match priority order.
    pub roles: Vec<String>,
    /// Checked in order; the first matcher with a term in the role wins.
    pub matchers: Vec<CategoryMatcher>,
    pub banks: Vec<CategoryBank>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMatcher {
    pub category: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryBank {
    pub category: String,
    pub keywords: Vec<String>,
    pub questions: Vec<QuestionTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionTemplate {
    pub index: u32,
    pub difficulty: Difficulty,
    pub keyword: String,
    /// May contain `{jd_tag}`.
    pub title: String,
}

impl Catalog {
    pub fn bank(&self, category: &str) -> Option<&CategoryBank> {
        self.banks
            .iter()
            .find(|bank| bank.category == category)
            .or_else(|| self.banks.iter().find(|bank| bank.category == GENERAL_CATEGORY))
    }
}

/// The embedded catalog, parsed on first use.
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        serde_json::from_str(CATALOG_JSON).unwrap_or_else(|err| {
            log::error!("embedded question bank is invalid: {err}");
            Catalog::default()
        })
    })
}
