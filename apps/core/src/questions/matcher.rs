use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::catalog::{catalog, GENERAL_CATEGORY};

/// Role used when there is nothing to match on.
pub const DEFAULT_ROLE: &str = "通用岗位";

/// Lowercased with all whitespace removed.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '-' | '·' | '，' | '、')
}

fn role_score(input: &str, role: &str) -> usize {
    let normalized_role = normalize_text(role);
    if !input.is_empty() && (input.contains(&normalized_role) || normalized_role.contains(input)) {
        return normalized_role.chars().count().min(input.chars().count());
    }
    role.split(is_token_separator)
        .map(normalize_text)
        .filter(|token| !token.is_empty() && input.contains(token.as_str()))
        .map(|token| token.chars().count())
        .sum()
}

/// Picks the catalog role closest to free-text `input`.
///
/// Containment either way scores the shorter length; otherwise each role
/// token found in the input adds its length. Earlier roles win ties. When no
/// role scores, the input is returned as-is.
pub fn fuzzy_match_role(input: &str) -> String {
    let normalized = normalize_text(input);

    let mut best: Option<(&str, usize)> = None;
    for role in &catalog().roles {
        let score = role_score(&normalized, role);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((role, score));
        }
    }

    match best {
        Some((role, _)) => role.to_string(),
        None if input.is_empty() => DEFAULT_ROLE.to_string(),
        None => input.to_string(),
    }
}

/// Catalog roles containing `input` as a subsequence, best first, at most
/// `limit` of them. Only a hint for display; matching never consults it.
pub fn suggest_roles(input: &str, limit: usize) -> Vec<&'static str> {
    let needle = input.trim();
    if needle.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(&'static str, i64)> = catalog()
        .roles
        .iter()
        .filter_map(|role| {
            matcher
                .fuzzy_match(role, needle)
                .map(|score| (role.as_str(), score))
        })
        .collect();
    // Stable, so equal scores keep catalog order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().take(limit).map(|(role, _)| role).collect()
}

/// Question category for a role: the first matcher with a term inside the
/// normalized role, else `general`.
pub fn role_category(role: &str) -> &'static str {
    let normalized = normalize_text(role);
    catalog()
        .matchers
        .iter()
        .find(|matcher| {
            matcher
                .terms
                .iter()
                .any(|term| normalized.contains(normalize_text(term).as_str()))
        })
        .map_or(GENERAL_CATEGORY, |matcher| matcher.category.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_whitespace_and_lowercases() {
        assert_eq!(normalize_text("  HR 经理\t"), "hr经理");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn exact_role_matches_itself() {
        assert_eq!(fuzzy_match_role("会计"), "会计");
        assert_eq!(fuzzy_match_role("UI设计师"), "UI设计师");
    }

    #[test]
    fn containment_prefers_longest_overlap_then_catalog_order() {
        assert_eq!(fuzzy_match_role("资深财务经理（集团）"), "财务经理");
        // "经理" is contained in many roles; all score 2 and the first wins.
        assert_eq!(fuzzy_match_role("经理"), "行政经理");
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(fuzzy_match_role("hr经理"), "HR经理");
    }

    #[test]
    fn empty_input_falls_back_to_default_role() {
        assert_eq!(fuzzy_match_role(""), DEFAULT_ROLE);
        assert_eq!(fuzzy_match_role("   "), "   ");
    }

    #[test]
    fn unmatched_input_is_returned_verbatim() {
        assert_eq!(fuzzy_match_role("java"), "java");
    }

    #[test]
    fn scattered_characters_do_not_pick_a_role() {
        assert_eq!(fuzzy_match_role("财经理"), "财经理");
        assert_eq!(role_category(&fuzzy_match_role("财经理")), GENERAL_CATEGORY);
        assert_eq!(fuzzy_match_role("销代"), "销代");
        assert_eq!(role_category(&fuzzy_match_role("销代")), GENERAL_CATEGORY);
    }

    #[test]
    fn suggestions_list_subsequence_matches() {
        let suggestions = suggest_roles("财经理", 3);
        assert!(suggestions.contains(&"财务经理"));
        assert!(suggestions.len() <= 3);

        assert!(suggest_roles("销代", 5).contains(&"销售代表"));
        assert!(suggest_roles("   ", 5).is_empty());
        assert!(suggest_roles("zzzz", 5).is_empty());
    }

    #[test]
    fn categories_follow_matcher_order() {
        assert_eq!(role_category("会计"), "finance");
        assert_eq!(role_category("行政专员"), "administration");
        assert_eq!(role_category("HR经理"), "hr");
        // "品牌" is a marketing term before it is a design one.
        assert_eq!(role_category("品牌设计师"), "marketing");
        assert_eq!(role_category("java"), GENERAL_CATEGORY);
        assert_eq!(role_category(DEFAULT_ROLE), GENERAL_CATEGORY);
    }
}
