use std::fmt::Write as _;

use color_eyre::Result;
use interview_backdrop::questions::{
    fuzzy_match_role, make_offline_set, role_category, suggest_roles, QuestionSet,
    GENERAL_CATEGORY,
};
use serde_json::Value;

use crate::cli::CliArgs;
use crate::config::AppConfig;
use crate::db::{create_database_pool, SqliteStore};

/// Run in headless mode: print (and optionally store) an offline question
/// set, or print a stored value.
pub async fn run_headless(args: &CliArgs, config: &AppConfig) -> Result<()> {
    let needs_store = args.save.is_some() || args.load.is_some();
    let store = if needs_store {
        Some(SqliteStore::new(
            create_database_pool(&config.database_url).await?,
        ))
    } else {
        None
    };

    if let (Some(key), Some(store)) = (&args.load, &store) {
        let value = store.load(key).await?;
        println!("{}", render_stored(&value, args.json)?);
        return Ok(());
    }

    let mut rng = fastrand::Rng::new();
    let set = make_offline_set(
        &args.category,
        &args.position,
        &args.jd,
        &args.salary,
        &mut rng,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&set)?);
    } else {
        print!("{}", render_question_set(&set, &args.position));
    }

    if let (Some(key), Some(store)) = (&args.save, &store) {
        store.save(key, &set).await?;
        eprintln!("Saved question set under '{key}'");
    }

    Ok(())
}

const SUGGESTION_LIMIT: usize = 3;

/// Human-readable listing of a question set generated for `position`.
pub fn render_question_set(set: &QuestionSet, position: &str) -> String {
    let datas = &set.question_datas;
    let mut out = String::new();

    let _ = writeln!(out, "\nOffline Question Set {}", set.rand_id);
    let _ = writeln!(out, "=====================");
    if !position.is_empty() {
        let role = fuzzy_match_role(position);
        let category = role_category(&role);
        let _ = writeln!(out, "Role: {role} ({category})");
        if category == GENERAL_CATEGORY {
            let suggestions = suggest_roles(position, SUGGESTION_LIMIT);
            if !suggestions.is_empty() {
                let _ = writeln!(out, "Closest catalog roles: {}", suggestions.join(", "));
            }
        }
    }
    let _ = writeln!(out, "Keywords: {}", datas.keywords.join(", "));

    let _ = writeln!(out, "\nQuestions:");
    if datas.questions.is_empty() {
        let _ = writeln!(out, "- (none for this salary tier)");
    }
    for question in &datas.questions {
        let tier = question
            .difficulty
            .map_or_else(|| "-".to_string(), |tier| tier.to_string());
        let _ = writeln!(
            out,
            "- {} | {} | {} pts | {}",
            question.id, tier, question.score, question.title
        );
    }

    out
}

fn render_stored(value: &Value, json: bool) -> Result<String> {
    Ok(match value {
        Value::Null => "(no value stored)".to_string(),
        Value::String(text) if !json => text.clone(),
        other => serde_json::to_string_pretty(other)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_backdrop::questions::{QuestionDatas, QUESTION_SCORE};
    use serde_json::json;

    #[test]
    fn listing_shows_every_question() {
        let mut rng = fastrand::Rng::with_seed(11);
        let set = make_offline_set("java", "会计", "", "6000", &mut rng);

        let text = render_question_set(&set, "会计");
        assert!(text.contains(&set.rand_id));
        assert!(text.contains("Role: 会计 (finance)"));
        assert!(!text.contains("Closest catalog roles"));
        for question in &set.question_datas.questions {
            assert!(text.contains(&question.id));
        }
        assert!(text.contains(&format!("junior | {QUESTION_SCORE} pts")));
    }

    #[test]
    fn empty_sets_say_so() {
        let set = QuestionSet {
            rand_id: "OFF-00000000".into(),
            question_datas: QuestionDatas::default(),
        };
        let text = render_question_set(&set, "");
        assert!(text.contains("(none for this salary tier)"));
        assert!(!text.contains("Role:"));
    }

    #[test]
    fn unmatched_roles_list_close_catalog_roles() {
        let mut rng = fastrand::Rng::with_seed(5);
        let set = make_offline_set("java", "财经理", "", "", &mut rng);

        let text = render_question_set(&set, "财经理");
        assert!(text.contains("Role: 财经理 (general)"));
        assert!(text.contains("Closest catalog roles: 财务经理"));
    }

    #[test]
    fn stored_values_print_readably() -> Result<()> {
        assert_eq!(render_stored(&Value::Null, false)?, "(no value stored)");
        assert_eq!(render_stored(&json!("plain"), false)?, "plain");
        assert_eq!(render_stored(&json!("plain"), true)?, "\"plain\"");
        assert_eq!(render_stored(&json!({"a": 1}), false)?, "{\n  \"a\": 1\n}");
        Ok(())
    }
}
