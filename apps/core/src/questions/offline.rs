use serde_json::Value;

use super::catalog::catalog;
use super::matcher::{fuzzy_match_role, normalize_text, role_category, DEFAULT_ROLE};
use super::{Difficulty, Question, QuestionDatas, QuestionSet};

pub const QUESTION_TYPE_QA: &str = "qa";
pub const QUESTION_SCORE: u32 = 20;
/// Questions per offline set.
const OFFLINE_SET_SIZE: usize = 5;
const ID_ROLE_CHARS: usize = 10;
const JD_TAG: &str = "{jd_tag}";

const RAND_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RAND_LEN: usize = 8;

/// `prefix` followed by eight random base-36 characters.
pub fn rand_id(prefix: &str, rng: &mut fastrand::Rng) -> String {
    let mut id = String::with_capacity(prefix.len() + RAND_LEN);
    id.push_str(prefix);
    id.extend((0..RAND_LEN).map(|_| char::from(RAND_ALPHABET[rng.usize(..RAND_ALPHABET.len())])));
    id
}

const fn jd_tag(jd: &str) -> &'static str {
    if jd.is_empty() {
        "JD：未提供"
    } else {
        "JD：已提供"
    }
}

fn qa(keyword: &str, id: String, title: String, difficulty: Option<Difficulty>) -> Question {
    Question {
        keyword: keyword.to_string(),
        kind: QUESTION_TYPE_QA.to_string(),
        id,
        score: QUESTION_SCORE,
        title,
        options: Vec::new(),
        correct_answer: Value::String(String::new()),
        difficulty,
    }
}

/// Every question of the role's category bank, junior through expert, with
/// the category's keywords.
pub fn generate_role_question_bank(role: &str, position: &str, jd: &str) -> QuestionDatas {
    let role = [role, position]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_ROLE);
    let id_prefix: String = normalize_text(role)
        .chars()
        .take(ID_ROLE_CHARS)
        .collect::<String>()
        .to_uppercase();
    let tag = jd_tag(jd);

    let Some(bank) = catalog().bank(role_category(role)) else {
        return QuestionDatas::default();
    };

    let mut templates: Vec<_> = bank.questions.iter().collect();
    templates.sort_by_key(|template| (template.difficulty, template.index));

    let questions = templates
        .into_iter()
        .map(|template| {
            let tier = template.difficulty.as_str().to_uppercase();
            qa(
                &template.keyword,
                format!("{id_prefix}-{tier}-QA-{:03}", template.index + 1),
                template.title.replace(JD_TAG, tag),
                Some(template.difficulty),
            )
        })
        .collect();

    QuestionDatas {
        keywords: bank.keywords.clone(),
        questions,
    }
}

/// Local replacement for a remote question set.
///
/// The role is matched from `position`, or from `category` when no position
/// was given. At most five questions of the salary tier are kept; keywords
/// cover the whole category.
pub fn make_offline_set(
    category: &str,
    position: &str,
    jd: &str,
    salary: &str,
    rng: &mut fastrand::Rng,
) -> QuestionSet {
    let matched = fuzzy_match_role(if position.is_empty() { category } else { position });
    let tier = Difficulty::from_salary(salary);
    let bank = generate_role_question_bank(&matched, position, jd);

    let questions = bank
        .questions
        .into_iter()
        .filter(|question| question.difficulty == Some(tier))
        .take(OFFLINE_SET_SIZE)
        .collect();

    QuestionSet {
        rand_id: rand_id("OFF-", rng),
        question_datas: QuestionDatas {
            keywords: bank.keywords,
            questions,
        },
    }
}

/// Generic five-question set that needs no catalog lookup.
pub fn make_fallback(position: &str, jd: &str, rng: &mut fastrand::Rng) -> QuestionSet {
    let position = if position.is_empty() { DEFAULT_ROLE } else { position };
    let provided = if jd.is_empty() { "未提供" } else { "已提供" };
    let keywords = ["背景", "技能", "项目", "优化", "总结"];
    let titles = [
        format!("请简述你的过往经历背景，并结合「{position}」岗位的匹配点。"),
        format!("围绕「核心技能」，列出你认为本岗位的关键能力与指标（参考JD：{provided}）。"),
        "选择一个代表性项目，说明目标、难点与你的职责，并给出核心方案。".to_string(),
        "描述一次性能或可用性优化实践：指标、瓶颈定位、改进措施与成效。".to_string(),
        "结合职业发展，说明你在团队协作、学习与成长上的规划。".to_string(),
    ];

    let questions = keywords
        .iter()
        .zip(titles)
        .enumerate()
        .map(|(index, (keyword, title))| qa(keyword, format!("F-QA-{:03}", index + 1), title, None))
        .collect();

    QuestionSet {
        rand_id: rand_id("F-", rng),
        question_datas: QuestionDatas {
            keywords: keywords.iter().map(ToString::to_string).collect(),
            questions,
        },
    }
}

/// Remote payloads carry `questionDatas` either as an object or as a JSON
/// string. Returns `None` for anything else, including unparsable strings.
pub fn parse_question_datas(value: &Value) -> Option<Value> {
    match value {
        Value::String(text) if !text.is_empty() => serde_json::from_str(text).ok(),
        Value::Object(_) | Value::Array(_) => Some(value.clone()),
        _ => None,
    }
}

/// Option label for a zero-based index: 0 → 'A'.
pub fn letter_for_index(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|offset| offset.checked_add(u32::from(b'A')))
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
