//! Remote question service: request shape, response decoding and the
//! offline fallback.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::RequestError;
use crate::questions::{make_offline_set, parse_question_datas, rand_id, QuestionDatas, QuestionSet};

pub const API_BASE: &str = "https://t-jxjyadmin.gaodun.com/api/v1/test";
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Joins `base` and `endpoint` with exactly one slash.
pub fn endpoint_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Parses a response body, substituting an error payload for anything that
/// is not JSON.
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| {
        json!({
            "status": 0,
            "info": "Invalid JSON",
            "raw": text,
        })
    })
}

/// What a POST produced, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    /// A response arrived; `ok` is the HTTP 2xx flag.
    Response { ok: bool, body: Value },
    Failed(RequestError),
}

impl PostOutcome {
    pub fn from_response(ok: bool, text: &str) -> Self {
        Self::Response {
            ok,
            body: decode_body(text),
        }
    }
}

/// Body sent to the question generation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionRequest {
    pub category: String,
    pub position: String,
    pub jd: String,
    pub salary: String,
}

fn remote_question_set(body: &Value, rng: &mut fastrand::Rng) -> Option<QuestionSet> {
    let datas = parse_question_datas(body.get("questionDatas")?)?;
    let datas: QuestionDatas = serde_json::from_value(datas).ok()?;
    if datas.questions.is_empty() {
        return None;
    }
    let rand_id = match body.get("randId") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => rand_id("R-", rng),
    };
    Some(QuestionSet {
        rand_id,
        question_datas: datas,
    })
}

/// Uses the remote set when the service answered with usable questions,
/// otherwise generates one offline for `request`. Never fails.
pub fn resolve_question_set(
    outcome: &PostOutcome,
    request: &QuestionRequest,
    rng: &mut fastrand::Rng,
) -> QuestionSet {
    let remote = match outcome {
        PostOutcome::Response { ok: true, body } => {
            let set = remote_question_set(body, rng);
            if set.is_none() {
                log::warn!("question service returned no usable questions, generating offline");
            }
            set
        }
        PostOutcome::Response { ok: false, body } => {
            log::warn!("question service rejected the request: {body}");
            None
        }
        PostOutcome::Failed(err) => {
            log::warn!("question service unreachable: {err}");
            None
        }
    };

    remote.unwrap_or_else(|| {
        make_offline_set(
            &request.category,
            &request.position,
            &request.jd,
            &request.salary,
            rng,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> QuestionRequest {
        QuestionRequest {
            category: "java".into(),
            position: "会计".into(),
            jd: String::new(),
            salary: "6000".into(),
        }
    }

    #[test]
    fn urls_join_with_one_slash() {
        assert_eq!(endpoint_url(API_BASE, "generate"), format!("{API_BASE}/generate"));
        assert_eq!(endpoint_url("http://x/", "/y"), "http://x/y");
    }

    #[test]
    fn non_json_body_becomes_sentinel() {
        let body = decode_body("<html>");
        assert_eq!(body["status"], 0);
        assert_eq!(body["info"], "Invalid JSON");
        assert_eq!(body["raw"], "<html>");
        assert_eq!(decode_body("{\"a\":1}"), json!({"a": 1}));
    }

    #[test]
    fn request_serializes_camel_case() {
        let value = serde_json::to_value(request()).unwrap_or_default();
        assert_eq!(value, json!({"category": "java", "position": "会计", "jd": "", "salary": "6000"}));
    }

    #[test]
    fn timeout_falls_back_offline() {
        let mut rng = fastrand::Rng::with_seed(1);
        let set = resolve_question_set(
            &PostOutcome::Failed(RequestError::Timeout(DEFAULT_TIMEOUT_MS)),
            &request(),
            &mut rng,
        );
        assert!(set.rand_id.starts_with("OFF-"));
        assert_eq!(set.question_datas.questions.len(), 5);
    }

    #[test]
    fn error_status_and_bad_json_fall_back_offline() {
        let mut rng = fastrand::Rng::with_seed(1);
        for outcome in [
            PostOutcome::from_response(false, "{\"questionDatas\":{\"questions\":[{}]}}"),
            PostOutcome::from_response(true, "<html>"),
            PostOutcome::from_response(true, "{\"questionDatas\":{\"questions\":[]}}"),
            PostOutcome::from_response(true, "{\"questionDatas\":\"nope\"}"),
        ] {
            let set = resolve_question_set(&outcome, &request(), &mut rng);
            assert!(set.rand_id.starts_with("OFF-"), "{outcome:?}");
        }
    }

    #[test]
    fn usable_remote_set_is_kept() {
        let mut rng = fastrand::Rng::with_seed(1);
        let body = json!({
            "randId": "abc123",
            "questionDatas": {
                "keywords": ["k"],
                "questions": [{"keyword": "k", "type": "single", "id": "Q1", "score": 10,
                               "title": "t", "options": ["x", "y"], "correctAnswer": "A"}]
            }
        });
        let set = resolve_question_set(
            &PostOutcome::Response { ok: true, body },
            &request(),
            &mut rng,
        );
        assert_eq!(set.rand_id, "abc123");
        assert_eq!(set.question_datas.questions[0].kind, "single");
        assert_eq!(set.question_datas.questions[0].options.len(), 2);
    }

    #[test]
    fn stringified_datas_without_rand_id_get_remote_id() {
        let mut rng = fastrand::Rng::with_seed(1);
        let datas = json!({"keywords": [], "questions": [{"title": "t"}]}).to_string();
        let outcome = PostOutcome::Response {
            ok: true,
            body: json!({ "questionDatas": datas }),
        };
        let set = resolve_question_set(&outcome, &request(), &mut rng);
        assert!(set.rand_id.starts_with("R-"));
        assert_eq!(set.question_datas.questions[0].title, "t");
        assert_eq!(set.question_datas.questions[0].correct_answer, json!(""));
    }
}
