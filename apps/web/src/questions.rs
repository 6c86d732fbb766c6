use interview_backdrop::questions::{
    letter_for_index, make_fallback, make_offline_set, parse_question_datas, DEFAULT_ROLE,
};
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::storage::to_js;

const DEFAULT_CATEGORY: &str = "java";

#[wasm_bindgen(js_name = makeOfflineSet)]
pub fn make_offline_set_js(
    category: Option<String>,
    position: Option<String>,
    jd: Option<String>,
    salary: Option<String>,
) -> Result<JsValue, JsError> {
    let set = make_offline_set(
        category.as_deref().unwrap_or(DEFAULT_CATEGORY),
        position.as_deref().unwrap_or(DEFAULT_ROLE),
        jd.as_deref().unwrap_or_default(),
        salary.as_deref().unwrap_or_default(),
        &mut fastrand::Rng::new(),
    );
    to_js(&set)
}

#[wasm_bindgen(js_name = makeFallback)]
pub fn make_fallback_js(position: Option<String>, jd: Option<String>) -> Result<JsValue, JsError> {
    let set = make_fallback(
        position.as_deref().unwrap_or(DEFAULT_ROLE),
        jd.as_deref().unwrap_or_default(),
        &mut fastrand::Rng::new(),
    );
    to_js(&set)
}

/// `null` unless `value` is an object or a string holding JSON.
#[wasm_bindgen(js_name = parseQuestionDatas)]
pub fn parse_question_datas_js(value: JsValue) -> Result<JsValue, JsError> {
    let value: Value = serde_wasm_bindgen::from_value(value).unwrap_or(Value::Null);
    parse_question_datas(&value).map_or(Ok(JsValue::NULL), |datas| to_js(&datas))
}

#[wasm_bindgen(js_name = letterForIndex)]
pub fn letter_for_index_js(index: u32) -> String {
    letter_for_index(index as usize).to_string()
}
