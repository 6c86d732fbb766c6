use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use interview_backdrop::api::{
    endpoint_url, resolve_question_set, PostOutcome, QuestionRequest, API_BASE, DEFAULT_TIMEOUT_MS,
};
use interview_backdrop::RequestError;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, RequestMode, Response};

use crate::storage::to_js;

fn transport(err: JsValue) -> RequestError {
    RequestError::Transport(
        err.as_string()
            .or_else(|| {
                err.dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

async fn send(url: &str, body: &str, timeout_ms: u32) -> Result<(bool, String), RequestError> {
    let window = web_sys::window().ok_or_else(|| RequestError::Transport("no window".into()))?;
    let controller = AbortController::new().map_err(transport)?;
    let timed_out = Rc::new(Cell::new(false));

    let timer = {
        let controller = controller.clone();
        let timed_out = Rc::clone(&timed_out);
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let headers = Headers::new().map_err(transport)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(transport)?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));
    init.set_signal(Some(&controller.signal()));
    let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;

    let result = async {
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        let text = JsFuture::from(response.text()?).await?;
        Ok::<_, JsValue>((response.ok(), text.as_string().unwrap_or_default()))
    }
    .await;
    // Dropping the timer clears it.
    drop(timer);

    result.map_err(|err| {
        if timed_out.get() {
            RequestError::Timeout(timeout_ms)
        } else if controller.signal().aborted() {
            RequestError::Aborted
        } else {
            transport(err)
        }
    })
}

/// POSTs `payload` as JSON to `endpoint` under the API base. Never fails:
/// transport problems come back as [`PostOutcome::Failed`].
pub async fn post_json<T: Serialize + ?Sized>(
    endpoint: &str,
    payload: &T,
    timeout_ms: u32,
) -> PostOutcome {
    let url = endpoint_url(API_BASE, endpoint);
    let body = match serde_json::to_string(payload) {
        Ok(body) => body,
        Err(err) => return PostOutcome::Failed(RequestError::Transport(err.to_string())),
    };

    match send(&url, &body, timeout_ms).await {
        Ok((ok, text)) => {
            log::debug!("POST {url} -> ok={ok}, {} bytes", text.len());
            PostOutcome::from_response(ok, &text)
        }
        Err(err) => {
            log::warn!("POST {url} failed: {err}");
            PostOutcome::Failed(err)
        }
    }
}

/// Asks the question service for a set, falling back to the offline bank.
#[wasm_bindgen(js_name = generateQuestions)]
pub async fn generate_questions(
    endpoint: String,
    request: JsValue,
    timeout_ms: Option<u32>,
) -> Result<JsValue, JsError> {
    let request: QuestionRequest = serde_wasm_bindgen::from_value(request)?;
    let outcome = post_json(&endpoint, &request, timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)).await;
    let set = resolve_question_set(&outcome, &request, &mut fastrand::Rng::new());
    to_js(&set)
}
