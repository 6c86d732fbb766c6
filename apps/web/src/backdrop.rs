//! `init` and the handle it returns.

use std::cell::RefCell;
use std::rc::Rc;

use interview_backdrop::numeric::NumericInput;
use interview_backdrop::{
    BackdropConfig, BackdropError, BackdropHandle, BackdropRegistry, WrapperCache,
};
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::host::{DomHost, RafScheduler, WebBackdrop};

type WebHandle = BackdropHandle<Element, DomHost, RafScheduler>;

thread_local! {
    static BACKDROPS: BackdropRegistry<Element, DomHost, RafScheduler> = BackdropRegistry::new();
    static WRAPPERS: RefCell<WrapperCache<Element, DomHost, RafScheduler, JsValue>> =
        RefCell::new(WrapperCache::new());
}

/// Control handle returned by `init`.
#[wasm_bindgen(js_name = AIBackdrop)]
pub struct JsBackdrop {
    handle: WebHandle,
}

pub fn to_number(value: &JsValue) -> f64 {
    let input = if let Some(number) = value.as_f64() {
        NumericInput::Number(number)
    } else if let Some(flag) = value.as_bool() {
        NumericInput::Bool(flag)
    } else if let Some(text) = value.as_string() {
        return NumericInput::Text(&text).coerce();
    } else {
        NumericInput::Missing
    };
    input.coerce()
}

#[wasm_bindgen(js_class = AIBackdrop)]
impl JsBackdrop {
    pub fn start(&self) {
        self.handle.start();
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    pub fn destroy(&self) {
        self.handle.destroy();
        WRAPPERS.with(|wrappers| wrappers.borrow_mut().forget(&self.handle));
    }

    pub fn resize(&self) {
        self.handle.resize();
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&self, value: &JsValue) {
        self.handle.set_speed(to_number(value));
    }

    #[wasm_bindgen(js_name = setFovDegrees)]
    pub fn set_fov_degrees(&self, value: &JsValue) {
        self.handle.set_fov_degrees(to_number(value));
    }

    #[wasm_bindgen(js_name = setFov)]
    pub fn set_fov(&self, value: &JsValue) {
        self.set_fov_degrees(value);
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.handle.state().as_str().to_string()
    }
}

/// Splits `options` into the mount target and the remaining settings.
fn read_options(options: &JsValue) -> (Option<JsValue>, BackdropConfig) {
    if !options.is_object() {
        return (None, BackdropConfig::default());
    }
    let mount = Reflect::get(options, &JsValue::from_str("mount"))
        .ok()
        .filter(|mount| !mount.is_undefined() && !mount.is_null());

    apply_log_level(options);

    let settings = Object::assign(&Object::new(), options.unchecked_ref());
    let _ = Reflect::delete_property(&settings, &JsValue::from_str("mount"));
    let config = serde_wasm_bindgen::from_value::<serde_json::Value>(settings.into())
        .map_or_else(
            |err| {
                log::warn!("ignoring unreadable backdrop options: {err}");
                BackdropConfig::default()
            },
            |fields| BackdropConfig::from_options(&fields),
        );
    (mount, config)
}

/// `logLevel` takes the `log` level names (`"debug"`, `"off"`, ...).
fn apply_log_level(options: &JsValue) {
    let level = Reflect::get(options, &JsValue::from_str("logLevel"))
        .ok()
        .and_then(|level| level.as_string());
    if let Some(level) = level {
        match level.parse::<log::LevelFilter>() {
            Ok(filter) => log::set_max_level(filter),
            Err(_) => log::warn!("unknown logLevel {level:?}"),
        }
    }
}

fn resolve_mount(mount: Option<&JsValue>, config: &mut BackdropConfig) -> Option<Element> {
    let document = web_sys::window()?.document()?;
    match mount {
        Some(value) if value.is_instance_of::<Element>() => Some(value.clone().unchecked_into()),
        Some(value) => {
            config.mount = value.as_string().unwrap_or_default();
            document.query_selector(&config.mount).ok().flatten()
        }
        None => document.query_selector(&config.mount).ok().flatten(),
    }
}

/// Mounts a backdrop and starts it. A second call on the same mount returns
/// the same `AIBackdrop` object.
#[wasm_bindgen]
pub fn init(options: JsValue) -> Result<JsValue, JsError> {
    let (mount, mut config) = read_options(&options);
    let element = resolve_mount(mount.as_ref(), &mut config);
    let selector = config.mount.clone();
    let mut created = false;

    let handle = BACKDROPS.with(|registry| {
        registry.mount(element, &selector, |element| {
            created = true;
            let window = web_sys::window().ok_or_else(|| BackdropError::Surface("no window".into()))?;
            let document = window
                .document()
                .ok_or_else(|| BackdropError::Surface("no document".into()))?;
            let mut host = DomHost::attach(window, &document, element)
                .map_err(|err| BackdropError::Surface(format!("{err:?}")))?;

            Ok(Rc::new_cyclic(|weak| {
                host.listen_for_resize(weak.clone());
                RefCell::new(WebBackdrop::new(host, RafScheduler::new(weak.clone()), config))
            }))
        })
    })?;

    if created {
        handle.start();
    }
    Ok(WRAPPERS.with(|wrappers| {
        wrappers
            .borrow_mut()
            .get_or_wrap(&handle, |handle| JsValue::from(JsBackdrop { handle }))
    }))
}

