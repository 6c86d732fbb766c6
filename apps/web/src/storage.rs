use gloo::storage::{LocalStorage, Storage};
use interview_backdrop::store::{self, KeyValueStore};
use interview_backdrop::StoreError;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// `window.localStorage`, string in and string out.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

fn backend(err: JsValue) -> StoreError {
    StoreError::Backend(format!("{err:?}"))
}

impl KeyValueStore for LocalStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        LocalStorage::raw().get_item(key).map_err(backend)
    }

    fn set_raw(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw().set_item(key, value).map_err(backend)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        LocalStorage::raw().remove_item(key).map_err(backend)
    }
}

/// Converts a Rust value for JS, turning maps into plain objects.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|err| JsError::new(&err.to_string()))
}

#[wasm_bindgen(js_name = storeSave)]
pub fn store_save(key: &str, value: JsValue) -> Result<(), JsError> {
    let value: Value = serde_wasm_bindgen::from_value(value)?;
    store::save(&mut LocalStore, key, &value)?;
    Ok(())
}

#[wasm_bindgen(js_name = storeLoad)]
pub fn store_load(key: &str) -> Result<JsValue, JsError> {
    let value = store::load(&LocalStore, key)?;
    to_js(&value)
}

#[wasm_bindgen(js_name = storeClearKeys)]
pub fn store_clear_keys(keys: Vec<String>) -> Result<(), JsError> {
    store::clear_keys(&mut LocalStore, keys)?;
    Ok(())
}
