//! Browser host bridge: tabs, groups, storage and the completion worker

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::{API_KEY_STORAGE_KEY, CONFIG_STORAGE_KEY, OrganizerConfig};
use crate::error::{ClassifyError, HostError};
use crate::operations::GroupPlan;
use crate::remote::{CompletionClient, CompletionRequest, CompletionResponse};
use crate::storage::CredentialStore;
use crate::tab_data::{TabId, TabInfo};

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getCurrentWindowTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn countWindowGroups() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createGroup(tab_ids: JsValue, title: &str, color: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn ungroupTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn requestCompletion(request: JsValue) -> Result<JsValue, JsValue>;
}

/// The extension host, reached through `popup.js`
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeHost;

fn js_error(e: JsValue) -> String {
    match e.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => e.as_string().unwrap_or_else(|| format!("{:?}", e)),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize: {}", e))
}

impl CompletionClient for ChromeHost {
    async fn complete(&self, request: &CompletionRequest) -> crate::error::Result<CompletionResponse> {
        let request_js = to_js(request).map_err(ClassifyError::Payload)?;
        let response_js = requestCompletion(request_js)
            .await
            .map_err(|e| ClassifyError::Transport(js_error(e)))?;

        serde_wasm_bindgen::from_value(response_js)
            .map_err(|e| ClassifyError::Transport(format!("Unreadable bridge response: {}", e)))
    }
}

impl CredentialStore for ChromeHost {
    async fn get(&self) -> Result<Option<String>, HostError> {
        let value = getStorage(API_KEY_STORAGE_KEY)
            .await
            .map_err(|e| HostError::Bridge(js_error(e)))?;
        Ok(value.as_string())
    }

    async fn set(&self, value: &str) -> Result<(), HostError> {
        setStorage(API_KEY_STORAGE_KEY, JsValue::from_str(value))
            .await
            .map_err(|e| HostError::Bridge(js_error(e)))
    }
}

pub async fn get_current_tabs() -> Result<Vec<TabInfo>, HostError> {
    let tabs_js = getCurrentWindowTabs()
        .await
        .map_err(|e| HostError::Bridge(js_error(e)))?;
    serde_wasm_bindgen::from_value(tabs_js).map_err(|e| HostError::Decode(e.to_string()))
}

pub async fn count_groups() -> Result<usize, HostError> {
    let count = countWindowGroups()
        .await
        .map_err(|e| HostError::Bridge(js_error(e)))?;
    count
        .as_f64()
        .map(|n| n as usize)
        .ok_or_else(|| HostError::Decode("group count is not a number".to_string()))
}

pub async fn remove_tabs(tab_ids: &[TabId]) -> Result<(), HostError> {
    let ids_js = to_js(&tab_ids).map_err(HostError::Decode)?;
    removeTabs(ids_js).await.map_err(|e| HostError::Bridge(js_error(e)))
}

/// Create the planned groups in order. The first failure aborts the loop;
/// groups created before it stay in place.
pub async fn apply_groups(plans: &[GroupPlan]) -> Result<usize, HostError> {
    for (created, plan) in plans.iter().enumerate() {
        let ids_js = to_js(&plan.tab_ids).map_err(HostError::Decode)?;
        createGroup(ids_js, &plan.title, plan.color.as_str())
            .await
            .map_err(|e| {
                HostError::Bridge(format!(
                    "failed creating group '{}' after {} others: {}",
                    plan.title,
                    created,
                    js_error(e)
                ))
            })?;
    }
    Ok(plans.len())
}

pub async fn ungroup_tabs(tab_ids: &[TabId]) -> Result<(), HostError> {
    for id in tab_ids {
        ungroupTab(*id).await.map_err(|e| HostError::Bridge(js_error(e)))?;
    }
    Ok(())
}

/// Stored overrides, or defaults when absent or unreadable
pub async fn load_config() -> OrganizerConfig {
    let stored = match getStorage(CONFIG_STORAGE_KEY).await {
        Ok(value) if !value.is_null() && !value.is_undefined() => value,
        Ok(_) => return OrganizerConfig::default(),
        Err(e) => {
            log::warn!("Could not read config, using defaults: {}", js_error(e));
            return OrganizerConfig::default();
        }
    };

    serde_wasm_bindgen::from_value::<serde_json::Value>(stored)
        .map_err(|e| e.to_string())
        .and_then(|value| OrganizerConfig::from_json(value).map_err(|e| e.to_string()))
        .unwrap_or_else(|e| {
            log::warn!("Ignoring invalid stored config: {}", e);
            OrganizerConfig::default()
        })
}
