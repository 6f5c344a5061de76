/// JS bridge implementations of the host traits for the real browser

use wasm_bindgen::prelude::*;

use crate::registry::{MuteStore, STORAGE_KEY, TabHost};
use crate::tab_data::TabInfo;

// Import JS bridge functions
#[wasm_bindgen(module = "/background.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setTabMuted(tab_id: i32, muted: bool) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// Tab operations over chrome.tabs
pub struct BridgeTabs;

impl TabHost for BridgeTabs {
    async fn all_tabs(&self) -> Result<Vec<TabInfo>, String> {
        let tabs_js = queryTabs()
            .await
            .map_err(|e| format!("Failed to query tabs: {:?}", e))?;
        serde_wasm_bindgen::from_value(tabs_js).map_err(|e| format!("Failed to parse tabs: {:?}", e))
    }

    async fn set_muted(&self, tab_id: i32, muted: bool) -> Result<(), String> {
        setTabMuted(tab_id, muted)
            .await
            .map_err(|e| format!("Failed to update tab {}: {:?}", tab_id, e))
    }
}

/// Persistence over chrome.storage.local
pub struct BridgeStorage;

impl MuteStore for BridgeStorage {
    async fn load_domains(&self) -> Result<Vec<String>, String> {
        let value = getStorage(STORAGE_KEY)
            .await
            .map_err(|e| format!("Failed to read storage: {:?}", e))?;

        // First run: nothing stored yet
        if value.is_null() || value.is_undefined() {
            return Ok(Vec::new());
        }

        serde_wasm_bindgen::from_value(value)
            .map_err(|e| format!("Failed to parse stored domains: {:?}", e))
    }

    async fn save_domains(&self, domains: &[String]) -> Result<(), String> {
        let value = serde_wasm_bindgen::to_value(domains)
            .map_err(|e| format!("Failed to serialize domains: {:?}", e))?;
        setStorage(STORAGE_KEY, value)
            .await
            .map_err(|e| format!("Failed to write storage: {:?}", e))
    }
}
