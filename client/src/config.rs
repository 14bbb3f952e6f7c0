use js_sys::Reflect;
use wasm_bindgen::JsValue;

use orbis_shared::GlobeConfig;

/// Global object the host page may define to override startup settings.
const CONFIG_GLOBAL: &str = "ORBIS_CONFIG";

/// Read `window.ORBIS_CONFIG`, falling back to defaults when absent or malformed.
pub fn read_config() -> GlobeConfig {
    let Some(window) = web_sys::window() else {
        return GlobeConfig::default();
    };
    let value = Reflect::get(window.as_ref(), &JsValue::from_str(CONFIG_GLOBAL))
        .unwrap_or(JsValue::UNDEFINED);
    if value.is_undefined() || value.is_null() {
        return GlobeConfig::default();
    }

    match serde_wasm_bindgen::from_value::<GlobeConfig>(value) {
        Ok(config) => config.sanitized(),
        Err(e) => {
            web_sys::console::warn_1(&format!("Ignoring {CONFIG_GLOBAL}: {e}").into());
            GlobeConfig::default()
        }
    }
}
