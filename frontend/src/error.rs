use thiserror::Error;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::ErrorEvent;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("No window available")]
    NoWindow,
    #[error("No document available")]
    NoDocument,
    #[error("Element not found: {0}")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&value)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        LandingError::Js(text)
    }
}

/// Logs a failed side effect. Nothing on this page is worth surfacing to the user.
pub fn log_failure(context: &str, err: &LandingError) {
    log::warn!("{}: {}", context, err);
}

/// Logs uncaught script errors. There is no recovery; this is diagnostics only.
pub fn install_global_handler() -> Result<(), LandingError> {
    let window = web_sys::window().ok_or(LandingError::NoWindow)?;
    let handler = Closure::<dyn Fn(ErrorEvent)>::new(|event: ErrorEvent| {
        log::error!(
            "JavaScript error: {} ({}:{}:{}) {:?}",
            event.message(),
            event.filename(),
            event.lineno(),
            event.colno(),
            event.error()
        );
    });
    window.add_event_listener_with_callback("error", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
