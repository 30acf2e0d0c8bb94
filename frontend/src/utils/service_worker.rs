use crate::config::LandingConfig;
use crate::error::LandingError;
use crate::utils::dom;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    Unsupported,
}

/// Log line for a finished registration attempt.
pub fn describe(outcome: &Result<Registration, LandingError>) -> String {
    match outcome {
        Ok(Registration::Registered) => "ServiceWorker registration successful".to_string(),
        Ok(Registration::Unsupported) => {
            "ServiceWorker not supported, skipping registration".to_string()
        }
        Err(e) => format!("ServiceWorker registration failed: {}", e),
    }
}

async fn register(path: &'static str) -> Result<Registration, LandingError> {
    let navigator = dom::get_window()?.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))? {
        return Ok(Registration::Unsupported);
    }
    JsFuture::from(navigator.service_worker().register(path)).await?;
    Ok(Registration::Registered)
}

fn spawn_register(path: &'static str) {
    spawn_local(async move {
        let outcome = register(path).await;
        match outcome {
            Err(_) => log::warn!("{}", describe(&outcome)),
            Ok(_) => log::info!("{}", describe(&outcome)),
        }
    });
}

/// Registers the caching worker once the page has loaded. The outcome is only logged.
pub fn register_on_load(config: &LandingConfig) -> Result<(), LandingError> {
    let path = config.service_worker_path;
    let window = dom::get_window()?;
    if dom::get_document()?.ready_state() == "complete" {
        spawn_register(path);
        return Ok(());
    }
    let on_load = Closure::once_into_js(move || spawn_register(path));
    window.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_real_registration_reports_success() {
        assert_eq!(
            describe(&Ok(Registration::Registered)),
            "ServiceWorker registration successful"
        );
        let unsupported = describe(&Ok(Registration::Unsupported));
        assert!(!unsupported.contains("successful"));
        assert!(unsupported.contains("not supported"));
        let failed = describe(&Err(LandingError::Js("SecurityError".into())));
        assert!(failed.starts_with("ServiceWorker registration failed"));
        assert!(failed.contains("SecurityError"));
    }
}
