//! `window.EkowAI`, the handful of entry points page scripts and inline
//! handlers may call directly.

use crate::components::notification::{Notifier, Severity};
use crate::error::{log_failure, LandingError};
use crate::forms::validation::LeadSubmission;
use crate::utils::{analytics, dom};
use std::cell::RefCell;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsValue;
use web_sys::js_sys;

pub const GLOBAL_NAME: &str = "EkowAI";

thread_local! {
    static NOTIFIER: RefCell<Option<Notifier>> = RefCell::new(None);
}

pub fn register_notifier(notifier: Notifier) {
    NOTIFIER.with(|n| *n.borrow_mut() = Some(notifier));
}

pub fn clear_notifier() {
    NOTIFIER.with(|n| *n.borrow_mut() = None);
}

/// Shows a toast if the notification host is mounted; otherwise does nothing.
pub fn show_notification(message: &str, severity: Severity) {
    match NOTIFIER.with(|n| n.borrow().clone()) {
        Some(notifier) => notifier.show(message, severity),
        None => log::debug!("No notification host mounted, dropping '{}'", message),
    }
}

pub fn scroll_to_email_capture() {
    if let Err(e) = dom::scroll_to_section("contact") {
        log_failure("Scroll to contact failed", &e);
    }
}

pub fn scroll_to_products() {
    if let Err(e) = dom::scroll_to_section("products") {
        log_failure("Scroll to products failed", &e);
    }
}

/// Reads whatever object a script passed as conversion data. Missing fields stay empty.
pub fn lead_from_json(json: &str) -> Result<LeadSubmission, LandingError> {
    if json.trim().is_empty() || json == "undefined" || json == "null" {
        return Ok(LeadSubmission::default());
    }
    Ok(serde_json::from_str(json)?)
}

fn track_conversion(event: &str, data: &JsValue) {
    let json = js_sys::JSON::stringify(data)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_default();
    match lead_from_json(&json) {
        Ok(lead) => analytics::track(event, &lead),
        Err(e) => log_failure("Ignoring conversion with unreadable data", &e),
    }
}

fn set_fn(target: &js_sys::Object, name: &str, f: &JsValue) -> Result<(), LandingError> {
    js_sys::Reflect::set(target, &JsValue::from_str(name), f)?;
    Ok(())
}

/// Publishes `window.EkowAI`. The closures live for the page lifetime.
pub fn expose() -> Result<(), LandingError> {
    let window = dom::get_window()?;
    let api = js_sys::Object::new();

    let scroll_contact = Closure::<dyn Fn()>::new(scroll_to_email_capture);
    set_fn(&api, "scrollToEmailCapture", scroll_contact.as_ref())?;
    scroll_contact.forget();

    let scroll_products = Closure::<dyn Fn()>::new(scroll_to_products);
    set_fn(&api, "scrollToProducts", scroll_products.as_ref())?;
    scroll_products.forget();

    let track = Closure::<dyn Fn(String, JsValue)>::new(|event: String, data: JsValue| {
        track_conversion(&event, &data)
    });
    set_fn(&api, "trackConversion", track.as_ref())?;
    track.forget();

    let notify = Closure::<dyn Fn(String, Option<String>)>::new(
        |message: String, kind: Option<String>| {
            show_notification(&message, Severity::parse(kind.as_deref().unwrap_or("info")))
        },
    );
    set_fn(&api, "showNotification", notify.as_ref())?;
    notify.forget();

    js_sys::Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), &api)?;
    log::debug!("window.{} exposed", GLOBAL_NAME);
    Ok(())
}
