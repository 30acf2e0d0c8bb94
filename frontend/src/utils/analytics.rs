use crate::config::LandingConfig;
use crate::error::LandingError;
use crate::forms::validation::LeadSubmission;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;

pub const SIGNUP_EVENT: &str = "email_signup";

/// A third-party analytics sink that receives conversion events.
#[cfg_attr(test, mockall::automock)]
pub trait TrackingProvider {
    fn name(&self) -> &'static str;
    fn send(&self, event: &str, lead: &LeadSubmission) -> Result<(), LandingError>;
}

/// Parameters handed to `gtag("event", name, params)`.
pub fn gtag_params(lead: &LeadSubmission) -> Value {
    json!({
        "custom_parameter_1": lead.role,
        "custom_parameter_2": "landing_page",
    })
}

/// Parameters handed to `fbq("track", "Lead", params)`.
pub fn pixel_params() -> Value {
    json!({ "content_category": "AI_Football_Technology" })
}

fn to_js(value: &Value) -> Result<JsValue, LandingError> {
    Ok(js_sys::JSON::parse(&serde_json::to_string(value)?)?)
}

fn global_function(name: &str) -> Option<js_sys::Function> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

/// Google Analytics 4 via the page's `gtag` function.
pub struct GtagProvider {
    gtag: js_sys::Function,
}

impl GtagProvider {
    pub fn detect() -> Option<Self> {
        global_function("gtag").map(|gtag| Self { gtag })
    }
}

impl TrackingProvider for GtagProvider {
    fn name(&self) -> &'static str {
        "gtag"
    }

    fn send(&self, event: &str, lead: &LeadSubmission) -> Result<(), LandingError> {
        self.gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(event),
            &to_js(&gtag_params(lead))?,
        )?;
        Ok(())
    }
}

/// Facebook Pixel via the page's `fbq` function.
pub struct PixelProvider {
    fbq: js_sys::Function,
}

impl PixelProvider {
    pub fn detect() -> Option<Self> {
        global_function("fbq").map(|fbq| Self { fbq })
    }
}

impl TrackingProvider for PixelProvider {
    fn name(&self) -> &'static str {
        "fbq"
    }

    fn send(&self, _event: &str, _lead: &LeadSubmission) -> Result<(), LandingError> {
        self.fbq.call3(
            &JsValue::NULL,
            &JsValue::from_str("track"),
            &JsValue::from_str("Lead"),
            &to_js(&pixel_params())?,
        )?;
        Ok(())
    }
}

/// Fans conversion events out to every configured provider.
#[derive(Default)]
pub struct Tracker {
    providers: Vec<Box<dyn TrackingProvider>>,
}

impl Tracker {
    pub fn new(providers: Vec<Box<dyn TrackingProvider>>) -> Self {
        Self { providers }
    }

    /// Builds the provider list once from whatever globals the page loaded.
    pub fn from_environment(config: &LandingConfig) -> Self {
        let mut providers: Vec<Box<dyn TrackingProvider>> = Vec::new();
        if config.gtag_enabled {
            if let Some(p) = GtagProvider::detect() {
                providers.push(Box::new(p));
            }
        }
        if config.pixel_enabled {
            if let Some(p) = PixelProvider::detect() {
                providers.push(Box::new(p));
            }
        }
        log::info!(
            "Tracking providers: [{}]",
            providers.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
        );
        Self { providers }
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Forwards the event to every provider. Failures are logged and skipped.
    pub fn track(&self, event: &str, lead: &LeadSubmission) {
        for provider in &self.providers {
            if let Err(e) = provider.send(event, lead) {
                log::warn!("Tracking provider {} failed: {}", provider.name(), e);
            }
        }
        log::info!(
            "Conversion tracked: {} {}",
            event,
            serde_json::to_string(lead).unwrap_or_default()
        );
    }
}

thread_local! {
    static TRACKER: RefCell<Rc<Tracker>> = RefCell::new(Rc::new(Tracker::default()));
}

/// Replaces the page-wide tracker. Called once at startup.
pub fn install(tracker: Tracker) {
    log::debug!("Tracker installed with {} provider(s)", tracker.provider_count());
    TRACKER.with(|t| *t.borrow_mut() = Rc::new(tracker));
}

pub fn track(event: &str, lead: &LeadSubmission) {
    let tracker = TRACKER.with(|t| t.borrow().clone());
    tracker.track(event, lead);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> LeadSubmission {
        LeadSubmission {
            name: "Kofi".into(),
            email: "kofi@club.gh".into(),
            role: "scout".into(),
        }
    }

    #[test]
    fn gtag_params_carry_role_and_source() {
        assert_eq!(
            gtag_params(&lead()),
            json!({"custom_parameter_1": "scout", "custom_parameter_2": "landing_page"})
        );
    }

    #[test]
    fn pixel_params_are_fixed() {
        assert_eq!(pixel_params(), json!({"content_category": "AI_Football_Technology"}));
    }

    #[test]
    fn track_reaches_every_provider_once() {
        let mut first = MockTrackingProvider::new();
        first.expect_name().return_const("first");
        first
            .expect_send()
            .withf(|event, l| event == SIGNUP_EVENT && *l == lead())
            .times(1)
            .returning(|_, _| Ok(()));
        let mut second = MockTrackingProvider::new();
        second.expect_name().return_const("second");
        second.expect_send().times(1).returning(|_, _| Ok(()));

        let tracker = Tracker::new(vec![Box::new(first), Box::new(second)]);
        assert_eq!(tracker.provider_count(), 2);
        tracker.track(SIGNUP_EVENT, &lead());
    }

    #[test]
    fn failing_provider_does_not_stop_the_rest() {
        let mut broken = MockTrackingProvider::new();
        broken.expect_name().return_const("broken");
        broken
            .expect_send()
            .times(1)
            .returning(|_, _| Err(LandingError::Js("blocked by extension".into())));
        let mut healthy = MockTrackingProvider::new();
        healthy.expect_name().return_const("healthy");
        healthy.expect_send().times(1).returning(|_, _| Ok(()));

        Tracker::new(vec![Box::new(broken), Box::new(healthy)]).track(SIGNUP_EVENT, &lead());
    }

    #[test]
    fn no_providers_is_a_no_op() {
        let tracker = Tracker::default();
        assert_eq!(tracker.provider_count(), 0);
        tracker.track(SIGNUP_EVENT, &lead());
    }
}
