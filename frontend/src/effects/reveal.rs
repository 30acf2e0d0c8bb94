use crate::config::LandingConfig;
use crate::effects::stat_counter;
use crate::error::{log_failure, LandingError};
use crate::utils::dom::{query_all, set_style};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, HtmlElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

pub const FADE_SELECTOR: &str = ".founder-card, .tech-card, .product-card, .section-header, .stat";
pub const STAGGER_SELECTOR: &str = ".tech-card, .product-card, .founder-card";
pub const LAZY_IMAGE_SELECTOR: &str = "img[data-src]";
pub const FADE_CLASS: &str = "fade-in-up";

const FADE_KEY: &str = "data-fade-key";
const REVEAL_KEY: &str = "data-reveal-key";

/// Keys that have already fired. Each key fires at most once.
#[derive(Debug, Default)]
pub struct SingleFire {
    fired: HashSet<u32>,
}

impl SingleFire {
    /// Returns true the first time `key` is seen.
    pub fn fire(&mut self, key: u32) -> bool {
        self.fired.insert(key)
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.fired.len()
    }
}

/// Reveal delay for each entry of one observer batch. Non-intersecting entries get `None`
/// but still take up their index.
pub fn stagger_delays(intersecting: &[bool], step_ms: u32) -> Vec<Option<u32>> {
    intersecting
        .iter()
        .enumerate()
        .map(|(i, hit)| hit.then_some(i as u32 * step_ms))
        .collect()
}

/// Keeps the observers and their callbacks alive; dropping it disconnects them.
pub struct RevealObservers {
    observers: Vec<IntersectionObserver>,
    _callbacks: Vec<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
}

impl Drop for RevealObservers {
    fn drop(&mut self) {
        for observer in &self.observers {
            observer.disconnect();
        }
    }
}

fn entries(batch: &js_sys::Array) -> Vec<IntersectionObserverEntry> {
    batch
        .iter()
        .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
        .collect()
}

fn target_key(el: &web_sys::Element, attr: &str) -> Option<u32> {
    el.get_attribute(attr)?.parse().ok()
}

/// Tags every element matching `selector` with a key under `attr` and starts observing it.
fn observe_all(
    observer: &IntersectionObserver,
    selector: &str,
    attr: &str,
    mut prepare: impl FnMut(&HtmlElement) -> Result<(), LandingError>,
) -> Result<usize, LandingError> {
    let elements = query_all(selector)?;
    for (i, el) in elements.iter().enumerate() {
        el.set_attribute(attr, &i.to_string())?;
        prepare(el)?;
        observer.observe(el);
    }
    Ok(elements.len())
}

fn new_observer(
    callback: &Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    threshold: f64,
    root_margin: Option<&str>,
) -> Result<IntersectionObserver, LandingError> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    Ok(IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    )?)
}

fn fade_in(el: &HtmlElement) -> Result<(), LandingError> {
    if el.class_list().contains("stat") {
        if let Some(number) = el
            .query_selector(".stat-number")?
            .and_then(|n| n.dyn_into::<HtmlElement>().ok())
        {
            stat_counter::animate(number);
        }
    }
    el.class_list().add_1(FADE_CLASS)?;
    Ok(())
}

fn reveal(el: &HtmlElement) -> Result<(), LandingError> {
    set_style(el, "opacity", "1")?;
    set_style(el, "transform", "translateY(0)")
}

fn hide_for_reveal(el: &HtmlElement) -> Result<(), LandingError> {
    set_style(el, "opacity", "0")?;
    set_style(el, "transform", "translateY(30px)")?;
    set_style(el, "transition", "opacity 0.6s ease, transform 0.6s ease")
}

fn load_image(img: &HtmlImageElement) -> Result<(), LandingError> {
    if let Some(src) = img.get_attribute("data-src") {
        img.set_src(&src);
    }
    img.class_list().remove_1("lazy")?;
    Ok(())
}

/// Starts the fade-in, staggered reveal and lazy image observers for the rendered page.
pub fn install(config: &LandingConfig) -> Result<RevealObservers, LandingError> {
    let mut observers = Vec::new();
    let mut callbacks = Vec::new();

    // fade-in
    let fired = Rc::new(RefCell::new(SingleFire::default()));
    let fade_cb = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new({
        let fired = fired.clone();
        move |batch: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries(&batch) {
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                let Some(key) = target_key(&target, FADE_KEY) else { continue };
                if !fired.borrow_mut().fire(key) {
                    continue;
                }
                if let Ok(el) = target.dyn_into::<HtmlElement>() {
                    if let Err(e) = fade_in(&el) {
                        log_failure("Fade-in failed", &e);
                    }
                }
            }
        }
    });
    let fade = new_observer(&fade_cb, config.observer_threshold, Some(config.fade_root_margin))?;
    let count = observe_all(&fade, FADE_SELECTOR, FADE_KEY, |_| Ok(()))?;
    log::debug!("Observing {} elements for fade-in", count);
    observers.push(fade);
    callbacks.push(fade_cb);

    // staggered reveal
    let revealed = Rc::new(RefCell::new(SingleFire::default()));
    let step_ms = config.stagger_step_ms;
    let stagger_cb = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new({
        let revealed = revealed.clone();
        move |batch: js_sys::Array, observer: IntersectionObserver| {
            let batch = entries(&batch);
            let hits: Vec<bool> = batch.iter().map(|e| e.is_intersecting()).collect();
            for (entry, delay) in batch.into_iter().zip(stagger_delays(&hits, step_ms)) {
                let Some(delay) = delay else { continue };
                let target = entry.target();
                observer.unobserve(&target);
                let Some(key) = target_key(&target, REVEAL_KEY) else { continue };
                if !revealed.borrow_mut().fire(key) {
                    continue;
                }
                if let Ok(el) = target.dyn_into::<HtmlElement>() {
                    gloo_timers::callback::Timeout::new(delay, move || {
                        if let Err(e) = reveal(&el) {
                            log_failure("Reveal failed", &e);
                        }
                    })
                    .forget();
                }
            }
        }
    });
    let stagger = new_observer(&stagger_cb, config.observer_threshold, None)?;
    observe_all(&stagger, STAGGER_SELECTOR, REVEAL_KEY, hide_for_reveal)?;
    observers.push(stagger);
    callbacks.push(stagger_cb);

    // lazy images
    let lazy_cb = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |batch: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries(&batch) {
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                if let Ok(img) = target.dyn_into::<HtmlImageElement>() {
                    if let Err(e) = load_image(&img) {
                        log_failure("Lazy image load failed", &e);
                    }
                }
            }
        },
    );
    let lazy = IntersectionObserver::new(lazy_cb.as_ref().unchecked_ref())?;
    observe_all(&lazy, LAZY_IMAGE_SELECTOR, "data-lazy-key", |_| Ok(()))?;
    observers.push(lazy);
    callbacks.push(lazy_cb);

    Ok(RevealObservers {
        observers,
        _callbacks: callbacks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_key_fires_once() {
        let mut fired = SingleFire::default();
        assert!(fired.fire(3));
        assert!(!fired.fire(3));
        assert!(fired.fire(4));
        for _ in 0..5 {
            assert!(!fired.fire(4));
        }
        assert_eq!(fired.count(), 2);
    }

    #[test]
    fn stagger_uses_position_in_batch() {
        assert_eq!(
            stagger_delays(&[true, true, true], 100),
            vec![Some(0), Some(100), Some(200)]
        );
        assert_eq!(
            stagger_delays(&[false, true, false, true], 100),
            vec![None, Some(100), None, Some(300)]
        );
        assert!(stagger_delays(&[], 100).is_empty());
    }
}
