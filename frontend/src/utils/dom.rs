use crate::config;
use crate::error::LandingError;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

pub fn get_window() -> Result<Window, LandingError> {
    window().ok_or(LandingError::NoWindow)
}

pub fn get_document() -> Result<Document, LandingError> {
    get_window()?.document().ok_or(LandingError::NoDocument)
}

/// All elements matching `selector`, in document order.
pub fn query_all(selector: &str) -> Result<Vec<HtmlElement>, LandingError> {
    let list = get_document()?.query_selector_all(selector)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), LandingError> {
    el.style().set_property(property, value)?;
    Ok(())
}

pub fn translate_y(px: f64) -> String {
    format!("translate3d(0, {}px, 0)", px)
}

/// Scroll target for a section whose top sits at `offset_top`, leaving room for the fixed navbar.
pub fn anchor_scroll_top(offset_top: f64, header_offset: f64) -> f64 {
    offset_top - header_offset
}

/// Smoothly scrolls so the element with `id` sits just below the navbar.
pub fn scroll_to_section(id: &str) -> Result<(), LandingError> {
    let target = get_document()?
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| LandingError::MissingElement(format!("#{}", id)))?;
    let top = anchor_scroll_top(target.offset_top() as f64, config::get_config().header_offset);
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    get_window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Scrolls to an in-page anchor such as `#products`. Other hrefs are ignored.
pub fn scroll_to_anchor(href: &str) -> Result<(), LandingError> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => scroll_to_section(id),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_target_leaves_room_for_navbar() {
        assert_eq!(anchor_scroll_top(1200.0, 80.0), 1120.0);
        assert_eq!(anchor_scroll_top(40.0, 80.0), -40.0);
    }

    #[test]
    fn translate_formats_css() {
        assert_eq!(translate_y(-25.0), "translate3d(0, -25px, 0)");
        assert_eq!(translate_y(12.5), "translate3d(0, 12.5px, 0)");
    }

    #[test]
    fn non_anchor_hrefs_are_ignored() {
        assert!(scroll_to_anchor("https://example.com").is_ok());
        assert!(scroll_to_anchor("#").is_ok());
    }
}
