use crate::config::{LandingConfig, ParallaxRates};
use crate::error::LandingError;
use crate::utils::dom::{set_style, translate_y};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::Reducible;

/// Navbar presentation: solid background once scrolled, and the mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    pub menu_open: bool,
}

impl NavState {
    pub fn on_scroll(self, scroll_y: f64, threshold: f64) -> Self {
        Self {
            scrolled: scroll_y > threshold,
            ..self
        }
    }

    pub fn toggle_menu(self) -> Self {
        Self {
            menu_open: !self.menu_open,
            ..self
        }
    }

    pub fn close_menu(self) -> Self {
        Self {
            menu_open: false,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavAction {
    Scrolled { scroll_y: f64, threshold: f64 },
    ToggleMenu,
    CloseMenu,
}

impl NavState {
    pub fn apply(self, action: NavAction) -> Self {
        match action {
            NavAction::Scrolled { scroll_y, threshold } => self.on_scroll(scroll_y, threshold),
            NavAction::ToggleMenu => self.toggle_menu(),
            NavAction::CloseMenu => self.close_menu(),
        }
    }
}

impl Reducible for NavState {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).apply(action))
    }
}

/// Transforms for every parallax layer at one scroll offset.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxFrame {
    pub background_y: f64,
    pub silhouette_y: f64,
    pub silhouette_deg: f64,
    pub particle_ys: Vec<f64>,
}

impl ParallaxFrame {
    pub fn at(scroll_y: f64, particles: usize, rates: &ParallaxRates) -> Self {
        Self {
            background_y: scroll_y * rates.background,
            silhouette_y: scroll_y * rates.silhouette,
            silhouette_deg: scroll_y * rates.silhouette_rotation,
            particle_ys: (0..particles)
                .map(|i| scroll_y * (rates.particle_base + rates.particle_step * i as f64))
                .collect(),
        }
    }

    pub fn background_transform(&self) -> String {
        translate_y(self.background_y)
    }

    pub fn silhouette_transform(&self) -> String {
        format!("{} rotate({}deg)", translate_y(self.silhouette_y), self.silhouette_deg)
    }
}

/// Layers moved by the parallax effect. Missing layers are skipped.
#[derive(Clone, Default)]
pub struct ParallaxLayers {
    pub background: Option<HtmlElement>,
    pub silhouette: Option<HtmlElement>,
    pub particles: Vec<HtmlElement>,
}

impl ParallaxLayers {
    pub fn apply(&self, frame: &ParallaxFrame) -> Result<(), LandingError> {
        if let Some(bg) = &self.background {
            set_style(bg, "transform", &frame.background_transform())?;
        }
        if let Some(s) = &self.silhouette {
            set_style(s, "transform", &frame.silhouette_transform())?;
        }
        for (particle, y) in self.particles.iter().zip(&frame.particle_ys) {
            set_style(particle, "transform", &translate_y(*y))?;
        }
        Ok(())
    }
}

/// At most one animation frame in flight, however many scroll events arrive.
#[derive(Debug, Clone, Default)]
pub struct FrameGuard(Rc<Cell<bool>>);

impl FrameGuard {
    /// Returns true if the caller should request a frame.
    pub fn try_claim(&self) -> bool {
        !self.0.replace(true)
    }

    pub fn release(&self) {
        self.0.set(false);
    }

    /// Frees the claim when the frame could not be requested, so the next scroll retries.
    pub fn release_on_err<T, E>(&self, requested: Result<T, E>) -> Result<T, E> {
        if requested.is_err() {
            self.release();
        }
        requested
    }
}

/// Schedules one parallax update on the next animation frame unless one is pending.
pub fn request_parallax(
    guard: &FrameGuard,
    layers: ParallaxLayers,
    config: &LandingConfig,
) -> Result<(), LandingError> {
    if !guard.try_claim() {
        return Ok(());
    }
    let window = crate::utils::dom::get_window()?;
    let frame_guard = guard.clone();
    let rates = config.parallax;
    let callback = Closure::once_into_js(move || {
        // read before any write
        let scroll_y = web_sys::window()
            .and_then(|w| w.page_y_offset().ok())
            .unwrap_or(0.0);
        let frame = ParallaxFrame::at(scroll_y, layers.particles.len(), &rates);
        if let Err(e) = layers.apply(&frame) {
            crate::error::log_failure("Parallax update failed", &e);
        }
        frame_guard.release();
    });
    guard.release_on_err(window.request_animation_frame(callback.unchecked_ref()))?;
    Ok(())
}
