use log::Level;

/// Timings, thresholds and switches for the landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingConfig {
    pub log_level: Level,
    /// Vertical offset after which the navbar switches to its solid style.
    pub nav_scrolled_threshold: f64,
    /// Height of the fixed navbar, subtracted from anchor scroll targets.
    pub header_offset: f64,
    pub notification_enter_ms: u32,
    pub notification_visible_ms: u32,
    pub notification_exit_ms: u32,
    pub submit_latency_ms: u32,
    pub count_up_duration_ms: u32,
    pub count_up_steps: u32,
    pub pulse_hide_ms: u32,
    pub pulse_settle_ms: u32,
    pub stagger_step_ms: u32,
    pub observer_threshold: f64,
    pub fade_root_margin: &'static str,
    pub parallax: ParallaxRates,
    pub service_worker_path: &'static str,
    pub gtag_enabled: bool,
    pub pixel_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxRates {
    pub background: f64,
    pub silhouette: f64,
    pub silhouette_rotation: f64,
    pub particle_base: f64,
    pub particle_step: f64,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            log_level: if cfg!(debug_assertions) { Level::Debug } else { Level::Info },
            nav_scrolled_threshold: 100.0,
            header_offset: 80.0,
            notification_enter_ms: 100,
            notification_visible_ms: 5000,
            notification_exit_ms: 300,
            submit_latency_ms: 2000,
            count_up_duration_ms: 2000,
            count_up_steps: 60,
            pulse_hide_ms: 300,
            pulse_settle_ms: 200,
            stagger_step_ms: 100,
            observer_threshold: 0.1,
            fade_root_margin: "0px 0px -50px 0px",
            parallax: ParallaxRates {
                background: -0.5,
                silhouette: 0.3,
                silhouette_rotation: 0.02,
                particle_base: 0.1,
                particle_step: 0.05,
            },
            service_worker_path: "/sw.js",
            gtag_enabled: option_env!("LANDING_DISABLE_GTAG").is_none(),
            pixel_enabled: option_env!("LANDING_DISABLE_PIXEL").is_none(),
        }
    }
}

pub fn get_config() -> LandingConfig {
    LandingConfig::default()
}

impl LandingConfig {
    /// Milliseconds between two count-up frames.
    pub fn count_up_step_ms(&self) -> u32 {
        self.count_up_duration_ms / self.count_up_steps.max(1)
    }
}
