use crate::config::{self, LandingConfig};
use crate::error::{log_failure, LandingError};
use crate::utils::dom::set_style;
use crate::utils::schedule::{spawn_timeline, CancelToken, Timeline};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

/// Text that gets a pulse instead of a count-up.
pub const PULSE_WORD: &str = "First";

/// A stat like `40+`: the number to count to and whatever trails it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatValue {
    pub target: u64,
    pub suffix: String,
}

impl StatValue {
    /// Parses `<digits><suffix>`. Returns `None` when the text does not start with a number.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let split = text
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let target = text[..split].parse().ok()?;
        Some(Self {
            target,
            suffix: text[split..].to_string(),
        })
    }

    pub fn render(&self, value: u64) -> String {
        format!("{}{}", value, self.suffix)
    }

    /// Display texts for a count-up in `steps` frames: the zero frame, then one per step.
    /// The last frame is always exactly the target.
    pub fn frames(&self, steps: u32) -> CountUp<'_> {
        CountUp {
            stat: self,
            step: 0,
            steps: steps.max(1),
        }
    }
}

pub struct CountUp<'a> {
    stat: &'a StatValue,
    step: u32,
    steps: u32,
}

impl Iterator for CountUp<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step > self.steps {
            return None;
        }
        let value = if self.step == self.steps {
            self.stat.target
        } else {
            // widened so very large targets cannot overflow
            (self.stat.target as u128 * self.step as u128 / self.steps as u128) as u64
        };
        self.step += 1;
        Some(self.stat.render(value))
    }
}

/// Visual state of the `First` pulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseStyle {
    pub opacity: f64,
    pub scale: f64,
}

pub fn pulse_timeline(config: &LandingConfig) -> Timeline<PulseStyle> {
    Timeline::new()
        .then("hide", 0, PulseStyle { opacity: 0.0, scale: 1.0 })
        .then("pop", config.pulse_hide_ms, PulseStyle { opacity: 1.0, scale: 1.1 })
        .then("settle", config.pulse_settle_ms, PulseStyle { opacity: 1.0, scale: 1.0 })
}

fn apply_pulse(el: &HtmlElement, style: PulseStyle) -> Result<(), LandingError> {
    set_style(el, "opacity", &style.opacity.to_string())?;
    set_style(el, "transform", &format!("scale({})", style.scale))
}

/// Animates the number inside a stat block once it scrolls into view.
pub fn animate(number: HtmlElement) {
    let config = config::get_config();
    let text = number.text_content().unwrap_or_default();

    if text.trim() == PULSE_WORD {
        spawn_timeline(pulse_timeline(&config), CancelToken::new(), move |style| {
            if let Err(e) = apply_pulse(&number, style) {
                log_failure("Stat pulse failed", &e);
            }
        });
        return;
    }

    let Some(stat) = StatValue::parse(&text) else {
        log::debug!("Stat '{}' is not numeric, leaving it as is", text);
        return;
    };

    let step_ms = config.count_up_step_ms();
    let steps = config.count_up_steps;
    spawn_local(async move {
        for (i, frame) in stat.frames(steps).enumerate() {
            if i > 0 {
                TimeoutFuture::new(step_ms).await;
            }
            number.set_text_content(Some(&frame));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_and_suffix() {
        assert_eq!(
            StatValue::parse("40+"),
            Some(StatValue { target: 40, suffix: "+".into() })
        );
        assert_eq!(
            StatValue::parse("100%"),
            Some(StatValue { target: 100, suffix: "%".into() })
        );
        assert_eq!(
            StatValue::parse("7"),
            Some(StatValue { target: 7, suffix: String::new() })
        );
        assert_eq!(StatValue::parse("First"), None);
        assert_eq!(StatValue::parse(""), None);
    }

    #[test]
    fn count_up_ends_exactly_on_target() {
        let stat = StatValue::parse("40+").unwrap();
        let frames: Vec<String> = stat.frames(60).collect();
        assert_eq!(frames.len(), 61);
        assert_eq!(frames.first().map(String::as_str), Some("0+"));
        assert_eq!(frames.last().map(String::as_str), Some("40+"));
    }

    #[test]
    fn count_up_never_decreases_and_keeps_suffix() {
        let stat = StatValue::parse("1234 fans").unwrap();
        let values: Vec<u64> = stat
            .frames(60)
            .map(|f| {
                let digits = f.strip_suffix(" fans").expect("suffix kept");
                digits.parse().unwrap()
            })
            .collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), 1234);
    }

    #[test]
    fn count_up_fits_duration() {
        let config = LandingConfig::default();
        let ticks = config.count_up_steps * config.count_up_step_ms();
        assert!(ticks <= config.count_up_duration_ms);
        assert!(config.count_up_duration_ms - ticks <= config.count_up_step_ms());
    }

    #[test]
    fn huge_target_counts_up_without_overflow() {
        let stat = StatValue::parse("1000000000000000000").unwrap();
        let frames: Vec<String> = stat.frames(60).collect();
        assert_eq!(frames[30], "500000000000000000");
        assert_eq!(frames.last().map(String::as_str), Some("1000000000000000000"));

        let max = StatValue::parse(&u64::MAX.to_string()).unwrap();
        assert_eq!(max.frames(60).last(), Some(u64::MAX.to_string()));
    }

    #[test]
    fn zero_target_stays_at_zero() {
        let stat = StatValue::parse("0").unwrap();
        assert!(stat.frames(60).all(|f| f == "0"));
    }

    #[test]
    fn pulse_restores_full_opacity() {
        let timeline = pulse_timeline(&LandingConfig::default());
        let last = timeline.steps().last().unwrap().action;
        assert_eq!(last, PulseStyle { opacity: 1.0, scale: 1.0 });
        assert_eq!(timeline.offset_of("pop"), Some(300));
        assert_eq!(timeline.offset_of("settle"), Some(500));
        assert_eq!(timeline.steps()[0].action.opacity, 0.0);
    }
}
