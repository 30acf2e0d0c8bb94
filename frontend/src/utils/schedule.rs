use gloo_timers::future::TimeoutFuture;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

/// One step of a timeline, fired `delay_ms` after the previous step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<A> {
    pub label: &'static str,
    pub delay_ms: u32,
    pub action: A,
}

/// An ordered list of delayed actions. Delays are relative to the previous step.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<A> {
    steps: Vec<Step<A>>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, label: &'static str, delay_ms: u32, action: A) -> Self {
        self.steps.push(Step { label, delay_ms, action });
        self
    }

    pub fn steps(&self) -> &[Step<A>] {
        &self.steps
    }

    pub fn total_ms(&self) -> u32 {
        self.steps.iter().map(|s| s.delay_ms).sum()
    }

    /// Absolute firing time of each step, measured from the start.
    pub fn offsets(&self) -> Vec<(&'static str, u32)> {
        let mut at = 0;
        self.steps
            .iter()
            .map(|s| {
                at += s.delay_ms;
                (s.label, at)
            })
            .collect()
    }

    /// Absolute firing time of the step with `label`.
    pub fn offset_of(&self, label: &str) -> Option<u32> {
        self.offsets()
            .into_iter()
            .find(|(l, _)| *l == label)
            .map(|(_, at)| at)
    }
}

/// Shared flag that stops a running timeline before its next step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Runs `timeline` on the browser event loop, handing each action to `apply`.
pub fn spawn_timeline<A, F>(timeline: Timeline<A>, token: CancelToken, mut apply: F)
where
    A: 'static,
    F: FnMut(A) + 'static,
{
    spawn_local(async move {
        for step in timeline.steps {
            if step.delay_ms > 0 {
                TimeoutFuture::new(step.delay_ms).await;
            }
            if token.is_cancelled() {
                log::debug!("Timeline cancelled before step '{}'", step.label);
                return;
            }
            apply(step.action);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_accumulate_relative_delays() {
        let timeline = Timeline::new()
            .then("a", 0, 1)
            .then("b", 100, 2)
            .then("c", 250, 3);
        assert_eq!(timeline.offsets(), vec![("a", 0), ("b", 100), ("c", 350)]);
        assert_eq!(timeline.total_ms(), 350);
        assert_eq!(timeline.offset_of("b"), Some(100));
        assert_eq!(timeline.offset_of("missing"), None);
    }

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }
}
