use crate::config::{self, LandingConfig};
use crate::utils::global_api;
use crate::utils::schedule::{spawn_timeline, CancelToken, Timeline};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Maps the loose type names accepted from page scripts. Unknown names become `Info`.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "success" => Severity::Success,
            "error" => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#10B981",
            Severity::Error => "#EF4444",
            Severity::Info => "#3B82F6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub severity: Severity,
    pub phase: Phase,
}

/// The single overlay slot. A new toast always replaces the current one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSlot {
    pub current: Option<Toast>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAction {
    Present { id: u32, message: String, severity: Severity },
    Advance { id: u32, phase: Phase },
    Remove { id: u32 },
}

impl NotificationSlot {
    fn holds(&self, id: u32) -> bool {
        self.current.as_ref().map(|t| t.id) == Some(id)
    }

    pub fn apply(&self, action: SlotAction) -> Self {
        match action {
            SlotAction::Present { id, message, severity } => Self {
                current: Some(Toast {
                    id,
                    message,
                    severity,
                    phase: Phase::Entering,
                }),
            },
            SlotAction::Advance { id, phase } if self.holds(id) => Self {
                current: self.current.clone().map(|t| Toast { phase, ..t }),
            },
            SlotAction::Remove { id } if self.holds(id) => Self { current: None },
            // steps for a toast that was already replaced or closed
            _ => self.clone(),
        }
    }
}

impl Reducible for NotificationSlot {
    type Action = SlotAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

/// Entrance, auto-dismiss and removal of toast `id`.
pub fn lifecycle(config: &LandingConfig, id: u32) -> Timeline<SlotAction> {
    Timeline::new()
        .then(
            "slide-in",
            config.notification_enter_ms,
            SlotAction::Advance { id, phase: Phase::Shown },
        )
        .then(
            "slide-out",
            config
                .notification_visible_ms
                .saturating_sub(config.notification_enter_ms),
            SlotAction::Advance { id, phase: Phase::Leaving },
        )
        .then("remove", config.notification_exit_ms, SlotAction::Remove { id })
}

/// Handle used by the rest of the page to show a toast.
#[derive(Clone, PartialEq)]
pub struct Notifier {
    pub present: Callback<(String, Severity)>,
}

impl Notifier {
    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        self.present.emit((message.into(), severity));
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    pub children: Children,
}

#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let slot = use_reducer(NotificationSlot::default);
    let next_id = use_mut_ref(|| 0u32);
    let running = use_mut_ref(CancelToken::new);

    let notifier = {
        let dispatcher = slot.dispatcher();
        use_memo(
            move |_| {
                let present = Callback::from(move |(message, severity): (String, Severity)| {
                    let config = config::get_config();
                    let id = {
                        let mut next = next_id.borrow_mut();
                        *next += 1;
                        *next
                    };
                    running.borrow().cancel();
                    let token = CancelToken::new();
                    *running.borrow_mut() = token.clone();

                    dispatcher.dispatch(SlotAction::Present { id, message, severity });
                    let dispatcher = dispatcher.clone();
                    spawn_timeline(lifecycle(&config, id), token, move |action| {
                        dispatcher.dispatch(action)
                    });
                });
                Notifier { present }
            },
            (),
        )
    };

    {
        let notifier = (*notifier).clone();
        use_effect_with_deps(
            move |_| {
                global_api::register_notifier(notifier);
                || global_api::clear_notifier()
            },
            (),
        );
    }

    let overlay = match &slot.current {
        Some(toast) => {
            let id = toast.id;
            let onclose = {
                let dispatcher = slot.dispatcher();
                Callback::from(move |_: MouseEvent| dispatcher.dispatch(SlotAction::Remove { id }))
            };
            let offset = if toast.phase == Phase::Shown { "0" } else { "400px" };
            let style = format!(
                "position: fixed; top: 100px; right: 24px; z-index: 10000; background: {}; \
                 color: white; padding: 16px 20px; border-radius: 12px; \
                 box-shadow: 0 8px 32px rgba(0, 0, 0, 0.15); transform: translateX({}); \
                 transition: transform 0.3s ease; max-width: 400px; font-weight: 500;",
                toast.severity.color(),
                offset
            );
            html! {
                <div key={id} class={classes!("notification", format!("notification-{}", toast.severity.as_str()))} style={style}>
                    <div class="notification-content">
                        <span class="notification-message">{&toast.message}</span>
                        <button class="notification-close" onclick={onclose}>{"×"}</button>
                    </div>
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <ContextProvider<Notifier> context={(*notifier).clone()}>
            {props.children.clone()}
            {overlay}
        </ContextProvider<Notifier>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(id: u32, message: &str) -> SlotAction {
        SlotAction::Present {
            id,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// Replays timed actions in time order and returns the slot at `at_ms`.
    fn slot_at(mut events: Vec<(u32, SlotAction)>, at_ms: u32) -> NotificationSlot {
        events.sort_by_key(|(t, _)| *t);
        events
            .into_iter()
            .take_while(|(t, _)| *t <= at_ms)
            .fold(NotificationSlot::default(), |slot, (_, a)| slot.apply(a))
    }

    fn timed(config: &LandingConfig, start: u32, id: u32, cancel_at: Option<u32>) -> Vec<(u32, SlotAction)> {
        let timeline = lifecycle(config, id);
        timeline
            .offsets()
            .into_iter()
            .zip(timeline.steps().iter())
            .map(|((_, at), step)| (start + at, step.action.clone()))
            .filter(|(at, _)| cancel_at.map_or(true, |c| *at < c))
            .collect()
    }

    #[test]
    fn lifecycle_offsets_match_timings() {
        let timeline = lifecycle(&LandingConfig::default(), 7);
        assert_eq!(timeline.offset_of("slide-in"), Some(100));
        assert_eq!(timeline.offset_of("slide-out"), Some(5000));
        assert_eq!(timeline.offset_of("remove"), Some(5300));
        assert_eq!(timeline.total_ms(), 5300);
    }

    #[test]
    fn toast_is_gone_after_dismiss_window() {
        let config = LandingConfig::default();
        let mut events = vec![(0, present(1, "hello"))];
        events.extend(timed(&config, 0, 1, None));

        let shown = slot_at(events.clone(), 200);
        assert_eq!(shown.current.as_ref().map(|t| t.phase), Some(Phase::Shown));
        let leaving = slot_at(events.clone(), 5100);
        assert_eq!(leaving.current.as_ref().map(|t| t.phase), Some(Phase::Leaving));
        assert_eq!(slot_at(events, 5300).current, None);
    }

    #[test]
    fn newer_toast_replaces_older_immediately() {
        let config = LandingConfig::default();
        let mut events = vec![(0, present(1, "first"))];
        events.extend(timed(&config, 0, 1, Some(1000)));
        events.push((1000, present(2, "second")));
        events.extend(timed(&config, 1000, 2, None));

        let at_switch = slot_at(events.clone(), 1000);
        assert_eq!(at_switch.current.as_ref().map(|t| t.id), Some(2));
        assert!(slot_at(events.clone(), 5300).current.map_or(true, |t| t.id != 1));
        assert_eq!(slot_at(events, 6300).current, None);
    }

    #[test]
    fn stale_steps_are_ignored() {
        let slot = NotificationSlot::default().apply(present(2, "current"));
        let after = slot
            .apply(SlotAction::Advance { id: 1, phase: Phase::Leaving })
            .apply(SlotAction::Remove { id: 1 });
        assert_eq!(after, slot);
        assert_eq!(NotificationSlot::default().apply(SlotAction::Remove { id: 3 }).current, None);
    }

    #[test]
    fn severity_names_and_colours() {
        assert_eq!(Severity::parse("success"), Severity::Success);
        assert_eq!(Severity::parse("error"), Severity::Error);
        assert_eq!(Severity::parse("warning"), Severity::Info);
        assert_eq!(Severity::Success.color(), "#10B981");
        assert_eq!(Severity::Error.color(), "#EF4444");
        assert_eq!(Severity::Info.color(), "#3B82F6");
    }
}
