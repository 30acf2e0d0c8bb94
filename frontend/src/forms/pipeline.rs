use crate::components::notification::Severity;
use crate::forms::validation::{validate, LeadSubmission};
use crate::utils::analytics::SIGNUP_EVENT;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the revolution! Check your email for exclusive updates.";

/// Where the signup form is in its submit cycle.
///
/// Validation runs synchronously inside `Submit`, so only `Idle` and
/// `Submitting` are ever observable between events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Submitting(LeadSubmission),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Submit(LeadSubmission),
    LatencyElapsed,
}

/// Side effects the form component has to carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEffect {
    Notify { message: String, severity: Severity },
    SetLoading(bool),
    Wait(u32),
    LogSubmission(LeadSubmission),
    ResetForm,
    Track { event: &'static str, lead: LeadSubmission },
}

/// Pure transition of the submit pipeline.
pub fn step(
    state: &PipelineState,
    event: PipelineEvent,
    latency_ms: u32,
) -> (PipelineState, Vec<PipelineEffect>) {
    match (state, event) {
        (PipelineState::Idle, PipelineEvent::Submit(lead)) => {
            let verdict = validate(&lead);
            if !verdict.valid {
                return (
                    PipelineState::Idle,
                    vec![PipelineEffect::Notify {
                        message: verdict.message(),
                        severity: Severity::Error,
                    }],
                );
            }
            (
                PipelineState::Submitting(lead),
                vec![PipelineEffect::SetLoading(true), PipelineEffect::Wait(latency_ms)],
            )
        }
        (PipelineState::Submitting(lead), PipelineEvent::LatencyElapsed) => (
            PipelineState::Idle,
            vec![
                PipelineEffect::LogSubmission(lead.clone()),
                PipelineEffect::Notify {
                    message: WELCOME_MESSAGE.to_string(),
                    severity: Severity::Success,
                },
                PipelineEffect::ResetForm,
                PipelineEffect::SetLoading(false),
                PipelineEffect::Track {
                    event: SIGNUP_EVENT,
                    lead: lead.clone(),
                },
            ],
        ),
        (PipelineState::Submitting(_), PipelineEvent::Submit(_)) => {
            log::debug!("Submit ignored while a submission is in flight");
            (state.clone(), Vec::new())
        }
        (PipelineState::Idle, PipelineEvent::LatencyElapsed) => (PipelineState::Idle, Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validation::{EMAIL_ERROR, NAME_ERROR, ROLE_ERROR};

    fn valid_lead() -> LeadSubmission {
        LeadSubmission {
            name: "Ama".into(),
            email: "ama@academy.gh".into(),
            role: "coach".into(),
        }
    }

    #[test]
    fn invalid_lead_shows_error_and_stays_idle() {
        let bad = LeadSubmission {
            name: "A".into(),
            email: "nope".into(),
            role: String::new(),
        };
        let (state, effects) = step(&PipelineState::Idle, PipelineEvent::Submit(bad), 2000);
        assert_eq!(state, PipelineState::Idle);
        assert_eq!(
            effects,
            vec![PipelineEffect::Notify {
                message: format!("{}. {}. {}", NAME_ERROR, EMAIL_ERROR, ROLE_ERROR),
                severity: Severity::Error,
            }]
        );
        assert!(!effects.iter().any(|e| matches!(e, PipelineEffect::Track { .. })));
    }

    #[test]
    fn valid_lead_enters_loading_and_waits() {
        let (state, effects) =
            step(&PipelineState::Idle, PipelineEvent::Submit(valid_lead()), 2000);
        assert_eq!(state, PipelineState::Submitting(valid_lead()));
        assert_eq!(
            effects,
            vec![PipelineEffect::SetLoading(true), PipelineEffect::Wait(2000)]
        );
    }

    #[test]
    fn latency_completes_with_single_signup_track() {
        let (state, _) = step(&PipelineState::Idle, PipelineEvent::Submit(valid_lead()), 2000);
        let (state, effects) = step(&state, PipelineEvent::LatencyElapsed, 2000);
        assert_eq!(state, PipelineState::Idle);

        let tracks: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                PipelineEffect::Track { event, lead } => Some((*event, lead.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(tracks, vec![("email_signup", valid_lead())]);

        let notify = effects.iter().position(|e| {
            matches!(e, PipelineEffect::Notify { severity: Severity::Success, message } if message == WELCOME_MESSAGE)
        });
        let reset = effects.iter().position(|e| *e == PipelineEffect::ResetForm);
        let unload = effects.iter().position(|e| *e == PipelineEffect::SetLoading(false));
        let track = effects
            .iter()
            .position(|e| matches!(e, PipelineEffect::Track { .. }));
        assert!(notify < reset && reset < unload && unload < track);
    }

    #[test]
    fn second_submit_during_flight_is_ignored() {
        let (state, _) = step(&PipelineState::Idle, PipelineEvent::Submit(valid_lead()), 2000);
        let (again, effects) = step(&state, PipelineEvent::Submit(valid_lead()), 2000);
        assert_eq!(again, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn stray_latency_event_does_nothing() {
        let (state, effects) = step(&PipelineState::Idle, PipelineEvent::LatencyElapsed, 2000);
        assert_eq!(state, PipelineState::Idle);
        assert!(effects.is_empty());
    }
}
