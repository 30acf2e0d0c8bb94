use crate::components::notification::Notifier;
use crate::config;
use crate::forms::pipeline::{self, PipelineEffect, PipelineEvent, PipelineState};
use crate::forms::validation::{LeadSubmission, ROLE_OPTIONS};
use crate::utils::analytics;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Clone)]
struct FormHandles {
    name: UseStateHandle<String>,
    email: UseStateHandle<String>,
    role: UseStateHandle<String>,
    loading: UseStateHandle<bool>,
    pipeline: Rc<RefCell<PipelineState>>,
    notifier: Option<Notifier>,
}

impl FormHandles {
    fn lead(&self) -> LeadSubmission {
        LeadSubmission {
            name: (*self.name).clone(),
            email: (*self.email).clone(),
            role: (*self.role).clone(),
        }
    }
}

/// Feeds one event through the submit pipeline and carries out its effects.
fn drive(handles: FormHandles, event: PipelineEvent) {
    let latency = config::get_config().submit_latency_ms;
    let effects = {
        let mut state = handles.pipeline.borrow_mut();
        let (next, effects) = pipeline::step(&state, event, latency);
        *state = next;
        effects
    };

    for effect in effects {
        match effect {
            PipelineEffect::Notify { message, severity } => match &handles.notifier {
                Some(notifier) => notifier.show(message, severity),
                None => log::warn!("No notification host for: {}", message),
            },
            PipelineEffect::SetLoading(loading) => handles.loading.set(loading),
            PipelineEffect::Wait(ms) => {
                let handles = handles.clone();
                spawn_local(async move {
                    TimeoutFuture::new(ms).await;
                    drive(handles, PipelineEvent::LatencyElapsed);
                });
            }
            PipelineEffect::LogSubmission(lead) => {
                log::info!("Form submitted: {}", serde_json::to_string(&lead).unwrap_or_default());
            }
            PipelineEffect::ResetForm => {
                handles.name.set(String::new());
                handles.email.set(String::new());
                handles.role.set(String::new());
            }
            PipelineEffect::Track { event, lead } => analytics::track(event, &lead),
        }
    }
}

#[function_component(LeadForm)]
pub fn lead_form() -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let role = use_state(String::new);
    let loading = use_state(|| false);
    let pipeline = use_mut_ref(PipelineState::default);
    let notifier = use_context::<Notifier>();

    let handles = FormHandles {
        name: name.clone(),
        email: email.clone(),
        role: role.clone(),
        loading: loading.clone(),
        pipeline,
        notifier,
    };

    let onsubmit = {
        let handles = handles.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let lead = handles.lead();
            drive(handles.clone(), PipelineEvent::Submit(lead));
        })
    };

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_role = {
        let role = role.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            role.set(select.value());
        })
    };

    html! {
        <form id="emailForm" class="email-form" onsubmit={onsubmit} novalidate=true>
            <div class="form-row">
                <input
                    type="text"
                    name="name"
                    placeholder="Your name"
                    value={(*name).clone()}
                    oninput={on_name}
                />
                <input
                    type="email"
                    name="email"
                    placeholder="Your email address"
                    value={(*email).clone()}
                    oninput={on_email}
                />
            </div>
            <select name="role" onchange={on_role}>
                {
                    ROLE_OPTIONS.iter().map(|(value, label)| html! {
                        <option value={*value} selected={*role == *value}>{*label}</option>
                    }).collect::<Html>()
                }
            </select>
            <button
                type="submit"
                class={classes!("submit-button", (*loading).then_some("loading"))}
                disabled={*loading}
            >
                <span class="button-text">{"Join the Revolution"}</span>
                <span class="button-spinner"></span>
            </button>
            <p class="form-note">{"No spam. Early access updates only."}</p>
        </form>
    }
}
