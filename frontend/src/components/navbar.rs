use crate::config;
use crate::effects::scroll::{NavAction, NavState};
use crate::error::{log_failure, LandingError};
use crate::utils::{dom, global_api};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

pub const NAV_LINKS: &[(&str, &str)] = &[
    ("#technology", "Technology"),
    ("#products", "Products"),
    ("#founders", "Founders"),
    ("#contact", "Contact"),
];

const MENU_OPEN_CLASS: &str = "menu-open";

fn set_body_class(class: &str, on: bool) -> Result<(), LandingError> {
    let body = dom::get_document()?
        .body()
        .ok_or_else(|| LandingError::MissingElement("body".into()))?;
    body.class_list().toggle_with_force(class, on)?;
    Ok(())
}

fn current_scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let nav = use_reducer_eq(NavState::default);

    // re-evaluated on every scroll event
    {
        let dispatcher = nav.dispatcher();
        use_effect_with_deps(
            move |_| {
                let threshold = config::get_config().nav_scrolled_threshold;
                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn()>::new({
                        let dispatcher = dispatcher.clone();
                        move || {
                            dispatcher.dispatch(NavAction::Scrolled {
                                scroll_y: current_scroll_y(),
                                threshold,
                            })
                        }
                    });
                    if let Err(e) = window
                        .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
                    {
                        log_failure("Navbar scroll listener", &LandingError::from(e));
                    }
                    dispatcher.dispatch(NavAction::Scrolled {
                        scroll_y: current_scroll_y(),
                        threshold,
                    });
                    Box::new(move || {
                        if let Some(win) = web_sys::window() {
                            let _ = win.remove_event_listener_with_callback(
                                "scroll",
                                callback.as_ref().unchecked_ref(),
                            );
                        }
                    })
                } else {
                    Box::new(|| ())
                };
                move || destructor()
            },
            (),
        );
    }

    // mirror the menu flag onto <body> so the page stops scrolling underneath
    {
        let menu_open = nav.menu_open;
        use_effect_with_deps(
            move |open: &bool| {
                if let Err(e) = set_body_class(MENU_OPEN_CLASS, *open) {
                    log_failure("Menu scroll lock", &e);
                }
                || ()
            },
            menu_open,
        );
    }

    let on_hamburger = {
        let dispatcher = nav.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(NavAction::ToggleMenu))
    };

    let on_link = {
        let dispatcher = nav.dispatcher();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let href = e
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("href"))
                .unwrap_or_default();
            if let Err(err) = dom::scroll_to_anchor(&href) {
                log_failure("Anchor navigation failed", &err);
            }
            dispatcher.dispatch(NavAction::CloseMenu);
        })
    };

    let on_cta = Callback::from(|_: MouseEvent| global_api::scroll_to_email_capture());

    html! {
        <nav class={classes!("navbar", nav.scrolled.then_some("scrolled"))}>
            <div class="nav-container">
                <a class="nav-logo" href="#home">
                    <span class="logo-mark">{"EKOW"}</span>
                    <span class="logo-text">{"AI Technologies"}</span>
                </a>
                <ul class={classes!("nav-menu", nav.menu_open.then_some("active"))}>
                    {
                        NAV_LINKS.iter().map(|(href, label)| html! {
                            <li>
                                <a class="nav-link" href={*href} onclick={on_link.clone()}>{*label}</a>
                            </li>
                        }).collect::<Html>()
                    }
                    <li>
                        <button class="nav-cta" onclick={on_cta}>{"Get Early Access"}</button>
                    </li>
                </ul>
                <button
                    class={classes!("hamburger", nav.menu_open.then_some("active"))}
                    aria-label="Toggle menu"
                    onclick={on_hamburger}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
            </div>
        </nav>
    }
}
