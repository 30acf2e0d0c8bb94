use crate::components::navbar::Navbar;
use crate::config;
use crate::effects::reveal;
use crate::effects::scroll::{request_parallax, FrameGuard, ParallaxLayers};
use crate::error::{log_failure, LandingError};
use crate::forms::lead_form::LeadForm;
use crate::utils::global_api;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, HtmlElement};
use yew::prelude::*;

const PARTICLE_COUNT: usize = 6;

const STATS: &[(&str, &str)] = &[
    ("40+", "Partner academies"),
    ("First", "AI scouting platform in West Africa"),
    ("95%", "Tracking accuracy"),
    ("3", "Countries in pilot"),
];

const TECH: &[(&str, &str, &str)] = &[
    ("fa-eye", "Computer Vision", "Player and ball tracking from a single broadcast or phone camera, frame by frame."),
    ("fa-brain", "Performance Models", "Physical and technical profiles built from every touch, sprint and duel."),
    ("fa-chart-line", "Talent Projection", "Development curves that compare prospects against thousands of career paths."),
];

const PRODUCTS: &[(&str, &str)] = &[
    ("Ekow Scout", "Discover and shortlist talent with searchable, video-linked player reports."),
    ("Ekow Coach", "Session planning and match analysis for academy staff, on any device."),
    ("Ekow Pulse", "Live match insights for clubs, broadcasters and federations."),
];

const FOUNDERS: &[(&str, &str, &str)] = &[
    ("Kwame Mensah", "CEO", "Former academy director with fifteen years in youth football."),
    ("Abena Owusu", "CTO", "Computer vision researcher focused on sports analytics."),
];

/// Page-level styles that the stylesheet does not cover.
pub(crate) const LANDING_CSS: &str = r#"
    @media (max-width: 768px) {
        .nav-menu {
            position: fixed;
            top: 80px;
            left: 0;
            right: 0;
            background: rgba(248, 255, 254, 0.98);
            backdrop-filter: blur(20px);
            flex-direction: column;
            padding: 32px 24px;
            transform: translateY(-100%);
            transition: transform 0.3s ease;
            border-bottom: 1px solid rgba(107, 114, 128, 0.1);
        }
        .nav-menu.active {
            transform: translateY(0);
        }
        .hamburger.active span:nth-child(1) {
            transform: rotate(45deg) translate(5px, 5px);
        }
        .hamburger.active span:nth-child(2) {
            opacity: 0;
        }
        .hamburger.active span:nth-child(3) {
            transform: rotate(-45deg) translate(7px, -6px);
        }
        .menu-open {
            overflow: hidden;
        }
    }
    .notification-content {
        display: flex;
        align-items: center;
        justify-content: space-between;
        gap: 16px;
    }
    .notification-close {
        background: none;
        border: none;
        color: white;
        font-size: 20px;
        cursor: pointer;
        padding: 0;
        width: 24px;
        height: 24px;
        display: flex;
        align-items: center;
        justify-content: center;
        border-radius: 50%;
        transition: background-color 0.2s ease;
    }
    .notification-close:hover {
        background-color: rgba(255, 255, 255, 0.2);
    }
    .navbar.scrolled {
        background: rgba(248, 255, 254, 0.98);
        box-shadow: 0 2px 20px rgba(11, 20, 38, 0.1);
    }
"#;

#[derive(Clone, PartialEq)]
struct LayerRefs {
    background: NodeRef,
    silhouette: NodeRef,
    particles: Vec<NodeRef>,
}

impl LayerRefs {
    fn new() -> Self {
        Self {
            background: NodeRef::default(),
            silhouette: NodeRef::default(),
            particles: (0..PARTICLE_COUNT).map(|_| NodeRef::default()).collect(),
        }
    }

    fn resolve(&self) -> ParallaxLayers {
        ParallaxLayers {
            background: self.background.cast::<HtmlElement>(),
            silhouette: self.silhouette.cast::<HtmlElement>(),
            particles: self
                .particles
                .iter()
                .filter_map(|p| p.cast::<HtmlElement>())
                .collect(),
        }
    }
}

fn listen_parallax(layers: LayerRefs) -> Result<Box<dyn FnOnce()>, LandingError> {
    let window = crate::utils::dom::get_window()?;
    let config = config::get_config();
    let guard = FrameGuard::default();
    let callback = Closure::<dyn Fn()>::new(move || {
        if let Err(e) = request_parallax(&guard, layers.resolve(), &config) {
            log_failure("Parallax frame request failed", &e);
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    Ok(Box::new(move || {
        if let Some(win) = web_sys::window() {
            let _ = win.remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
        }
    }))
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let layers = use_memo(|_| LayerRefs::new(), ());

    // parallax
    {
        let layers = (*layers).clone();
        use_effect_with_deps(
            move |_| {
                let destructor = match listen_parallax(layers) {
                    Ok(destructor) => destructor,
                    Err(e) => {
                        log_failure("Parallax disabled", &e);
                        let noop: Box<dyn FnOnce()> = Box::new(|| ());
                        noop
                    }
                };
                move || destructor()
            },
            (),
        );
    }

    // fade-in, staggered reveal and lazy images, once the sections are in the DOM
    use_effect_with_deps(
        move |_| {
            let observers = reveal::install(&config::get_config())
                .map_err(|e| log_failure("Reveal effects disabled", &e))
                .ok();
            move || drop(observers)
        },
        (),
    );

    let to_contact = Callback::from(|_: MouseEvent| global_api::scroll_to_email_capture());
    let to_products = Callback::from(|_: MouseEvent| global_api::scroll_to_products());

    html! {
        <div class="landing-page">
            <style>{LANDING_CSS}</style>
            <Navbar />

            <header id="home" class="hero">
                <div class="hero-background" ref={layers.background.clone()}></div>
                <div class="eagle-silhouette" ref={layers.silhouette.clone()}></div>
                <div class="particles">
                    {
                        layers.particles.iter().map(|p| html! {
                            <span class="particle" ref={p.clone()}></span>
                        }).collect::<Html>()
                    }
                </div>
                <div class="hero-content">
                    <h1 class="hero-title">{"The Future of Football Is Seen by AI"}</h1>
                    <p class="hero-subtitle">
                        {"Ekow AI Technologies turns match footage into scouting, coaching and performance intelligence for African football."}
                    </p>
                    <div class="hero-cta-group">
                        <button class="hero-cta primary" onclick={to_contact.clone()}>{"Get Early Access"}</button>
                        <button class="hero-cta secondary" onclick={to_products}>{"Explore Products"}</button>
                    </div>
                    <div class="hero-stats">
                        {
                            STATS.iter().map(|(number, label)| html! {
                                <div class="stat">
                                    <span class="stat-number">{*number}</span>
                                    <span class="stat-label">{*label}</span>
                                </div>
                            }).collect::<Html>()
                        }
                    </div>
                </div>
            </header>

            <section id="technology" class="technology-section">
                <div class="section-header">
                    <h2>{"Technology built for the pitch"}</h2>
                    <p>{"Models trained on thousands of hours of grassroots and professional football."}</p>
                </div>
                <div class="tech-grid">
                    {
                        TECH.iter().map(|(icon, title, body)| html! {
                            <div class="tech-card">
                                <i class={classes!("fas", *icon)}></i>
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <section id="products" class="products-section">
                <div class="section-header">
                    <h2>{"Products"}</h2>
                    <p>{"One platform, three ways in."}</p>
                </div>
                <div class="product-grid">
                    {
                        PRODUCTS.iter().map(|(name, body)| html! {
                            <div class="product-card">
                                <h3>{*name}</h3>
                                <p>{*body}</p>
                                <button class="product-cta" onclick={to_contact.clone()}>{"Join the waitlist"}</button>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <section id="founders" class="founders-section">
                <div class="section-header">
                    <h2>{"Founders"}</h2>
                </div>
                <div class="founder-grid">
                    {
                        FOUNDERS.iter().map(|(name, role, bio)| html! {
                            <div class="founder-card">
                                <img class="lazy" data-src={format!("/assets/founders/{}.webp", name.to_lowercase().replace(' ', "-"))} alt={*name} />
                                <h3>{*name}</h3>
                                <span class="founder-role">{*role}</span>
                                <p>{*bio}</p>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <section id="contact" class="contact-section">
                <div class="section-header">
                    <h2>{"Be first on the pitch"}</h2>
                    <p>{"Join the early access list for coaches, scouts, players and clubs."}</p>
                </div>
                <LeadForm />
            </section>

            <footer class="footer">
                <p>{"© Ekow AI Technologies"}</p>
            </footer>
        </div>
    }
}
