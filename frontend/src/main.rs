use yew::prelude::*;

mod config;
mod error;
mod components {
    pub mod navbar;
    pub mod notification;
}
mod effects {
    pub mod reveal;
    pub mod scroll;
    pub mod stat_counter;
}
mod forms {
    pub mod lead_form;
    pub mod pipeline;
    pub mod validation;
}
mod pages {
    pub mod landing;
}
mod utils {
    pub mod analytics;
    pub mod dom;
    pub mod global_api;
    pub mod schedule;
    pub mod service_worker;
}

use components::notification::NotificationHost;
use pages::landing::Landing;
use utils::analytics::{self, Tracker};

#[function_component(App)]
fn app() -> Html {
    html! {
        <NotificationHost>
            <Landing />
        </NotificationHost>
    }
}

fn main() {
    let config = config::get_config();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    console_error_panic_hook::set_once();

    if let Err(e) = error::install_global_handler() {
        error::log_failure("Global error handler not installed", &e);
    }
    analytics::install(Tracker::from_environment(&config));
    if let Err(e) = utils::global_api::expose() {
        error::log_failure("Global API not exposed", &e);
    }
    if let Err(e) = utils::service_worker::register_on_load(&config) {
        error::log_failure("ServiceWorker registration skipped", &e);
    }

    yew::Renderer::<App>::new().render();
}
