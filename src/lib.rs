use log::{info, warn};
use web_sys::{Document, Event, Window};

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

pub mod clock;
pub mod config;
pub mod dom;
pub mod nav;

pub mod slider {
    pub mod cycle;
    pub mod hero;
    pub mod stage;
    pub mod transition;
}
pub mod reveal {
    pub mod counter;
    pub mod effects;
    pub mod motion;
    pub mod typing;
}
pub mod forms {
    pub mod controller;
    pub mod feedback;
    pub mod flow;
    pub mod kind;
    pub mod submit;
    pub mod validate;
}
pub mod gallery {
    pub mod fade;
    pub mod filter;
    pub mod lightbox;
    pub mod property;
}

/// Wires every widget found in the current page, waiting for the DOM to be
/// parsed first when needed.
pub fn boot() {
    let (Some(window), Some(document)) = (dom::window(), dom::document()) else {
        warn!("no window/document, nothing to mount");
        return;
    };
    if document.ready_state() == "loading" {
        let (w, d) = (window.clone(), document.clone());
        dom::listen(&document, "DOMContentLoaded", move |_: Event| mount_all(&w, &d));
    } else {
        mount_all(&window, &document);
    }
}

pub fn mount_all(window: &Window, document: &Document) {
    nav::mount(window, document);
    let slider = slider::hero::mount(document).is_some();
    let animated = reveal::effects::mount(window, document);
    let bound_forms = forms::controller::mount(document);
    let filter = gallery::filter::mount(document).is_some();
    let lightbox = gallery::lightbox::mount(document).is_some();
    let listings = gallery::property::mount(document).is_some();
    info!(
        "page ready: slider={} animated={} forms={} gallery_filter={} lightbox={} listings={}",
        slider, animated, bound_forms, filter, lightbox, listings
    );
}
