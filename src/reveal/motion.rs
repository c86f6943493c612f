//! Pointer- and scroll-driven transforms: parallax offsets and hover tilt.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, MouseEvent, Window};

use crate::dom;

pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
pub const PARALLAX_VARIABLE: &str = "--parallax-offset";
const TILT_DAMPING: f64 = 10.0;

pub fn parallax_speed(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|speed| speed.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

pub fn parallax_offset(scroll_y: f64, speed: f64) -> String {
    format!("{}px", scroll_y * speed)
}

/// Rotation for a pointer at (`x`, `y`) inside a `width` x `height` box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub const REST: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            rotate_x: (y - height / 2.0) / TILT_DAMPING,
            rotate_y: (width / 2.0 - x) / TILT_DAMPING,
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// Publishes the scroll offset of every `.parallax-slow` element once per
/// animation frame after a scroll.
pub fn mount_parallax(window: &Window, document: &Document) -> usize {
    let elements = dom::html_elements(dom::select_all(document, ".parallax-slow"));
    if elements.is_empty() {
        return 0;
    }
    let count = elements.len();

    let frame = {
        let window = window.clone();
        Closure::<dyn FnMut()>::new(move || {
            let scrolled = dom::scroll_y(&window);
            for element in &elements {
                let speed = parallax_speed(dom::data(element, "speed").as_deref());
                dom::set_style(element, PARALLAX_VARIABLE, &parallax_offset(scrolled, speed));
            }
        })
    };
    let frame = Rc::new(frame);

    let raf_window = window.clone();
    dom::listen(window, "scroll", move |_: Event| {
        let callback: &Closure<dyn FnMut()> = &frame;
        dom::report(
            "requestAnimationFrame",
            raf_window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map(|_| ()),
        );
    });
    count
}

pub fn mount_tilt(document: &Document) -> usize {
    let elements = dom::html_elements(dom::select_all(document, ".hover-tilt"));
    for element in &elements {
        let target: HtmlElement = element.clone();
        dom::listen(element, "mousemove", move |e: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let tilt = Tilt::at(
                f64::from(e.client_x()) - rect.left(),
                f64::from(e.client_y()) - rect.top(),
                rect.width(),
                rect.height(),
            );
            dom::set_style(&target, "transform", &tilt.transform());
        });

        let target: HtmlElement = element.clone();
        dom::listen(element, "mouseleave", move |_: Event| {
            dom::set_style(&target, "transform", &Tilt::REST.transform());
        });
    }
    elements.len()
}
