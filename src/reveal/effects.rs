//! Visibility-triggered effects: reveal, count-up, stagger, lazy images and
//! typing. Each rule owns one `IntersectionObserver`, registered at mount and
//! never torn down.

use js_sys::Array;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use super::counter::{parse_count, run_counter, CountUp, COUNTER_DURATION_MS};
use super::motion;
use super::typing::{run_typewriter, typing_speed};
use crate::clock::BrowserClock;
use crate::dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Reveal,
    CountUp,
    Stagger,
    LazyImage,
    Typing,
}

impl Effect {
    /// Class added once the effect has fired.
    pub fn marker(self) -> &'static str {
        match self {
            Effect::Reveal => "active",
            Effect::CountUp => "counted",
            Effect::Stagger => "animating",
            Effect::LazyImage => "loaded",
            Effect::Typing => "typed",
        }
    }

    /// Whether the element is unobserved after its first trigger.
    pub fn once(self) -> bool {
        !matches!(self, Effect::Reveal)
    }

    /// Effects that must not restart when the marker is already present.
    fn guarded(self) -> bool {
        matches!(self, Effect::CountUp | Effect::Typing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealRule {
    pub selector: &'static str,
    pub threshold: Option<f64>,
    pub root_margin: &'static str,
    pub effect: Effect,
}

pub const RULES: [RevealRule; 5] = [
    RevealRule {
        selector: ".reveal, .reveal-left, .reveal-right, .reveal-scale",
        threshold: Some(0.15),
        root_margin: "0px 0px -50px 0px",
        effect: Effect::Reveal,
    },
    RevealRule {
        selector: ".stat-number",
        threshold: Some(0.5),
        root_margin: "0px",
        effect: Effect::CountUp,
    },
    RevealRule {
        selector: ".stagger-children",
        threshold: Some(0.2),
        root_margin: "0px",
        effect: Effect::Stagger,
    },
    RevealRule {
        selector: "img[data-src]",
        threshold: None,
        root_margin: "50px",
        effect: Effect::LazyImage,
    },
    RevealRule {
        selector: ".typing-effect",
        threshold: Some(0.5),
        root_margin: "0px",
        effect: Effect::Typing,
    },
];

/// Whether an intersecting element should run `effect` now.
pub fn should_fire(effect: Effect, already_marked: bool) -> bool {
    !(effect.guarded() && already_marked)
}

/// Moves `data-src` into `src`.
pub fn load_lazy_image(target: &Element) {
    let Some(src) = dom::data(target, "src") else {
        return;
    };
    dom::report("img.setAttribute(src)", target.set_attribute("src", &src));
    dom::report(
        "img.removeAttribute(data-src)",
        target.remove_attribute("data-src"),
    );
}

fn fire(effect: Effect, target: &Element, clock: BrowserClock) {
    match effect {
        Effect::Reveal | Effect::Stagger => {}
        Effect::CountUp => {
            let goal = parse_count(dom::data(target, "count").as_deref());
            let element = target.clone();
            run_counter(clock, CountUp::new(goal, COUNTER_DURATION_MS), move |text| {
                dom::set_text(&element, &text)
            });
        }
        Effect::LazyImage => load_lazy_image(target),
        Effect::Typing => {
            let text = dom::data(target, "text")
                .or_else(|| target.text_content())
                .unwrap_or_default();
            let speed = typing_speed(dom::data(target, "speed").as_deref());
            let element = target.clone();
            run_typewriter(clock, &text, speed, move |shown| dom::set_text(&element, shown));
        }
    }
    dom::add_class(target, effect.marker());
}

fn observe(document: &Document, rule: RevealRule, clock: BrowserClock) -> usize {
    let elements = dom::select_all(document, rule.selector);
    if elements.is_empty() {
        return 0;
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let marked = dom::has_class(&target, rule.effect.marker());
                if should_fire(rule.effect, marked) {
                    fire(rule.effect, &target, clock);
                }
                if rule.effect.once() {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(rule.root_margin);
    if let Some(threshold) = rule.threshold {
        options.set_threshold(&JsValue::from_f64(threshold));
    }

    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(err) => {
            warn!("reveal: observer for {} unavailable: {:?}", rule.selector, err);
            return 0;
        }
    };
    callback.forget();

    for element in &elements {
        observer.observe(element);
    }
    elements.len()
}

/// Registers every reveal rule plus parallax and tilt. Returns how many
/// elements were wired.
pub fn mount(window: &Window, document: &Document) -> usize {
    let clock = BrowserClock;
    let mut wired = 0;
    for rule in RULES {
        let count = observe(document, rule, clock);
        if count > 0 {
            debug!("reveal: observing {} x {}", count, rule.selector);
        }
        wired += count;
    }
    wired += motion::mount_parallax(window, document);
    wired += motion::mount_tilt(document);

    if wired > 0 {
        info!("reveal: {} animated elements wired", wired);
    }
    wired
}
