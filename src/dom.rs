//! Thin helpers over web-sys.
//!
//! Every controller works on markup that is already on the page, so the
//! lookups here return `Option`/`Vec` and DOM write failures are logged
//! instead of propagated. A missing element makes a widget inert, never
//! breaks the page.

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

fn collect(list: Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn select(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn select_all(document: &Document, selector: &str) -> Vec<Element> {
    collect(document.query_selector_all(selector))
}

pub fn select_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn select_all_in(root: &Element, selector: &str) -> Vec<Element> {
    collect(root.query_selector_all(selector))
}

pub fn closest(element: &Element, selector: &str) -> Option<Element> {
    element.closest(selector).ok().flatten()
}

pub fn as_html(element: &Element) -> Option<HtmlElement> {
    element.dyn_ref::<HtmlElement>().cloned()
}

pub fn html_elements(elements: Vec<Element>) -> Vec<HtmlElement> {
    elements
        .into_iter()
        .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Reads `data-{name}`.
pub fn data(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(&format!("data-{}", name))
}

pub fn report(op: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("{} failed: {:?}", op, err);
    }
}

pub fn add_class(element: &Element, class: &str) {
    report("classList.add", element.class_list().add_1(class));
}

pub fn remove_class(element: &Element, class: &str) {
    report("classList.remove", element.class_list().remove_1(class));
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    if on {
        add_class(element, class);
    } else {
        remove_class(element, class);
    }
}

/// Sets an inline style property. An empty value clears it.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let style = element.style();
    if value.is_empty() {
        if let Err(err) = style.remove_property(property) {
            warn!("style.removeProperty({}) failed: {:?}", property, err);
        }
    } else {
        report("style.setProperty", style.set_property(property, value));
    }
}

pub fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Attaches a listener for the page lifetime.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F)
where
    E: JsCast,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        handler(event.unchecked_into::<E>());
    });
    match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        Ok(()) => closure.forget(),
        Err(err) => warn!("addEventListener({}) failed: {:?}", event, err),
    }
}
