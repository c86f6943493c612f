//! Inline field markers and the alert banner, written straight into the form.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement,
};

use super::flow::Banner;
use crate::clock::Clock;
use crate::dom;

pub const BANNER_LIFETIME_MS: u32 = 5000;
pub const BANNER_FADE_MS: u32 = 300;

/// Current value of an input, textarea or select.
pub fn field_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        element
            .dyn_ref::<HtmlSelectElement>()
            .map(HtmlSelectElement::value)
    }
}

fn field_group(input: &Element) -> Option<Element> {
    dom::closest(input, ".mb-3")
        .or_else(|| dom::closest(input, ".form-group"))
        .or_else(|| input.parent_element())
}

pub fn show_error(document: &Document, input: &Element, message: &str) {
    dom::add_class(input, "is-invalid");
    dom::remove_class(input, "is-valid");

    let Some(group) = field_group(input) else {
        return;
    };
    if let Some(existing) = dom::select_in(&group, ".invalid-feedback") {
        dom::set_text(&existing, message);
        return;
    }
    let Ok(feedback) = document.create_element("div") else {
        return;
    };
    feedback.set_class_name("invalid-feedback");
    if let Some(feedback) = dom::as_html(&feedback) {
        dom::set_style(&feedback, "display", "block");
    }
    dom::set_text(&feedback, message);
    dom::report("appendChild(.invalid-feedback)", group.append_child(&feedback).map(|_| ()));
}

pub fn show_success(input: &Element) {
    dom::remove_class(input, "is-invalid");
    dom::add_class(input, "is-valid");
    if let Some(feedback) =
        field_group(input).and_then(|group| dom::select_in(&group, ".invalid-feedback"))
    {
        feedback.remove();
    }
}

pub fn mark(document: &Document, input: &Element, verdict: Result<(), &str>) {
    match verdict {
        Ok(()) => show_success(input),
        Err(message) => show_error(document, input, message),
    }
}

pub fn clear_marks(form: &Element) {
    for marked in dom::select_all_in(form, ".is-valid, .is-invalid") {
        dom::remove_class(&marked, "is-valid");
        dom::remove_class(&marked, "is-invalid");
    }
}

pub fn banner_classes(banner: &Banner) -> String {
    format!(
        "alert {} alert-dismissible fade show",
        banner.tone.alert_class()
    )
}

/// Puts `banner` at the top of `form`, replacing any previous one, and
/// schedules its fade-out.
pub fn show_banner<C>(document: &Document, form: &Element, banner: Banner, clock: &C)
where
    C: Clock + Clone + 'static,
{
    if let Some(previous) = dom::select_in(form, ".alert") {
        previous.remove();
    }
    let Ok(alert) = document.create_element("div") else {
        return;
    };
    alert.set_class_name(&banner_classes(&banner));
    dom::report("setAttribute(role)", alert.set_attribute("role", "alert"));
    dom::set_text(&alert, banner.message);

    if let Ok(close) = document.create_element("button") {
        close.set_class_name("btn-close");
        dom::report("setAttribute(type)", close.set_attribute("type", "button"));
        dom::report("setAttribute(aria-label)", close.set_attribute("aria-label", "Close"));
        let target = alert.clone();
        dom::listen(&close, "click", move |_: Event| target.remove());
        dom::report("appendChild(.btn-close)", alert.append_child(&close).map(|_| ()));
    }

    dom::report(
        "insertBefore(.alert)",
        form.insert_before(&alert, form.first_child().as_ref()).map(|_| ()),
    );

    let fade_clock = clock.clone();
    clock.defer(BANNER_LIFETIME_MS, move || {
        dom::remove_class(&alert, "show");
        fade_clock.defer(BANNER_FADE_MS, move || alert.remove());
    });
}

/// Swaps the submit button's contents; returns the markup it replaced.
pub fn swap_label(button: &HtmlElement, label: &str) -> String {
    let previous = button.inner_html();
    button.set_inner_html(label);
    previous
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::forms::flow::Tone;

    #[wasm_bindgen_test]
    fn banner_fades_then_leaves_the_form() {
        let document = dom::document().expect("document");
        let form = document.create_element("form").expect("form");
        form.set_inner_html(r#"<input type="email">"#);
        let clock = ManualClock::new();
        let banner = Banner {
            tone: Tone::Success,
            message: "Thank you for subscribing to our newsletter!",
        };
        show_banner(&document, &form, banner, &clock);
        let alert = dom::select_in(&form, ".alert").expect("alert");
        assert!(dom::has_class(&alert, "show"));

        clock.advance(u64::from(BANNER_LIFETIME_MS) - 1);
        assert!(dom::has_class(&alert, "show"));
        clock.advance(1);
        assert!(!dom::has_class(&alert, "show"));
        assert!(alert.parent_element().is_some());

        clock.advance(u64::from(BANNER_FADE_MS));
        assert!(alert.parent_element().is_none());
        assert!(dom::select_in(&form, ".alert").is_none());
    }

    #[wasm_bindgen_test]
    fn close_button_removes_banner_at_once() {
        let document = dom::document().expect("document");
        let form = document.create_element("form").expect("form");
        let banner = Banner {
            tone: Tone::Danger,
            message: "Subscription failed. Please try again.",
        };
        show_banner(&document, &form, banner, &ManualClock::new());
        let close = dom::select_in(&form, ".btn-close")
            .and_then(|b| dom::as_html(&b))
            .expect("close button");
        close.click();
        assert!(dom::select_in(&form, ".alert").is_none());
    }
}
