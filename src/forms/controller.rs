//! Binds the contact, inquiry and newsletter forms on the page.

use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    CustomEvent, CustomEventInit, Document, Element, Event, HtmlButtonElement, HtmlFormElement,
};

use super::feedback;
use super::flow::{run_submission, Banner, FormSurface};
use super::kind::{review, FormKind, Submission};
use super::submit::Transport;
use super::validate;
use crate::clock::{BrowserClock, Clock};
use crate::config;
use crate::dom;

/// Delay between a successful inquiry and closing the modal around it.
pub const MODAL_CLOSE_DELAY_MS: u32 = 2000;
/// Bubbling event dispatched on the enclosing `.modal` to ask the page to
/// close it.
pub const CLOSE_MODAL_EVENT: &str = "margadarsi:close-modal";

/// A live `<form>` element.
pub struct DomForm {
    document: Document,
    form: HtmlFormElement,
    clock: BrowserClock,
}

impl DomForm {
    pub fn new(document: Document, form: HtmlFormElement) -> Self {
        Self {
            document,
            form,
            clock: BrowserClock,
        }
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        dom::select_in(&self.form, "button[type=\"submit\"]")
            .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok())
    }

    fn value_of(&self, selector: &str) -> Option<String> {
        dom::select_in(&self.form, selector).and_then(|el| feedback::field_value(&el))
    }

    /// Marks each checked field and returns the submission if all passed.
    fn review(&self, kind: FormKind) -> Option<Submission> {
        let review = review(kind, |spec| self.value_of(spec.selector));
        for (selector, verdict) in &review.verdicts {
            if let Some(input) = dom::select_in(&self.form, selector) {
                feedback::mark(&self.document, &input, *verdict);
            }
        }
        review.into_submission()
    }
}

impl FormSurface for DomForm {
    fn lock(&self, busy_label: &str) -> Option<String> {
        let button = self.submit_button()?;
        button.set_disabled(true);
        Some(feedback::swap_label(&button, busy_label))
    }

    fn unlock(&self, label: Option<String>) {
        let Some(button) = self.submit_button() else {
            return;
        };
        if let Some(label) = label {
            button.set_inner_html(&label);
        }
        button.set_disabled(false);
    }

    fn show_banner(&self, banner: Banner) {
        feedback::show_banner(&self.document, &self.form, banner, &self.clock);
    }

    fn reset(&self) {
        self.form.reset();
        feedback::clear_marks(&self.form);
    }
}

fn close_enclosing_modal(form: &Element, clock: &BrowserClock) {
    let Some(modal) = dom::closest(form, ".modal") else {
        return;
    };
    clock.defer(MODAL_CLOSE_DELAY_MS, move || {
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        match CustomEvent::new_with_event_init_dict(CLOSE_MODAL_EVENT, &init) {
            Ok(event) => {
                dom::report(
                    "dispatchEvent(close-modal)",
                    modal.dispatch_event(&event).map(|_| ()),
                );
            }
            Err(err) => warn!("forms: could not build {}: {:?}", CLOSE_MODAL_EVENT, err),
        }
    });
}

fn bind_submit(kind: FormKind, form: Rc<DomForm>, transport: Rc<Transport>) {
    let target = form.form.clone();
    dom::listen(&target, "submit", move |event: Event| {
        event.prevent_default();
        let Some(submission) = form.review(kind) else {
            debug!("forms: {} form has invalid fields", kind.slug());
            return;
        };
        let form = Rc::clone(&form);
        let transport = Rc::clone(&transport);
        spawn_local(async move {
            let element: Element = form.form.clone().into();
            let clock = form.clock;
            let close = move || close_enclosing_modal(&element, &clock);
            let after_success: Option<&dyn Fn()> = match kind {
                FormKind::Inquiry => Some(&close),
                _ => None,
            };
            // outcome is already logged and shown in the banner
            let _ = run_submission(transport.as_ref(), form.as_ref(), submission, after_success)
                .await;
        });
    });
}

fn bind_blur(form: &DomForm) {
    for input in dom::select_all_in(&form.form, "input, textarea") {
        let document = form.document.clone();
        let field = input.clone();
        dom::listen(&input, "blur", move |_: Event| {
            let Some(value) = feedback::field_value(&field) else {
                return;
            };
            if value.trim().is_empty() {
                return;
            }
            let check = validate::on_blur(&field.id());
            feedback::mark(&document, &field, check(&value));
        });
    }
}

/// Wires every form found on the page. Returns how many were bound.
pub fn mount(document: &Document) -> usize {
    let transport = Rc::new(Transport::from(config::forms_target(document)));
    let mut bound = 0;
    for kind in FormKind::ALL {
        for element in dom::select_all(document, kind.selector()) {
            let Ok(form) = element.dyn_into::<HtmlFormElement>() else {
                warn!("forms: {} matched a non-form element", kind.selector());
                continue;
            };
            let form = Rc::new(DomForm::new(document.clone(), form));
            if kind.validates_on_blur() {
                bind_blur(&form);
            }
            bind_submit(kind, form, Rc::clone(&transport));
            bound += 1;
        }
    }
    let via = match transport.as_ref() {
        Transport::Simulated(_) => "simulated delivery",
        Transport::Http(port) => port.base_url(),
    };
    info!("forms: bound {} forms via {}", bound, via);
    bound
}
