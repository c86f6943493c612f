//! Page chrome: sticky navbar, scroll-to-top, in-page anchors, section
//! highlighting and the preloader.

use log::{debug, info};
use web_sys::{
    Document, Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions,
    Window,
};

use crate::clock::{BrowserClock, Clock};
use crate::dom;

pub const NAVBAR_SCROLLED_AFTER: f64 = 100.0;
pub const SCROLL_TOP_VISIBLE_AFTER: f64 = 500.0;
/// Room left above an anchor target for the fixed navbar.
pub const ANCHOR_OFFSET: f64 = 80.0;
/// How far above a section its nav link already counts as current.
pub const SECTION_LEAD: f64 = 150.0;
pub const PRELOADER_FADE_MS: u32 = 300;

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER
}

pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_VISIBLE_AFTER
}

/// Selector of the element an in-page link points at. Bare `#` and `#!`
/// placeholders point nowhere.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href {
        "#" | "#!" => None,
        h if h.starts_with('#') => Some(h),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Id of the section under `scroll_y`. When ranges overlap the later
/// section wins.
pub fn current_section(sections: &[SectionBox], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| {
            let start = s.top - SECTION_LEAD;
            scroll_y >= start && scroll_y < start + s.height
        })
        .map(|s| s.id.as_str())
}

fn smooth_scroll(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn mount_navbar(window: &Window, document: &Document) -> bool {
    let Some(navbar) = dom::select(document, ".navbar-premium") else {
        return false;
    };
    let source = window.clone();
    dom::listen(window, "scroll", move |_: Event| {
        dom::toggle_class(&navbar, "scrolled", navbar_scrolled(dom::scroll_y(&source)));
    });
    true
}

fn mount_scroll_to_top(window: &Window, document: &Document) -> bool {
    let Some(button) = dom::select(document, ".scroll-to-top") else {
        return false;
    };
    {
        let button = button.clone();
        let source = window.clone();
        dom::listen(window, "scroll", move |_: Event| {
            dom::toggle_class(&button, "visible", scroll_top_visible(dom::scroll_y(&source)));
        });
    }
    let target = window.clone();
    dom::listen(&button, "click", move |_: Event| smooth_scroll(&target, 0.0));
    true
}

fn mount_anchors(window: &Window, document: &Document) -> usize {
    let links = dom::select_all(document, "a[href^=\"#\"]");
    for link in &links {
        let window = window.clone();
        let document = document.clone();
        let anchor = link.clone();
        dom::listen(link, "click", move |event: Event| {
            let Some(href) = anchor.get_attribute("href") else {
                return;
            };
            let Some(target) = anchor_target(&href)
                .and_then(|selector| dom::select(&document, selector))
                .and_then(|t| dom::as_html(&t))
            else {
                return;
            };
            event.prevent_default();
            smooth_scroll(&window, f64::from(target.offset_top()) - ANCHOR_OFFSET);
        });
    }
    links.len()
}

fn section_boxes(sections: &[HtmlElement]) -> Vec<SectionBox> {
    sections
        .iter()
        .map(|s| SectionBox {
            id: s.id(),
            top: f64::from(s.offset_top()),
            height: f64::from(s.client_height()),
        })
        .collect()
}

fn mount_active_section(window: &Window, document: &Document) -> bool {
    let sections = dom::html_elements(dom::select_all(document, "section[id]"));
    let links: Vec<Element> = dom::select_all(document, ".nav-link-custom");
    if sections.is_empty() || links.is_empty() {
        return false;
    }
    let source = window.clone();
    dom::listen(window, "scroll", move |_: Event| {
        let boxes = section_boxes(&sections);
        let current = current_section(&boxes, dom::scroll_y(&source)).map(|id| format!("#{}", id));
        for link in &links {
            let is_current = current.is_some() && link.get_attribute("href") == current;
            dom::toggle_class(link, "active", is_current);
        }
    });
    true
}

fn hide_preloader(preloader: &HtmlElement, clock: BrowserClock) {
    dom::set_style(preloader, "opacity", "0");
    let preloader = preloader.clone();
    clock.defer(PRELOADER_FADE_MS, move || dom::set_style(&preloader, "display", "none"));
}

fn mount_preloader(window: &Window, document: &Document) -> bool {
    let Some(preloader) = dom::select(document, ".preloader").and_then(|p| dom::as_html(&p)) else {
        return false;
    };
    if document.ready_state() == "complete" {
        hide_preloader(&preloader, BrowserClock);
    } else {
        dom::listen(window, "load", move |_: Event| hide_preloader(&preloader, BrowserClock));
    }
    true
}

pub fn mount(window: &Window, document: &Document) {
    let navbar = mount_navbar(window, document);
    let scroll_top = mount_scroll_to_top(window, document);
    let anchors = mount_anchors(window, document);
    let sections = mount_active_section(window, document);
    let preloader = mount_preloader(window, document);
    debug!(
        "nav: navbar={} scroll_top={} sections={} preloader={}",
        navbar, scroll_top, sections, preloader
    );
    info!("nav: {} in-page links wired", anchors);
}
