//! Category filter for the gallery grid.

use std::rc::Rc;

use log::{debug, info};
use web_sys::{Document, Element, Event, HtmlElement};

use super::fade::{Fadeable, Fader, GALLERY_HIDDEN_SCALE};
use crate::clock::{BrowserClock, Clock};
use crate::dom;

/// Filter token that matches every item.
pub const SHOW_ALL: &str = "all";

/// `categories` is the item's space separated `data-category` value.
pub fn category_matches(categories: &str, filter: &str) -> bool {
    filter == SHOW_ALL || categories.split_whitespace().any(|c| c == filter)
}

pub struct GalleryFilter<T, C> {
    categories: Vec<String>,
    fader: Fader<T, C>,
}

impl<T, C> GalleryFilter<T, C>
where
    T: Fadeable + 'static,
    C: Clock,
{
    /// `items` pairs each element with its categories.
    pub fn new(items: Vec<(T, String)>, clock: C) -> Self {
        let (elements, categories) = items.into_iter().unzip();
        Self {
            categories,
            fader: Fader::new(elements, clock, GALLERY_HIDDEN_SCALE),
        }
    }

    /// Shows the items in `filter`, hides the rest. Returns how many match.
    pub fn apply(&self, filter: &str) -> usize {
        let shown = self
            .fader
            .apply(|i| category_matches(&self.categories[i], filter));
        debug!("gallery: filter {:?} matches {} of {}", filter, shown, self.fader.len());
        shown
    }

    pub fn fader(&self) -> &Fader<T, C> {
        &self.fader
    }
}

pub fn mount(document: &Document) -> Option<Rc<GalleryFilter<HtmlElement, BrowserClock>>> {
    let buttons = dom::select_all(document, ".filter-btn, .filter-pill");
    let items = dom::select_all(document, ".gallery-item");
    if buttons.is_empty() || items.is_empty() {
        return None;
    }

    let items = items
        .iter()
        .filter_map(|item| {
            let categories = dom::data(item, "category").unwrap_or_default();
            dom::as_html(item).map(|html| (html, categories))
        })
        .collect();
    let filter = Rc::new(GalleryFilter::new(items, BrowserClock));

    let buttons: Rc<Vec<Element>> = Rc::new(buttons);
    for button in buttons.iter() {
        let filter = Rc::clone(&filter);
        let all = Rc::clone(&buttons);
        let clicked = button.clone();
        dom::listen(button, "click", move |_: Event| {
            for b in all.iter() {
                dom::remove_class(b, "active");
            }
            dom::add_class(&clicked, "active");
            let token = dom::data(&clicked, "filter").unwrap_or_default();
            filter.apply(&token);
        });
    }

    info!(
        "gallery: filter mounted with {} buttons over {} items",
        buttons.len(),
        filter.fader().len()
    );
    Some(filter)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::gallery::fade::testing::FakeCard;

    #[test]
    fn tokens_match_whole_words() {
        assert!(category_matches("villa luxury", "villa"));
        assert!(category_matches("villa luxury", "luxury"));
        assert!(!category_matches("villas", "villa"));
        assert!(!category_matches("", "villa"));
        assert!(category_matches("", SHOW_ALL));
    }

    fn gallery(clock: &ManualClock) -> GalleryFilter<FakeCard, ManualClock> {
        let items = ["villa", "apartment interior", "villa exterior", "plot"]
            .iter()
            .map(|c| (FakeCard::default(), c.to_string()))
            .collect();
        GalleryFilter::new(items, clock.clone())
    }

    fn displayed(filter: &GalleryFilter<FakeCard, ManualClock>) -> Vec<bool> {
        (0..filter.fader().len())
            .map(|i| filter.fader().element(i).unwrap().displayed())
            .collect()
    }

    #[test]
    fn villa_shows_only_villas() {
        let clock = ManualClock::new();
        let filter = gallery(&clock);
        assert_eq!(filter.apply("villa"), 2);
        clock.advance(500);
        assert_eq!(displayed(&filter), vec![true, false, true, false]);
    }

    #[test]
    fn all_restores_every_item() {
        let clock = ManualClock::new();
        let filter = gallery(&clock);
        filter.apply("plot");
        clock.advance(500);
        assert_eq!(filter.apply(SHOW_ALL), 4);
        clock.advance(500);
        assert_eq!(displayed(&filter), vec![true; 4]);
    }

    #[test]
    fn quick_refilter_keeps_latest_choice() {
        let clock = ManualClock::new();
        let filter = gallery(&clock);
        filter.apply("plot");
        clock.advance(50);
        filter.apply("villa");
        clock.advance(1000);
        assert_eq!(displayed(&filter), vec![true, false, true, false]);
    }
}
