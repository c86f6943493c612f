//! Listing filter driven by `#propertyFilterForm`.

use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, FormData, HtmlElement, HtmlFormElement};

use super::fade::{Fadeable, Fader, PROPERTY_HIDDEN_SCALE};
use crate::clock::{BrowserClock, Clock};
use crate::dom;

/// Leading decimal number of `raw`, the way browsers read loose numeric
/// input: `"2500000 INR"` is 2500000, `"1.2e7"` is 12000000, `"abc"` is
/// nothing.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse().ok()
}

/// Filter chosen in the form. Empty lists match anything.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyQuery {
    pub types: Vec<String>,
    pub bedrooms: Vec<String>,
    pub price_min: f64,
    pub price_max: f64,
}

impl Default for PropertyQuery {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            bedrooms: Vec::new(),
            price_min: 0.0,
            price_max: f64::INFINITY,
        }
    }
}

impl PropertyQuery {
    /// Missing or unreadable bounds fall back to 0 and unbounded; a maximum
    /// of 0 also means unbounded.
    pub fn new(
        types: Vec<String>,
        bedrooms: Vec<String>,
        price_min: Option<&str>,
        price_max: Option<&str>,
    ) -> Self {
        let price_min = price_min.and_then(parse_number).unwrap_or(0.0);
        let price_max = price_max
            .and_then(parse_number)
            .filter(|n| *n != 0.0)
            .unwrap_or(f64::INFINITY);
        Self {
            types,
            bedrooms,
            price_min,
            price_max,
        }
    }

    fn read(form: &HtmlFormElement) -> Self {
        let Ok(data) = FormData::new_with_form(form) else {
            return Self::default();
        };
        let all = |name: &str| -> Vec<String> {
            data.get_all(name).iter().filter_map(|v| v.as_string()).collect()
        };
        let one = |name: &str| data.get(name).as_string();
        Self::new(
            all("type"),
            all("bedrooms"),
            one("price_min").as_deref(),
            one("price_max").as_deref(),
        )
    }
}

/// What a `.property-card` advertises about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyCard {
    pub kind: Option<String>,
    pub bedrooms: Option<String>,
    pub price: f64,
}

impl PropertyCard {
    pub fn from_element(card: &Element) -> Self {
        Self {
            kind: dom::data(card, "type"),
            bedrooms: dom::data(card, "bedrooms"),
            price: dom::data(card, "price")
                .as_deref()
                .and_then(parse_number)
                .unwrap_or(0.0),
        }
    }

    pub fn matches(&self, query: &PropertyQuery) -> bool {
        let listed = |wanted: &[String], have: &Option<String>| {
            wanted.is_empty() || have.as_ref().is_some_and(|h| wanted.contains(h))
        };
        listed(&query.types, &self.kind)
            && listed(&query.bedrooms, &self.bedrooms)
            && self.price >= query.price_min
            && self.price <= query.price_max
    }
}

pub struct PropertyFilter<T, C> {
    cards: Vec<PropertyCard>,
    // index into `fader` for cards that sit inside a grid column
    slots: Vec<Option<usize>>,
    fader: Fader<T, C>,
}

impl<T, C> PropertyFilter<T, C>
where
    T: Fadeable + 'static,
    C: Clock,
{
    /// Each card comes with the column element that is shown or hidden for
    /// it, if it has one.
    pub fn new(cards: Vec<(PropertyCard, Option<T>)>, clock: C) -> Self {
        let mut columns = Vec::new();
        let mut parsed = Vec::with_capacity(cards.len());
        let mut slots = Vec::with_capacity(cards.len());
        for (card, column) in cards {
            parsed.push(card);
            slots.push(column.map(|c| {
                columns.push(c);
                columns.len() - 1
            }));
        }
        Self {
            cards: parsed,
            slots,
            fader: Fader::new(columns, clock, PROPERTY_HIDDEN_SCALE),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns how many cards match `query`.
    pub fn apply(&self, query: &PropertyQuery) -> usize {
        let mut matched = 0;
        for (card, slot) in self.cards.iter().zip(&self.slots) {
            let show = card.matches(query);
            matched += usize::from(show);
            if let Some(slot) = slot {
                self.fader.set(*slot, show);
            }
        }
        info!("Showing {} of {} properties", matched, self.cards.len());
        matched
    }

    pub fn fader(&self) -> &Fader<T, C> {
        &self.fader
    }
}

pub fn mount(document: &Document) -> Option<Rc<PropertyFilter<HtmlElement, BrowserClock>>> {
    let form = document
        .get_element_by_id("propertyFilterForm")?
        .dyn_into::<HtmlFormElement>()
        .ok()?;

    let cards = dom::select_all(document, ".property-card")
        .iter()
        .map(|card| {
            let column = dom::closest(card, ".col-lg-4, .col-md-6").and_then(|c| dom::as_html(&c));
            (PropertyCard::from_element(card), column)
        })
        .collect();
    let filter = Rc::new(PropertyFilter::new(cards, BrowserClock));

    if let Some(apply) = dom::select_in(&form, ".apply-filter") {
        let filter = Rc::clone(&filter);
        let form = form.clone();
        dom::listen(&apply, "click", move |_: Event| {
            filter.apply(&PropertyQuery::read(&form));
        });
    }
    if let Some(reset) = dom::select_in(&form, ".reset-filter") {
        let filter = Rc::clone(&filter);
        let form = form.clone();
        dom::listen(&reset, "click", move |_: Event| {
            form.reset();
            filter.apply(&PropertyQuery::read(&form));
        });
    }
    {
        let filter = Rc::clone(&filter);
        let source = form.clone();
        dom::listen(&form, "change", move |_: Event| {
            filter.apply(&PropertyQuery::read(&source));
        });
    }

    info!("property filter: mounted over {} cards", filter.len());
    Some(filter)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::testing::ManualClock;
    use crate::gallery::fade::testing::FakeCard;

    fn card(kind: &str, bedrooms: &str, price: f64) -> PropertyCard {
        PropertyCard {
            kind: Some(kind.to_string()),
            bedrooms: Some(bedrooms.to_string()),
            price,
        }
    }

    fn listing() -> Vec<PropertyCard> {
        vec![
            card("villa", "4", 25_000_000.0),
            card("apartment", "2", 6_500_000.0),
            card("apartment", "3", 9_000_000.0),
            card("plot", "0", 3_000_000.0),
        ]
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn loose_numbers() {
        assert_eq!(parse_number("2500000"), Some(2_500_000.0));
        assert_eq!(parse_number("  42.5 lakh"), Some(42.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn loose_numbers_take_exponents() {
        assert_eq!(parse_number("1.2e7"), Some(12_000_000.0));
        assert_eq!(parse_number("5E-1 crore"), Some(0.5));
        assert_eq!(parse_number("3e"), Some(3.0));
        assert_eq!(parse_number("3e+x"), Some(3.0));
    }

    #[test]
    fn empty_query_shows_everything() {
        let query = PropertyQuery::new(Vec::new(), Vec::new(), None, None);
        assert_eq!(query, PropertyQuery::default());
        assert!(listing().iter().all(|c| c.matches(&query)));
    }

    #[test]
    fn unreadable_or_zero_bounds_are_open() {
        let query = PropertyQuery::new(Vec::new(), Vec::new(), Some("any"), Some("0"));
        assert_eq!(query.price_min, 0.0);
        assert_eq!(query.price_max, f64::INFINITY);
    }

    #[test]
    fn lowering_max_hides_exactly_the_dearer_card() {
        let query = PropertyQuery::new(Vec::new(), Vec::new(), None, Some("24999999"));
        let shown: Vec<bool> = listing().iter().map(|c| c.matches(&query)).collect();
        assert_eq!(shown, vec![false, true, true, true]);
    }

    #[test]
    fn type_and_bedroom_lists_combine() {
        let query = PropertyQuery::new(strings(&["apartment"]), strings(&["3", "4"]), None, None);
        let shown: Vec<bool> = listing().iter().map(|c| c.matches(&query)).collect();
        assert_eq!(shown, vec![false, false, true, false]);
    }

    #[test]
    fn card_without_type_fails_a_type_filter() {
        let untyped = PropertyCard {
            kind: None,
            bedrooms: None,
            price: 0.0,
        };
        assert!(untyped.matches(&PropertyQuery::default()));
        assert!(!untyped.matches(&PropertyQuery::new(strings(&["villa"]), Vec::new(), None, None)));
    }

    #[test]
    fn filter_counts_matches_and_fades_columns() {
        let clock = ManualClock::new();
        let mut cards: Vec<(PropertyCard, Option<FakeCard>)> = listing()
            .into_iter()
            .map(|c| (c, Some(FakeCard::default())))
            .collect();
        // a card outside the grid still counts
        cards[3].1 = None;
        let filter = PropertyFilter::new(cards, clock.clone());

        let query = PropertyQuery::new(Vec::new(), Vec::new(), Some("5000000"), None);
        assert_eq!(filter.apply(&query), 3);
        clock.advance(1000);
        let displayed: Vec<bool> = (0..filter.fader().len())
            .map(|i| filter.fader().element(i).unwrap().displayed())
            .collect();
        assert_eq!(displayed, vec![true, true, true]);

        let query = PropertyQuery::new(strings(&["villa"]), Vec::new(), None, None);
        assert_eq!(filter.apply(&query), 1);
        clock.advance(1000);
        let displayed: Vec<bool> = (0..filter.fader().len())
            .map(|i| filter.fader().element(i).unwrap().displayed())
            .collect();
        assert_eq!(displayed, vec![true, false, false]);
    }
}
