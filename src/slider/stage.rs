use web_sys::{Element, HtmlElement};

use super::transition::{Pose, STATE_CLASSES};
use crate::dom;

/// What the slider drives: the cards and the dot indicators.
pub trait Stage {
    fn card_count(&self) -> usize;

    /// Strips transition and state classes from every card.
    fn reset(&self);

    /// `Some` moves the card off-rest and hides it, `None` clears both.
    fn pose(&self, card: usize, pose: Option<Pose>);

    fn set_active(&self, card: usize, active: bool);

    fn highlight(&self, indicator: usize);
}

pub struct DomStage {
    cards: Vec<HtmlElement>,
    indicators: Vec<Element>,
}

impl DomStage {
    pub fn new(cards: Vec<HtmlElement>, indicators: Vec<Element>) -> Self {
        Self { cards, indicators }
    }
}

impl Stage for DomStage {
    fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn reset(&self) {
        for card in &self.cards {
            for class in STATE_CLASSES {
                dom::remove_class(card, class);
            }
        }
    }

    fn pose(&self, card: usize, pose: Option<Pose>) {
        let Some(card) = self.cards.get(card) else {
            return;
        };
        match pose {
            Some(pose) => {
                dom::set_style(card, "transform", pose.transform());
                dom::set_style(card, "opacity", "0");
            }
            None => {
                dom::set_style(card, "transform", "");
                dom::set_style(card, "opacity", "");
            }
        }
    }

    fn set_active(&self, card: usize, active: bool) {
        if let Some(card) = self.cards.get(card) {
            dom::toggle_class(card, "active", active);
        }
    }

    fn highlight(&self, indicator: usize) {
        for (i, dot) in self.indicators.iter().enumerate() {
            dom::toggle_class(dot, "active", i == indicator);
        }
    }
}
