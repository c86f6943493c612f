use std::cell::Cell;
use std::rc::Rc;

use web_sys::HtmlElement;

use crate::clock::Clock;
use crate::dom;

/// Delay before a re-displayed card starts fading in.
pub const SHOW_SETTLE_MS: u32 = 10;
/// Length of the fade-out before a card leaves the layout.
pub const HIDE_DELAY_MS: u32 = 300;

pub const GALLERY_HIDDEN_SCALE: &str = "scale(0.8)";
pub const PROPERTY_HIDDEN_SCALE: &str = "scale(0.9)";

/// Something that can be faded in and out of the layout.
pub trait Fadeable {
    fn set_display(&self, value: &str);
    fn set_look(&self, opacity: &str, transform: &str);
}

impl Fadeable for HtmlElement {
    fn set_display(&self, value: &str) {
        dom::set_style(self, "display", value);
    }

    fn set_look(&self, opacity: &str, transform: &str) {
        dom::set_style(self, "opacity", opacity);
        dom::set_style(self, "transform", transform);
    }
}

struct Target<T> {
    element: T,
    // bumped on every request; a deferred step only runs if it still matches
    epoch: Cell<u64>,
}

/// Shows and hides a fixed set of elements, keeping `display` changes behind
/// the opacity transition.
pub struct Fader<T, C> {
    targets: Vec<Rc<Target<T>>>,
    clock: C,
    hidden_transform: &'static str,
}

impl<T, C> Fader<T, C>
where
    T: Fadeable + 'static,
    C: Clock,
{
    pub fn new(elements: Vec<T>, clock: C, hidden_transform: &'static str) -> Self {
        let targets = elements
            .into_iter()
            .map(|element| {
                Rc::new(Target {
                    element,
                    epoch: Cell::new(0),
                })
            })
            .collect();
        Self {
            targets,
            clock,
            hidden_transform,
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&T> {
        self.targets.get(index).map(|t| &t.element)
    }

    pub fn set(&self, index: usize, visible: bool) {
        let Some(target) = self.targets.get(index) else {
            return;
        };
        let epoch = target.epoch.get() + 1;
        target.epoch.set(epoch);

        let pending = Rc::clone(target);
        if visible {
            target.element.set_display("");
            self.clock.defer(SHOW_SETTLE_MS, move || {
                if pending.epoch.get() == epoch {
                    pending.element.set_look("1", "scale(1)");
                }
            });
        } else {
            target.element.set_look("0", self.hidden_transform);
            self.clock.defer(HIDE_DELAY_MS, move || {
                if pending.epoch.get() == epoch {
                    pending.element.set_display("none");
                }
            });
        }
    }

    /// Applies `visible` to every element; returns how many are shown.
    pub fn apply(&self, mut visible: impl FnMut(usize) -> bool) -> usize {
        let mut shown = 0;
        for index in 0..self.targets.len() {
            let on = visible(index);
            self.set(index, on);
            shown += usize::from(on);
        }
        shown
    }
}
