//! Hero property slider.
//!
//! Cycles the `.hero-property-card`s inside `#propertySlider`, one random
//! transition per change, with an auto-advance timer whose period is redrawn
//! every cycle. Requests that arrive while a change is settling are dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_sys::{Document, Event};

use super::cycle::Ring;
use super::stage::{DomStage, Stage};
use super::transition::{Pose, TransitionKind};
use crate::clock::{BrowserClock, Clock};
use crate::dom;

/// Window after a change during which further changes are refused.
pub const SETTLE_DELAY_MS: u32 = 1000;
/// Outgoing card animates out for this long before the incoming one appears.
pub const SWAP_DELAY_MS: u32 = 400;
/// Incoming card holds its enter pose this long before settling.
pub const ENTER_SETTLE_MS: u32 = 50;
pub const AUTOPLAY_MIN_MS: u32 = 4000;
pub const AUTOPLAY_MAX_MS: u32 = 7000;

struct SlideState<H> {
    ring: Ring,
    animating: bool,
    autoplay: Option<H>,
}

struct Inner<S, C: Clock, R> {
    stage: S,
    clock: C,
    rng: RefCell<R>,
    state: RefCell<SlideState<C::Handle>>,
}

pub struct HeroSlider<S, C: Clock, R> {
    inner: Rc<Inner<S, C, R>>,
}

impl<S, C: Clock, R> Clone for HeroSlider<S, C, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, C, R> HeroSlider<S, C, R>
where
    S: Stage + 'static,
    C: Clock + 'static,
    R: Rng + 'static,
{
    /// `None` when the stage has no cards.
    pub fn new(stage: S, clock: C, rng: R) -> Option<Self> {
        let ring = Ring::new(stage.card_count())?;
        Some(Self {
            inner: Rc::new(Inner {
                stage,
                clock,
                rng: RefCell::new(rng),
                state: RefCell::new(SlideState {
                    ring,
                    animating: false,
                    autoplay: None,
                }),
            }),
        })
    }

    fn from_weak(weak: &Weak<Inner<S, C, R>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn current(&self) -> usize {
        self.inner.state.borrow().ring.index()
    }

    pub fn len(&self) -> usize {
        self.inner.state.borrow().ring.len()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.state.borrow().animating
    }

    pub fn next(&self) {
        let target = {
            let state = self.inner.state.borrow();
            if state.animating {
                return;
            }
            state.ring.forward()
        };
        self.go_to(target);
    }

    pub fn prev(&self) {
        let target = {
            let state = self.inner.state.borrow();
            if state.animating {
                return;
            }
            state.ring.backward()
        };
        self.go_to(target);
    }

    /// Starts a change to `target`. Returns the effect used, or `None` when
    /// the request was dropped (busy, already there, or out of range).
    pub fn go_to(&self, target: usize) -> Option<TransitionKind> {
        let from = {
            let mut state = self.inner.state.borrow_mut();
            if state.animating || target == state.ring.index() || target >= state.ring.len() {
                return None;
            }
            state.animating = true;
            state.ring.index()
        };

        let kind = TransitionKind::pick(&mut *self.inner.rng.borrow_mut());
        debug!("slider: {} -> {} via {}", from, target, kind.class_name());

        self.play(from, target, kind);
        self.inner.stage.highlight(target);
        self.inner.state.borrow_mut().ring.set(target);

        let weak = Rc::downgrade(&self.inner);
        self.inner.clock.defer(SETTLE_DELAY_MS, move || {
            if let Some(inner) = weak.upgrade() {
                inner.state.borrow_mut().animating = false;
            }
        });
        Some(kind)
    }

    fn play(&self, from: usize, to: usize, kind: TransitionKind) {
        let stage = &self.inner.stage;
        stage.reset();
        stage.pose(from, Some(Pose::Exit(kind)));

        let weak = Rc::downgrade(&self.inner);
        self.inner.clock.defer(SWAP_DELAY_MS, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.stage.set_active(from, false);
            inner.stage.pose(from, None);
            inner.stage.pose(to, Some(Pose::Enter(kind)));
            inner.stage.set_active(to, true);

            let weak = Rc::downgrade(&inner);
            inner.clock.defer(ENTER_SETTLE_MS, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.stage.pose(to, None);
                }
            });
        });
    }

    /// (Re)arms auto-advance with a freshly drawn period.
    pub fn start_autoplay(&self) {
        self.stop_autoplay();
        let period = self
            .inner
            .rng
            .borrow_mut()
            .gen_range(AUTOPLAY_MIN_MS..AUTOPLAY_MAX_MS);

        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.clock.start(period, move || {
            if let Some(slider) = Self::from_weak(&weak) {
                slider.next();
                slider.start_autoplay();
            }
        });
        self.inner.state.borrow_mut().autoplay = Some(handle);
    }

    pub fn stop_autoplay(&self) {
        let previous = self.inner.state.borrow_mut().autoplay.take();
        drop(previous);
    }

    pub fn autoplay_armed(&self) -> bool {
        self.inner.state.borrow().autoplay.is_some()
    }
}

pub type PageSlider = HeroSlider<DomStage, BrowserClock, SmallRng>;

/// Wires the slider found in `document`, or returns `None` when the page has
/// no `#propertySlider` or it holds no cards.
pub fn mount(document: &Document) -> Option<PageSlider> {
    let container = document.get_element_by_id("propertySlider")?;
    let cards = dom::html_elements(dom::select_all_in(&container, ".hero-property-card"));
    let indicators = dom::select_all(document, ".indicator");

    let stage = DomStage::new(cards, indicators.clone());
    let Some(slider) = HeroSlider::new(stage, BrowserClock, SmallRng::from_entropy()) else {
        debug!("slider: #propertySlider has no cards, staying inert");
        return None;
    };

    if let Some(prev) = document.get_element_by_id("prevProperty") {
        let slider = slider.clone();
        dom::listen(&prev, "click", move |_: Event| slider.prev());
    }
    if let Some(next) = document.get_element_by_id("nextProperty") {
        let slider = slider.clone();
        dom::listen(&next, "click", move |_: Event| slider.next());
    }
    for (index, dot) in indicators.iter().enumerate() {
        let slider = slider.clone();
        dom::listen(dot, "click", move |_: Event| {
            slider.go_to(index);
        });
    }

    {
        let slider = slider.clone();
        dom::listen(&container, "mouseenter", move |_: Event| slider.stop_autoplay());
    }
    {
        let slider = slider.clone();
        dom::listen(&container, "mouseleave", move |_: Event| slider.start_autoplay());
    }

    slider.start_autoplay();
    info!("slider: mounted with {} cards", slider.len());
    Some(slider)
}
