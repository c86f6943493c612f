use gloo_timers::callback::Timeout;

/// Source of delayed callbacks for every timed effect on the page.
///
/// `defer` is fire-and-forget. `start` hands back a handle; dropping the
/// handle cancels the task if it has not fired yet.
pub trait Clock {
    type Handle;

    fn defer(&self, delay_ms: u32, task: impl FnOnce() + 'static);

    fn start(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> Self::Handle;
}

/// `setTimeout` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    type Handle = Timeout;

    fn defer(&self, delay_ms: u32, task: impl FnOnce() + 'static) {
        let _ = Timeout::new(delay_ms, task).forget();
    }

    fn start(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::Clock;

    struct Pending {
        due: u64,
        seq: u64,
        live: Rc<Cell<bool>>,
        task: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Timeline {
        now: u64,
        seq: u64,
        queue: Vec<Pending>,
    }

    /// Virtual time. Nothing runs until `advance` is called.
    #[derive(Clone, Default)]
    pub struct ManualClock {
        timeline: Rc<RefCell<Timeline>>,
    }

    pub struct ManualHandle {
        live: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.live.set(false);
        }
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.timeline.borrow().now
        }

        /// Tasks still waiting to fire, cancelled ones excluded.
        pub fn pending(&self) -> usize {
            self.timeline
                .borrow()
                .queue
                .iter()
                .filter(|p| p.live.get())
                .count()
        }

        /// Moves time forward, firing due tasks in (due, insertion) order.
        /// Tasks scheduled while advancing fire too if they fall in the window.
        pub fn advance(&self, ms: u64) {
            let target = self.now() + ms;
            loop {
                let next = {
                    let mut timeline = self.timeline.borrow_mut();
                    let due = timeline
                        .queue
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.due <= target)
                        .min_by_key(|(_, p)| (p.due, p.seq))
                        .map(|(i, _)| i);
                    match due {
                        Some(i) => {
                            let pending = timeline.queue.remove(i);
                            timeline.now = pending.due;
                            Some(pending)
                        }
                        None => {
                            timeline.now = target;
                            None
                        }
                    }
                };
                match next {
                    Some(pending) if pending.live.get() => (pending.task)(),
                    Some(_) => {}
                    None => break,
                }
            }
        }

        fn push(&self, delay_ms: u32, live: Rc<Cell<bool>>, task: Box<dyn FnOnce()>) {
            let mut timeline = self.timeline.borrow_mut();
            let due = timeline.now + u64::from(delay_ms);
            let seq = timeline.seq;
            timeline.seq += 1;
            timeline.queue.push(Pending { due, seq, live, task });
        }
    }

    impl Clock for ManualClock {
        type Handle = ManualHandle;

        fn defer(&self, delay_ms: u32, task: impl FnOnce() + 'static) {
            self.push(delay_ms, Rc::new(Cell::new(true)), Box::new(task));
        }

        fn start(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> ManualHandle {
            let live = Rc::new(Cell::new(true));
            self.push(delay_ms, Rc::clone(&live), Box::new(task));
            ManualHandle { live }
        }
    }

    #[test]
    fn tasks_fire_in_due_order() {
        let clock = ManualClock::new();
        let fired = Rc::new(RefCell::new(Vec::new()));
        for (delay, tag) in [(30, "c"), (10, "a"), (20, "b")] {
            let fired = Rc::clone(&fired);
            clock.defer(delay, move || fired.borrow_mut().push(tag));
        }
        clock.advance(15);
        assert_eq!(*fired.borrow(), vec!["a"]);
        clock.advance(100);
        assert_eq!(*fired.borrow(), vec!["a", "b", "c"]);
        assert_eq!(clock.now(), 115);
    }

    #[test]
    fn dropped_handle_cancels() {
        let clock = ManualClock::new();
        let fired = Rc::new(Cell::new(false));
        let handle = {
            let fired = Rc::clone(&fired);
            clock.start(5, move || fired.set(true))
        };
        drop(handle);
        clock.advance(10);
        assert!(!fired.get());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn chained_tasks_inside_window_fire() {
        let clock = ManualClock::new();
        let fired = Rc::new(Cell::new(0));
        {
            let inner_clock = clock.clone();
            let fired = Rc::clone(&fired);
            clock.defer(10, move || {
                fired.set(fired.get() + 1);
                let fired = Rc::clone(&fired);
                inner_clock.defer(10, move || fired.set(fired.get() + 1));
            });
        }
        clock.advance(20);
        assert_eq!(fired.get(), 2);
    }
}
