use crate::clock::Clock;

pub const COUNTER_TICK_MS: u32 = 16;
pub const COUNTER_DURATION_MS: u32 = 2000;

/// `1500` -> `1.5K+`, anything under a thousand as-is. Halves round up,
/// so `1250` is `1.3K+`.
pub fn format_count(value: u64) -> String {
    if value >= 1000 {
        let tenths = (value + 50) / 100;
        format!("{}.{}K+", tenths / 10, tenths % 10)
    } else {
        value.to_string()
    }
}

/// Reads an integer the way `parseInt` does: leading sign and digits, rest
/// ignored. Negative and unreadable values count up to zero.
pub fn parse_count(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    let raw = raw.trim_start();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative {
        return 0;
    }
    digits[..end].parse().unwrap_or(0)
}

/// Frames of a count-up from zero. Each frame adds a fixed step; the last
/// frame is exactly the target.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    step: f64,
    current: f64,
    done: bool,
}

impl CountUp {
    pub fn new(target: u64, duration_ms: u32) -> Self {
        let frames = f64::from(duration_ms) / f64::from(COUNTER_TICK_MS);
        Self {
            target,
            step: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Iterator for CountUp {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }
        self.current += self.step;
        if self.current.is_nan() || self.current >= self.target as f64 {
            self.done = true;
            Some(self.target)
        } else {
            Some(self.current.floor() as u64)
        }
    }
}

/// Renders one frame per tick until the count-up finishes. Not cancellable.
pub fn run_counter<C, F>(clock: C, frames: CountUp, render: F)
where
    C: Clock + Clone + 'static,
    F: FnMut(String) + 'static,
{
    let next_clock = clock.clone();
    let mut frames = frames;
    let mut render = render;
    clock.defer(COUNTER_TICK_MS, move || {
        if let Some(value) = frames.next() {
            render(format_count(value));
        }
        if !frames.is_done() {
            run_counter(next_clock, frames, render);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::clock::testing::ManualClock;

    #[test]
    fn formats_thousands_with_one_decimal() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.0K+");
        assert_eq!(format_count(1500), "1.5K+");
        assert_eq!(format_count(25_000), "25.0K+");
    }

    #[test]
    fn thousands_round_halves_up() {
        assert_eq!(format_count(1250), "1.3K+");
        assert_eq!(format_count(3250), "3.3K+");
        assert_eq!(format_count(12_250), "12.3K+");
        assert_eq!(format_count(1249), "1.2K+");
        assert_eq!(format_count(9999), "10.0K+");
    }

    #[test]
    fn parses_like_parse_int() {
        assert_eq!(parse_count(Some("1500")), 1500);
        assert_eq!(parse_count(Some(" 250+")), 250);
        assert_eq!(parse_count(Some("abc")), 0);
        assert_eq!(parse_count(Some("-40")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn count_up_ends_exactly_on_target_without_overshoot() {
        let frames: Vec<u64> = CountUp::new(1500, COUNTER_DURATION_MS).collect();
        assert_eq!(frames.last().copied(), Some(1500));
        assert!(frames.iter().all(|v| *v <= 1500));
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        // 2000ms at 16ms per tick
        assert!((125..=127).contains(&frames.len()), "{} frames", frames.len());
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let frames: Vec<u64> = CountUp::new(0, COUNTER_DURATION_MS).collect();
        assert_eq!(frames, vec![0]);
    }

    #[test]
    fn run_counter_displays_final_label() {
        let clock = ManualClock::new();
        let shown = Rc::new(RefCell::new(Vec::<String>::new()));
        {
            let shown = Rc::clone(&shown);
            run_counter(clock.clone(), CountUp::new(1500, COUNTER_DURATION_MS), move |text| {
                shown.borrow_mut().push(text)
            });
        }
        assert!(shown.borrow().is_empty());

        clock.advance(u64::from(COUNTER_TICK_MS));
        assert_eq!(shown.borrow().len(), 1);

        clock.advance(5_000);
        assert_eq!(shown.borrow().last().map(String::as_str), Some("1.5K+"));
        assert_eq!(clock.pending(), 0);
    }
}
