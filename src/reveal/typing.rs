use super::counter::parse_count;
use crate::clock::Clock;

pub const DEFAULT_TYPING_SPEED_MS: u32 = 50;

/// `data-speed` in ms per character; zero or junk falls back to the default.
pub fn typing_speed(raw: Option<&str>) -> u32 {
    u32::try_from(parse_count(raw))
        .ok()
        .filter(|speed| *speed > 0)
        .unwrap_or(DEFAULT_TYPING_SPEED_MS)
}

/// Successive prefixes of a string, one more character each step.
#[derive(Debug, Clone)]
pub struct Typewriter {
    remaining: std::vec::IntoIter<char>,
    shown: String,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            remaining: text.chars().collect::<Vec<_>>().into_iter(),
            shown: String::with_capacity(text.len()),
        }
    }
}

impl Iterator for Typewriter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let c = self.remaining.next()?;
        self.shown.push(c);
        Some(self.shown.clone())
    }
}

/// Clears the target, shows the first character at once and each following
/// one `speed_ms` later.
pub fn run_typewriter<C, F>(clock: C, text: &str, speed_ms: u32, render: F)
where
    C: Clock + Clone + 'static,
    F: FnMut(&str) + 'static,
{
    let mut render = render;
    render("");
    type_next(clock, Typewriter::new(text), speed_ms, render);
}

fn type_next<C, F>(clock: C, mut typewriter: Typewriter, speed_ms: u32, mut render: F)
where
    C: Clock + Clone + 'static,
    F: FnMut(&str) + 'static,
{
    let Some(prefix) = typewriter.next() else {
        return;
    };
    render(&prefix);
    let next_clock = clock.clone();
    clock.defer(speed_ms, move || type_next(next_clock, typewriter, speed_ms, render));
}
