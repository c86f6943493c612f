/// Position in a fixed-length, non-empty ring of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    index: usize,
    len: usize,
}

impl Ring {
    /// `None` for an empty collection.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn forward(&self) -> usize {
        (self.index + 1) % self.len
    }

    pub fn backward(&self) -> usize {
        (self.index + self.len - 1) % self.len
    }

    /// Out-of-range indices are refused and leave the ring untouched.
    pub fn set(&mut self, index: usize) -> bool {
        if index < self.len {
            self.index = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ring_does_not_exist() {
        assert!(Ring::new(0).is_none());
    }

    #[test]
    fn forward_n_times_returns_home() {
        for len in 2..12 {
            let mut ring = Ring::new(len).unwrap();
            ring.set(len / 2);
            let start = ring.index();
            for _ in 0..len {
                let next = ring.forward();
                ring.set(next);
            }
            assert_eq!(ring.index(), start, "len {}", len);
        }
    }

    #[test]
    fn backward_undoes_forward() {
        for len in 1..9 {
            let mut ring = Ring::new(len).unwrap();
            for start in 0..len {
                ring.set(start);
                let next = ring.forward();
                ring.set(next);
                let back = ring.backward();
                ring.set(back);
                assert_eq!(ring.index(), start);
            }
        }
    }

    #[test]
    fn wraps_at_both_ends() {
        let mut ring = Ring::new(4).unwrap();
        assert_eq!(ring.backward(), 3);
        ring.set(3);
        assert_eq!(ring.forward(), 0);
    }

    #[test]
    fn refuses_out_of_range() {
        let mut ring = Ring::new(3).unwrap();
        assert!(!ring.set(3));
        assert_eq!(ring.index(), 0);
    }

    #[test]
    fn single_card_ring_stays_put() {
        let ring = Ring::new(1).unwrap();
        assert_eq!(ring.forward(), 0);
        assert_eq!(ring.backward(), 0);
    }
}
