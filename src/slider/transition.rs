use rand::Rng;

/// Visual effect used for one card change. Picked fresh for every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    RotateFlip,
    ZoomFade,
    SlideRotate,
    PerspectiveShift,
    SpiralIn,
}

/// Classes stripped from every card before a transition starts.
pub const STATE_CLASSES: [&str; 8] = [
    "active",
    "prev",
    "next",
    "rotate-flip",
    "zoom-fade",
    "slide-rotate",
    "perspective-shift",
    "spiral-in",
];

impl TransitionKind {
    pub const ALL: [TransitionKind; 5] = [
        TransitionKind::RotateFlip,
        TransitionKind::ZoomFade,
        TransitionKind::SlideRotate,
        TransitionKind::PerspectiveShift,
        TransitionKind::SpiralIn,
    ];

    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn class_name(self) -> &'static str {
        match self {
            TransitionKind::RotateFlip => "rotate-flip",
            TransitionKind::ZoomFade => "zoom-fade",
            TransitionKind::SlideRotate => "slide-rotate",
            TransitionKind::PerspectiveShift => "perspective-shift",
            TransitionKind::SpiralIn => "spiral-in",
        }
    }

    /// Transform of the outgoing card while it fades.
    pub fn exit_transform(self) -> &'static str {
        match self {
            TransitionKind::RotateFlip => "rotateY(90deg) scale(0.8)",
            TransitionKind::ZoomFade => "scale(1.2)",
            TransitionKind::SlideRotate => "translateX(-100%) rotate(-15deg)",
            TransitionKind::PerspectiveShift => {
                "perspective(1000px) rotateX(45deg) translateZ(-200px)"
            }
            TransitionKind::SpiralIn => "rotate(180deg) scale(0)",
        }
    }

    /// Transform the incoming card starts from before settling.
    pub fn enter_transform(self) -> &'static str {
        match self {
            TransitionKind::RotateFlip => "rotateY(-90deg) scale(0.8)",
            TransitionKind::ZoomFade => "scale(0.8)",
            TransitionKind::SlideRotate => "translateX(100%) rotate(15deg)",
            TransitionKind::PerspectiveShift => {
                "perspective(1000px) rotateX(-45deg) translateZ(-200px)"
            }
            TransitionKind::SpiralIn => "rotate(-180deg) scale(0)",
        }
    }
}

/// Off-rest placement of a card: transformed and fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Exit(TransitionKind),
    Enter(TransitionKind),
}

impl Pose {
    pub fn transform(self) -> &'static str {
        match self {
            Pose::Exit(kind) => kind.exit_transform(),
            Pose::Enter(kind) => kind.enter_transform(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn picks_are_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts: HashMap<TransitionKind, usize> = HashMap::new();
        let draws = 10_000;
        for _ in 0..draws {
            *counts.entry(TransitionKind::pick(&mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), TransitionKind::ALL.len());
        for kind in TransitionKind::ALL {
            let seen = counts[&kind];
            assert!(
                (1_700..=2_300).contains(&seen),
                "{:?} drawn {} times out of {}",
                kind,
                seen,
                draws
            );
        }
    }

    #[test]
    fn exit_and_enter_differ_for_every_kind() {
        for kind in TransitionKind::ALL {
            assert_ne!(kind.exit_transform(), kind.enter_transform(), "{:?}", kind);
        }
    }

    #[test]
    fn every_kind_class_is_stripped_on_reset() {
        for kind in TransitionKind::ALL {
            assert!(STATE_CLASSES.contains(&kind.class_name()));
        }
    }
}
