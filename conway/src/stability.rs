// stability.rs - Consecutive-detection counter for one pattern class

use crate::patterns::PatternClass;

/// Result of feeding one generation's detection into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Consecutive detections so far.
    pub count: u32,
    /// Set on the single observation at which the threshold is first reached.
    pub stable: bool,
}

/// Declares a sighting stable once it has been detected in `threshold`
/// consecutive generations. Generation 0 is the seeded configuration and
/// is never counted.
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    threshold: u32,
    count: u32,
    confirmed_at: Option<u64>,
}

impl StabilityTracker {
    pub fn new(threshold: u32) -> Self {
        Self { threshold: threshold.max(1), count: 0, confirmed_at: None }
    }

    pub fn for_class(class: PatternClass) -> Self {
        Self::new(class.threshold())
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Generation at which stability was first confirmed, if it has been.
    pub fn confirmed_at(&self) -> Option<u64> {
        self.confirmed_at
    }

    /// Record whether the class was detected at `generation`.
    pub fn observe(&mut self, generation: u64, detected: bool) -> Observation {
        if !detected {
            self.count = 0;
        } else if generation > 0 {
            self.count = self.count.saturating_add(1);
        }

        let stable = self.confirmed_at.is_none() && self.count >= self.threshold;
        if stable {
            self.confirmed_at = Some(generation);
        }
        Observation { count: self.count, stable }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.confirmed_at = None;
    }
}
