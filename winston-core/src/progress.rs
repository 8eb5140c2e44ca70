/// One step of the analysis progress bar. The bar is cosmetic: it is not
/// driven by server progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checkpoint {
    pub percent: f64,
    /// Milliseconds to wait after showing `percent`.
    pub hold_ms: u32,
}

/// Shown after the pre-check succeeds, before the analyze request is sent.
pub const BEFORE_ANALYZE: [Checkpoint; 3] = [
    Checkpoint { percent: 1.0, hold_ms: 0 },
    Checkpoint { percent: 30.0, hold_ms: 2000 },
    Checkpoint { percent: 60.0, hold_ms: 0 },
];

/// Shown once the analyze response arrives, before results render.
pub const AFTER_ANALYZE: Checkpoint = Checkpoint { percent: 100.0, hold_ms: 1000 };

/// Fraction of an upload transferred, in `[0, 1]`.
pub fn upload_fraction(loaded: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    (loaded / total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoints_rise_monotonically() {
        let mut last = 0.0;
        for cp in BEFORE_ANALYZE.iter().chain(std::iter::once(&AFTER_ANALYZE)) {
            assert!(cp.percent > last);
            last = cp.percent;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn upload_fraction_bounds() {
        assert_eq!(upload_fraction(0.0, 0.0), 0.0);
        assert_eq!(upload_fraction(50.0, 200.0), 0.25);
        assert_eq!(upload_fraction(300.0, 200.0), 1.0);
    }
}
