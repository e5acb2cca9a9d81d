//! Single-sample bass onset detection.

/// Bass level a beat must exceed
pub const DEFAULT_THRESHOLD: f32 = 200.0;
/// Minimum rise over the previous frame's bass
pub const DEFAULT_DELTA: f32 = 30.0;

/// Flags a beat when bass is loud and jumped since the previous call.
///
/// There is no cooldown or smoothing: a signal that keeps rising by more
/// than `delta` above `threshold` retriggers every frame.
#[derive(Clone, Debug)]
pub struct BeatDetector {
    threshold: f32,
    delta: f32,
    last_bass: f32,
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_DELTA)
    }
}

impl BeatDetector {
    pub fn new(threshold: f32, delta: f32) -> Self {
        Self {
            threshold,
            delta,
            last_bass: 0.0,
        }
    }

    /// Compare `bass` against the previous sample. Always records `bass`.
    pub fn detect(&mut self, bass: f32) -> bool {
        let beat = bass > self.threshold && bass - self.last_bass > self.delta;
        self.last_bass = bass;
        beat
    }

    pub fn last_bass(&self) -> f32 {
        self.last_bass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primed(last_bass: f32) -> BeatDetector {
        let mut detector = BeatDetector::default();
        detector.detect(last_bass);
        detector
    }

    #[test]
    fn test_beat_on_sharp_rise() {
        let mut detector = primed(150.0);
        assert!(detector.detect(210.0));
    }

    #[test]
    fn test_no_beat_on_small_rise() {
        let mut detector = primed(210.0);
        assert!(!detector.detect(215.0));
    }

    #[test]
    fn test_no_beat_below_threshold() {
        let mut detector = primed(0.0);
        assert!(!detector.detect(199.0));
        assert_eq!(detector.last_bass(), 199.0);
    }

    #[test]
    fn test_last_bass_updated_without_beat() {
        let mut detector = primed(100.0);
        assert!(!detector.detect(90.0));
        assert_eq!(detector.last_bass(), 90.0);
    }

    #[test]
    fn test_oscillation_retriggers() {
        let mut detector = BeatDetector::default();
        let mut beats = 0;
        for i in 0..10 {
            let bass = if i % 2 == 0 { 250.0 } else { 150.0 };
            if detector.detect(bass) {
                beats += 1;
            }
        }
        assert_eq!(beats, 5);
    }

    #[test]
    fn test_custom_thresholds() {
        let mut detector = BeatDetector::new(100.0, 10.0);
        assert!(detector.detect(120.0));
        assert!(!detector.detect(125.0));
    }
}
