// Animation clock fed to time-dependent effects (wave, twist).
// Visual: with animation on, the warp keeps moving between frames; off, it freezes.

/// Milliseconds since the first observed host timestamp.
///
/// The reading never goes backwards: a host timestamp earlier than one already
/// seen holds the previous value. Disabling animation makes [`read`](Self::read)
/// return 0 without touching the underlying clock, so re-enabling resumes the
/// live value instead of rewinding.
#[derive(Debug, Clone, Default)]
pub struct AnimationClock {
    epoch: Option<f64>,
    elapsed: f64,
    enabled: bool,
}

impl AnimationClock {
    pub fn new(enabled: bool) -> Self {
        Self { epoch: None, elapsed: 0.0, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Feed a host timestamp (ms). Call once per active tick.
    pub fn advance(&mut self, now_ms: f64) {
        let epoch = *self.epoch.get_or_insert(now_ms);
        let t = now_ms - epoch;
        if t > self.elapsed {
            self.elapsed = t;
        }
    }

    /// Live elapsed milliseconds, regardless of the enabled flag.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Value handed to the transform: live time, or 0 while animation is off.
    pub fn read(&self) -> f64 {
        if self.enabled { self.elapsed } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let mut c = AnimationClock::new(true);
        c.advance(5_000.0);
        assert_eq!(c.read(), 0.0);
        c.advance(5_040.0);
        assert_eq!(c.read(), 40.0);
    }

    #[test]
    fn disabled_reads_zero_but_keeps_counting() {
        let mut c = AnimationClock::new(false);
        c.advance(0.0);
        c.advance(100.0);
        assert_eq!(c.read(), 0.0);
        c.set_enabled(true);
        assert_eq!(c.read(), 100.0);
    }

    #[test]
    fn never_rewinds() {
        let mut c = AnimationClock::new(true);
        c.advance(10.0);
        c.advance(50.0);
        c.advance(30.0); // host clock jitter
        assert_eq!(c.read(), 40.0);
    }
}
