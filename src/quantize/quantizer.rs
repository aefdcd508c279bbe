/// Snaps ticks onto the grid selected by a quantize value.
///
/// The grid unit is `timebase * 4 / quantize` ticks, so with a timebase of
/// 480 a quantize of 4 snaps to quarter notes (480 ticks) and 12 to eighth
/// triplets (160 ticks).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    timebase: u32,
    quantize: f64,
    enabled: bool,
}

impl Quantizer {
    pub fn new(timebase: u32, quantize: f64) -> Self {
        Self {
            timebase,
            quantize,
            enabled: true,
        }
    }

    /// A disabled quantizer only rounds to the nearest whole tick.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Grid unit in ticks.
    pub fn unit(&self) -> f64 {
        f64::from(self.timebase) * 4.0 / self.quantize
    }

    pub fn round(&self, tick: f64) -> f64 {
        self.snap(tick, f64::round)
    }

    pub fn floor(&self, tick: f64) -> f64 {
        self.snap(tick, f64::floor)
    }

    pub fn ceil(&self, tick: f64) -> f64 {
        self.snap(tick, f64::ceil)
    }

    fn snap(&self, tick: f64, op: fn(f64) -> f64) -> f64 {
        let unit = self.unit();
        if !self.enabled || !unit.is_finite() || unit <= 0.0 {
            return tick.round();
        }
        (op(tick / unit) * unit).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_for_common_values() {
        assert_eq!(Quantizer::new(480, 4.0).unit(), 480.0);
        assert_eq!(Quantizer::new(480, 16.0).unit(), 120.0);
        assert_eq!(Quantizer::new(480, 12.0).unit(), 160.0);
    }

    #[test]
    fn test_round_floor_ceil() {
        let q = Quantizer::new(480, 8.0);
        assert_eq!(q.round(130.0), 240.0);
        assert_eq!(q.round(110.0), 0.0);
        assert_eq!(q.floor(479.0), 240.0);
        assert_eq!(q.ceil(241.0), 480.0);
    }

    #[test]
    fn test_dotted_grid() {
        // dotted quarter: 4 / 1.5
        let q = Quantizer::new(480, 4.0 / 1.5);
        assert_eq!(q.round(700.0), 720.0);
    }

    #[test]
    fn test_disabled_rounds_to_whole_ticks() {
        let q = Quantizer::new(480, 4.0).with_enabled(false);
        assert_eq!(q.round(130.4), 130.0);
    }

    #[test]
    fn test_zero_quantize_leaves_tick() {
        let q = Quantizer::new(480, 0.0);
        assert_eq!(q.round(77.0), 77.0);
    }
}
