use std::fmt;

/// Instantaneous thermal pressure, as a percentage of the throttling range.
///
/// `0` means nothing is being throttled, `100` means the hottest sensor (or the most
/// engaged cooling device) is at its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ThermalLoad(u8);

/// Value reported when no source can be read.
pub const SENTINEL: ThermalLoad = ThermalLoad::NONE;

impl ThermalLoad {
    /// No throttling.
    pub const NONE: ThermalLoad = ThermalLoad(0);
    /// Fully throttled.
    pub const MAX: ThermalLoad = ThermalLoad(100);

    /// Build a load from a percentage, clamping to `0..=100` and rounding to the nearest integer.
    /// `NaN` maps to [`ThermalLoad::NONE`].
    pub fn from_percent(percent: f32) -> Self {
        if percent.is_nan() {
            return Self::NONE;
        }
        ThermalLoad(percent.clamp(0.0, 100.0).round() as u8)
    }

    /// Build a load from a `current / max` step ratio. A zero `max` yields `None`.
    pub fn from_ratio(current: u64, max: u64) -> Option<Self> {
        if max == 0 {
            return None;
        }
        let current = u128::from(current.min(max));
        Some(ThermalLoad((current * 100 / u128::from(max)) as u8))
    }

    /// The load as a percentage.
    pub fn percent(self) -> u8 {
        self.0
    }

    /// The load as a JNI `int`. Always non-negative.
    pub fn as_jint(self) -> i32 {
        i32::from(self.0)
    }

    /// Whether any throttling is reported.
    pub fn is_throttling(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for ThermalLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_clamped_and_rounded() {
        assert_eq!(ThermalLoad::from_percent(-5.0), ThermalLoad::NONE);
        assert_eq!(ThermalLoad::from_percent(150.0), ThermalLoad::MAX);
        assert_eq!(ThermalLoad::from_percent(42.6).percent(), 43);
        assert_eq!(ThermalLoad::from_percent(f32::NAN), ThermalLoad::NONE);
    }

    #[test]
    fn ratio_handles_zero_and_overflowing_state() {
        assert_eq!(ThermalLoad::from_ratio(3, 0), None);
        assert_eq!(ThermalLoad::from_ratio(1, 4).map(ThermalLoad::percent), Some(25));
        assert_eq!(ThermalLoad::from_ratio(9, 4), Some(ThermalLoad::MAX));
        // Integer division truncates (2^63 - 1) * 100 / (2^64 - 1) to 49.
        assert_eq!(
            ThermalLoad::from_ratio(u64::MAX / 2, u64::MAX).map(ThermalLoad::percent),
            Some(49)
        );
        assert_eq!(ThermalLoad::from_ratio(u64::MAX, u64::MAX), Some(ThermalLoad::MAX));
        assert_eq!(
            ThermalLoad::from_ratio(1_000_000_000_000_000_000, 2_000_000_000_000_000_000)
                .map(ThermalLoad::percent),
            Some(50)
        );
    }

    #[test]
    fn sentinel_is_non_negative() {
        assert_eq!(SENTINEL.as_jint(), 0);
        assert!(!SENTINEL.is_throttling());
        assert_eq!(ThermalLoad::MAX.to_string(), "100%");
    }
}
