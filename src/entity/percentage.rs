//! Conversions between discrete fan speeds and percentages

/// Inclusive range of discrete speeds, e.g. `(1, 3)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedRange {
    pub low: u8,
    pub high: u8,
}

impl SpeedRange {
    pub const fn new(low: u8, high: u8) -> Self {
        Self { low, high }
    }

    pub fn states(&self) -> u8 {
        self.high - self.low + 1
    }

    fn offset(&self) -> f64 {
        f64::from(self.low) - 1.0
    }

    /// Speed 1 of 3 is 33, 2 of 3 is 66, 3 of 3 is 100
    pub fn value_to_percentage(&self, value: u8) -> u8 {
        let pct = ((f64::from(value) - self.offset()) * 100.0 / f64::from(self.states())).floor();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Fractional position inside the range; callers round as needed
    pub fn percentage_to_value(&self, percentage: u8) -> f64 {
        f64::from(self.states()) * f64::from(percentage) / 100.0 + self.offset()
    }

    /// Ceiling of `percentage_to_value`, kept inside the range
    pub fn percentage_to_speed(&self, percentage: u8) -> u8 {
        let value = self.percentage_to_value(percentage).ceil();
        value.clamp(f64::from(self.low), f64::from(self.high)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: SpeedRange = SpeedRange::new(1, 3);

    #[test]
    fn test_states() {
        assert_eq!(RANGE.states(), 3);
        assert_eq!(SpeedRange::new(1, 100).states(), 100);
    }

    #[test]
    fn test_value_to_percentage() {
        assert_eq!(RANGE.value_to_percentage(1), 33);
        assert_eq!(RANGE.value_to_percentage(2), 66);
        assert_eq!(RANGE.value_to_percentage(3), 100);
    }

    #[test]
    fn test_percentage_to_value() {
        assert_eq!(RANGE.percentage_to_value(50), 1.5);
        assert_eq!(RANGE.percentage_to_value(100), 3.0);
    }

    #[test]
    fn test_percentage_to_speed_uses_ceiling() {
        assert_eq!(RANGE.percentage_to_speed(50), 2);
        assert_eq!(RANGE.percentage_to_speed(1), 1);
        assert_eq!(RANGE.percentage_to_speed(33), 1);
        assert_eq!(RANGE.percentage_to_speed(34), 2);
        assert_eq!(RANGE.percentage_to_speed(67), 3);
        assert_eq!(RANGE.percentage_to_speed(100), 3);
    }

    #[test]
    fn test_speed_percentage_agree() {
        for speed in 1..=3 {
            let pct = RANGE.value_to_percentage(speed);
            assert_eq!(RANGE.percentage_to_speed(pct), speed);
        }
    }
}
