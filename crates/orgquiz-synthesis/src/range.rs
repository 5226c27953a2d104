//! Step-count range validation.

use orgquiz_common::{QuizError, StepBounds};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` with `1 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRange {
    min: u32,
    max: u32,
}

/// What validation had to change about the user's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCorrection {
    pub requested_min: i64,
    pub requested_max: i64,
    pub message: String,
}

/// A usable range plus any correction applied on the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedRange {
    pub range: StepRange,
    pub correction: Option<RangeCorrection>,
}

impl StepRange {
    pub fn new(min: u32, max: u32) -> Option<Self> {
        (min >= 1 && min <= max).then_some(Self { min, max })
    }

    pub fn exact(steps: u32) -> Option<Self> {
        Self::new(steps, steps)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, steps: u32) -> bool {
        (self.min..=self.max).contains(&steps)
    }

    /// Uniform draw from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }

    /// Clamp both ends into `bounds`, then force `min` down to `max` if they
    /// crossed. Input that is already valid comes back unchanged.
    pub fn validate(min: i64, max: i64, bounds: StepBounds) -> ValidatedRange {
        let clamped_min = bounds.clamp(min);
        let clamped_max = bounds.clamp(max);

        let mut notes = Vec::new();
        if clamped_min as i64 != min || clamped_max as i64 != max {
            notes.push(format!(
                "steps must lie between {} and {}",
                bounds.floor, bounds.ceiling
            ));
        }

        let range = if clamped_min > clamped_max {
            notes.push("min steps cannot be greater than max".to_string());
            Self { min: clamped_max, max: clamped_max }
        } else {
            Self { min: clamped_min, max: clamped_max }
        };

        let correction = (!notes.is_empty()).then(|| RangeCorrection {
            requested_min: min,
            requested_max: max,
            message: notes.join("; "),
        });

        ValidatedRange { range, correction }
    }

    /// Validate raw text fields. Non-numeric input cannot be corrected and is
    /// reported as [`QuizError::InvalidRange`].
    pub fn parse(min: &str, max: &str, bounds: StepBounds) -> Result<ValidatedRange, QuizError> {
        let parse_field = |label: &str, text: &str| {
            text.trim()
                .parse::<i64>()
                .map_err(|_| QuizError::InvalidRange(format!("{label} steps '{text}' is not a number")))
        };
        let min = parse_field("min", min)?;
        let max = parse_field("max", max)?;
        Ok(Self::validate(min, max, bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_valid_range_is_unchanged() {
        let first = StepRange::validate(2, 5, StepBounds::default());
        assert_eq!(first.range, StepRange::new(2, 5).unwrap());
        assert!(first.correction.is_none());

        let again = StepRange::validate(first.range.min() as i64, first.range.max() as i64, StepBounds::default());
        assert_eq!(again, first);
    }

    #[test]
    fn test_crossed_range_forces_min_down() {
        let v = StepRange::validate(5, 2, StepBounds::default());
        assert_eq!((v.range.min(), v.range.max()), (2, 2));
        let correction = v.correction.unwrap();
        assert_eq!(correction.requested_min, 5);
        assert!(correction.message.contains("greater than max"));
    }

    #[test]
    fn test_out_of_domain_values_are_clamped() {
        let v = StepRange::validate(0, 40, StepBounds::default());
        assert_eq!((v.range.min(), v.range.max()), (1, 15));
        assert!(v.correction.unwrap().message.contains("between 1 and 15"));
    }

    #[test]
    fn test_non_numeric_input_is_invalid() {
        let err = StepRange::parse("two", "3", StepBounds::default()).unwrap_err();
        assert!(matches!(err, QuizError::InvalidRange(msg) if msg.contains("two")));
        let ok = StepRange::parse(" 2 ", "3", StepBounds::default()).unwrap();
        assert_eq!(ok.range, StepRange::new(2, 3).unwrap());
    }

    #[test]
    fn test_sample_stays_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = StepRange::new(2, 4).unwrap();
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn test_new_rejects_zero_and_crossed() {
        assert!(StepRange::new(0, 3).is_none());
        assert!(StepRange::new(4, 3).is_none());
        assert!(StepRange::exact(3).is_some());
    }
}
