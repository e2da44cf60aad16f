use std::fmt;
use std::time::Duration;

pub const MAX_SPEED_FACTOR: u8 = 10;
const SPEED_FACTOR_STEP_MS: u64 = 5;
const MIN_INTERVAL_MS: u64 = 30;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn base_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(150),
            Difficulty::Medium => Duration::from_millis(100),
            Difficulty::Hard => Duration::from_millis(70),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Extra speed on top of the difficulty, always within `0..=MAX_SPEED_FACTOR`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpeedFactor(u8);

impl SpeedFactor {
    pub fn clamped(value: i32) -> Self {
        SpeedFactor(value.clamp(0, MAX_SPEED_FACTOR as i32) as u8)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

/// Time that must pass between two simulation steps.
pub fn tick_interval(difficulty: Difficulty, speed_factor: SpeedFactor) -> Duration {
    let base = difficulty.base_interval().as_millis() as u64;
    let reduced = base.saturating_sub(SPEED_FACTOR_STEP_MS * speed_factor.get() as u64);
    Duration::from_millis(reduced.max(MIN_INTERVAL_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_base_intervals() {
        let zero = SpeedFactor::default();
        assert_eq!(tick_interval(Difficulty::Easy, zero), ms(150));
        assert_eq!(tick_interval(Difficulty::Medium, zero), ms(100));
        assert_eq!(tick_interval(Difficulty::Hard, zero), ms(70));
    }

    #[test]
    fn test_hard_at_full_speed_hits_floor() {
        assert_eq!(tick_interval(Difficulty::Hard, SpeedFactor::clamped(10)), ms(30));
    }

    #[test]
    fn test_speed_factor_reduces_interval() {
        assert_eq!(tick_interval(Difficulty::Easy, SpeedFactor::clamped(10)), ms(100));
        assert_eq!(tick_interval(Difficulty::Medium, SpeedFactor::clamped(4)), ms(80));
        assert_eq!(tick_interval(Difficulty::Hard, SpeedFactor::clamped(8)), ms(30));
    }

    #[test]
    fn test_monotonic_in_speed_factor() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let intervals: Vec<_> = (0..=10)
                .map(|n| tick_interval(difficulty, SpeedFactor::clamped(n)))
                .collect();
            assert!(intervals.windows(2).all(|w| w[1] <= w[0]), "{:?}", intervals);
            assert!(intervals.iter().all(|i| *i >= ms(30)));
        }
    }

    #[test]
    fn test_speed_factor_clamps() {
        assert_eq!(SpeedFactor::clamped(-3).get(), 0);
        assert_eq!(SpeedFactor::clamped(7).get(), 7);
        assert_eq!(SpeedFactor::clamped(42).get(), 10);
    }
}
