use crate::domain::{Points, ScoreEntry};

pub const BIRDIE_MULTIPLIER: Points = 2;
pub const EAGLE_MULTIPLIER: Points = 3;
pub const MULLIGAN_PENALTY: Points = 3;

/// Points a single round contributes to the seasonal total
pub fn entry_points(entry: &ScoreEntry) -> Points {
    round_points(entry.points, entry.birdies, entry.eagles, entry.mulligans)
}

// formula: points + 2 × birdies + 3 × eagles − 3 × mulligans, no floor at zero
pub fn round_points(points: u32, birdies: u32, eagles: u32, mulligans: u32) -> Points {
    Points::from(points) + BIRDIE_MULTIPLIER * Points::from(birdies)
        + EAGLE_MULTIPLIER * Points::from(eagles)
        - MULLIGAN_PENALTY * Points::from(mulligans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_points_weights_each_term() {
        assert_eq!(round_points(10, 0, 0, 0), 10);
        assert_eq!(round_points(0, 1, 0, 0), 2);
        assert_eq!(round_points(0, 0, 1, 0), 3);
        assert_eq!(round_points(0, 0, 0, 1), -3);
        assert_eq!(round_points(30, 2, 1, 1), 30 + 4 + 3 - 3);
    }

    #[test]
    fn test_round_points_can_go_negative() {
        assert_eq!(round_points(1, 0, 0, 5), -14);
    }

    #[test]
    fn test_round_points_does_not_overflow_on_large_counts() {
        let max = u32::MAX;
        let expected = Points::from(max) * (1 + 2 + 3 - 3);
        assert_eq!(round_points(max, max, max, max), expected);
    }
}
