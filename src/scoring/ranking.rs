use std::cmp::Ordering;

use crate::domain::Standing;

/// Order standings best first.
///
/// Higher total wins; ties fall back to player id, then player name, both
/// ascending, so the same standings always come out in the same order.
pub fn rank_standings(mut standings: Vec<Standing>) -> Vec<Standing> {
    standings.sort_by(compare_standings);
    standings
}

fn compare_standings(a: &Standing, b: &Standing) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| a.player_id.cmp(&b.player_id))
        .then_with(|| a.player_name.cmp(&b.player_name))
}

/// 1-based display positions for an already ranked slice
pub fn positions(standings: &[Standing]) -> impl Iterator<Item = (usize, &Standing)> {
    standings.iter().enumerate().map(|(i, s)| (i + 1, s))
}
