pub mod aggregate;
pub mod formula;
pub mod ranking;

pub use aggregate::{aggregate_standings, season_standings};
pub use formula::{entry_points, round_points};
pub use ranking::{positions, rank_standings};
