pub mod season;

pub use season::{parse_season, require_param};
