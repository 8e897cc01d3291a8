pub mod roster;
pub mod scores;
pub mod server;

pub use roster::RosterService;
pub use scores::{Clock, ScoreService, SystemClock, ZeroEntryPolicy};
