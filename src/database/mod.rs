pub mod connection;
pub mod players;
pub mod scores;
pub mod setup;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
