pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod parsers;
pub mod routes;
