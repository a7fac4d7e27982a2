pub mod config;
pub mod errors;
pub mod extraction;
pub mod models;
pub mod routes;
pub mod state;
pub mod text_source;
