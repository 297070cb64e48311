//! Visualizer HTTP API

pub mod handler;
pub mod server;

pub use handler::SharedAtlas;
pub use server::{router, HttpServer};
