//! HTTP API handlers for drawtut-tg

pub mod health;
pub mod tutorial;

pub use health::health_routes;
pub use tutorial::tutorial_routes;
