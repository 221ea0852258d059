//! HTTP delivery of dashboard events

pub mod rest;

pub use rest::router::create_router;
