//! Web host for the polaroid card composer.
//!
//! Serves the message catalog and turns an uploaded photo plus a chosen
//! message into a downloadable PNG card.

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod server;

pub use bootstrap::init_foundation;
