//! Command-line client that auto-plays one encounter.
//!
//! The binary is the composition root: it reads [`config::ClientConfig`]
//! from the environment, installs file logging, loads content through
//! `battle-content` and hands a session to the [`autoplay`] pilot.

pub mod autoplay;
pub mod config;
pub mod logging;

pub use autoplay::{choose_action, play};
pub use config::ClientConfig;
