//! SPI LED endpoint library.
//!
//! A synchronous-serial slave that takes fixed 32-byte ASCII command
//! frames, drives four indicator channels and answers with a fixed-size
//! status frame.  Everything except the ESP-IDF adapter (behind the
//! `espidf` feature) is portable and runs under host tests.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod fsm;
pub mod pins;
pub mod wire;

pub use error::{Error, Result};
