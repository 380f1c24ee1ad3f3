//! Application core — command handling with no I/O of its own.
//!
//! Parsed commands flow through the [`dispatcher`] into the
//! [`actuators`] store.  Pins and the transfer engine are reached only
//! through the **port traits** in [`ports`], so everything here runs on
//! the host under test.

pub mod actuators;
pub mod commands;
pub mod dispatcher;
pub mod ports;
pub mod service;
