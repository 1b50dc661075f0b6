//! # Printer Module
//!
//! This module provides printer-class configuration.
//!
//! ## Modules
//!
//! - [`config`]: Pin classes and printer profiles

pub mod config;

pub use config::{PinClass, PrinterProfile};
