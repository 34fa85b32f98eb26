//! # Printer Module
//!
//! ## Modules
//!
//! - [`config`]: Connection settings and device tuning
//! - [`encoder`]: The buffered command surface
//! - [`session`]: The printer session (encoder + lazy transport + flusher)

pub mod config;
pub mod encoder;
pub mod session;

pub use config::{ConnectionConfig, DeviceTuning, PrinterSettings};
pub use encoder::Encoder;
pub use session::Printer;
