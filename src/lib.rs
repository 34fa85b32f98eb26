//! # Termica - ESC/POS Thermal Printer Library
//!
//! Termica drives receipt and label printers that speak an ESC/POS-style
//! escape-code protocol. It provides:
//!
//! - **Protocol implementation**: byte-exact ESC/POS command builders
//! - **Command encoder**: a buffered, chainable command surface with
//!   print-mode composition
//! - **Transports**: serial ports, USB device files and raw TCP sockets
//! - **Flushing**: chunked, paced transmission for slow receivers
//! - **Raster encoding**: RGBA to 1-bit conversion with thresholds and
//!   Bayer dithering
//!
//! ## Quick Start
//!
//! ```no_run
//! use termica::printer::{Printer, PrinterSettings};
//!
//! let settings = PrinterSettings {
//!     usb_device_path: Some("/dev/usb/lp0".into()),
//!     ..Default::default()
//! };
//! let mut printer = Printer::from_settings(&settings)?;
//!
//! printer
//!     .justify_code("C")
//!     .double_height_on()
//!     .print_text("RECEIPT\n", None)
//!     .double_height_off()
//!     .justify_code("L")
//!     .print_text("2x Coffee              7.00\n", None)
//!     .cutpaper();
//!
//! printer.flush()?;
//! # Ok::<(), termica::PrinterError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`printer`] | Settings, encoder and session |
//! | [`transport`] | Serial / USB file / TCP backends |
//! | [`flush`] | Chunked, paced buffer draining |
//! | [`buffer`] | The pending command buffer |
//! | [`render`] | Raster encoding and dithering |
//! | [`error`] | Error types |

pub mod buffer;
pub mod error;
pub mod flush;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use error::PrinterError;
pub use flush::{FlushPolicy, FlushReport, Flusher};
pub use printer::{ConnectionConfig, DeviceTuning, Encoder, Printer, PrinterSettings};
pub use transport::Transport;
