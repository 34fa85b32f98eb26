//! # ESC/POS Protocol Implementation
//!
//! Low-level command builders. Every function returns the exact bytes of
//! one command; nothing here touches a transport.
//!
//! ## Module Structure
//!
//! - [`commands`]: Initialisation, paper handling, spacing, cutter, drawer
//! - [`text`]: Alignment, print mode byte, emphasis, size, text wrapping
//! - [`barcode`]: 1D barcodes
//! - [`graphics`]: Raster bit images
//!
//! ## Usage Example
//!
//! ```
//! use termica::protocol::{commands, text};
//! use termica::protocol::text::Alignment;
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::justify(Alignment::Center));
//! data.extend(text::emphasize(true));
//! data.extend(b"RECEIPT\n");
//! data.extend(text::emphasize(false));
//! data.extend(commands::cut_paper());
//! ```

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;
