//! # Serial Transport
//!
//! Opens a serial device at the configured baudrate with 8 data bits, no
//! parity, one stop bit and no flow control.
//!
//! `serialport` requires a timeout for blocking I/O. A long write timeout
//! is used so a stalled printer surfaces as a transmission error instead of
//! hanging forever.

use std::path::Path;
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::warn;

use crate::error::{PrinterError, Result};

/// Write timeout for blocking serial writes
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Open `path` at `baudrate`.
///
/// ## Errors
///
/// [`PrinterError::Connection`] if the port does not exist, is busy, or the
/// baudrate is rejected by the driver.
pub fn open(path: &Path, baudrate: u32) -> Result<Box<dyn SerialPort>> {
    let name = path.to_string_lossy();

    serialport::new(name.as_ref(), baudrate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(WRITE_TIMEOUT)
        .open()
        .map_err(|e| {
            warn!("Failed to open serial port {}: {}", name, e);
            PrinterError::connection(format!("serial {}", name), e.into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_port_is_connection_error() {
        let err = open(Path::new("/dev/termica-no-such-port"), 38400).unwrap_err();
        match err {
            PrinterError::Connection { target, .. } => {
                assert!(target.contains("termica-no-such-port"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
