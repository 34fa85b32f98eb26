//! # Printer Transport Layer
//!
//! A [`Transport`] owns exactly one open channel to the printer and performs
//! blocking writes on it.
//!
//! ## Available Transports
//!
//! | Connection | Module | Opened with |
//! |------------|--------|-------------|
//! | Serial | [`serial`] | `serialport`, 8N1, no flow control |
//! | USB device file | [`usb`] | append-only file, raw TTY mode when applicable |
//! | Network | [`network`] | TCP with a 1 second connect timeout |
//!
//! ## Initialisation
//!
//! Opening a transport immediately sends:
//!
//! ```text
//! ESC @                 reset
//! ESC 7 n1 n2 n3        heating dots, heat time, heat interval
//! GS ( N                density configuration prefix (no payload)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use termica::printer::{ConnectionConfig, DeviceTuning};
//! use termica::transport::Transport;
//!
//! let config = ConnectionConfig::UsbFile { path: "/dev/usb/lp0".into() };
//! let mut transport = Transport::open(&config, &DeviceTuning::default())?;
//! transport.send(b"Hello\n")?;
//! # Ok::<(), termica::PrinterError>(())
//! ```

pub mod network;
pub mod serial;
pub mod usb;

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, info};

use crate::error::{PrinterError, Result};
use crate::printer::{ConnectionConfig, DeviceTuning};
use crate::protocol::commands;

/// # Printer Transport
///
/// Wraps the open channel as a boxed writer so every connection kind is
/// driven the same way.
pub struct Transport {
    target: String,
    sink: Box<dyn Write + Send>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Open the channel described by `config` and send the init sequence.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::Connection`] if the device cannot be opened, the
    /// socket cannot connect within the timeout, or the init sequence cannot
    /// be written.
    pub fn open(config: &ConnectionConfig, tuning: &DeviceTuning) -> Result<Self> {
        let sink: Box<dyn Write + Send> = match config {
            ConnectionConfig::Serial { path, baudrate } => {
                Box::new(serial::open(path, *baudrate)?)
            }
            ConnectionConfig::UsbFile { path } => Box::new(usb::open(path)?),
            ConnectionConfig::Network { ip, port } => Box::new(network::connect(ip, *port)?),
        };

        let mut transport = Self::from_writer(config.to_string(), sink);
        transport.start(tuning)?;
        info!(device = %transport.target, "transport opened");
        Ok(transport)
    }

    /// Wrap an arbitrary writer. No init sequence is sent.
    pub fn from_writer(target: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            target: target.into(),
            sink: Box::new(writer),
        }
    }

    /// Send the reset / print-settings / density-prefix sequence. A channel
    /// that rejects it never came up.
    fn start(&mut self, tuning: &DeviceTuning) -> Result<()> {
        self.write_segment(&init_sequence(tuning))
            .map_err(|source| PrinterError::connection(self.target.clone(), source))
    }

    /// Human-readable description of the channel.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Blocking write of `bytes` to the open channel.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::Transmission`] if the write or the flush fails.
    pub fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_segment(bytes)
            .map_err(|source| PrinterError::Transmission {
                sent: 0,
                retained: bytes.len(),
                source,
            })
    }

    pub(crate) fn write_segment(&mut self, bytes: &[u8]) -> io::Result<()> {
        debug!(device = %self.target, len = bytes.len(), "write");
        self.sink.write_all(bytes)?;
        self.sink.flush()
    }
}

/// The bytes sent once when a transport is opened.
///
/// ```
/// use termica::printer::DeviceTuning;
/// use termica::transport::init_sequence;
///
/// assert_eq!(
///     init_sequence(&DeviceTuning::default()),
///     vec![0x1B, 0x40, 0x1B, 0x37, 7, 120, 50, 0x1D, 0x28, 0x4E]
/// );
/// ```
pub fn init_sequence(tuning: &DeviceTuning) -> Vec<u8> {
    let mut data = commands::init();
    data.extend(commands::print_settings(
        tuning.heating_dots,
        tuning.heat_time,
        tuning.heat_interval,
    ));
    data.extend(commands::density_prefix());
    data
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_init_sequence_uses_tuning() {
        let tuning = DeviceTuning {
            heat_time: 80,
            heat_interval: 2,
            heating_dots: 11,
            ..Default::default()
        };
        assert_eq!(
            init_sequence(&tuning),
            vec![0x1B, 0x40, 0x1B, 0x37, 11, 80, 2, 0x1D, 0x28, 0x4E]
        );
    }

    #[test]
    fn test_start_writes_init_sequence() {
        let shared = Shared::default();
        let mut transport = Transport::from_writer("memory", shared.clone());
        transport.start(&DeviceTuning::default()).unwrap();
        assert_eq!(
            *shared.0.lock().unwrap(),
            init_sequence(&DeviceTuning::default())
        );
    }

    #[test]
    fn test_send_failure_is_transmission_error() {
        let mut transport = Transport::from_writer("broken", Broken);
        let err = transport.send(b"abc").unwrap_err();
        assert!(matches!(
            err,
            PrinterError::Transmission {
                sent: 0,
                retained: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_start_failure_is_connection_error() {
        let mut transport = Transport::from_writer("broken", Broken);
        let err = transport.start(&DeviceTuning::default()).unwrap_err();
        assert!(matches!(
            err,
            PrinterError::Connection { ref target, .. } if target == "broken"
        ));
    }

    #[test]
    fn test_debug_shows_target() {
        let transport = Transport::from_writer("memory", Shared::default());
        assert!(format!("{:?}", transport).contains("memory"));
    }
}
