//! # Printer Session
//!
//! A [`Printer`] ties together the connection settings, the command
//! [`Encoder`] and the [`Flusher`]. The transport is opened lazily on the
//! first flush and kept for the lifetime of the session.
//!
//! ```no_run
//! use termica::printer::{ConnectionConfig, DeviceTuning, Printer};
//!
//! let mut printer = Printer::new(
//!     ConnectionConfig::Network { ip: "192.168.1.80".into(), port: 9100 },
//!     DeviceTuning::default(),
//! );
//!
//! printer.justify_code("C").bold_on().print_text("Thanks!\n", None).bold_off();
//! printer.cutpaper();
//! printer.flush()?;
//! # Ok::<(), termica::PrinterError>(())
//! ```
//!
//! ## Concurrency
//!
//! Encoding and flushing are separate steps that both mutate the session.
//! Callers sharing a printer between threads must hold one lock across the
//! whole encode-then-flush sequence.

use std::ops::{Deref, DerefMut};

use tracing::info;

use super::config::{ConnectionConfig, DeviceTuning, PrinterSettings};
use super::encoder::Encoder;
use crate::error::{PrinterError, Result};
use crate::flush::{FlushReport, Flusher};
use crate::render::dither;
use crate::transport::Transport;

/// A printer session
#[derive(Debug)]
pub struct Printer {
    connection: Option<ConnectionConfig>,
    tuning: DeviceTuning,
    transport: Option<Transport>,
    encoder: Encoder,
    flusher: Flusher,
}

impl Printer {
    /// Create a session. No I/O happens until the first flush.
    pub fn new(connection: ConnectionConfig, tuning: DeviceTuning) -> Self {
        Self {
            connection: Some(connection),
            tuning,
            transport: None,
            encoder: Encoder::new(),
            flusher: Flusher::default(),
        }
    }

    /// Create a session from raw settings.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::Configuration`] when the settings select no
    /// connection or more than one.
    pub fn from_settings(settings: &PrinterSettings) -> Result<Self> {
        let (connection, tuning) = settings.resolve()?;
        Ok(Self::new(connection, tuning))
    }

    /// Create a session over an already open transport.
    ///
    /// The init sequence is not re-sent. Once [`Printer::close`] is called
    /// the session has nothing to reopen.
    pub fn with_transport(transport: Transport, tuning: DeviceTuning) -> Self {
        Self {
            connection: None,
            tuning,
            transport: Some(transport),
            encoder: Encoder::new(),
            flusher: Flusher::default(),
        }
    }

    /// Replace the flusher (chunk size, pacing, failure policy).
    pub fn flusher(mut self, flusher: Flusher) -> Self {
        self.flusher = flusher;
        self
    }

    pub fn connection(&self) -> Option<&ConnectionConfig> {
        self.connection.as_ref()
    }

    pub fn tuning(&self) -> &DeviceTuning {
        &self.tuning
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Open the transport now instead of on the first flush.
    pub fn connect(&mut self) -> Result<&mut Transport> {
        ensure_open(&mut self.transport, self.connection.as_ref(), &self.tuning)
    }

    /// Drop the transport. The next flush reopens and re-initialises it.
    pub fn close(&mut self) {
        if let Some(transport) = self.transport.take() {
            info!(device = transport.target(), "transport closed");
        }
    }

    /// Encode RGBA pixels with this session's thresholds and append a
    /// raster image command.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::Image`] when `rgba` does not hold `width * height`
    /// pixels.
    pub fn print_rgba(&mut self, width: usize, height: usize, rgba: &[u8]) -> Result<&mut Self> {
        let image = dither::encode(
            width,
            height,
            rgba,
            self.tuning.black_threshold,
            self.tuning.alpha_threshold,
        )?;
        self.encoder.print_raster(&image);
        Ok(self)
    }

    /// Send the buffered commands, opening the transport if needed.
    ///
    /// ## Errors
    ///
    /// - [`PrinterError::Connection`] if the transport cannot be opened; the
    ///   buffer is left untouched.
    /// - [`PrinterError::Transmission`] if a write fails; the buffer keeps
    ///   what the flusher's policy retains. The broken transport is dropped,
    ///   so the next flush reopens and re-initialises it.
    pub fn flush(&mut self) -> Result<FlushReport> {
        if self.encoder.buffer().is_empty() {
            return Ok(FlushReport::default());
        }

        let transport = ensure_open(&mut self.transport, self.connection.as_ref(), &self.tuning)?;
        let result = self.flusher.flush(self.encoder.buffer_mut(), transport);
        if result.is_err() {
            self.close();
        }
        result
    }
}

/// Return the open transport, opening it from `connection` if needed.
fn ensure_open<'a>(
    slot: &'a mut Option<Transport>,
    connection: Option<&ConnectionConfig>,
    tuning: &DeviceTuning,
) -> Result<&'a mut Transport> {
    let transport = match slot.take() {
        Some(transport) => transport,
        None => {
            let connection = connection.ok_or_else(|| {
                PrinterError::Configuration("Session has no connection to open".to_string())
            })?;
            Transport::open(connection, tuning)?
        }
    };
    Ok(slot.insert(transport))
}

impl Deref for Printer {
    type Target = Encoder;

    fn deref(&self) -> &Encoder {
        &self.encoder
    }
}

impl DerefMut for Printer {
    fn deref_mut(&mut self) -> &mut Encoder {
        &mut self.encoder
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
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

    #[test]
    fn test_new_is_lazy() {
        let printer = Printer::new(
            ConnectionConfig::UsbFile {
                path: "/dev/termica-does-not-exist".into(),
            },
            DeviceTuning::default(),
        );
        assert!(!printer.is_open());
    }

    #[test]
    fn test_empty_flush_does_not_connect() {
        let mut printer = Printer::new(
            ConnectionConfig::UsbFile {
                path: "/dev/termica-does-not-exist".into(),
            },
            DeviceTuning::default(),
        );
        assert_eq!(printer.flush().unwrap(), FlushReport::default());
        assert!(!printer.is_open());
    }

    #[test]
    fn test_connection_failure_keeps_buffer() {
        let mut printer = Printer::new(
            ConnectionConfig::UsbFile {
                path: "/dev/termica-does-not-exist".into(),
            },
            DeviceTuning::default(),
        );
        printer.print_text("hello", None);

        let err = printer.flush().unwrap_err();
        assert!(matches!(err, PrinterError::Connection { .. }));
        assert_eq!(printer.buffer().as_slice(), b"hello");
    }

    #[test]
    fn test_flush_through_injected_transport() {
        let shared = Shared::default();
        let transport = Transport::from_writer("memory", shared.clone());
        let mut printer = Printer::with_transport(transport, DeviceTuning::default());

        printer.print_text("ABCDEFGH", Some(3)).cutpaper();
        let report = printer.flush().unwrap();

        assert_eq!(report.segments, 1);
        assert_eq!(
            *shared.0.lock().unwrap(),
            b"ABC\nDEF\nGH\n\x1dV\x00\xff".to_vec()
        );
        assert!(printer.buffer().is_empty());
    }

    #[test]
    fn test_closed_injected_session_cannot_reopen() {
        let transport = Transport::from_writer("memory", Shared::default());
        let mut printer = Printer::with_transport(transport, DeviceTuning::default());
        printer.close();
        printer.linefeed();
        assert!(matches!(
            printer.flush().unwrap_err(),
            PrinterError::Configuration(_)
        ));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_flush_drops_transport() {
        let transport = Transport::from_writer("broken", Broken);
        let mut printer = Printer::with_transport(transport, DeviceTuning::default());
        printer.write(b"abc");

        let err = printer.flush().unwrap_err();
        assert!(matches!(
            err,
            PrinterError::Transmission {
                sent: 0,
                retained: 3,
                ..
            }
        ));
        assert!(!printer.is_open());
        assert_eq!(printer.buffer().as_slice(), b"abc");
    }

    #[test]
    fn test_retry_after_failed_flush_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lp0");
        std::fs::write(&path, b"").unwrap();

        let mut printer = Printer::new(
            ConnectionConfig::UsbFile { path: path.clone() },
            DeviceTuning::default(),
        );
        printer.transport = Some(Transport::from_writer("broken", Broken));
        printer.write(b"retry me");

        assert!(printer.flush().is_err());
        let report = printer.flush().unwrap();

        assert_eq!(report.bytes, 8);
        let mut expected = crate::transport::init_sequence(&DeviceTuning::default());
        expected.extend_from_slice(b"retry me");
        assert_eq!(std::fs::read(&path).unwrap(), expected);
        assert!(printer.buffer().is_empty());
    }

    #[test]
    fn test_print_rgba_uses_tuning_thresholds() {
        let tuning = DeviceTuning {
            black_threshold: 100,
            ..Default::default()
        };
        let transport = Transport::from_writer("memory", Shared::default());
        let mut printer = Printer::with_transport(transport, tuning);

        // Luminance 90 is solid black only because of the raised threshold.
        let rgba = [90, 90, 90, 255].repeat(8);
        printer.print_rgba(8, 1, &rgba).unwrap();

        assert_eq!(
            printer.buffer().as_slice(),
            &[0x1D, 0x76, 0x30, 0x00, 1, 0, 1, 0, 0xFF]
        );
    }

    #[test]
    fn test_print_rgba_size_mismatch() {
        let transport = Transport::from_writer("memory", Shared::default());
        let mut printer = Printer::with_transport(transport, DeviceTuning::default());
        assert!(matches!(
            printer.print_rgba(2, 2, &[0; 3]),
            Err(PrinterError::Image(_))
        ));
        assert!(printer.buffer().is_empty());
    }
}
