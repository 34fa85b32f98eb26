//! # Chunked, Paced Flushing
//!
//! Drains a [`CommandBuffer`] to a [`Transport`] in fixed-size segments.
//!
//! ## Problem
//!
//! Thermal printers have small receive buffers. Writing a large command
//! stream in one go can overrun them, causing dropped bytes or garbled
//! output.
//!
//! ## Solution
//!
//! ```text
//! buffer: [──────300──────][──────300──────][─50─]
//!              send            send          send
//!                     sleep 1ms       sleep 1ms
//! ```
//!
//! Segments are sent in order with a blocking pause between consecutive
//! sends. No pause follows the last segment.
//!
//! ## Failure Handling
//!
//! The first failed segment write ends the flush; later segments are not
//! attempted. The [`FlushPolicy`] decides what remains in the buffer:
//!
//! | Policy | Buffer after failure |
//! |--------|----------------------|
//! | [`FlushPolicy::RetainUnsent`] | The failed segment and everything after it |
//! | [`FlushPolicy::Discard`] | Empty; the unsent remainder is lost |
//!
//! A segment that failed may have been partly written by the OS, so
//! retrying a retained buffer can duplicate a few bytes on the printer.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::buffer::CommandBuffer;
use crate::error::{PrinterError, Result};
use crate::transport::Transport;

/// Default segment size in bytes
pub const CHUNK_SIZE: usize = 300;

/// Default pause between segments
pub const PACING: Duration = Duration::from_millis(1);

/// What to do with untransmitted bytes when a flush fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Keep the unconfirmed bytes so the caller can retry
    #[default]
    RetainUnsent,
    /// Clear the buffer, dropping the failed segment and all later ones
    Discard,
}

/// Outcome of a successful flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    /// Number of segments written
    pub segments: usize,
    /// Number of bytes written
    pub bytes: usize,
}

/// Segments and paces buffer output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flusher {
    chunk_size: usize,
    pacing: Duration,
    policy: FlushPolicy,
}

impl Default for Flusher {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            pacing: PACING,
            policy: FlushPolicy::default(),
        }
    }
}

impl Flusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the segment size. Zero is treated as one.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Set the pause between consecutive segments.
    pub fn pacing(mut self, delay: Duration) -> Self {
        self.pacing = delay;
        self
    }

    pub fn policy(mut self, policy: FlushPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Write the whole buffer to `transport`.
    ///
    /// On success the buffer is empty. An empty buffer succeeds with zero
    /// segments.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::Transmission`] when a segment write fails; the buffer
    /// then holds whatever the [`FlushPolicy`] retains.
    pub fn flush(
        &self,
        buffer: &mut CommandBuffer,
        transport: &mut Transport,
    ) -> Result<FlushReport> {
        let total = buffer.len();
        let mut report = FlushReport::default();

        while report.bytes < total {
            if report.segments > 0 && !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }

            let end = (report.bytes + self.chunk_size).min(total);
            let result = transport.write_segment(&buffer.as_slice()[report.bytes..end]);

            if let Err(source) = result {
                let retained = match self.policy {
                    FlushPolicy::RetainUnsent => {
                        buffer.consume(report.bytes);
                        buffer.len()
                    }
                    FlushPolicy::Discard => {
                        buffer.clear();
                        0
                    }
                };
                warn!(
                    device = transport.target(),
                    sent = report.bytes,
                    retained,
                    error = %source,
                    "flush failed"
                );
                return Err(PrinterError::Transmission {
                    sent: report.bytes,
                    retained,
                    source,
                });
            }

            debug!(segment = report.segments, len = end - report.bytes, "segment sent");
            report.segments += 1;
            report.bytes = end;
        }

        buffer.clear();
        Ok(report)
    }
}

// ============================================================================
// TESTS
// ============================================================================
