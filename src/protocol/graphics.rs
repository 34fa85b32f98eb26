//! # ESC/POS Raster Graphics Commands
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, LF, u16_le};

/// # Bitmap Header Stub (LF GS v 0 0 2 2)
///
/// Emits only the fixed header that precedes a bitmap; no pixel payload
/// follows. Use [`raster`] for a complete image command.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 0A 1D 76 30 30 32 32 |
#[inline]
pub fn bitmap_header() -> Vec<u8> {
    vec![LF, GS, b'v', b'0', b'0', b'2', b'2']
}

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Scaling mode (0 = normal)
/// - `xL, xH`: Width in **bytes**, little-endian
/// - `yL, yH`: Height in dots, little-endian
/// - `d1...dk`: Image data, k = width_bytes × height bytes, row by row
///
/// ```
/// use termica::protocol::graphics;
///
/// let data = vec![0xAA; 48 * 100];
/// let cmd = graphics::raster(48, 100, &data);
///
/// assert_eq!(&cmd[0..8], &[0x1D, 0x76, 0x30, 0, 48, 0, 100, 0]);
/// assert_eq!(cmd.len(), 8 + 48 * 100);
/// ```
pub fn raster(width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    debug_assert!(
        data.len() == width_bytes as usize * height as usize,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        width_bytes as usize * height as usize,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(8 + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(0); // m = 0 (normal scale)
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}
