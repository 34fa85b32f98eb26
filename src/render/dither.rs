//! # Raster Encoding with Bayer 8x8 Ordered Dithering
//!
//! Converts RGBA pixels into the 1-bit packed rows that the raster command
//! expects.
//!
//! ## Pixel Classification
//!
//! Each pixel goes through three checks, in order:
//!
//! 1. **Transparent** – alpha below `alpha_threshold` is paper (white).
//! 2. **Solid black** – luminance at or below `black_threshold` always
//!    prints. This keeps text and line art crisp instead of dithered.
//! 3. **Gray** – everything else is dithered with the Bayer matrix on the
//!    darkness `1 - luminance / 255`.
//!
//! Luminance uses the ITU-R BT.601 weights:
//! `L = (299 R + 587 G + 114 B) / 1000`.
//!
//! ## The Bayer Matrix
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//! 2 │12 │44 │ 4 │36 │14 │46 │ 6 │38 │
//! 3 │60 │28 │52 │20 │62 │30 │54 │22 │
//! 4 │ 3 │35 │11 │43 │ 1 │33 │ 9 │41 │
//! 5 │51 │19 │59 │27 │49 │17 │57 │25 │
//! 6 │15 │47 │ 7 │39 │13 │45 │ 5 │37 │
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! (y mod 8)
//! ```
//!
//! Values are normalised to thresholds in (0, 1) with
//! `threshold = (value + 0.5) / 64.0`.
//!
//! ## Usage Example
//!
//! ```
//! use termica::render::dither;
//!
//! // 8x1 image: four black pixels, four white pixels
//! let mut rgba = Vec::new();
//! for _ in 0..4 { rgba.extend([0, 0, 0, 255]); }
//! for _ in 0..4 { rgba.extend([255, 255, 255, 255]); }
//!
//! let image = dither::encode(8, 1, &rgba, 48, 127)?;
//! assert_eq!(image.data, vec![0xF0]);
//! # Ok::<(), termica::PrinterError>(())
//! ```

use crate::error::{PrinterError, Result};
use crate::protocol::graphics;

/// Bayer 8x8 dithering matrix
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// A packed 1-bit image ready for the raster command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Row stride in bytes (`ceil(width / 8)`)
    pub width_bytes: u16,
    /// Height in dots
    pub height: u16,
    /// `width_bytes * height` bytes, MSB = leftmost dot
    pub data: Vec<u8>,
}

impl RasterImage {
    /// The complete `GS v 0` command for this image.
    pub fn to_command(&self) -> Vec<u8> {
        graphics::raster(self.width_bytes, self.height, &self.data)
    }
}

/// Get the dithering threshold for a pixel position.
///
/// Threshold value in range (0.0078125, 0.9921875) - never exactly 0 or 1.
#[inline]
pub fn threshold(x: usize, y: usize) -> f32 {
    let matrix_value = BAYER8[y & 7][x & 7];
    (matrix_value as f32 + 0.5) / 64.0
}

/// Determine if a dot should be printed for `intensity` (0.0 = white, 1.0 = black).
#[inline]
pub fn should_print(x: usize, y: usize, intensity: f32) -> bool {
    intensity > threshold(x, y)
}

/// Perceived luminance of an RGB triple, 0 (black) to 255 (white).
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Pack a row of boolean pixel values into bytes, MSB first, zero padded.
///
/// ```
/// use termica::render::dither::pack_row;
///
/// let row = vec![true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    bytes
}

/// Decide whether one RGBA pixel at `(x, y)` becomes a printed dot.
#[inline]
fn classify(x: usize, y: usize, px: &[u8], black_threshold: u8, alpha_threshold: u8) -> bool {
    let [r, g, b, a] = [px[0], px[1], px[2], px[3]];
    if a < alpha_threshold {
        return false;
    }
    let lum = luminance(r, g, b);
    if lum <= black_threshold {
        return true;
    }
    should_print(x, y, 1.0 - lum as f32 / 255.0)
}

/// Encode RGBA pixels into a packed 1-bit raster.
///
/// `pixels` must hold exactly `width * height * 4` bytes in row-major RGBA
/// order.
///
/// ## Errors
///
/// Returns [`PrinterError::Image`] if the buffer size does not match the
/// dimensions, or if the width in bytes or the height does not fit the
/// 16-bit raster header.
pub fn encode(
    width: usize,
    height: usize,
    pixels: &[u8],
    black_threshold: u8,
    alpha_threshold: u8,
) -> Result<RasterImage> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| PrinterError::Image(format!("Image too large: {}x{}", width, height)))?;
    if pixels.len() != expected {
        return Err(PrinterError::Image(format!(
            "Expected {} RGBA bytes for {}x{}, got {}",
            expected,
            width,
            height,
            pixels.len()
        )));
    }

    let width_bytes = width.div_ceil(8);
    let header_width = u16::try_from(width_bytes)
        .map_err(|_| PrinterError::Image(format!("Image too wide: {} dots", width)))?;
    let header_height = u16::try_from(height)
        .map_err(|_| PrinterError::Image(format!("Image too tall: {} rows", height)))?;

    let mut data = Vec::with_capacity(width_bytes * height);
    if width == 0 {
        return Ok(RasterImage {
            width_bytes: 0,
            height: header_height,
            data,
        });
    }

    let mut row = Vec::with_capacity(width);

    for (y, row_pixels) in pixels.chunks_exact(width * 4).enumerate() {
        row.clear();
        row.extend(
            row_pixels
                .chunks_exact(4)
                .enumerate()
                .map(|(x, px)| classify(x, y, px, black_threshold, alpha_threshold)),
        );
        data.extend(pack_row(&row));
    }

    Ok(RasterImage {
        width_bytes: header_width,
        height: header_height,
        data,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat(width * height)
    }

    #[test]
    fn test_bayer_matrix_values() {
        let mut seen = [false; 64];
        for row in &BAYER8 {
            for &val in row {
                assert!(val < 64, "Matrix value {} out of range", val);
                assert!(!seen[val as usize], "Duplicate value {}", val);
                seen[val as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s), "Not all values 0-63 present");
    }

    #[test]
    fn test_threshold_range() {
        for y in 0..8 {
            for x in 0..8 {
                let t = threshold(x, y);
                assert!(t > 0.0 && t < 1.0);
            }
        }
    }

    #[test]
    fn test_luminance() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(255, 0, 0), 76);
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[true, true, true, true]), vec![0xF0]);
        assert_eq!(pack_row(&[true; 9]), vec![0xFF, 0x80]);
        assert_eq!(pack_row(&[]), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_black_and_white() {
        let black = encode(16, 2, &solid(16, 2, [0, 0, 0, 255]), 48, 127).unwrap();
        assert_eq!(black.width_bytes, 2);
        assert_eq!(black.height, 2);
        assert!(black.data.iter().all(|&b| b == 0xFF));

        let white = encode(16, 2, &solid(16, 2, [255, 255, 255, 255]), 48, 127).unwrap();
        assert!(white.data.iter().all(|&b| b == 0x00));
    }

    #[test]
    fn test_transparent_pixels_are_white() {
        let image = encode(8, 1, &solid(8, 1, [0, 0, 0, 10]), 48, 127).unwrap();
        assert_eq!(image.data, vec![0x00]);
    }

    #[test]
    fn test_alpha_threshold_boundary() {
        let at = encode(8, 1, &solid(8, 1, [0, 0, 0, 127]), 48, 127).unwrap();
        assert_eq!(at.data, vec![0xFF]);
        let below = encode(8, 1, &solid(8, 1, [0, 0, 0, 126]), 48, 127).unwrap();
        assert_eq!(below.data, vec![0x00]);
    }

    #[test]
    fn test_black_threshold_forces_solid() {
        // Dark gray at luminance 40 is solid with threshold 48...
        let dark = solid(8, 8, [40, 40, 40, 255]);
        let forced = encode(8, 8, &dark, 48, 127).unwrap();
        assert!(forced.data.iter().all(|&b| b == 0xFF));

        // ...but dithered (not every dot) with threshold 0.
        let dithered = encode(8, 8, &dark, 0, 127).unwrap();
        assert!(dithered.data.iter().any(|&b| b != 0xFF));
    }

    #[test]
    fn test_mid_gray_is_dithered() {
        let gray = encode(8, 8, &solid(8, 8, [128, 128, 128, 255]), 48, 127).unwrap();
        let dots: u32 = gray.data.iter().map(|b| b.count_ones()).sum();
        assert!((24..=40).contains(&dots), "got {} dots", dots);
    }

    #[test]
    fn test_odd_width_is_padded() {
        let image = encode(10, 1, &solid(10, 1, [0, 0, 0, 255]), 48, 127).unwrap();
        assert_eq!(image.width_bytes, 2);
        assert_eq!(image.data, vec![0xFF, 0xC0]);
    }

    #[test]
    fn test_size_mismatch_is_error() {
        let err = encode(4, 4, &[0u8; 10], 48, 127).unwrap_err();
        assert!(matches!(err, PrinterError::Image(_)));
    }

    #[test]
    fn test_overflowing_dimensions_are_error() {
        let err = encode(usize::MAX / 2, 3, &[], 48, 127).unwrap_err();
        assert!(matches!(err, PrinterError::Image(_)));
    }

    #[test]
    fn test_to_command() {
        let image = encode(8, 1, &solid(8, 1, [0, 0, 0, 255]), 48, 127).unwrap();
        assert_eq!(
            image.to_command(),
            vec![0x1D, 0x76, 0x30, 0x00, 1, 0, 1, 0, 0xFF]
        );
    }
}
