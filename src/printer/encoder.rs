//! # Command Encoder
//!
//! The high-level command surface. Every operation appends the exact bytes
//! of one ESC/POS command to a [`CommandBuffer`]; nothing is transmitted
//! until the buffer is flushed.
//!
//! Operations return `&mut Self` so calls can be chained:
//!
//! ```
//! use termica::printer::Encoder;
//!
//! let mut encoder = Encoder::new();
//! encoder.justify_code("C").bold_on().print_text("TOTAL", None).bold_off().cutpaper();
//!
//! assert_eq!(
//!     encoder.buffer().as_slice(),
//!     b"\x1ba\x01\x1b!\x08TOTAL\x1b!\x00\n\x1dV\x00\xff"
//! );
//! ```
//!
//! ## Styles Sharing the Mode Byte
//!
//! `bold_*`, `underline_*`, `font_*` and `double_*` update the
//! [`PrintMode`] and re-send the whole `ESC !` byte, so turning one style off
//! never clears another.

use crate::buffer::CommandBuffer;
use crate::protocol::barcode::{self, BarcodeSystem};
use crate::protocol::commands::{self, Color};
use crate::protocol::graphics;
use crate::protocol::text::{self, Alignment, Font, PrintMode};
use crate::render::RasterImage;

/// Buffered ESC/POS command encoder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoder {
    buffer: CommandBuffer,
    mode: PrintMode,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &CommandBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut CommandBuffer {
        &mut self.buffer
    }

    /// Mutable access to the print mode flags.
    ///
    /// Changes are invisible to the printer until [`Encoder::apply_mode`].
    pub fn mode_mut(&mut self) -> &mut PrintMode {
        &mut self.mode
    }

    #[inline]
    fn push(&mut self, bytes: &[u8]) -> &mut Self {
        self.buffer.append(bytes);
        self
    }

    /// Append raw bytes verbatim.
    pub fn write(&mut self, bytes: &[u8]) -> &mut Self {
        self.push(bytes)
    }

    // ========================================================================
    // LAYOUT
    // ========================================================================

    pub fn linefeed(&mut self) -> &mut Self {
        self.push(&commands::linefeed())
    }

    pub fn horizontal_tab(&mut self) -> &mut Self {
        self.push(&commands::horizontal_tab())
    }

    /// Print and feed `n` lines.
    pub fn feed(&mut self, n: u8) -> &mut Self {
        self.push(&commands::feed_lines(n))
    }

    pub fn left_margin(&mut self, nl: u8, nh: u8) -> &mut Self {
        self.push(&commands::left_margin(nl, nh))
    }

    /// Right-side character spacing. Values outside 0-255 are ignored.
    pub fn right_side_character_spacing(&mut self, n: i32) -> &mut Self {
        match u8::try_from(n) {
            Ok(n) => self.push(&commands::character_spacing(n)),
            Err(_) => self,
        }
    }

    /// Line spacing in motion units.
    ///
    /// `None` or a value outside 0-255 restores the default spacing.
    pub fn line_spacing(&mut self, n: Option<i32>) -> &mut Self {
        match n.and_then(|n| u8::try_from(n).ok()) {
            Some(n) => self.push(&commands::line_spacing(n)),
            None => self.push(&commands::line_spacing_default()),
        }
    }

    pub fn justify(&mut self, alignment: Alignment) -> &mut Self {
        self.push(&text::justify(alignment))
    }

    /// Justify by letter code: `"L"`, `"C"`, `"R"`; anything else is left.
    pub fn justify_code(&mut self, code: &str) -> &mut Self {
        self.justify(Alignment::from_code(code))
    }

    // ========================================================================
    // PRINT MODE STYLES
    // ========================================================================

    /// Send the current [`PrintMode`] byte.
    pub fn apply_mode(&mut self) -> &mut Self {
        let bytes = self.mode.apply();
        self.push(&bytes)
    }

    pub fn bold_on(&mut self) -> &mut Self {
        self.mode.set_emphasis(true);
        self.apply_mode()
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.mode.set_emphasis(false);
        self.apply_mode()
    }

    pub fn font_a(&mut self) -> &mut Self {
        self.mode.set_font(Font::A);
        self.apply_mode()
    }

    pub fn font_b(&mut self) -> &mut Self {
        self.mode.set_font(Font::B);
        self.apply_mode()
    }

    pub fn underline_on(&mut self) -> &mut Self {
        self.mode.set_underline(true);
        self.apply_mode()
    }

    pub fn underline_off(&mut self) -> &mut Self {
        self.mode.set_underline(false);
        self.apply_mode()
    }

    pub fn double_height_on(&mut self) -> &mut Self {
        self.mode.set_double_height(true);
        self.apply_mode()
    }

    pub fn double_height_off(&mut self) -> &mut Self {
        self.mode.set_double_height(false);
        self.apply_mode()
    }

    pub fn double_width_on(&mut self) -> &mut Self {
        self.mode.set_double_width(true);
        self.apply_mode()
    }

    pub fn double_width_off(&mut self) -> &mut Self {
        self.mode.set_double_width(false);
        self.apply_mode()
    }

    // ========================================================================
    // STANDALONE STYLES
    // ========================================================================

    pub fn doublestrike_on(&mut self) -> &mut Self {
        self.push(&text::doublestrike(true))
    }

    pub fn doublestrike_off(&mut self) -> &mut Self {
        self.push(&text::doublestrike(false))
    }

    pub fn emphasize_on(&mut self) -> &mut Self {
        self.push(&text::emphasize(true))
    }

    pub fn emphasize_off(&mut self) -> &mut Self {
        self.push(&text::emphasize(false))
    }

    /// Character size via `GS ! n`.
    pub fn font_size(&mut self, n: u8) -> &mut Self {
        self.push(&text::font_size(n))
    }

    /// Raw print mode byte via `ESC ! n`. Does not update [`PrintMode`].
    pub fn font_size_esc(&mut self, n: u8) -> &mut Self {
        self.push(&text::select_print_mode(n))
    }

    pub fn inverse_on(&mut self) -> &mut Self {
        self.push(&text::inverse(true))
    }

    pub fn inverse_off(&mut self) -> &mut Self {
        self.push(&text::inverse(false))
    }

    pub fn color_1(&mut self) -> &mut Self {
        self.push(&commands::select_color(Color::Primary))
    }

    pub fn color_2(&mut self) -> &mut Self {
        self.push(&commands::select_color(Color::Secondary))
    }

    // ========================================================================
    // BARCODES, IMAGES, TEXT
    // ========================================================================

    pub fn barcode_height(&mut self, h: u8) -> &mut Self {
        self.push(&barcode::height(h))
    }

    pub fn print_barcode(&mut self, system: BarcodeSystem, data: &[u8]) -> &mut Self {
        self.push(&barcode::print(system, data))
    }

    /// Bitmap header only; the pixel arguments are not encoded.
    ///
    /// Use [`Encoder::print_raster`] with an image from
    /// [`dither::encode`](crate::render::dither::encode) to print pixels.
    pub fn print_bitmap(&mut self, _pixels: &[u8], _width: usize, _height: usize) -> &mut Self {
        self.push(&graphics::bitmap_header())
    }

    /// Complete `GS v 0` raster image.
    pub fn print_raster(&mut self, image: &RasterImage) -> &mut Self {
        self.push(&image.to_command())
    }

    /// Append text, hard-wrapped every `width` characters when given.
    pub fn print_text(&mut self, msg: &str, width: Option<usize>) -> &mut Self {
        match width {
            Some(width) => {
                let wrapped = text::wrap_hard(msg, width);
                self.push(wrapped.as_bytes())
            }
            None => self.push(msg.as_bytes()),
        }
    }

    // ========================================================================
    // PAPER AND PERIPHERALS
    // ========================================================================

    pub fn cutpaper(&mut self) -> &mut Self {
        self.push(&commands::cut_paper())
    }

    pub fn open_cash_drawer(&mut self) -> &mut Self {
        self.push(&commands::open_cash_drawer())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(f: impl FnOnce(&mut Encoder) -> &mut Encoder) -> Vec<u8> {
        let mut encoder = Encoder::new();
        f(&mut encoder);
        encoder.buffer().as_slice().to_vec()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(bytes(|e| e.linefeed()), vec![0x0A]);
        assert_eq!(bytes(|e| e.horizontal_tab()), vec![0x09]);
        assert_eq!(bytes(|e| e.left_margin(1, 2)), vec![0x0A, 0x1D, 0x4C, 1, 2]);
        assert_eq!(bytes(|e| e.font_size(0x11)), vec![0x1D, 0x21, 0x11]);
        assert_eq!(bytes(|e| e.font_size_esc(0x30)), vec![0x1B, 0x21, 0x30]);
        assert_eq!(bytes(|e| e.barcode_height(80)), vec![0x1D, 0x68, 80]);
        assert_eq!(bytes(|e| e.feed(2)), vec![0x1B, 0x64, 2]);
    }

    #[test]
    fn test_character_spacing_range() {
        assert_eq!(bytes(|e| e.right_side_character_spacing(0)), vec![0x1B, 0x20, 0]);
        assert_eq!(bytes(|e| e.right_side_character_spacing(255)), vec![0x1B, 0x20, 255]);
        assert!(bytes(|e| e.right_side_character_spacing(256)).is_empty());
        assert!(bytes(|e| e.right_side_character_spacing(-1)).is_empty());
    }

    #[test]
    fn test_line_spacing() {
        assert_eq!(bytes(|e| e.line_spacing(Some(24))), vec![0x1B, 0x33, 24]);
        assert_eq!(bytes(|e| e.line_spacing(Some(0))), vec![0x1B, 0x33, 0]);
        assert_eq!(bytes(|e| e.line_spacing(None)), vec![0x1B, 0x32]);
        assert_eq!(bytes(|e| e.line_spacing(Some(300))), vec![0x1B, 0x32]);
    }

    #[test]
    fn test_justify() {
        assert_eq!(bytes(|e| e.justify_code("L")), vec![0x1B, 0x61, 0]);
        assert_eq!(bytes(|e| e.justify_code("C")), vec![0x1B, 0x61, 1]);
        assert_eq!(bytes(|e| e.justify_code("R")), vec![0x1B, 0x61, 2]);
        assert_eq!(bytes(|e| e.justify_code("X")), vec![0x1B, 0x61, 0]);
    }

    #[test]
    fn test_mode_styles_accumulate() {
        let out = bytes(|e| e.bold_on().underline_on().font_b().bold_off());
        assert_eq!(
            out,
            vec![
                0x1B, 0x21, 8, // bold
                0x1B, 0x21, 136, // bold + underline
                0x1B, 0x21, 137, // + font B
                0x1B, 0x21, 129, // bold off keeps the rest
            ]
        );
    }

    #[test]
    fn test_double_size_flags() {
        let out = bytes(|e| {
            e.double_height_on()
                .double_width_on()
                .double_height_off()
                .double_width_off()
        });
        assert_eq!(
            out,
            vec![0x1B, 0x21, 16, 0x1B, 0x21, 48, 0x1B, 0x21, 32, 0x1B, 0x21, 0]
        );
    }

    #[test]
    fn test_mode_setters_are_silent_until_applied() {
        let mut encoder = Encoder::new();
        encoder.mode_mut().set_double_width(true);
        assert!(encoder.buffer().is_empty());
        encoder.apply_mode();
        assert_eq!(encoder.buffer().as_slice(), &[0x1B, 0x21, 32]);
    }

    #[test]
    fn test_standalone_styles() {
        assert_eq!(bytes(|e| e.doublestrike_on()), vec![0x1B, 0x47, 1]);
        assert_eq!(bytes(|e| e.doublestrike_off()), vec![0x1B, 0x47, 0]);
        assert_eq!(bytes(|e| e.emphasize_on()), vec![0x1B, 0x45, 255]);
        assert_eq!(bytes(|e| e.emphasize_off()), vec![0x1B, 0x45, 0]);
        assert_eq!(bytes(|e| e.inverse_on()), vec![0x1D, 0x42, 1]);
        assert_eq!(bytes(|e| e.inverse_off()), vec![0x1D, 0x42, 0]);
    }

    #[test]
    fn test_colors() {
        assert_eq!(bytes(|e| e.color_1()), vec![0x0A, 0x1B, 0x72, 0]);
        assert_eq!(bytes(|e| e.color_2()), vec![0x0A, 0x1B, 0x72, 1]);
    }

    #[test]
    fn test_peripherals() {
        assert_eq!(bytes(|e| e.cutpaper()), vec![0x0A, 0x1D, 0x56, 0x00, 0xFF]);
        assert_eq!(bytes(|e| e.open_cash_drawer()), vec![0x1B, 0x70, 0, 50, 250]);
    }

    #[test]
    fn test_print_barcode() {
        assert_eq!(
            bytes(|e| e.print_barcode(BarcodeSystem::Ean8, b"1234567")),
            vec![0x1D, 0x6B, 0x41, 68, b'1', b'2', b'3', b'4', b'5', b'6', b'7']
        );
    }

    #[test]
    fn test_print_bitmap_is_header_only() {
        assert_eq!(
            bytes(|e| e.print_bitmap(&[0xFF; 64], 8, 8)),
            vec![0x0A, 0x1D, 0x76, 0x30, 0x30, 0x32, 0x32]
        );
    }

    #[test]
    fn test_print_text() {
        assert_eq!(bytes(|e| e.print_text("ABCDEFGH", Some(3))), b"ABC\nDEF\nGH".to_vec());
        assert_eq!(bytes(|e| e.print_text("ABCDEFGH", None)), b"ABCDEFGH".to_vec());
    }

    #[test]
    fn test_write_concatenates() {
        assert_eq!(bytes(|e| e.write(b"s1").write(b"s2")), b"s1s2".to_vec());
    }
}
