//! # ESC/POS Text Styling Commands
//!
//! ## Text Styling Overview
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Print mode | ESC ! n | Font, emphasis, double size, underline in one byte |
//! | Double strike | ESC G n | Each dot struck twice |
//! | Emphasis | ESC E n | **Emphasized** text |
//! | Character size | GS ! n | 1x-8x width/height |
//! | Inverse | GS B n | White on black |
//!
//! ## The Print Mode Byte
//!
//! `ESC ! n` sets several styles at once. Each flag owns one bit:
//!
//! ```text
//! bit  7          5        4        3       0
//!    ┌──────────┬────────┬────────┬───────┬──────┐
//!    │underline │ dbl-W  │ dbl-H  │ bold  │ font │
//!    └──────────┴────────┴────────┴───────┴──────┘
//!       128        32       16       8       1
//! ```
//!
//! Because the byte replaces *all* of these styles at once, the flags are
//! tracked in a [`PrintMode`] value and the full byte is re-sent whenever one
//! of them changes.

use super::commands::{ESC, GS};

// ============================================================================
// TEXT ALIGNMENT
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl Alignment {
    /// Parse the single-letter alignment codes `"L"`, `"C"` and `"R"`.
    ///
    /// Anything else falls back to [`Alignment::Left`].
    ///
    /// ```
    /// use termica::protocol::text::Alignment;
    ///
    /// assert_eq!(Alignment::from_code("C"), Alignment::Center);
    /// assert_eq!(Alignment::from_code("X"), Alignment::Left);
    /// ```
    pub fn from_code(code: &str) -> Self {
        match code {
            "C" => Alignment::Center,
            "R" => Alignment::Right,
            _ => Alignment::Left,
        }
    }
}

/// # Select Justification (ESC a n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC a n |
/// | Hex     | 1B 61 n |
///
/// Takes effect at the start of the next line.
pub fn justify(alignment: Alignment) -> Vec<u8> {
    vec![ESC, b'a', alignment as u8]
}

// ============================================================================
// PRINT MODE (ESC !)
// ============================================================================

/// Character fonts selectable through the print mode byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Font A: 12×24 dots
    #[default]
    A = 0,
    /// Font B: 9×17 dots
    B = 1,
}

/// # Print Mode State
///
/// Five independent style flags that share the `ESC !` mode byte.
///
/// Setters only change this value. Nothing reaches the printer until the
/// bytes from [`PrintMode::apply`] are appended to the output.
///
/// ```
/// use termica::protocol::text::{Font, PrintMode};
///
/// let mut mode = PrintMode::default();
/// mode.set_font(Font::B);
/// mode.set_emphasis(true);
/// mode.set_double_width(true);
/// mode.set_underline(true);
///
/// assert_eq!(mode.compose(), 170);
/// assert_eq!(mode.apply(), vec![0x1B, 0x21, 170]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintMode {
    font: Font,
    underline: bool,
    emphasized: bool,
    double_height: bool,
    double_width: bool,
}

impl PrintMode {
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn set_underline(&mut self, on: bool) {
        self.underline = on;
    }

    pub fn set_emphasis(&mut self, on: bool) {
        self.emphasized = on;
    }

    pub fn set_double_height(&mut self, on: bool) {
        self.double_height = on;
    }

    pub fn set_double_width(&mut self, on: bool) {
        self.double_width = on;
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn underline(&self) -> bool {
        self.underline
    }

    pub fn emphasized(&self) -> bool {
        self.emphasized
    }

    pub fn double_height(&self) -> bool {
        self.double_height
    }

    pub fn double_width(&self) -> bool {
        self.double_width
    }

    /// Compose the flags into the mode byte.
    ///
    /// `font + emphasized*8 + double_height*16 + double_width*32 + underline*128`
    pub fn compose(&self) -> u8 {
        self.font as u8
            + u8::from(self.emphasized) * 8
            + u8::from(self.double_height) * 16
            + u8::from(self.double_width) * 32
            + u8::from(self.underline) * 128
    }

    /// Bytes that make the printer observe the current flags.
    pub fn apply(&self) -> Vec<u8> {
        select_print_mode(self.compose())
    }
}

/// # Select Print Mode (ESC ! n)
#[inline]
pub fn select_print_mode(n: u8) -> Vec<u8> {
    vec![ESC, b'!', n]
}

// ============================================================================
// STANDALONE STYLES
// ============================================================================

/// # Double-Strike Mode (ESC G n)
#[inline]
pub fn doublestrike(on: bool) -> Vec<u8> {
    vec![ESC, b'G', u8::from(on)]
}

/// # Emphasized Mode (ESC E n)
///
/// Only the least significant bit of `n` is evaluated by the printer; the
/// "on" form sends 0xFF.
#[inline]
pub fn emphasize(on: bool) -> Vec<u8> {
    vec![ESC, b'E', if on { 0xFF } else { 0 }]
}

/// # Select Character Size (GS ! n)
///
/// High nibble is the width multiplier minus one, low nibble the height
/// multiplier minus one. `0x11` prints at double width and height.
#[inline]
pub fn font_size(n: u8) -> Vec<u8> {
    vec![GS, b'!', n]
}

/// # White/Black Reverse Printing (GS B n)
#[inline]
pub fn inverse(on: bool) -> Vec<u8> {
    vec![GS, b'B', u8::from(on)]
}

// ============================================================================
// TEXT LAYOUT
// ============================================================================

/// Hard-wrap `msg` into lines of at most `width` characters.
///
/// No word awareness: the text is cut every `width` characters and the
/// pieces are joined with `\n`. Existing newlines are kept as ordinary
/// characters.
///
/// ```
/// use termica::protocol::text::wrap_hard;
///
/// assert_eq!(wrap_hard("ABCDEFGH", 3), "ABC\nDEF\nGH");
/// ```
pub fn wrap_hard(msg: &str, width: usize) -> String {
    if width == 0 {
        return msg.to_string();
    }

    let chars: Vec<char> = msg.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// TESTS
// ============================================================================
