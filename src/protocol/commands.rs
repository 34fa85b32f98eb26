//! # ESC/POS Protocol Commands
//!
//! Basic printer control: initialisation, paper handling, spacing, colour
//! selection and the cash drawer pulse.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `HT`
//! - Prefix + selector: `ESC @`, `ESC 2`
//! - Prefix + selector + parameters: `ESC 3 n`, `GS L nL nH`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics, barcodes, character size and cutter control.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// HT (Horizontal Tab) - Advance to next tab position
pub const HT: u8 = 0x09;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use termica::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// # Print Head Settings (ESC 7 n1 n2 n3)
///
/// Configures the thermal head: `n1` maximum heating dots (units of 8 dots),
/// `n2` heating time (units of 10µs), `n3` heating interval (units of 10µs).
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC 7 n1 n2 n3 |
/// | Hex     | 1B 37 n1 n2 n3 |
///
/// More heating dots print faster but draw more peak current; longer heat
/// time gives darker output.
#[inline]
pub fn print_settings(heating_dots: u8, heat_time: u8, heat_interval: u8) -> Vec<u8> {
    vec![ESC, b'7', heating_dots, heat_time, heat_interval]
}

/// # Density Configuration Prefix (GS ( N)
///
/// Only the opening bytes of the density command are emitted. Printers that
/// expect the `pL pH fn m` tail will wait for it and swallow the next bytes
/// of the stream as parameters.
#[inline]
pub fn density_prefix() -> Vec<u8> {
    vec![GS, b'(', b'N']
}

// ============================================================================
// PAPER AND LAYOUT
// ============================================================================

/// Line feed (LF)
#[inline]
pub fn linefeed() -> Vec<u8> {
    vec![LF]
}

/// Horizontal tab (HT)
#[inline]
pub fn horizontal_tab() -> Vec<u8> {
    vec![HT]
}

/// # Print and Feed n Lines (ESC d n)
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Set Left Margin (GS L nL nH)
///
/// The margin is `(nL + nH * 256)` horizontal motion units. A line feed is
/// emitted first because the command only takes effect at the start of a
/// line.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | LF GS L nL nH |
/// | Hex     | 0A 1D 4C nL nH |
#[inline]
pub fn left_margin(nl: u8, nh: u8) -> Vec<u8> {
    vec![LF, GS, b'L', nl, nh]
}

/// # Right-Side Character Spacing (ESC SP n)
#[inline]
pub fn character_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b' ', n]
}

/// # Set Line Spacing (ESC 3 n)
///
/// Sets the line feed amount to `n` motion units.
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

/// # Default Line Spacing (ESC 2)
#[inline]
pub fn line_spacing_default() -> Vec<u8> {
    vec![ESC, b'2']
}

// ============================================================================
// COLOUR, CUTTER, DRAWER
// ============================================================================

/// Print colour on two-colour capable printers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Primary colour (usually black)
    #[default]
    Primary = 0,
    /// Secondary colour (usually red)
    Secondary = 1,
}

/// # Select Print Colour (LF ESC r n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 0A 1B 72 n |
#[inline]
pub fn select_color(color: Color) -> Vec<u8> {
    vec![LF, ESC, b'r', color as u8]
}

/// # Feed and Cut Paper (LF GS V 0 255)
///
/// Prints the current line, then performs a full cut.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 0A 1D 56 00 FF |
///
/// ```
/// use termica::protocol::commands;
///
/// assert_eq!(commands::cut_paper(), vec![0x0A, 0x1D, 0x56, 0x00, 0xFF]);
/// ```
#[inline]
pub fn cut_paper() -> Vec<u8> {
    vec![LF, GS, b'V', 0, 0xFF]
}

/// # Generate Drawer Pulse (ESC p m t1 t2)
///
/// Kicks pin 2 of the drawer connector: on for 50 × 2ms, off for 250 × 2ms.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1B 70 00 32 FA |
#[inline]
pub fn open_cash_drawer() -> Vec<u8> {
    vec![ESC, b'p', 0, 50, 250]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use termica::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [value as u8, (value >> 8) as u8]
}

// ============================================================================
// TESTS
// ============================================================================
