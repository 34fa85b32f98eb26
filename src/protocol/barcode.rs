//! # ESC/POS Barcode Commands
//!
//! 1D barcodes are printed with `GS k` after the height has been set with
//! `GS h`.
//!
//! ```
//! use termica::protocol::barcode::{self, BarcodeSystem};
//!
//! let mut data = Vec::new();
//! data.extend(barcode::height(80));
//! data.extend(barcode::print(BarcodeSystem::Code128, b"{BTERMICA"));
//! assert_eq!(&data[..3], &[0x1D, 0x68, 80]);
//! ```

use std::str::FromStr;

use super::commands::GS;

/// 1D barcode symbologies (the `m` operand of `GS k`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeSystem {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    Itf,
    Codabar,
    Code93,
    Code128,
    /// Any other symbology code the printer understands
    Raw(u8),
}

impl BarcodeSystem {
    pub fn code(self) -> u8 {
        match self {
            BarcodeSystem::UpcA => 65,
            BarcodeSystem::UpcE => 66,
            BarcodeSystem::Ean13 => 67,
            BarcodeSystem::Ean8 => 68,
            BarcodeSystem::Code39 => 69,
            BarcodeSystem::Itf => 70,
            BarcodeSystem::Codabar => 71,
            BarcodeSystem::Code93 => 72,
            BarcodeSystem::Code128 => 73,
            BarcodeSystem::Raw(code) => code,
        }
    }
}

impl FromStr for BarcodeSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upca" | "upc-a" => Ok(BarcodeSystem::UpcA),
            "upce" | "upc-e" => Ok(BarcodeSystem::UpcE),
            "ean13" => Ok(BarcodeSystem::Ean13),
            "ean8" => Ok(BarcodeSystem::Ean8),
            "code39" => Ok(BarcodeSystem::Code39),
            "itf" => Ok(BarcodeSystem::Itf),
            "codabar" => Ok(BarcodeSystem::Codabar),
            "code93" => Ok(BarcodeSystem::Code93),
            "code128" => Ok(BarcodeSystem::Code128),
            other => other
                .parse::<u8>()
                .map(BarcodeSystem::Raw)
                .map_err(|_| format!("Unknown barcode system '{}'", s)),
        }
    }
}

/// # Set Barcode Height (GS h n)
///
/// Height in dots, 1-255.
#[inline]
pub fn height(h: u8) -> Vec<u8> {
    vec![GS, b'h', h]
}

/// # Print Barcode (GS k A m d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | Hex     | 1D 6B 41 m d1...dk |
///
/// The data is appended verbatim after the symbology byte; no length byte or
/// terminator is added.
pub fn print(system: BarcodeSystem, data: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(4 + data.len());
    cmd.extend_from_slice(&[GS, b'k', b'A', system.code()]);
    cmd.extend_from_slice(data);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height() {
        assert_eq!(height(100), vec![0x1D, 0x68, 100]);
    }

    #[test]
    fn test_print() {
        assert_eq!(
            print(BarcodeSystem::Code39, b"AB1"),
            vec![0x1D, 0x6B, 0x41, 69, b'A', b'B', b'1']
        );
    }

    #[test]
    fn test_raw_system() {
        assert_eq!(print(BarcodeSystem::Raw(4), b""), vec![0x1D, 0x6B, 0x41, 4]);
    }

    #[test]
    fn test_parse_system() {
        assert_eq!("code128".parse(), Ok(BarcodeSystem::Code128));
        assert_eq!("UPC-A".parse(), Ok(BarcodeSystem::UpcA));
        assert_eq!("7".parse(), Ok(BarcodeSystem::Raw(7)));
        assert!("qr".parse::<BarcodeSystem>().is_err());
    }
}
