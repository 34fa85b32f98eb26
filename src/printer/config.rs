//! # Printer Configuration
//!
//! Three layers:
//!
//! | Type | Role |
//! |------|------|
//! | [`PrinterSettings`] | Raw, optional fields as read from JSON or CLI flags |
//! | [`ConnectionConfig`] | Exactly one resolved connection target |
//! | [`DeviceTuning`] | Print-head timing and raster thresholds |
//!
//! ## Usage
//!
//! ```
//! use termica::printer::{ConnectionConfig, PrinterSettings};
//!
//! let settings = PrinterSettings {
//!     serial_device_path: Some("/dev/ttyS0".into()),
//!     ..Default::default()
//! };
//!
//! let (connection, tuning) = settings.resolve()?;
//! assert_eq!(
//!     connection,
//!     ConnectionConfig::Serial { path: "/dev/ttyS0".into(), baudrate: 38400 }
//! );
//! assert_eq!(tuning.heating_dots, 7);
//! # Ok::<(), termica::PrinterError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PrinterError, Result};

/// Default serial baudrate
pub const DEFAULT_BAUDRATE: u32 = 38400;

/// Default raw-printing TCP port
pub const DEFAULT_PORT: u16 = 9100;

// ============================================================================
// CONNECTION
// ============================================================================

/// The single physical channel a printer session talks over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectionConfig {
    /// Serial device (e.g. `/dev/ttyS0`, `/dev/ttyUSB0`)
    Serial { path: PathBuf, baudrate: u32 },
    /// USB printer character device opened append-only (e.g. `/dev/usb/lp0`)
    UsbFile { path: PathBuf },
    /// Raw TCP byte stream (JetDirect style)
    Network { ip: String, port: u16 },
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial { path, baudrate } => {
                write!(f, "serial {} @ {} baud", path.display(), baudrate)
            }
            Self::UsbFile { path } => write!(f, "usb {}", path.display()),
            Self::Network { ip, port } => write!(f, "tcp {}:{}", ip, port),
        }
    }
}

// ============================================================================
// DEVICE TUNING
// ============================================================================

/// Print-head timing and image thresholds.
///
/// The heat parameters are sent once when the transport opens. The
/// thresholds are only read by the raster encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTuning {
    /// Heating time, units of 10µs
    pub heat_time: u8,
    /// Heating interval, units of 10µs
    pub heat_interval: u8,
    /// Max heating dots, units of 8 dots
    pub heating_dots: u8,
    /// Luminance at or below which a pixel always prints
    pub black_threshold: u8,
    /// Alpha below which a pixel is treated as paper
    pub alpha_threshold: u8,
}

impl Default for DeviceTuning {
    fn default() -> Self {
        Self {
            heat_time: 120,
            heat_interval: 50,
            heating_dots: 7,
            black_threshold: 48,
            alpha_threshold: 127,
        }
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

/// Printer settings as they appear in a JSON settings file.
///
/// Exactly one of `usb_device_path`, `serial_device_path` or `device_ip`
/// selects the connection. [`PrinterSettings::resolve`] rejects settings
/// with none or several of them instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterSettings {
    pub usb_device_path: Option<PathBuf>,
    pub serial_device_path: Option<PathBuf>,
    pub device_ip: Option<String>,
    pub device_port: Option<u16>,
    pub baudrate: u32,
    pub black_threshold: u8,
    pub alpha_threshold: u8,
    #[serde(rename = "heatTime")]
    pub heat_time: u8,
    #[serde(rename = "heatInterval")]
    pub heat_interval: u8,
    #[serde(rename = "heatingDots")]
    pub heating_dots: u8,
}

impl Default for PrinterSettings {
    fn default() -> Self {
        let tuning = DeviceTuning::default();
        Self {
            usb_device_path: None,
            serial_device_path: None,
            device_ip: None,
            device_port: None,
            baudrate: DEFAULT_BAUDRATE,
            black_threshold: tuning.black_threshold,
            alpha_threshold: tuning.alpha_threshold,
            heat_time: tuning.heat_time,
            heat_interval: tuning.heat_interval,
            heating_dots: tuning.heating_dots,
        }
    }
}

impl PrinterSettings {
    /// Parse settings from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PrinterError::Configuration(format!("Invalid settings: {}", e)))
    }

    /// Read and parse a JSON settings file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// The device tuning carried by these settings.
    pub fn tuning(&self) -> DeviceTuning {
        DeviceTuning {
            heat_time: self.heat_time,
            heat_interval: self.heat_interval,
            heating_dots: self.heating_dots,
            black_threshold: self.black_threshold,
            alpha_threshold: self.alpha_threshold,
        }
    }

    /// Resolve the connection target.
    ///
    /// ## Errors
    ///
    /// [`PrinterError::Configuration`] when no selector is set, when more
    /// than one is set, or when the serial baudrate is zero.
    pub fn connection(&self) -> Result<ConnectionConfig> {
        let mut selected = Vec::new();
        if let Some(path) = &self.usb_device_path {
            selected.push(ConnectionConfig::UsbFile { path: path.clone() });
        }
        if let Some(path) = &self.serial_device_path {
            selected.push(ConnectionConfig::Serial {
                path: path.clone(),
                baudrate: self.baudrate,
            });
        }
        if let Some(ip) = &self.device_ip {
            selected.push(ConnectionConfig::Network {
                ip: ip.clone(),
                port: self.device_port.unwrap_or(DEFAULT_PORT),
            });
        }

        if selected.len() > 1 {
            let targets: Vec<String> = selected.iter().map(ToString::to_string).collect();
            return Err(PrinterError::Configuration(format!(
                "Ambiguous connection target, pick one of: {}",
                targets.join(", ")
            )));
        }

        match selected.pop() {
            None => Err(PrinterError::Configuration(
                "No connection target: set usb_device_path, serial_device_path or device_ip"
                    .to_string(),
            )),
            Some(ConnectionConfig::Serial { baudrate: 0, .. }) => Err(
                PrinterError::Configuration("Serial baudrate must be non-zero".to_string()),
            ),
            Some(connection) => Ok(connection),
        }
    }

    /// Resolve both the connection target and the device tuning.
    pub fn resolve(&self) -> Result<(ConnectionConfig, DeviceTuning)> {
        Ok((self.connection()?, self.tuning()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
