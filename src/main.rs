//! # Termica CLI
//!
//! Command-line interface for ESC/POS thermal printers.
//!
//! ## Usage
//!
//! ```bash
//! # Print a line of text over USB and cut
//! termica --usb /dev/usb/lp0 text "Hello, world" --cut
//!
//! # Centered, bold, wrapped at 32 columns over the network
//! termica --host 192.168.1.80 text "A long line..." --align C --bold --width 32
//!
//! # Print an image using a settings file
//! termica --config printer.json image logo.png --cut
//!
//! # Code128 barcode over serial
//! termica --serial /dev/ttyUSB0 --baudrate 19200 barcode "{BTERMICA" --system code128
//!
//! # Kick the cash drawer
//! termica --config printer.json drawer
//! ```
//!
//! Set `RUST_LOG=termica=debug` to see every transmitted segment.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use termica::{
    PrinterError,
    printer::{Printer, PrinterSettings},
    protocol::{barcode::BarcodeSystem, text::PrintMode},
};
use tracing_subscriber::EnvFilter;

/// Termica - ESC/POS thermal printer utility
#[derive(Parser, Debug)]
#[command(name = "termica")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the printer is. Flags override values from `--config`.
#[derive(Args, Debug)]
struct ConnectionArgs {
    /// JSON settings file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// USB printer device file (e.g. /dev/usb/lp0)
    #[arg(long, global = true, value_name = "PATH")]
    usb: Option<PathBuf>,

    /// Serial device (e.g. /dev/ttyUSB0)
    #[arg(long, global = true, value_name = "PATH")]
    serial: Option<PathBuf>,

    /// Serial baudrate
    #[arg(long, global = true)]
    baudrate: Option<u32>,

    /// Printer IP address or host name
    #[arg(long, global = true)]
    host: Option<String>,

    /// Printer TCP port
    #[arg(long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print text
    Text {
        /// Text to print
        message: String,

        /// Hard-wrap every N characters
        #[arg(long)]
        width: Option<usize>,

        /// Alignment: L, C or R
        #[arg(long, default_value = "L")]
        align: String,

        #[arg(long)]
        bold: bool,

        #[arg(long)]
        underline: bool,

        #[arg(long)]
        double_height: bool,

        #[arg(long)]
        double_width: bool,

        /// Cut the paper afterwards
        #[arg(long)]
        cut: bool,
    },

    /// Print an image file (PNG, JPEG, ...)
    Image {
        file: PathBuf,

        #[arg(long)]
        cut: bool,
    },

    /// Print a 1D barcode
    Barcode {
        data: String,

        /// Symbology (upca, upce, ean13, ean8, code39, itf, codabar, code93, code128)
        #[arg(long, default_value = "code128")]
        system: BarcodeSystem,

        /// Bar height in dots
        #[arg(long, default_value = "80")]
        height: u8,

        #[arg(long)]
        cut: bool,
    },

    /// Open the cash drawer
    Drawer,

    /// Feed and cut the paper
    Cut,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PrinterError> {
    let cli = Cli::parse();
    let mut printer = Printer::from_settings(&settings(&cli.connection)?)?;

    match cli.command {
        Commands::Text {
            message,
            width,
            align,
            bold,
            underline,
            double_height,
            double_width,
            cut,
        } => {
            let mode = printer.mode_mut();
            mode.set_emphasis(bold);
            mode.set_underline(underline);
            mode.set_double_height(double_height);
            mode.set_double_width(double_width);

            printer
                .justify_code(&align)
                .apply_mode()
                .print_text(&message, width)
                .linefeed();

            if bold || underline || double_height || double_width {
                *printer.mode_mut() = PrintMode::default();
                printer.apply_mode();
            }
            if cut {
                printer.cutpaper();
            }
        }
        Commands::Image { file, cut } => {
            let image = image::open(&file)
                .map_err(|e| {
                    PrinterError::Image(format!("Failed to load {}: {}", file.display(), e))
                })?
                .to_rgba8();
            let (width, height) = image.dimensions();
            printer.print_rgba(width as usize, height as usize, image.as_raw())?;
            if cut {
                printer.cutpaper();
            }
        }
        Commands::Barcode {
            data,
            system,
            height,
            cut,
        } => {
            printer
                .barcode_height(height)
                .print_barcode(system, data.as_bytes())
                .linefeed();
            if cut {
                printer.cutpaper();
            }
        }
        Commands::Drawer => {
            printer.open_cash_drawer();
        }
        Commands::Cut => {
            printer.cutpaper();
        }
    }

    let report = printer.flush()?;
    println!("Sent {} bytes in {} segments", report.bytes, report.segments);
    Ok(())
}

/// Merge the settings file (if any) with command-line overrides.
fn settings(args: &ConnectionArgs) -> Result<PrinterSettings, PrinterError> {
    let mut settings = match &args.config {
        Some(path) => PrinterSettings::from_json_file(path)?,
        None => PrinterSettings::default(),
    };

    // A connection flag replaces whatever target the file selected.
    if args.usb.is_some() || args.serial.is_some() || args.host.is_some() {
        settings.usb_device_path = args.usb.clone();
        settings.serial_device_path = args.serial.clone();
        settings.device_ip = args.host.clone();
    }
    if let Some(baudrate) = args.baudrate {
        settings.baudrate = baudrate;
    }
    if let Some(port) = args.port {
        settings.device_port = Some(port);
    }

    Ok(settings)
}
