//! # USB Device File Transport
//!
//! USB printers show up as character devices (`/dev/usb/lp0`) that accept
//! raw bytes. The device is opened in append-only mode.
//!
//! ## TTY Configuration
//!
//! USB-serial adapters (`/dev/ttyUSB0`, `/dev/ttyACM0`) are TTYs and would
//! otherwise mangle binary data. When the opened file is a TTY it is put in
//! raw mode:
//!
//! - **No input processing**: Disable IGNBRK, BRKINT, PARMRK, ISTRIP, etc.
//! - **No output processing**: Disable OPOST (no CR/LF translation)
//! - **8-bit characters**: CS8 (8 data bits, no parity)
//! - **No echo**: Disable ECHO, ECHONL
//! - **Non-canonical mode**: Disable ICANON (no line buffering)

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use crate::error::{PrinterError, Result};

/// Open `path` append-only, configuring raw TTY mode when it is a terminal.
///
/// ## Errors
///
/// [`PrinterError::Connection`] if the device doesn't exist, permission is
/// denied (may need the `lp` or `dialout` group), or TTY configuration
/// fails.
pub fn open(path: &Path) -> Result<File> {
    let target = format!("usb {}", path.display());

    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| PrinterError::connection(target.clone(), e))?;

    configure_if_tty(&file).map_err(|e| PrinterError::connection(target, e))?;

    Ok(file)
}

#[cfg(unix)]
fn configure_if_tty(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    if unsafe { libc::isatty(fd) } == 1 {
        configure_tty_raw(fd)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn configure_if_tty(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Configure a file descriptor for raw TTY mode.
///
/// IXON/IXOFF/IXANY disable XON/XOFF software flow control: 0x11 and 0x13
/// occur in raster data and must pass through untouched.
#[cfg(unix)]
fn configure_tty_raw(fd: i32) -> io::Result<()> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(io::Error::last_os_error());
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}
