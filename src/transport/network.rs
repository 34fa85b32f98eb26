//! # Network Transport
//!
//! Raw TCP printing (JetDirect / port 9100 style). Bytes written to the
//! socket are printed as-is; nothing is read back.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::error::{PrinterError, Result};

/// Connect timeout per resolved address
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Connect to `ip:port`, trying each resolved address in turn.
///
/// ## Errors
///
/// [`PrinterError::Connection`] if the address does not resolve or no
/// address accepts within [`CONNECT_TIMEOUT`]. The error of the last
/// attempt is reported.
pub fn connect(ip: &str, port: u16) -> Result<TcpStream> {
    let target = format!("tcp {}:{}", ip, port);

    let addrs = (ip, port)
        .to_socket_addrs()
        .map_err(|e| PrinterError::connection(target.clone(), e))?;

    let mut last_error = None;
    for addr in addrs {
        debug!(%addr, "connecting");
        match TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT) {
            Ok(stream) => {
                // Small command writes must not wait for Nagle coalescing.
                stream
                    .set_nodelay(true)
                    .map_err(|e| PrinterError::connection(target.clone(), e))?;
                return Ok(stream);
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(PrinterError::connection(
        target,
        last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "address resolved to nothing")
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_connect_loopback() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(connect("127.0.0.1", port).is_ok());
    }

    #[test]
    fn test_refused_is_recoverable_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = connect("127.0.0.1", port).unwrap_err();
        match err {
            PrinterError::Connection { target, .. } => {
                assert_eq!(target, format!("tcp 127.0.0.1:{}", port));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unresolvable_host() {
        assert!(connect("not a host name", 9100).is_err());
    }
}
