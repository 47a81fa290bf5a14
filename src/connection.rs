// ABOUTME: Provides the line-oriented serial transport used to talk AT commands to a GSM modem
// ABOUTME: Buffers raw bytes from the port and hands back CR/LF terminated lines bounded by a read timeout

use crate::client::types::ModemConfig;
use bytes::{Bytes, BytesMut};
use serialport::SerialPort;
use std::io;
use std::time::Duration;
use tracing::debug;

/// Size of a single read from the serial port.
const READ_CHUNK: usize = 256;

/// Byte channel a modem session runs over.
///
/// Every read is bounded by the transport's current timeout; there is no
/// cancellation other than letting that timeout expire. Implementations are
/// driven by exactly one session at a time.
///
/// ## Line Semantics
/// `read_lines` keeps reading whole lines until a read times out with nothing
/// new. Each returned line keeps its terminator. A trailing fragment without
/// `\n` (for example the `> ` prompt after `AT+CMGS`) is returned as the last
/// element.
pub trait LineTransport {
    /// Write raw bytes and flush them to the device.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read lines until the device goes quiet. Empty on timeout.
    fn read_lines(&mut self) -> io::Result<Vec<Bytes>>;

    /// Block up to the current timeout for at least one byte.
    ///
    /// Bytes that arrive are kept for the next `read_lines` call. Returns
    /// whether anything is pending.
    fn poll_data(&mut self) -> io::Result<bool>;

    /// Current read timeout.
    fn timeout(&self) -> Duration;

    /// Replace the read timeout.
    fn set_timeout(&mut self, timeout: Duration) -> io::Result<()>;

    /// Release the device. Closing an already closed transport is a no-op.
    fn close(&mut self) -> io::Result<()>;

    /// Whether the device is still held.
    fn is_open(&self) -> bool;
}

/// Serial port transport for GSM modems
///
/// Wraps a `serialport` handle with a read buffer so responses can be
/// consumed line by line. The port is opened with the settings from
/// [`ModemConfig`] (by default 9600 baud, 1 second timeout, RTS/CTS flow
/// control) and used exactly as configured until the transport is closed.
pub struct SerialTransport {
    // `None` once the transport has been closed.
    port: Option<Box<dyn SerialPort>>,

    // Bytes read from the port that have not been handed out as lines yet.
    buffer: BytesMut,

    timeout: Duration,
}

impl SerialTransport {
    /// Open the device named in `config`.
    pub fn open(config: &ModemConfig) -> Result<SerialTransport, serialport::Error> {
        debug!(
            device = %config.device,
            baud_rate = config.baud_rate,
            timeout = ?config.timeout,
            flow_control = ?config.flow_control,
            "opening serial port"
        );

        let port = serialport::new(config.device.as_str(), config.baud_rate)
            .timeout(config.timeout)
            .flow_control(config.flow_control)
            .open()?;

        Ok(SerialTransport::from_port(port))
    }

    /// Wrap a port that is already open, keeping its configured timeout.
    pub fn from_port(port: Box<dyn SerialPort>) -> SerialTransport {
        SerialTransport {
            timeout: port.timeout(),
            port: Some(port),
            buffer: BytesMut::with_capacity(4 * 1024),
        }
    }

    fn port(&mut self) -> io::Result<&mut dyn SerialPort> {
        match self.port.as_deref_mut() {
            Some(port) => Ok(port),
            None => Err(closed()),
        }
    }

    /// Read whatever the port has into the buffer. `0` means the read timed out.
    fn fill_buffer(&mut self) -> io::Result<usize> {
        let mut chunk = [0u8; READ_CHUNK];
        let read = match self.port()?.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => 0,
            Err(e) => return Err(e),
        };
        self.buffer.extend_from_slice(&chunk[..read]);
        Ok(read)
    }

    /// Split one complete line off the front of the buffer, if there is one.
    fn parse_line(&mut self) -> Option<Bytes> {
        let end = self.buffer.iter().position(|&b| b == b'\n')?;
        Some(self.buffer.split_to(end + 1).freeze())
    }

    /// Read one line. A fragment is returned if the port goes quiet mid-line.
    fn read_line(&mut self) -> io::Result<Option<Bytes>> {
        loop {
            if let Some(line) = self.parse_line() {
                return Ok(Some(line));
            }

            if self.fill_buffer()? == 0 {
                return Ok((!self.buffer.is_empty()).then(|| self.buffer.split().freeze()));
            }
        }
    }
}

impl LineTransport for SerialTransport {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let port = self.port()?;
        port.write_all(bytes)?;
        port.flush()
    }

    fn read_lines(&mut self) -> io::Result<Vec<Bytes>> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            let complete = line.ends_with(b"\n");
            lines.push(line);
            if !complete {
                break;
            }
        }
        Ok(lines)
    }

    fn poll_data(&mut self) -> io::Result<bool> {
        if !self.buffer.is_empty() {
            return Ok(true);
        }
        Ok(self.fill_buffer()? > 0)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn set_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.port()?.set_timeout(timeout)?;
        self.timeout = timeout;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(port) = self.port.take() {
            debug!(device = ?port.name(), "closing serial port");
            self.buffer.clear();
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("port", &self.port.as_ref().and_then(|p| p.name()))
            .field("buffered", &self.buffer.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "serial port is closed")
}
