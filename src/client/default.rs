// ABOUTME: Default modem session implementing AT command execution, mode control, listing, send and wait
// ABOUTME: Owns the line transport for its lifetime and releases it exactly once on close or drop

use crate::client::error::{ModemError, ModemResult};
use crate::client::traits::{AtCommander, ModemConnection, SmsReceiver, SmsTransmitter};
use crate::client::types::{Message, ModemConfig, SessionId, delete_index};
use crate::connection::{LineTransport, SerialTransport};
use crate::datatypes::{CRLF, CTRL_Z, MAX_TEXT_LEN, SmsMode};
use crate::listing::parse_listing;
use crate::response::Response;
use std::time::Duration;
use tracing::{debug, warn};

/// A session with one GSM modem
///
/// Created by opening the transport, checking the modem answers `AT`, and
/// selecting the initial SMS mode. Every operation blocks on the transport
/// and is bounded only by its read timeout.
///
/// The session takes `&mut self` everywhere; share it between threads only
/// behind a lock.
pub struct Modem<T: LineTransport = SerialTransport> {
    transport: T,
    /// Only ever assigned by `set_mode` (and the constructor)
    mode: SmsMode,
    session: SessionId,
}

impl Modem<SerialTransport> {
    /// Open the serial device in `config` and initialise the modem.
    pub fn open(config: &ModemConfig) -> ModemResult<Self> {
        let transport = SerialTransport::open(config)?;
        Self::with_transport(transport, config.mode)
    }
}

impl<T: LineTransport> Modem<T> {
    /// Initialise a modem reachable over `transport`.
    ///
    /// Runs `AT` then `AT+CMGF=<mode>`. If either fails the transport is
    /// closed before the error is returned.
    pub fn with_transport(transport: T, mode: SmsMode) -> ModemResult<Self> {
        let mut modem = Modem {
            transport,
            mode,
            session: SessionId::next(),
        };

        // liveness check; dropping `modem` on error releases the transport
        modem.execute("AT")?;
        modem.set_mode(mode)?;

        debug!(session = %modem.session, mode = %modem.mode, "modem ready");
        Ok(modem)
    }

    /// Select TEXT or PDU format with `AT+CMGF`.
    ///
    /// Any failure is reported as [`ModemError::ModeSetting`]. The stored mode
    /// only changes on success.
    pub fn set_mode(&mut self, mode: SmsMode) -> ModemResult<()> {
        self.execute(&format!("AT+CMGF={}", u8::from(mode)))
            .map_err(|source| ModemError::ModeSetting {
                mode,
                source: Box::new(source),
            })?;
        self.mode = mode;
        Ok(())
    }

    /// Current SMS mode.
    pub fn mode(&self) -> SmsMode {
        self.mode
    }

    /// Symbolic name of the current mode (`TEXT`, `PDU` or `UNKNOWN`).
    pub fn mode_name(&self) -> &'static str {
        SmsMode::name_of(self.mode.into())
    }

    /// Read timeout currently applied to the transport.
    pub fn timeout(&self) -> Duration {
        self.transport.timeout()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn ensure_open(&self) -> ModemResult<()> {
        if self.transport.is_open() {
            Ok(())
        } else {
            Err(ModemError::Closed)
        }
    }
}

impl<T: LineTransport> ModemConnection for Modem<T> {
    fn close(&mut self) -> ModemResult<()> {
        if !self.transport.is_open() {
            return Ok(());
        }
        debug!(session = %self.session, "closing modem session");
        self.transport.close()?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.transport.is_open()
    }
}

impl<T: LineTransport> AtCommander for Modem<T> {
    fn execute_with(&mut self, command: &str, append_terminator: bool) -> ModemResult<Response> {
        self.ensure_open()?;
        if !command.is_ascii() {
            return Err(ModemError::InvalidData(format!(
                "AT command is not ASCII: {command:?}"
            )));
        }

        debug!(command = %command.escape_debug(), "sending");
        self.transport.write_bytes(command.as_bytes())?;
        if append_terminator {
            self.transport.write_bytes(CRLF)?;
            debug!("sending crnl");
        }

        let response = Response::decode(self.transport.read_lines()?)?;
        debug!(%response, "received");

        if response.is_error() {
            return Err(ModemError::CommandFailed {
                command: command.to_string(),
                response,
            });
        }
        Ok(response)
    }

    fn session_id(&self) -> SessionId {
        self.session
    }
}

impl<T: LineTransport> SmsTransmitter for Modem<T> {
    fn send(&mut self, number: &str, text: &str) -> ModemResult<()> {
        if number.is_empty() || number.contains('"') {
            return Err(ModemError::InvalidData(format!(
                "Invalid destination number {number:?}"
            )));
        }
        if !text.is_ascii() {
            return Err(ModemError::InvalidData(
                "Message text must be ASCII".to_string(),
            ));
        }
        if text.len() > MAX_TEXT_LEN {
            return Err(ModemError::InvalidData(format!(
                "Message too long ({} > {MAX_TEXT_LEN} characters)",
                text.len()
            )));
        }
        if text.bytes().any(|b| b == CTRL_Z) {
            return Err(ModemError::InvalidData(
                "Message text must not contain Ctrl-Z".to_string(),
            ));
        }

        self.execute(&format!("AT+CMGS=\"{number}\""))?;

        let mut payload = String::with_capacity(text.len() + 1);
        payload.push_str(text);
        payload.push(char::from(CTRL_Z));
        self.execute_with(&payload, false)?;
        Ok(())
    }
}

impl<T: LineTransport> SmsReceiver for Modem<T> {
    fn messages(&mut self) -> ModemResult<Vec<Message>> {
        let command = format!("AT+CMGL={}", self.mode.list_all_filter());
        let response = self.execute(&command)?;
        parse_listing(response.body(), self.session)
    }

    fn wait(&mut self, timeout: Duration) -> ModemResult<()> {
        self.ensure_open()?;

        let previous = self.transport.timeout();
        self.transport.set_timeout(timeout)?;
        let polled = self.transport.poll_data();
        // restore before surfacing a failed read
        self.transport.set_timeout(previous)?;
        let pending = polled?;
        debug!(pending, ?timeout, "wait read");

        let drained = Response::decode(self.transport.read_lines()?)?;
        debug!(response = %drained, "after wait read");
        Ok(())
    }

    fn delete_message(&mut self, index: u32) -> ModemResult<()> {
        delete_index(self, index)
    }
}

impl<T: LineTransport> Drop for Modem<T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(session = %self.session, error = %e, "failed to close modem transport");
        }
    }
}

impl<T: LineTransport + std::fmt::Debug> std::fmt::Debug for Modem<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modem")
            .field("session", &self.session)
            .field("mode", &self.mode)
            .field("transport", &self.transport)
            .finish()
    }
}
