// ABOUTME: Supporting types for modem sessions including configuration and received message records
// ABOUTME: Provides serial defaults for GSM modems and the non-owning session handle messages carry

use crate::client::error::{ModemError, ModemResult};
use crate::client::traits::AtCommander;
use crate::datatypes::SmsMode;
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub use serialport::FlowControl;

/// Baud rate GSM modems are driven at.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Read timeout that bounds every response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Identifies one modem session for the lifetime of the process
///
/// Message records keep this handle instead of a reference to the session,
/// so a record never keeps a session (or its serial port) alive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocate a fresh id, distinct from every id handed out before.
    pub fn next() -> SessionId {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        SessionId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session #{}", self.0)
    }
}

/// Serial and protocol settings for opening a modem session
///
/// # Example
///
/// ```rust
/// use sms_modem::client::{FlowControl, ModemConfig};
/// use sms_modem::datatypes::SmsMode;
/// use std::time::Duration;
///
/// // 9600 baud, 1s timeout, RTS/CTS, text mode
/// let config = ModemConfig::new("/dev/ttyUSB0");
///
/// let config = ModemConfig::new("/dev/ttyUSB0")
///     .with_baud_rate(115_200)
///     .with_timeout(Duration::from_millis(500))
///     .with_flow_control(FlowControl::None)
///     .with_mode(SmsMode::Pdu);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModemConfig {
    /// Serial device, e.g. `/dev/ttyUSB0` or `COM3`
    pub device: String,
    /// Line speed (default: 9600)
    pub baud_rate: u32,
    /// Read timeout bounding every response (default: 1 second)
    pub timeout: Duration,
    /// Flow control (default: hardware RTS/CTS)
    pub flow_control: FlowControl,
    /// SMS format selected right after the liveness check (default: TEXT)
    pub mode: SmsMode,
}

impl ModemConfig {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
            flow_control: FlowControl::Hardware,
            mode: SmsMode::Text,
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_flow_control(mut self, flow_control: FlowControl) -> Self {
        self.flow_control = flow_control;
        self
    }

    pub fn with_mode(mut self, mode: SmsMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A received SMS as reported by `AT+CMGL`
///
/// Records are snapshots: deleting one does not update others that were
/// listed alongside it, and the modem may reuse a deleted index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Storage index assigned by the modem
    pub index: u32,
    /// Status as reported, e.g. `REC UNREAD` (numeric in PDU mode)
    pub status: String,
    /// Originating address
    pub number: String,
    /// Phonebook name, when the modem has one
    pub name: Option<String>,
    /// Service centre timestamp with the zone suffix discarded
    pub timestamp: Option<NaiveDateTime>,
    /// Message body; blank lines are kept as `\n`
    pub text: String,
    session: SessionId,
}

impl Message {
    pub(crate) fn new(
        index: u32,
        session: SessionId,
        status: String,
        number: String,
        name: Option<String>,
        timestamp: Option<NaiveDateTime>,
        text: String,
    ) -> Self {
        Self {
            index,
            status,
            number,
            name,
            timestamp,
            text,
            session,
        }
    }

    /// Session this message was listed by.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Remove this message from modem storage.
    ///
    /// Must be called with the session that listed the message. Succeeds only
    /// if the modem answers `AT+CMGD` with `OK`.
    pub fn delete<C: AtCommander + ?Sized>(&self, modem: &mut C) -> ModemResult<()> {
        let session = modem.session_id();
        if session != self.session {
            return Err(ModemError::ForeignMessage {
                index: self.index,
                owner: self.session,
                session,
            });
        }
        delete_index(modem, self.index)
    }
}

/// Issue `AT+CMGD=<index>`, requiring an explicit `OK`.
pub(crate) fn delete_index<C: AtCommander + ?Sized>(modem: &mut C, index: u32) -> ModemResult<()> {
    let response = modem.execute(&format!("AT+CMGD={index}"))?;
    if response.is_ok() {
        Ok(())
    } else {
        Err(ModemError::DeleteFailed { index, response })
    }
}
