// ABOUTME: Modem session error types covering transport, protocol and data failures
// ABOUTME: Provides structured error reporting with automatic conversion from I/O, serial and timestamp errors

use crate::client::types::SessionId;
use crate::datatypes::{SmsMode, TimestampError};
use crate::response::Response;
use std::io;
use thiserror::Error;

/// Comprehensive error type for modem session operations
///
/// Nothing in the session retries; every failure is returned to the caller
/// as one of these variants.
#[derive(Debug, Error)]
pub enum ModemError {
    /// I/O error while reading from or writing to the transport
    #[error("Transport error: {0}")]
    Io(#[from] io::Error),

    /// The serial device could not be opened or configured
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// The modem answered with an `ERROR` result code
    #[error("Command {command:?} failed: {response}")]
    CommandFailed { command: String, response: Response },

    /// The modem did not confirm `AT+CMGD` with `OK`
    #[error("Delete of message {index} seemed to fail: {response}")]
    DeleteFailed { index: u32, response: Response },

    /// Selecting the SMS message format failed
    ///
    /// Raised for any failure of `AT+CMGF`, whatever the underlying cause, so
    /// callers can tell configuration failures apart from send/receive ones.
    #[error("Set mode {mode} failed")]
    ModeSetting {
        mode: SmsMode,
        #[source]
        source: Box<ModemError>,
    },

    /// The modem sent bytes outside ASCII
    #[error("Non-ASCII data from modem: {0:?}")]
    Decode(String),

    /// A listing header carried a timestamp that could not be read
    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] TimestampError),

    /// Data validation error (message too long, non-ASCII text, ...)
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A message record was handed to a session it was not listed from
    #[error("Message {index} was listed by {owner} and cannot be deleted through {session}")]
    ForeignMessage {
        index: u32,
        owner: SessionId,
        session: SessionId,
    },

    /// The session's transport has already been released
    #[error("Modem session is closed")]
    Closed,
}

impl ModemError {
    /// Whether this is a mode-setting failure.
    pub fn is_mode_setting(&self) -> bool {
        matches!(self, ModemError::ModeSetting { .. })
    }

    /// Raw modem response attached to the error, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            ModemError::CommandFailed { response, .. } | ModemError::DeleteFailed { response, .. } => {
                Some(response)
            }
            ModemError::ModeSetting { source, .. } => source.response(),
            _ => None,
        }
    }
}

/// Result type alias for modem operations
pub type ModemResult<T> = Result<T, ModemError>;
