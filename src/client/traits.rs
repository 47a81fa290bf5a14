// ABOUTME: Core modem session traits layered from connection management up to SMS send and receive
// ABOUTME: Lets message records and callers drive any session implementation through the same interface

use crate::client::error::ModemResult;
use crate::client::types::{Message, SessionId};
use crate::response::Response;
use std::time::Duration;

/// Base connection management for modem sessions
pub trait ModemConnection {
    /// Release the transport
    ///
    /// Safe to call more than once; later calls do nothing.
    fn close(&mut self) -> ModemResult<()>;

    /// Check if the transport is still held
    fn is_open(&self) -> bool;
}

/// AT command execution
///
/// Commands are strictly sequential: each call writes one command and reads
/// its whole response before returning.
pub trait AtCommander: ModemConnection {
    /// Send `command` and collect the response
    ///
    /// With `append_terminator` the command is followed by CR/LF in a second
    /// write. Without it `command` is written as-is, which is how the SMS body
    /// and its trailing Ctrl-Z are sent. Fails if any response line contains
    /// `ERROR`; an `OK` line is not required.
    fn execute_with(&mut self, command: &str, append_terminator: bool) -> ModemResult<Response>;

    /// Send a plain CR/LF terminated command
    fn execute(&mut self, command: &str) -> ModemResult<Response> {
        self.execute_with(command, true)
    }

    /// Handle identifying this session to the messages it lists
    fn session_id(&self) -> SessionId;
}

/// SMS sending operations
pub trait SmsTransmitter: AtCommander {
    /// Send a text-mode SMS
    ///
    /// `text` must be ASCII and no longer than 160 characters.
    fn send(&mut self, number: &str, text: &str) -> ModemResult<()>;
}

/// SMS receiving operations
pub trait SmsReceiver: AtCommander {
    /// List every message stored on the modem
    fn messages(&mut self) -> ModemResult<Vec<Message>>;

    /// Block until the modem sends something or `timeout` expires
    ///
    /// Only observes that data arrived; call [`messages`](Self::messages)
    /// afterwards to fetch content.
    fn wait(&mut self, timeout: Duration) -> ModemResult<()>;

    /// Delete the message stored at `index`
    fn delete_message(&mut self, index: u32) -> ModemResult<()>;
}

/// Sessions that both send and receive
pub trait SmsTransceiver: SmsTransmitter + SmsReceiver {}

// Blanket implementation for any type that implements both transmitter and receiver
impl<T> SmsTransceiver for T where T: SmsTransmitter + SmsReceiver {}
