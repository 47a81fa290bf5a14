// ABOUTME: Decoded AT command response lines and the result-code checks the session applies to them
// ABOUTME: Classifies a response as failed when any line carries the ERROR token

use crate::client::error::{ModemError, ModemResult};
use bytes::Bytes;
use std::fmt;

/// Token whose presence anywhere in a response marks the command as failed.
pub const ERROR_TOKEN: &str = "ERROR";

/// Token the modem uses to confirm a command.
pub const OK_TOKEN: &str = "OK";

/// Lines the modem returned for one AT command
///
/// Lines are kept exactly as read, terminators included. The final result
/// code (`OK` / `ERROR`) is the last line when the modem sent one; replies
/// that ended on a read timeout may have none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    lines: Vec<String>,
}

impl Response {
    /// Decode raw lines read from the transport. Responses are ASCII; any
    /// other byte is a decode error.
    pub fn decode(raw: Vec<Bytes>) -> ModemResult<Response> {
        let lines = raw
            .into_iter()
            .map(|line| {
                if line.is_ascii() {
                    // ASCII is always valid UTF-8
                    Ok(String::from_utf8_lossy(&line).into_owned())
                } else {
                    Err(ModemError::Decode(String::from_utf8_lossy(&line).into_owned()))
                }
            })
            .collect::<ModemResult<Vec<_>>>()?;

        Ok(Response { lines })
    }

    pub fn from_lines<I, S>(lines: I) -> Response
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Response {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line except the trailing result code.
    pub fn body(&self) -> &[String] {
        match self.lines.split_last() {
            Some((_, body)) => body,
            None => &[],
        }
    }

    /// Whether any line contains `token`.
    pub fn contains(&self, token: &str) -> bool {
        self.lines.iter().any(|line| line.contains(token))
    }

    /// Whether the modem reported `ERROR` on any line.
    pub fn is_error(&self) -> bool {
        self.contains(ERROR_TOKEN)
    }

    /// Whether the modem explicitly confirmed with `OK`.
    pub fn is_ok(&self) -> bool {
        self.contains(OK_TOKEN)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\"", line.escape_debug())?;
        }
        f.write_str("]")
    }
}
