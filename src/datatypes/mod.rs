mod sms_mode;
mod timestamp;

pub use sms_mode::SmsMode;
pub use timestamp::{TIMESTAMP_FORMAT, TimestampError, parse_timestamp};

/// Ctrl-Z, ends text entry after `AT+CMGS`.
pub const CTRL_Z: u8 = 0x1A;

/// Line terminator appended to plain AT commands.
pub const CRLF: &[u8] = b"\r\n";

/// Longest body accepted for a single text-mode SMS.
pub const MAX_TEXT_LEN: usize = 160;
