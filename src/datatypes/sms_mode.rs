// ABOUTME: Defines the GSM 07.05 SMS message format selected with AT+CMGF
// ABOUTME: Maps TEXT and PDU modes to their numeric wire values and symbolic names

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt;

/// SMS Message Format (GSM 07.05 Section 3.2.3, `AT+CMGF`)
///
/// Selects how the modem exchanges short messages with the terminal. The
/// numeric value is what goes on the wire in `AT+CMGF=<mode>`.
///
/// ## Mode Effects
/// - **TEXT**: headers and bodies are human-readable; listings are requested
///   with the `"ALL"` status filter
/// - **PDU**: messages are hex-encoded TPDUs; listings are requested with the
///   numeric status filter `4`
///
/// PDU payload encoding and decoding is not performed by this crate.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SmsMode {
    /// Protocol Data Unit mode
    Pdu = 0,

    /// Text mode (default)
    Text = 1,
}

impl Default for SmsMode {
    fn default() -> Self {
        SmsMode::Text
    }
}

impl SmsMode {
    /// Name returned for numeric values that are not a known mode.
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// Symbolic name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            SmsMode::Pdu => "PDU",
            SmsMode::Text => "TEXT",
        }
    }

    /// Symbolic name for a raw `AT+CMGF` value, or [`SmsMode::UNKNOWN`].
    pub fn name_of(value: u8) -> &'static str {
        SmsMode::try_from(value)
            .map(SmsMode::name)
            .unwrap_or(Self::UNKNOWN)
    }

    /// Status filter used with `AT+CMGL` to list every stored message.
    pub fn list_all_filter(self) -> &'static str {
        match self {
            SmsMode::Text => "\"ALL\"",
            SmsMode::Pdu => "4",
        }
    }
}

impl fmt::Display for SmsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_cmgf() {
        assert_eq!(u8::from(SmsMode::Pdu), 0);
        assert_eq!(u8::from(SmsMode::Text), 1);
        assert_eq!(SmsMode::try_from(1u8).unwrap(), SmsMode::Text);
        assert!(SmsMode::try_from(2u8).is_err());
    }

    #[test]
    fn unknown_values_name_as_unknown() {
        assert_eq!(SmsMode::name_of(0), "PDU");
        assert_eq!(SmsMode::name_of(1), "TEXT");
        assert_eq!(SmsMode::name_of(7), "UNKNOWN");
    }

    #[test]
    fn list_filter_depends_on_mode() {
        assert_eq!(SmsMode::Text.list_all_filter(), "\"ALL\"");
        assert_eq!(SmsMode::Pdu.list_all_filter(), "4");
    }
}
