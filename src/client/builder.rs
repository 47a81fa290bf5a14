// ABOUTME: Modem session factory and builder for opening GSM modems with sensible serial defaults
// ABOUTME: Wraps ModemConfig so callers can adjust baud rate, timeout, flow control and mode before opening

use crate::client::default::Modem;
use crate::client::error::ModemResult;
use crate::client::types::{FlowControl, ModemConfig};
use crate::connection::{LineTransport, SerialTransport};
use crate::datatypes::SmsMode;
use std::time::Duration;

/// Builder for modem sessions
///
/// ```rust,no_run
/// use sms_modem::client::{ModemBuilder, SmsReceiver};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut modem = ModemBuilder::new("/dev/ttyUSB0")
///     .timeout(Duration::from_secs(2))
///     .open()?;
///
/// for message in modem.messages()? {
///     println!("{}: {}", message.number, message.text);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModemBuilder {
    config: ModemConfig,
}

impl ModemBuilder {
    /// Start from the defaults for `device`.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            config: ModemConfig::new(device),
        }
    }

    pub fn from_config(config: ModemConfig) -> Self {
        Self { config }
    }

    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.config.baud_rate = baud_rate;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn flow_control(mut self, flow_control: FlowControl) -> Self {
        self.config.flow_control = flow_control;
        self
    }

    pub fn mode(mut self, mode: SmsMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Open the serial device and initialise the modem.
    pub fn open(self) -> ModemResult<Modem<SerialTransport>> {
        Modem::open(&self.config)
    }

    /// Initialise a modem over an already opened transport.
    ///
    /// Serial settings in the config are ignored; only the mode is applied.
    pub fn open_with<T: LineTransport>(self, transport: T) -> ModemResult<Modem<T>> {
        Modem::with_transport(transport, self.config.mode)
    }
}

/// Convenience functions for quick session creation
impl ModemBuilder {
    /// Open `device` with every default: 9600 baud, 1s timeout, RTS/CTS, TEXT mode.
    pub fn quick(device: impl Into<String>) -> ModemResult<Modem<SerialTransport>> {
        Self::new(device).open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::scripted::ScriptedTransport;

    #[test]
    fn test_setters_update_config() {
        let builder = ModemBuilder::new("COM3")
            .baud_rate(115_200)
            .timeout(Duration::from_millis(250))
            .flow_control(FlowControl::None)
            .mode(SmsMode::Pdu);

        let config = builder.config();
        assert_eq!(config.device, "COM3");
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.flow_control, FlowControl::None);
        assert_eq!(config.mode, SmsMode::Pdu);
    }

    #[test]
    fn test_open_with_applies_mode() {
        let transport = ScriptedTransport::new();
        transport.reply(&["OK\r\n"]).reply(&["OK\r\n"]);

        let modem = ModemBuilder::new("unused")
            .mode(SmsMode::Pdu)
            .open_with(transport.clone())
            .unwrap();

        assert_eq!(modem.mode(), SmsMode::Pdu);
        assert_eq!(transport.writes()[2], "AT+CMGF=0");
    }
}
