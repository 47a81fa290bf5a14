// ABOUTME: Modem client module providing trait-based interfaces over a GSM modem session
// ABOUTME: Exports all client components including traits, builder, error types, and the default session

//! GSM Modem Client Module
//!
//! Synchronous, blocking access to a GSM modem speaking AT commands:
//!
//! * **Layered traits** - connection management, command execution, then
//!   sending and receiving
//! * **Builder** - serial defaults suited to GSM modems (9600 baud, 1s
//!   timeout, RTS/CTS)
//! * **Pluggable transport** - any [`LineTransport`](crate::connection::LineTransport)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sms_modem::client::{ModemBuilder, ModemConnection, SmsReceiver, SmsTransmitter};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut modem = ModemBuilder::quick("/dev/ttyUSB0")?;
//!
//! modem.send("15551234567", "Hello!")?;
//!
//! modem.wait(Duration::from_secs(30))?;
//! for message in modem.messages()? {
//!     println!("{} from {}: {}", message.index, message.number, message.text);
//!     message.delete(&mut modem)?;
//! }
//!
//! modem.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! * `ModemConnection` - transport lifetime
//! * `AtCommander` - AT command execution (extends ModemConnection)
//! * `SmsTransmitter` - `AT+CMGS` (extends AtCommander)
//! * `SmsReceiver` - `AT+CMGL`, `AT+CMGD` and waiting (extends AtCommander)
//! * `SmsTransceiver` - both

pub mod builder;
pub mod default;
pub mod error;
pub mod traits;
pub mod types;

// Re-export the main types for easy access
pub use builder::ModemBuilder;
pub use default::Modem;
pub use error::{ModemError, ModemResult};
pub use traits::{AtCommander, ModemConnection, SmsReceiver, SmsTransceiver, SmsTransmitter};
pub use types::{FlowControl, Message, ModemConfig, SessionId};
