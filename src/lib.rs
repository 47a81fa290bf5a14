pub mod client;
pub mod connection;
pub mod datatypes;
pub mod listing;
pub mod response;


pub use connection::{LineTransport, SerialTransport};
pub use listing::{ListingHeader, parse_listing};
pub use response::Response;

// Re-export the main client API for easy access
pub use client::{
    AtCommander, Message, Modem, ModemBuilder, ModemConfig, ModemConnection, ModemError,
    ModemResult, SessionId, SmsReceiver, SmsTransmitter,
};
pub use datatypes::SmsMode;
