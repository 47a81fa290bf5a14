// ABOUTME: Example application listing, and optionally deleting, SMS stored on a GSM modem
// ABOUTME: Demonstrates waiting for incoming messages before fetching them with AT+CMGL

use argh::FromArgs;
use sms_modem::client::{ModemBuilder, SmsReceiver};
use sms_modem::datatypes::SmsMode;
use std::error::Error;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Print the messages stored on a GSM modem
#[derive(FromArgs)]
struct CliArgs {
    /// log every AT command and response
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the serial device of the modem (default: /dev/ttyUSB0)
    #[argh(option)]
    device: Option<String>,

    /// list in PDU mode instead of TEXT mode
    #[argh(switch)]
    pdu: bool,

    /// seconds to wait for modem activity before listing
    #[argh(option, short = 'w')]
    wait: Option<u64>,

    /// delete each message after printing it
    #[argh(switch)]
    delete: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging {
            Level::TRACE
        } else {
            Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let device = cli_args.device.unwrap_or_else(|| "/dev/ttyUSB0".to_owned());
    let mode = if cli_args.pdu { SmsMode::Pdu } else { SmsMode::Text };

    let mut modem = ModemBuilder::new(device).mode(mode).open()?;

    if let Some(seconds) = cli_args.wait {
        println!("Waiting up to {seconds}s for the modem...");
        modem.wait(Duration::from_secs(seconds))?;
    }

    let messages = modem.messages()?;
    println!("{} message(s) in {} mode", messages.len(), modem.mode_name());

    for message in &messages {
        let when = message
            .timestamp
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_owned());
        println!(
            "#{} [{}] from {} at {}\n{}\n",
            message.index, message.status, message.number, when, message.text
        );

        if cli_args.delete {
            message.delete(&mut modem)?;
        }
    }

    // dropping the session closes the port
    Ok(())
}
