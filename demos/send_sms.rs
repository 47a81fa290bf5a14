// ABOUTME: Example application sending a single SMS through a serial GSM modem
// ABOUTME: Shows ModemBuilder configuration followed by send and a clean close

use argh::FromArgs;
use sms_modem::client::{ModemBuilder, ModemConnection, SmsTransmitter};
use std::error::Error;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Send one text message through a GSM modem
#[derive(FromArgs)]
struct CliArgs {
    /// log every AT command and response
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the serial device of the modem (default: /dev/ttyUSB0)
    #[argh(option)]
    device: Option<String>,

    /// the baud rate (default: 9600)
    #[argh(option, short = 'b')]
    baud: Option<u32>,

    /// read timeout in seconds (default: 1)
    #[argh(option)]
    timeout: Option<u64>,

    /// the message to send
    #[argh(option, short = 'm')]
    message: String,

    /// the recipient telephone number
    #[argh(option, short = 't')]
    to: String,
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

    let mut modem = ModemBuilder::new(device.as_str())
        .baud_rate(cli_args.baud.unwrap_or(9600))
        .timeout(Duration::from_secs(cli_args.timeout.unwrap_or(1)))
        .open()
        .map_err(|e| {
            eprintln!("Could not open modem on {device}: {e}");
            Box::<dyn Error>::from(e.to_string())
        })?;

    println!("Modem ready in {} mode", modem.mode_name());

    let result = modem.send(&cli_args.to, &cli_args.message);

    if let Err(e) = modem.close() {
        eprintln!("Warning: close failed: {e}");
    }

    match result {
        Ok(()) => {
            println!("Message sent to {}", cli_args.to);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to send message: {e}");
            Err(Box::<dyn Error>::from(e.to_string()))
        }
    }
}
