//! # escp CLI
//!
//! Command-line interface for ESC/P dot-matrix printers.
//!
//! ## Usage
//!
//! ```bash
//! # List printer device nodes
//! escp list
//!
//! # Print the demo page on a 24-pin printer
//! escp demo --device /dev/usb/lp0 --pins 24
//!
//! # Show the demo page bytes instead of printing
//! escp demo --hex
//!
//! # Send a prepared ESC/P file
//! escp send job.prn --device lp0
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `escp=info`).

use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use escp::{
    CharacterSet, EscpError, PrinterProfile, Session,
    transport::{self, ByteSink, Channel, DeviceChannel, MemorySink},
};

/// escp - ESC/P dot-matrix printer utility
#[derive(Parser, Debug)]
#[command(name = "escp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct PrinterArgs {
    /// Printer device: a path, or a device name such as `lp0`
    #[arg(long, env = "ESCP_DEVICE", default_value = "/dev/usb/lp0")]
    device: String,

    /// Printer class: 9, 24 or 48 pins
    #[arg(long, env = "ESCP_PINS", default_value = "9")]
    pins: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the demo page
    Demo {
        #[command(flatten)]
        printer: PrinterArgs,

        /// Character table: usa, brazil, or a numeric table ID
        #[arg(long, default_value = "usa")]
        charset: String,

        /// Dump the bytes as hex instead of printing
        #[arg(long)]
        hex: bool,

        /// Write the bytes to a file instead of the printer
        #[arg(long, value_name = "FILE", conflicts_with = "hex")]
        output: Option<PathBuf>,
    },

    /// Send an existing ESC/P file to the printer
    Send {
        /// File containing ESC/P or ESC/P2 sequences
        file: PathBuf,

        #[command(flatten)]
        printer: PrinterArgs,

        /// Open the device read+write and report status bytes after sending
        #[arg(long)]
        duplex: bool,
    },

    /// List printer device nodes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("escp=info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EscpError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            printer,
            charset,
            hex,
            output,
        } => {
            let profile = PrinterProfile::parse(&printer.pins)?;
            let charset = CharacterSet::parse(&charset).ok_or_else(|| {
                EscpError::InvalidConfig(format!("Unknown character table '{}'", charset))
            })?;

            if hex {
                let sink = MemorySink::new();
                let recorded = sink.handle();
                print_demo(profile, sink, charset)?;
                println!("{}", recorded.hex());
                return Ok(());
            }

            if let Some(path) = output {
                print_demo(profile, DeviceChannel::file(&path), charset)?;
                println!("Saved to {}", path.display());
                return Ok(());
            }

            let channel = resolve_device(&printer.device)?;
            print_demo(profile, channel, charset)?;
            println!("Printed successfully!");
        }

        Commands::Send {
            file,
            printer,
            duplex,
        } => {
            let profile = PrinterProfile::parse(&printer.pins)?;
            let job = File::open(&file)?;
            let channel = resolve_device(&printer.device)?.duplex(duplex);

            let mut session = Session::open(profile, channel)?;
            let sent = session.send_job(job)?;
            session.flush()?;

            if duplex {
                let mut status = [0u8; 64];
                let n = session.read_status(&mut status)?;
                println!("Status: {}", transport::memory::hex_dump(&status[..n]));
            }

            session.close()?;
            println!("Sent {} bytes from {}", sent, file.display());
        }

        Commands::List { json } => {
            let devices = transport::discover()?;
            if json {
                let out = serde_json::to_string_pretty(&devices)
                    .map_err(|e| EscpError::Io(io::Error::other(e)))?;
                println!("{}", out);
            } else if devices.is_empty() {
                println!("No printer devices found");
            } else {
                println!("Printer devices:");
                for device in devices {
                    println!("  {:<10} {:?}  {}", device.name, device.kind, device.path.display());
                }
            }
        }
    }

    Ok(())
}

/// Resolve `--device` to a channel: a known device name, or a path as given.
fn resolve_device(device: &str) -> Result<DeviceChannel, EscpError> {
    match transport::find_device(device)? {
        Some(found) => {
            info!(name = %found.name, kind = ?found.kind, "resolved printer device");
            Ok(DeviceChannel::new(found.path))
        }
        None => Ok(DeviceChannel::new(device)),
    }
}

/// The demo page: two lines of text 5cm in, the first one bold, then eject.
fn print_demo<C, S>(profile: PrinterProfile, channel: C, charset: CharacterSet) -> Result<(), EscpError>
where
    C: Channel<Sink = S>,
    S: ByteSink,
{
    let mut escp = Session::open(profile, channel)?;

    if charset != CharacterSet::USA {
        escp.set_character_set(charset)?;
    }
    escp.select_15cpi()?;
    escp.advance_vertical(5.0)?;
    escp.set_absolute_horizontal_position(5.0)?;
    escp.bold(true)?;
    escp.print("Let's print some matrix text ;)")?;
    escp.bold(false)?;
    escp.advance_vertical(1.0)?;
    escp.set_absolute_horizontal_position(5.0)?;
    escp.print("Very simple and easy!")?;
    escp.form_feed()?;

    escp.close()
}
