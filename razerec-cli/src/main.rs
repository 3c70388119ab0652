use clap::Parser;
use razerec_lib::RazerEc;
use std::error::Error;

/// Send one command to the Razer EC and print the response.
///
/// The defaults issue the brightness-style query observed first in
/// Synapse traffic (class 0x03, command 0x83, args 01 05 00).
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Command class byte (hex)
    #[arg(long, default_value = "03", value_parser = parse_byte)]
    class: u8,

    /// Command id byte (hex)
    #[arg(long, default_value = "83", value_parser = parse_byte)]
    command: u8,

    /// Argument block as a hex string
    #[arg(long, default_value = "010500")]
    args: String,
}

fn parse_byte(s: &str) -> Result<u8, String> {
    u8::from_str_radix(s.trim_start_matches("0x"), 16).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Args::parse();
    let payload = hex::decode(&cli.args)?;

    // Connect to the device
    let device = RazerEc::open().await?;
    println!("Connected to Razer EC");

    println!(
        "Sending class {:#04x} command {:#04x} args {}",
        cli.class,
        cli.command,
        hex::encode(&payload)
    );
    let (outcome, response) = device.command(cli.class, cli.command, &payload).await?;

    println!("Outcome: {outcome}");
    println!("Response args: {}", hex::encode(&response));

    Ok(())
}
