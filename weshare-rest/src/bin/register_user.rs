//! Import an enrolled identity into the wallet.
//!
//! The server refuses requests while the enrollment label is missing
//! from the wallet; this tool puts already-enrolled PEM material
//! there. It does not talk to a CA.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use weshare_fabric::{FabricError, Identity, Wallet};

#[derive(Parser, Debug)]
#[command(
    name = "register-user",
    version,
    about = "Import an enrolled identity into the WeShare wallet"
)]
struct Cli {
    /// Label to store the identity under (e.g. user1, admin).
    label: String,

    /// Certificate PEM file.
    #[arg(long)]
    cert: PathBuf,

    /// Private-key PEM file.
    #[arg(long)]
    key: PathBuf,

    /// MSP id of the owning organization.
    #[arg(long, default_value = "Org1MSP")]
    msp_id: String,

    /// Wallet directory.
    #[arg(long, default_value = "wallet")]
    wallet: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(fingerprint) => {
            println!(
                "identity '{}' written to {} (certificate {fingerprint})",
                cli.label,
                cli.wallet.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("register-user: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, FabricError> {
    let certificate = fs::read_to_string(&cli.cert)?;
    let private_key = fs::read_to_string(&cli.key)?;
    let identity = Identity::new_x509(certificate, private_key, cli.msp_id.clone());
    let wallet = Wallet::open(cli.wallet.clone());
    wallet.put(&cli.label, &identity)?;
    Ok(identity.fingerprint())
}
