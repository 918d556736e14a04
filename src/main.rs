use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use teller::cli::repl;
use teller::storage::Storage;

#[derive(Parser)]
#[command(
    name = "teller",
    version,
    about = "Interactive single-process bank ledger",
    long_about = "teller keeps a purely in-memory ledger of client accounts. \
                  It reads one command per line (new-client, deposit, withdraw, \
                  balance, show-bank-statement) until `exit` or end of input; \
                  nothing survives the process."
)]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut storage = Storage::new();
    let stdin = io::stdin();
    repl::run(&mut storage, stdin.lock(), io::stdout())?;
    Ok(())
}
