//! Binary crate for the `cityweather` command-line tool.
//!
//! This crate focuses on:
//! - The interactive prompt loop
//! - Reporting failed runs on the error stream
//! - Process exit behavior

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
