//! ncup - Nextcloud/WebDAV CLI client
//!
//! A command-line client for uploading files and folders to a
//! Nextcloud/WebDAV server with chunked transfers, and for listing
//! remote directory contents.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod exit_code;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    // Log filtering via RUST_LOG; everything goes to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
