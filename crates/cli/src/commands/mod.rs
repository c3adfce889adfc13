//! CLI definition and execution
//!
//! The surface is flat: positional paths with the destination last, `-l`
//! switching from the upload workflow to the list workflow. Each run
//! resolves credentials, logs in eagerly, then dispatches.

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use ncup_core::resolve_credentials;
use ncup_dav::WebDavClient;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod ls;
pub mod upload;

/// ncup - Nextcloud/WebDAV upload and listing client
///
/// Uploads local files and folders to a remote destination folder using
/// chunked transfers, or lists remote paths with -l.
#[derive(Parser, Debug)]
#[command(name = "ncup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source files / folders followed by the destination folder
    /// (with -l: one or more remote paths to list)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// List remote directory contents instead of uploading
    #[arg(short = 'l')]
    pub list: bool,

    /// Print sizes like 1K 234M 2G etc.
    #[arg(short = 'H', long)]
    pub human_readable: bool,

    /// Config file containing login credentials
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// URL of the server
    #[arg(short, long)]
    pub server: Option<String>,

    /// Login username
    #[arg(short, long)]
    pub user: Option<String>,

    /// Login password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable the transfer spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Split the positional paths into sources and the trailing destination.
    ///
    /// clap cannot parse "zero or more, then exactly one" positionals, so the
    /// split happens here; `required = true` guarantees a last element.
    pub fn split_paths(&self) -> (Vec<String>, String) {
        let mut paths = self.paths.clone();
        let destination = paths.pop().unwrap_or_default();
        (paths, destination)
    }
}

/// Execute the CLI and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };
    let formatter = Formatter::new(output_config);

    let (sources, destination) = cli.split_paths();

    let credentials = match resolve_credentials(
        cli.server.as_deref(),
        cli.user.as_deref(),
        cli.password.as_deref(),
        cli.config.as_deref(),
    ) {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from_error(&e);
        }
    };

    debug!(server = %credentials.url, user = %credentials.username, "connecting");
    let client = match WebDavClient::connect(&credentials).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&format!("login to {} failed: {e}", credentials.url));
            return ExitCode::from_error(&e);
        }
    };

    if cli.list {
        ls::execute(&client, &destination, &sources, cli.human_readable, &formatter).await
    } else {
        upload::execute(&client, &sources, &destination, &formatter, output_config).await
    }
}
