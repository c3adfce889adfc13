//! Upload workflow
//!
//! Processes the source items in order, independently: a missing local path
//! or an entry that already exists remotely is reported and skipped, while
//! any other server failure aborts the run. Files and directories both go up
//! through the chunked transfer path of the store.

use std::path::Path;

use ncup_core::{ensure_dir_path, Error, FileStore};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

/// Execute the upload workflow
pub async fn execute<S>(
    store: &S,
    sources: &[String],
    destination: &str,
    formatter: &Formatter,
    output_config: OutputConfig,
) -> ExitCode
where
    S: FileStore + ?Sized,
{
    if sources.is_empty() {
        formatter.println("source files / folders are missing");
        formatter.println("see usage (--help) for more information");
        return ExitCode::Success;
    }

    // Uploads only ever target a directory.
    let destination = ensure_dir_path(destination);

    for source in sources {
        let path = Path::new(source);
        if !path.exists() {
            formatter.println(&format!("{source} does not exist"));
            continue;
        }

        let exit = if path.is_dir() {
            upload_directory(store, source, path, &destination, formatter, output_config).await
        } else {
            upload_file(store, source, path, &destination, formatter, output_config).await
        };
        if exit != ExitCode::Success {
            return exit;
        }
    }

    ExitCode::Success
}

async fn upload_directory<S>(
    store: &S,
    source: &str,
    path: &Path,
    destination: &str,
    formatter: &Formatter,
    output_config: OutputConfig,
) -> ExitCode
where
    S: FileStore + ?Sized,
{
    formatter.println(&format!("uploading dir {source} to {destination}"));

    let spinner = Spinner::start(output_config, &format!("uploading {source}"));
    let result = store.put_directory(destination, path).await;
    spinner.finish();

    match result {
        Ok(()) => ExitCode::Success,
        Err(Error::AlreadyExists(_)) => {
            // Recoverable: report the conflict and move on to the next item.
            formatter.println(&format!("Could not upload {source}."));
            formatter.println(&format!("{source} already exists in {destination}."));
            formatter.println("Remove it from the server or set a different destination.");
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("failed to upload {source}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}

async fn upload_file<S>(
    store: &S,
    source: &str,
    path: &Path,
    destination: &str,
    formatter: &Formatter,
    output_config: OutputConfig,
) -> ExitCode
where
    S: FileStore + ?Sized,
{
    formatter.println(&format!("uploading file {source} to {destination}"));

    // Make sure the destination directory exists; it usually already does.
    match store.mkdir(destination).await {
        Ok(()) | Err(Error::Conflict(_)) => {}
        Err(e) => {
            formatter.error(&format!("failed to create {destination}: {e}"));
            return ExitCode::from_error(&e);
        }
    }

    let spinner = Spinner::start(output_config, &format!("uploading {source}"));
    let result = store.put_file(destination, path).await;
    spinner.finish();

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            formatter.error(&format!("failed to upload {source}: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
