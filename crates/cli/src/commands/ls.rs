//! List workflow
//!
//! Inspects each requested path in order: directories print their immediate
//! children, files print their own metadata. A missing path is reported and
//! skipped; everything else propagates and aborts the run.

use ncup_core::{render_entries, Error, FileStore};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Execute the list workflow
///
/// The positional shape matches the upload command, so the destination is
/// just the first path inspected; the other positionals follow.
pub async fn execute<S>(
    store: &S,
    destination: &str,
    sources: &[String],
    human_readable: bool,
    formatter: &Formatter,
) -> ExitCode
where
    S: FileStore + ?Sized,
{
    let mut targets = vec![destination.to_string()];
    targets.extend(sources.iter().cloned());
    let print_headers = targets.len() > 1;

    for target in &targets {
        if print_headers {
            formatter.println(&format!("{target}:"));
        }

        let info = match store.stat(target).await {
            Ok(info) => info,
            Err(Error::NotFound(_)) => {
                formatter.println(&format!("{target} not found"));
                continue;
            }
            Err(e) => {
                formatter.error(&format!("failed to inspect {target}: {e}"));
                return ExitCode::from_error(&e);
            }
        };

        let entries = if info.is_dir() {
            match store.list(target).await {
                Ok(entries) => entries,
                Err(e) => {
                    formatter.error(&format!("failed to list {target}: {e}"));
                    return ExitCode::from_error(&e);
                }
            }
        } else {
            vec![info]
        };

        for line in render_entries(&entries, human_readable) {
            formatter.println(&line);
        }
    }

    ExitCode::Success
}
