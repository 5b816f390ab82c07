//! Log sinks for [`BorderCrop::with_log`](crate::BorderCrop::with_log).

use crate::{Error, Result};

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tracing::{Dispatch, Level};

/// Appends timestamped log lines to the file at `path`, creating it if needed.
pub fn file_dispatch(path: &Path) -> Result<Dispatch> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::Log {
            path: path.to_owned(),
            source,
        })?;

    Ok(writer_dispatch(file))
}

/// Writes timestamped log lines, including per-coordinate traces, to `writer`.
pub fn writer_dispatch<W: Write + Send + 'static>(writer: W) -> Dispatch {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::TRACE)
        .finish();

    Dispatch::new(subscriber)
}
