use std::{
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use otter_trace::{config::Config, reports::trace::reader::TraceReader, types::err::ErrorKind};

pub(super) enum ReadError {
    NoPath,
    FailedToOpen,
    Header(ErrorKind),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::NoPath => write!(f, "Some path to a trace is required."),
            Self::FailedToOpen => write!(f, "Failed to open trace file."),
            Self::Header(err) => write!(f, "Header error: '{err:?}'."),
        }
    }
}

/// Opens the trace at `path` and reads the header of the trace.
///
/// Traces with an `xz` extension are decompressed, if support for xz is enabled.
pub(super) fn open_trace(
    path: Option<&String>,
    config: &Config,
) -> Result<(PathBuf, TraceReader<Box<dyn Read>>), ReadError> {
    let Some(path) = path else {
        return Err(ReadError::NoPath);
    };
    let path = Path::new(path).to_path_buf();

    println!("c Reading trace from {path:?}");

    let file = match std::fs::File::open(&path) {
        Ok(file) => file,
        Err(_) => return Err(ReadError::FailedToOpen),
    };

    let source: Box<dyn Read> = match &path.extension() {
        #[cfg(feature = "xz")]
        Some(extension) if *extension == "xz" => {
            Box::new(BufReader::new(xz2::read::XzDecoder::new(file)))
        }

        _ => Box::new(BufReader::new(file)),
    };

    match TraceReader::new(source, config) {
        Ok(reader) => Ok((path, reader)),
        Err(e) => Err(ReadError::Header(e)),
    }
}
