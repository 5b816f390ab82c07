use crate::Rect;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the `bordercrop` binary.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 3;
    pub const NO_BORDER_FOUND: i32 = 4;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open image file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create cropped image file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[cfg(feature = "image")]
    #[error("cannot decode image file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[cfg(feature = "image")]
    #[error("cannot encode cropped image file {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot open log file {}: {source}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image has no pixels")]
    ZeroSizedImage,

    #[error("no border pixels found within {0:?}")]
    NoBorderFound(Rect),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Open { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                exit_codes::INPUT_NOT_FOUND
            }
            Error::NoBorderFound(_) => exit_codes::NO_BORDER_FOUND,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
