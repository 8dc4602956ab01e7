use snafu::prelude::*;
use std::{io, path::PathBuf, string::FromUtf8Error};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub), context(suffix(Err)))]
pub enum Error {
    #[snafu(display("Unable to access {}: {source}", path.display()))]
    Io { source: io::Error, path: PathBuf },

    #[snafu(display("{} is not UTF-8 encoded text: {source}", path.display()))]
    Encoding {
        source: FromUtf8Error,
        path: PathBuf,
    },

    #[snafu(display("Unable to serialize the comparison: {source}"))]
    Serialize { source: serde_json::Error },

    #[snafu(display("Invalid config file: {source}"))]
    ConfigRead { source: toml::de::Error },

    #[snafu(display("Threshold must be between 0.0 and 1.0, got {value}"))]
    InvalidThreshold { value: f64 },

    #[snafu(display("Segmentation failed: {source}"))]
    Segmenter { source: wordseg::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
