use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::Locale;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("{path} does not have a version-information resource")]
    NoVersionResource { path: Utf8PathBuf },
    #[error("Failed to load the version-information resource of {path}")]
    LoadFailed {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{sub_block} is malformed: {corruption}")]
    CorruptResource {
        sub_block: String,
        corruption: Corruption,
    },
    #[error(
        "Failed to get property {property:?}{}",
        .locale.map_or_else(String::new, |locale| format!(" with locale {locale}"))
    )]
    PropertyNotFound {
        property: String,
        locale: Option<Locale>,
    },
}

/// Why a sub-block could not be decoded.
#[derive(Error, Debug, Eq, PartialEq)]
pub enum Corruption {
    #[error("{length} bytes at offset {offset} lie outside the {block_len} byte block")]
    OutOfBounds {
        offset: usize,
        length: usize,
        block_len: usize,
    },
    #[error("expected at least {expected} bytes but found {actual}")]
    TooShort { expected: usize, actual: usize },
}
