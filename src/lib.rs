//! Reads the version-information resource (`VS_VERSIONINFO`) embedded in Windows executables and
//! libraries.
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() -> Result<(), fileversion::VersionError> {
//! use fileversion::VersionInfo;
//!
//! let info = VersionInfo::open(r"C:\Windows\System32\notepad.exe")?;
//! println!("{} {}", info.product_name(), info.fixed_info().file_version);
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```
//!
//! Loading and navigating a block goes through the [`BlockSource`] and [`Navigator`] traits. On
//! Windows, [`Win32VersionApi`] implements both with `version.dll`. [`BlockFileSource`] and
//! [`TreeNavigator`] work on any platform for blocks that have already been extracted.

mod error;
mod fixed_file_info;
mod info;
mod loader;
mod locale;
mod property;
pub mod resource;

pub use error::{Corruption, VersionError};
pub use fixed_file_info::{FileVersion, FixedFileInfo};
pub use info::VersionInfo;
pub use loader::{BlockFileSource, BlockSource, load_block};
pub use locale::{
    CS_ASCII, CS_UNICODE, CS_UNKNOWN, CharsetId, DEFAULT_LOCALES, LANG_ENGLISH, LangId, Locale,
    ParseLocaleError,
};
pub use property::Property;
#[cfg(windows)]
pub use resource::Win32VersionApi;
pub use resource::{FileFlags, Navigator, SubBlock, TreeNavigator};
