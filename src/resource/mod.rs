//! Locating values inside a version-information block.

#[cfg(test)]
pub(crate) mod builder;
mod tree;
mod var_dword;
mod vs_file_flags;
mod vs_fixed_file_info;
mod vs_header;
#[cfg(windows)]
mod windows;

pub use tree::TreeNavigator;
pub(crate) use var_dword::VarDword;
pub use vs_file_flags::FileFlags;
pub(crate) use vs_fixed_file_info::VSFixedFileInfo;
#[cfg(windows)]
pub use windows::Win32VersionApi;

/// The navigator [`VersionInfo::open`](crate::VersionInfo::open) uses.
#[cfg(windows)]
pub type DefaultNavigator = Win32VersionApi;

/// The navigator used when no OS implementation is available.
#[cfg(not(windows))]
pub type DefaultNavigator = TreeNavigator;

/// The `VS_FIXEDFILEINFO` value of the root structure.
pub const ROOT: &str = r"\";

/// The list of translations a resource declares.
pub const TRANSLATION: &str = r"\VarFileInfo\Translation";

/// The parent of every string table, which is addressed as `\StringFileInfo\<locale>\<name>`.
pub const STRING_FILE_INFO: &str = r"\StringFileInfo";

/// The location of a value inside a version-information block.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SubBlock {
    /// Offset of the value in bytes from the start of the block.
    pub offset: usize,
    /// Length of the value. This counts UTF-16 code units for text values and bytes for everything
    /// else, the same as the `puLen` output of `VerQueryValueW`.
    pub length: usize,
}

/// Finds a sub-block by its backslash-delimited path, such as `\VarFileInfo\Translation`.
///
/// Implementations don't have to keep the returned range inside the block. Callers check it before
/// reading anything.
pub trait Navigator {
    /// Returns the location of `sub_block` inside `block`, or `None` if no such value exists.
    fn query(&self, block: &[u8], sub_block: &str) -> Option<SubBlock>;
}

impl<N: Navigator + ?Sized> Navigator for &N {
    #[inline]
    fn query(&self, block: &[u8], sub_block: &str) -> Option<SubBlock> {
        (**self).query(block, sub_block)
    }
}

/// How the length reported by a [`Navigator`] should be read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ValueKind {
    Binary,
    Text,
}

impl ValueKind {
    /// Returns the number of bytes in one unit of the reported length.
    #[inline]
    pub const fn unit_size(self) -> usize {
        match self {
            Self::Binary => size_of::<u8>(),
            Self::Text => size_of::<u16>(),
        }
    }
}
