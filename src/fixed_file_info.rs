use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zerocopy::FromBytes;

use crate::resource::{FileFlags, VSFixedFileInfo};

/// A four-part version number as stored in a `VS_FIXEDFILEINFO`.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct FileVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub build: u16,
}

impl FileVersion {
    #[inline]
    pub const fn new(major: u16, minor: u16, patch: u16, build: u16) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Splits a most-significant and least-significant word pair, high half first, which is the
    /// order Windows displays them in.
    pub const fn from_words(ms: u32, ls: u32) -> Self {
        Self::new((ms >> 16) as u16, ms as u16, (ls >> 16) as u16, ls as u16)
    }

    /// Packs the version back into its most-significant and least-significant words.
    pub const fn to_words(self) -> (u32, u32) {
        (
            ((self.major as u32) << 16) | self.minor as u32,
            ((self.patch as u32) << 16) | self.build as u32,
        )
    }
}

impl fmt::Display for FileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

/// The fixed (non-string) part of a version-information resource.
///
/// The flag, OS, type and date fields are carried through exactly as stored.
///
/// See [`VS_FIXEDFILEINFO`](https://learn.microsoft.com/windows/win32/api/verrsrc/ns-verrsrc-vs_fixedfileinfo).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FixedFileInfo {
    pub file_version: FileVersion,
    pub product_version: FileVersion,
    pub file_flags_mask: u32,
    pub file_flags: u32,
    pub file_os: u32,
    pub file_type: u32,
    pub file_subtype: u32,
    pub file_date_ms: u32,
    pub file_date_ls: u32,
}

impl FixedFileInfo {
    /// Decodes the little-endian structure at the start of `value`, returning `None` if `value` is
    /// too short to hold it.
    pub(crate) fn read_from(value: &[u8]) -> Option<Self> {
        let (raw, _) = VSFixedFileInfo::read_from_prefix(value).ok()?;

        if raw.signature.get() != VSFixedFileInfo::SIGNATURE {
            debug!(signature = raw.signature.get(), "Unexpected VS_FIXEDFILEINFO signature");
        }

        Some(Self::from(raw))
    }

    /// Returns the flags that are both set and marked valid by the mask.
    pub const fn flags(&self) -> FileFlags {
        FileFlags::from_bits_retain(self.file_flags & self.file_flags_mask)
    }

    /// Returns the 64-bit creation timestamp, which most compilers leave as zero.
    pub const fn file_date(&self) -> u64 {
        ((self.file_date_ms as u64) << 32) | self.file_date_ls as u64
    }
}

impl From<VSFixedFileInfo> for FixedFileInfo {
    fn from(raw: VSFixedFileInfo) -> Self {
        Self {
            file_version: FileVersion::from_words(
                raw.file_version_ms.get(),
                raw.file_version_ls.get(),
            ),
            product_version: FileVersion::from_words(
                raw.product_version_ms.get(),
                raw.product_version_ls.get(),
            ),
            file_flags_mask: raw.file_flags_mask.get(),
            file_flags: raw.file_flags.get(),
            file_os: raw.file_os.get(),
            file_type: raw.file_type.get(),
            file_subtype: raw.file_subtype.get(),
            file_date_ms: raw.file_date_ms.get(),
            file_date_ls: raw.file_date_ls.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{FileVersion, FixedFileInfo};
    use crate::resource::{FileFlags, builder::VersionBlock};

    #[rstest]
    #[case(0x0001_0002, 0x0003_0004)]
    #[case(0x0000_0000, 0x0000_0000)]
    #[case(0xFFFF_FFFF, 0xFFFF_FFFF)]
    #[case(0x000A_0000, 0x4A61_0001)]
    #[case(0x8000_0001, 0x0001_8000)]
    fn words_round_trip(#[case] ms: u32, #[case] ls: u32) {
        assert_eq!(FileVersion::from_words(ms, ls).to_words(), (ms, ls));
    }

    #[test]
    fn word_halves() {
        let version = FileVersion::from_words(0x000A_0000, 0x4A61_0001);

        assert_eq!(version, FileVersion::new(10, 0, 19041, 1));
        assert_eq!(version.to_string(), "10.0.19041.1");
    }

    #[test]
    fn decode() {
        let bytes = VersionBlock::FIXED
            .into_iter()
            .flat_map(u32::to_le_bytes)
            .collect::<Vec<_>>();

        let info = FixedFileInfo::read_from(&bytes).unwrap();

        assert_eq!(info.file_version, FileVersion::new(1, 2, 3, 4));
        assert_eq!(info.product_version, FileVersion::new(5, 6, 7, 8));
        assert_eq!(info.file_flags_mask, 0x3F);
        assert_eq!(info.file_flags, 0x03);
        assert_eq!(info.file_os, 0x0004_0004);
        assert_eq!(info.file_type, 1);
        assert_eq!(info.file_subtype, 0);
        assert_eq!(info.file_date(), 0x01D7_0000_1234_5678);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut bytes = VersionBlock::FIXED
            .into_iter()
            .flat_map(u32::to_le_bytes)
            .collect::<Vec<_>>();
        bytes.extend_from_slice(b"trailing");

        assert_eq!(
            FixedFileInfo::read_from(&bytes).unwrap().file_version,
            FileVersion::new(1, 2, 3, 4)
        );
    }

    #[rstest]
    #[case(0)]
    #[case(8)]
    #[case(51)]
    fn decode_too_short(#[case] length: usize) {
        assert_eq!(FixedFileInfo::read_from(&vec![0; length]), None);
    }

    #[test]
    fn flags_are_masked() {
        let info = FixedFileInfo {
            file_flags_mask: (FileFlags::DEBUG | FileFlags::PATCHED).bits(),
            file_flags: (FileFlags::DEBUG | FileFlags::PRERELEASE).bits(),
            ..FixedFileInfo::default()
        };

        assert_eq!(info.flags(), FileFlags::DEBUG);
    }
}
