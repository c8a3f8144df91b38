use std::{ffi::c_void, io, iter, ptr};

use camino::Utf8Path;
use windows_sys::Win32::{
    Foundation::{
        ERROR_RESOURCE_DATA_NOT_FOUND, ERROR_RESOURCE_LANG_NOT_FOUND,
        ERROR_RESOURCE_NAME_NOT_FOUND, ERROR_RESOURCE_TYPE_NOT_FOUND,
    },
    Storage::FileSystem::{GetFileVersionInfoSizeW, GetFileVersionInfoW, VerQueryValueW},
};

use super::{Navigator, SubBlock, vs_header::VSHeader};
use crate::BlockSource;

const VS_VERSION_INFO: &str = "VS_VERSION_INFO";

fn to_wide(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(iter::once(0)).collect()
}

/// The `version.dll` entry points: `GetFileVersionInfoSizeW` and `GetFileVersionInfoW` to load a
/// block, `VerQueryValueW` to navigate it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Win32VersionApi;

impl BlockSource for Win32VersionApi {
    fn block_size(&self, path: &Utf8Path) -> io::Result<u32> {
        let path = to_wide(path.as_str());

        // SAFETY: `path` is NUL-terminated and the handle out-parameter is optional
        let size = unsafe { GetFileVersionInfoSizeW(path.as_ptr(), ptr::null_mut()) };

        if size == 0 {
            let error = io::Error::last_os_error();
            return match error.raw_os_error().map(|code| code as u32) {
                Some(
                    0
                    | ERROR_RESOURCE_DATA_NOT_FOUND
                    | ERROR_RESOURCE_TYPE_NOT_FOUND
                    | ERROR_RESOURCE_NAME_NOT_FOUND
                    | ERROR_RESOURCE_LANG_NOT_FOUND,
                ) => Ok(0),
                _ => Err(error),
            };
        }

        Ok(size)
    }

    fn read_block(&self, path: &Utf8Path, buf: &mut [u8]) -> io::Result<()> {
        let path = to_wide(path.as_str());
        let len = u32::try_from(buf.len()).map_err(io::Error::other)?;

        // SAFETY: `buf` is valid for writes of `len` bytes
        let result =
            unsafe { GetFileVersionInfoW(path.as_ptr(), 0, len, buf.as_mut_ptr().cast()) };

        if result == 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

impl Navigator for Win32VersionApi {
    fn query(&self, block: &[u8], sub_block: &str) -> Option<SubBlock> {
        // VerQueryValueW trusts the root length, so it must not claim more than we hold. It also
        // converts 16-bit resources in place, which needs a writable block, so only 32-bit
        // resources with a UTF-16 root key are passed on
        let root = VSHeader::parse(block, 0)?;
        if root.end() > block.len() || !root.key_matches(VS_VERSION_INFO) {
            return None;
        }

        let sub_block = to_wide(sub_block);
        let mut buffer = ptr::null_mut::<c_void>();
        let mut length = 0u32;

        // SAFETY: `block` holds a complete 32-bit root structure, which VerQueryValueW only reads,
        // and both out-pointers are valid
        let found = unsafe {
            VerQueryValueW(
                block.as_ptr().cast(),
                sub_block.as_ptr(),
                &mut buffer,
                &mut length,
            )
        };

        if found == 0 || buffer.is_null() {
            return None;
        }

        Some(SubBlock {
            // A pointer before the block wraps around and fails the bounds check
            offset: buffer.addr().wrapping_sub(block.as_ptr().addr()),
            length: usize::try_from(length).ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8Path;

    use super::Win32VersionApi;
    use crate::{BlockSource, Navigator};

    #[test]
    fn missing_file_is_an_error() {
        assert!(
            Win32VersionApi
                .block_size(Utf8Path::new(r"C:\does\not\exist.exe"))
                .is_err()
        );
    }

    #[test]
    fn sixteen_bit_block_is_not_queried() {
        // wLength, wValueLength and an ANSI key, with no wType
        let mut block = vec![24, 0, 0, 0];
        block.extend_from_slice(b"VS_VERSION_INFO\0");
        block.resize(24, 0);

        assert_eq!(Win32VersionApi.query(&block, r"\"), None);
    }
}
