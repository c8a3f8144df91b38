use std::{
    fs::{self, File},
    io::{self, Read},
};

use camino::Utf8Path;
use tracing::debug;

use crate::VersionError;

/// Provides the raw version-information block of a file.
pub trait BlockSource {
    /// Returns the size of the version-information block of `path` in bytes, or `0` if the file
    /// doesn't have one.
    ///
    /// `0` is not the only way a file can lack a resource. `Win32VersionApi` reports `0` only for
    /// the `ERROR_RESOURCE_*_NOT_FOUND` codes, so a file that can't be loaded as an image at all
    /// surfaces as [`VersionError::LoadFailed`] from [`load_block`].
    fn block_size(&self, path: &Utf8Path) -> io::Result<u32>;

    /// Fills `buf`, which is exactly [`block_size`](Self::block_size) bytes long, with the block.
    fn read_block(&self, path: &Utf8Path, buf: &mut [u8]) -> io::Result<()>;
}

impl<S: BlockSource + ?Sized> BlockSource for &S {
    #[inline]
    fn block_size(&self, path: &Utf8Path) -> io::Result<u32> {
        (**self).block_size(path)
    }

    #[inline]
    fn read_block(&self, path: &Utf8Path, buf: &mut [u8]) -> io::Result<()> {
        (**self).read_block(path, buf)
    }
}

/// Loads the whole version-information block of `path` into a private buffer.
///
/// # Errors
///
/// Returns [`VersionError::NoVersionResource`] if the source reports a size of zero, and
/// [`VersionError::LoadFailed`] if either the size query or the read fails.
pub fn load_block<S>(source: &S, path: &Utf8Path) -> Result<Box<[u8]>, VersionError>
where
    S: BlockSource + ?Sized,
{
    let load_failed = |source| VersionError::LoadFailed {
        path: path.to_path_buf(),
        source,
    };

    let size = source.block_size(path).map_err(load_failed)?;
    debug!(%path, size, "Queried version-information block size");

    if size == 0 {
        return Err(VersionError::NoVersionResource {
            path: path.to_path_buf(),
        });
    }

    let mut block = vec![0; size as usize].into_boxed_slice();
    source.read_block(path, &mut block).map_err(load_failed)?;

    Ok(block)
}

/// Reads a file that contains nothing but an extracted version-information block, such as the
/// `RT_VERSION` entry dumped from a `.res` file.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockFileSource;

impl BlockSource for BlockFileSource {
    fn block_size(&self, path: &Utf8Path) -> io::Result<u32> {
        let len = fs::metadata(path)?.len();
        u32::try_from(len).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{path} is {len} bytes, which is too large for a version-information block"),
            )
        })
    }

    fn read_block(&self, path: &Utf8Path, buf: &mut [u8]) -> io::Result<()> {
        File::open(path)?.read_exact(buf)
    }
}
