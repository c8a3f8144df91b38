use std::iter;

use zerocopy::{FromBytes, Immutable, KnownLayout, LittleEndian, U16};

/// The `wLength`, `wValueLength` and `wType` words that open every structure of a version block.
#[derive(Copy, Clone, Debug, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
struct RawHeader {
    length: U16<LittleEndian>,
    value_length: U16<LittleEndian>,
    r#type: U16<LittleEndian>,
}

/// Represents the header shared by `VS_VERSIONINFO`, `StringFileInfo`, `StringTable`, `String`,
/// `VarFileInfo` and `Var`.
///
/// This is not an officially documented structure, but every node of the version tree starts with
/// the same three words followed by a NUL-terminated UTF-16 key, so parsing it once makes walking
/// the tree a lot simpler.
#[derive(Copy, Clone, Debug)]
pub struct VSHeader<'data> {
    /// Offset of the header from the start of the block.
    pub offset: usize,
    pub length: u16,
    pub value_length: u16,
    pub r#type: u16,
    key: &'data [U16<LittleEndian>],
    /// Offset of the value, which is 32-bit aligned after the key.
    pub value_offset: usize,
}

impl<'data> VSHeader<'data> {
    const TEXT: u16 = 1;

    /// Parses the header at `offset`, returning `None` if it doesn't fit inside `block`.
    pub fn parse(block: &'data [u8], offset: usize) -> Option<Self> {
        let (header, rest) = RawHeader::ref_from_prefix(block.get(offset..)?).ok()?;

        let key_units = rest
            .chunks_exact(size_of::<u16>())
            .position(|unit| unit == [0, 0])?;
        let (key, _) = <[U16<LittleEndian>]>::ref_from_prefix_with_elems(rest, key_units).ok()?;

        let key_end = offset + size_of::<RawHeader>() + (key_units + 1) * size_of::<u16>();

        Some(Self {
            offset,
            length: header.length.get(),
            value_length: header.value_length.get(),
            r#type: header.r#type.get(),
            key,
            value_offset: key_end.next_multiple_of(4),
        })
    }

    /// Returns true if the value is text, in which case `value_length` counts UTF-16 code units.
    #[inline]
    pub const fn is_text(&self) -> bool {
        self.r#type == Self::TEXT
    }

    /// Returns the size of the value in bytes.
    pub fn value_size(&self) -> usize {
        let value_length = usize::from(self.value_length);
        if self.is_text() {
            value_length * size_of::<u16>()
        } else {
            value_length
        }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.offset + usize::from(self.length)
    }

    pub fn key(&self) -> String {
        char::decode_utf16(self.key.iter().map(|unit| unit.get()))
            .map(|result| result.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Compares the key the same way `VerQueryValueW` does, ignoring ASCII case.
    pub fn key_matches(&self, key: &str) -> bool {
        self.key().eq_ignore_ascii_case(key)
    }

    /// Iterates over the child structures that follow the value.
    ///
    /// Iteration stops at the end of this structure, at a child that is truncated by the end of the
    /// block, or at a child claiming a zero length.
    pub fn children(self, block: &'data [u8]) -> impl Iterator<Item = Self> {
        let end = self.end();
        let mut next = (self.value_offset + self.value_size()).next_multiple_of(4);

        iter::from_fn(move || {
            if next >= end {
                return None;
            }

            let child = Self::parse(block, next)?;
            if child.length == 0 {
                return None;
            }

            next = child.end().next_multiple_of(4);
            Some(child)
        })
    }
}
