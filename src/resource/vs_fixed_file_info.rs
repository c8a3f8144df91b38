use zerocopy::{FromBytes, Immutable, KnownLayout, LittleEndian, U32};

/// Represents a [`VS_FIXEDFILEINFO`](https://learn.microsoft.com/windows/win32/api/verrsrc/ns-verrsrc-vs_fixedfileinfo)
/// structure as it is laid out in the block.
#[doc(alias("VS_FIXEDFILEINFO"))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct VSFixedFileInfo {
    #[doc(alias("dwSignature"))]
    pub signature: U32<LittleEndian>,
    #[doc(alias("dwStrucVersion"))]
    pub struct_version: U32<LittleEndian>,
    pub file_version_ms: U32<LittleEndian>,
    pub file_version_ls: U32<LittleEndian>,
    pub product_version_ms: U32<LittleEndian>,
    pub product_version_ls: U32<LittleEndian>,
    pub file_flags_mask: U32<LittleEndian>,
    pub file_flags: U32<LittleEndian>,
    pub file_os: U32<LittleEndian>,
    pub file_type: U32<LittleEndian>,
    pub file_subtype: U32<LittleEndian>,
    pub file_date_ms: U32<LittleEndian>,
    pub file_date_ls: U32<LittleEndian>,
}

impl VSFixedFileInfo {
    pub const SIGNATURE: u32 = 0xFEEF_04BD;
}
