use zerocopy::{FromBytes, Immutable, KnownLayout, LittleEndian, U16};

use crate::Locale;

/// Represents one DWORD of the `Translation` [`Var`](https://learn.microsoft.com/windows/win32/menurc/var-str)
/// structure, which contains a language ID and a code page.
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct VarDword {
    lang_id: U16<LittleEndian>,
    codepage: U16<LittleEndian>,
}

impl From<VarDword> for Locale {
    fn from(var: VarDword) -> Self {
        Self::new(var.lang_id.get(), var.codepage.get())
    }
}
