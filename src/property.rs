use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// The well-known string properties of a
/// [`StringTable`](https://learn.microsoft.com/windows/win32/menurc/stringtable).
///
/// Each variant's name is the exact key stored in the resource, so a `Property` can be used
/// anywhere a property name is accepted.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum Property {
    CompanyName,
    FileDescription,
    FileVersion,
    InternalName,
    LegalCopyright,
    OriginalFilename,
    ProductName,
    ProductVersion,
    Comments,
    LegalTrademarks,
    PrivateBuild,
    SpecialBuild,
}
