use bitflags::bitflags;

bitflags! {
    /// The file flags of the [`VS_FIXEDFILEINFO`](https://learn.microsoft.com/windows/win32/api/verrsrc/ns-verrsrc-vs_fixedfileinfo)
    /// structure.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FileFlags: u32 {
        const DEBUG = 0x0000_0001;
        const PRERELEASE = 0x0000_0002;
        const PATCHED = 0x0000_0004;
        const PRIVATEBUILD = 0x0000_0008;
        const INFOINFERRED = 0x0000_0010;
        const SPECIALBUILD = 0x0000_0020;
    }
}
