use camino::Utf8Path;
use itertools::Itertools;
use tracing::{debug, trace};
use zerocopy::FromBytes;

#[cfg(windows)]
use crate::resource::Win32VersionApi;
use crate::{
    BlockSource, Corruption, DEFAULT_LOCALES, FixedFileInfo, Locale, Navigator, Property,
    VersionError, load_block,
    resource::{
        DefaultNavigator, ROOT, STRING_FILE_INFO, SubBlock, TRANSLATION, VSFixedFileInfo,
        ValueKind, VarDword,
    },
};

/// The version-information resource of a file.
///
/// `locales` is the list of translations string properties are looked up in first. For a
/// `VersionInfo` created with [`open`](Self::open) it is read from `\VarFileInfo\Translation`,
/// falling back to [`DEFAULT_LOCALES`] if the resource doesn't declare any. For one created with
/// [`open_with_locale`](Self::open_with_locale) it is just the given locale.
///
/// [`property`](Self::property) tries every locale in `locales` and then every one in
/// [`DEFAULT_LOCALES`]. Use [`property_with_locale`](Self::property_with_locale) to pick a
/// translation deterministically.
///
/// The block is copied into the `VersionInfo` when it is created and never changes afterwards, so
/// no file or OS handle is kept open.
#[derive(Clone, Debug)]
pub struct VersionInfo<N = DefaultNavigator> {
    locales: Vec<Locale>,
    data: Box<[u8]>,
    navigator: N,
}

#[cfg(windows)]
impl VersionInfo<Win32VersionApi> {
    /// Loads the version-information resource of `path` through `version.dll`, using the
    /// translations it declares as the preferred locales.
    ///
    /// # Errors
    ///
    /// Fails with [`VersionError::NoVersionResource`] if the file has no version resource, or
    /// [`VersionError::LoadFailed`] if Windows could not read it.
    pub fn open<P: AsRef<Utf8Path>>(path: P) -> Result<Self, VersionError> {
        Self::load(&Win32VersionApi, Win32VersionApi, path)
    }

    /// Loads the version-information resource of `path` with `locale` as the only preferred
    /// locale.
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub fn open_with_locale<P: AsRef<Utf8Path>>(
        path: P,
        locale: Locale,
    ) -> Result<Self, VersionError> {
        Self::load_with_locale(&Win32VersionApi, Win32VersionApi, path, locale)
    }
}

impl<N: Navigator> VersionInfo<N> {
    /// Loads the block of `path` from `source` and discovers its locales with `navigator`.
    ///
    /// # Errors
    ///
    /// See [`load_block`].
    pub fn load<S, P>(source: &S, navigator: N, path: P) -> Result<Self, VersionError>
    where
        S: BlockSource + ?Sized,
        P: AsRef<Utf8Path>,
    {
        load_block(source, path.as_ref()).map(|block| Self::from_block(block, navigator))
    }

    /// Loads the block of `path` from `source`, pinning `locale` instead of discovering locales.
    ///
    /// # Errors
    ///
    /// See [`load_block`].
    pub fn load_with_locale<S, P>(
        source: &S,
        navigator: N,
        path: P,
        locale: Locale,
    ) -> Result<Self, VersionError>
    where
        S: BlockSource + ?Sized,
        P: AsRef<Utf8Path>,
    {
        load_block(source, path.as_ref())
            .map(|block| Self::from_block_with_locale(block, navigator, locale))
    }

    /// Wraps a block that is already in memory, discovering its locales.
    pub fn from_block<B: Into<Box<[u8]>>>(block: B, navigator: N) -> Self {
        let mut info = Self {
            locales: Vec::new(),
            data: block.into(),
            navigator,
        };

        info.locales = info.discover_locales();
        if info.locales.is_empty() {
            debug!("No translations declared, falling back to the default locales");
            info.locales = DEFAULT_LOCALES.to_vec();
        }

        debug!(locales = ?info.locales);
        info
    }

    /// Wraps a block that is already in memory with `locale` as the only preferred locale.
    pub fn from_block_with_locale<B: Into<Box<[u8]>>>(block: B, navigator: N, locale: Locale) -> Self {
        Self {
            locales: vec![locale],
            data: block.into(),
            navigator,
        }
    }

    /// The preferred locales, in the order they are tried.
    #[inline]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// The raw version-information block.
    #[inline]
    pub fn block(&self) -> &[u8] {
        &self.data
    }

    /// Reads the translations the resource declares in `\VarFileInfo\Translation`, in the order the
    /// author declared them.
    ///
    /// This is a best-effort hint: a missing, empty or malformed table yields an empty list.
    pub fn discover_locales(&self) -> Vec<Locale> {
        let translation = match self.query(TRANSLATION, ValueKind::Binary) {
            Ok(Some(translation)) => translation,
            Ok(None) => {
                debug!("No translation table");
                return Vec::new();
            }
            Err(error) => {
                debug!(%error);
                return Vec::new();
            }
        };

        let Ok(entries) = <[VarDword]>::ref_from_bytes(translation) else {
            debug!(
                length = translation.len(),
                "Translation table is not a whole number of entries"
            );
            return Vec::new();
        };

        entries.iter().copied().map(Locale::from).collect()
    }

    /// Returns the fixed part of the resource, or a zeroed [`FixedFileInfo`] if it is missing or
    /// can't be decoded.
    pub fn fixed_info(&self) -> FixedFileInfo {
        self.try_fixed_info().unwrap_or_else(|error| {
            debug!(%error);
            FixedFileInfo::default()
        })
    }

    /// Decodes the fixed part of the resource.
    ///
    /// A resource without a fixed part gives a zeroed [`FixedFileInfo`].
    ///
    /// # Errors
    ///
    /// Fails with [`VersionError::CorruptResource`] if the value lies outside the block or is too
    /// short to hold a `VS_FIXEDFILEINFO`.
    pub fn try_fixed_info(&self) -> Result<FixedFileInfo, VersionError> {
        let Some(value) = self.query(ROOT, ValueKind::Binary)? else {
            return Ok(FixedFileInfo::default());
        };

        FixedFileInfo::read_from(value).ok_or_else(|| VersionError::CorruptResource {
            sub_block: ROOT.to_owned(),
            corruption: Corruption::TooShort {
                expected: size_of::<VSFixedFileInfo>(),
                actual: value.len(),
            },
        })
    }

    /// Looks up a string property, trying each of [`locales`](Self::locales) and then each of
    /// [`DEFAULT_LOCALES`] not already tried, and returns the first translation found.
    ///
    /// # Errors
    ///
    /// Fails with [`VersionError::PropertyNotFound`] if no locale has a translation.
    pub fn property<P: AsRef<str>>(&self, name: P) -> Result<String, VersionError> {
        let name = name.as_ref();

        // Translation tables are often wrong, so the English defaults are always tried last
        self.locales
            .iter()
            .chain(&DEFAULT_LOCALES)
            .unique()
            .find_map(|&locale| {
                self.property_with_locale(name, locale)
                    .inspect_err(|error| trace!(%locale, %error))
                    .ok()
            })
            .ok_or_else(|| VersionError::PropertyNotFound {
                property: name.to_owned(),
                locale: None,
            })
    }

    /// Looks up the translation of a string property for exactly one locale.
    ///
    /// This is the only way to get a property with a known translation. [`property`](Self::property)
    /// uses heuristics to choose one.
    ///
    /// # Errors
    ///
    /// Fails with [`VersionError::PropertyNotFound`] if there is no such translation, or
    /// [`VersionError::CorruptResource`] if the value lies outside the block.
    pub fn property_with_locale<P: AsRef<str>>(
        &self,
        name: P,
        locale: Locale,
    ) -> Result<String, VersionError> {
        let name = name.as_ref();
        let sub_block = format!(r"{STRING_FILE_INFO}\{locale}\{name}");

        self.query(&sub_block, ValueKind::Text)?
            .map(utf16_to_string)
            .ok_or_else(|| VersionError::PropertyNotFound {
                property: name.to_owned(),
                locale: Some(locale),
            })
    }

    /// Asks the navigator for `sub_block` and checks that the reported range lies inside the block.
    ///
    /// Returns `Ok(None)` if the value doesn't exist or is empty.
    fn query(&self, sub_block: &str, kind: ValueKind) -> Result<Option<&[u8]>, VersionError> {
        let Some(SubBlock { offset, length }) = self.navigator.query(&self.data, sub_block) else {
            return Ok(None);
        };

        let value = length
            .checked_mul(kind.unit_size())
            .and_then(|size| offset.checked_add(size))
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| VersionError::CorruptResource {
                sub_block: sub_block.to_owned(),
                corruption: Corruption::OutOfBounds {
                    offset,
                    length: length.saturating_mul(kind.unit_size()),
                    block_len: self.data.len(),
                },
            })?;

        Ok((!value.is_empty()).then_some(value))
    }

    fn property_or_default(&self, property: Property) -> String {
        self.property(property).unwrap_or_default()
    }

    /// Returns the `CompanyName` property.
    ///
    /// Like every accessor for a well-known property, this ignores errors and returns an empty
    /// string if the property can't be resolved. Use [`property`](Self::property) to find out why.
    pub fn company_name(&self) -> String {
        self.property_or_default(Property::CompanyName)
    }

    /// Returns the `FileDescription` property.
    pub fn file_description(&self) -> String {
        self.property_or_default(Property::FileDescription)
    }

    /// Returns the `FileVersion` property, which is free-form text and may differ from
    /// [`FixedFileInfo::file_version`].
    pub fn file_version(&self) -> String {
        self.property_or_default(Property::FileVersion)
    }

    /// Returns the `InternalName` property.
    pub fn internal_name(&self) -> String {
        self.property_or_default(Property::InternalName)
    }

    /// Returns the `LegalCopyright` property.
    pub fn legal_copyright(&self) -> String {
        self.property_or_default(Property::LegalCopyright)
    }

    /// Returns the `OriginalFilename` property.
    pub fn original_filename(&self) -> String {
        self.property_or_default(Property::OriginalFilename)
    }

    /// Returns the `ProductName` property.
    pub fn product_name(&self) -> String {
        self.property_or_default(Property::ProductName)
    }

    /// Returns the `ProductVersion` property.
    pub fn product_version(&self) -> String {
        self.property_or_default(Property::ProductVersion)
    }

    /// Returns the `Comments` property.
    pub fn comments(&self) -> String {
        self.property_or_default(Property::Comments)
    }

    /// Returns the `LegalTrademarks` property.
    pub fn legal_trademarks(&self) -> String {
        self.property_or_default(Property::LegalTrademarks)
    }

    /// Returns the `PrivateBuild` property.
    pub fn private_build(&self) -> String {
        self.property_or_default(Property::PrivateBuild)
    }

    /// Returns the `SpecialBuild` property.
    pub fn special_build(&self) -> String {
        self.property_or_default(Property::SpecialBuild)
    }
}

/// Decodes little-endian UTF-16 up to the first NUL.
fn utf16_to_string(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(size_of::<u16>())
        .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
        .take_while(|&unit| unit != 0);

    char::decode_utf16(units)
        .map(|result| result.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
