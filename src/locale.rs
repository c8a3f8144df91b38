use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Windows language identifier. See the `langID` section of
/// <https://learn.microsoft.com/windows/win32/menurc/versioninfo-resource>.
pub type LangId = u16;

/// A character-set identifier. See the `charsetID` section of
/// <https://learn.microsoft.com/windows/win32/menurc/versioninfo-resource>.
pub type CharsetId = u16;

/// U.S. English.
pub const LANG_ENGLISH: LangId = 0x0409;

/// Windows Multilingual (code page 1252).
pub const CS_ASCII: CharsetId = 0x04E4;

/// Unicode (code page 1200).
pub const CS_UNICODE: CharsetId = 0x04B0;

/// 7-bit ASCII, which is also what resource compilers write when no code page was given.
pub const CS_UNKNOWN: CharsetId = 0x0000;

/// The locales tried, in this order, after the ones a [`VersionInfo`] was created with.
///
/// Some binaries declare a wrong translation table or none at all. Explorer copes with that by
/// probing a few well-known English translations, so we do the same.
///
/// [`VersionInfo`]: crate::VersionInfo
pub const DEFAULT_LOCALES: [Locale; 3] = [
    Locale::ENGLISH_ASCII,
    Locale::ENGLISH_UNICODE,
    Locale::ENGLISH_UNKNOWN,
];

/// A language and character-set pair identifying one translation of the string properties.
///
/// Its [`Display`](fmt::Display) form is the 8-digit hexadecimal key used in
/// `\StringFileInfo\<key>` sub-block paths, for example `040904b0`.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
pub struct Locale {
    pub lang_id: LangId,
    pub charset_id: CharsetId,
}

impl Locale {
    pub const ENGLISH_ASCII: Self = Self::new(LANG_ENGLISH, CS_ASCII);

    pub const ENGLISH_UNICODE: Self = Self::new(LANG_ENGLISH, CS_UNICODE);

    pub const ENGLISH_UNKNOWN: Self = Self::new(LANG_ENGLISH, CS_UNKNOWN);

    #[inline]
    pub const fn new(lang_id: LangId, charset_id: CharsetId) -> Self {
        Self {
            lang_id,
            charset_id,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}{:04x}", self.lang_id, self.charset_id)
    }
}

#[derive(Error, Debug, Eq, PartialEq)]
pub enum ParseLocaleError {
    #[error(
        "A locale key must be 8 hexadecimal digits but {0:?} has {len} characters",
        len = .0.chars().count()
    )]
    InvalidLength(String),
    #[error("{0:?} is not a hexadecimal locale key")]
    InvalidDigit(String),
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KEY_LENGTH: usize = 8;

        if s.len() != KEY_LENGTH {
            return Err(ParseLocaleError::InvalidLength(s.to_owned()));
        }

        // `from_str_radix` accepts a leading sign, which a key never has
        if !s.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ParseLocaleError::InvalidDigit(s.to_owned()));
        }

        let (lang_id, charset_id) = s.split_at(KEY_LENGTH / 2);
        let parse = |digits: &str| {
            u16::from_str_radix(digits, 16)
                .map_err(|_| ParseLocaleError::InvalidDigit(s.to_owned()))
        };

        Ok(Self::new(parse(lang_id)?, parse(charset_id)?))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DEFAULT_LOCALES, Locale, ParseLocaleError};

    #[rstest]
    #[case(Locale::ENGLISH_UNICODE, "040904b0")]
    #[case(Locale::ENGLISH_ASCII, "040904e4")]
    #[case(Locale::ENGLISH_UNKNOWN, "04090000")]
    #[case(Locale::new(0x0007, 0x0001), "00070001")]
    #[case(Locale::new(0xFFFF, 0xABCD), "ffffabcd")]
    fn locale_key(#[case] locale: Locale, #[case] key: &str) {
        assert_eq!(locale.to_string(), key);
        assert_eq!(key.parse::<Locale>().unwrap(), locale);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            "040704B0".parse::<Locale>().unwrap(),
            Locale::new(0x0407, 0x04B0)
        );
    }

    #[rstest]
    #[case("")]
    #[case("0409")]
    #[case("040904b00")]
    fn parse_rejects_wrong_length(#[case] key: &str) {
        assert!(matches!(
            key.parse::<Locale>(),
            Err(ParseLocaleError::InvalidLength(..))
        ));
    }

    #[test]
    fn wrong_length_message() {
        let error = "04ü9".parse::<Locale>().unwrap_err();

        assert_eq!(
            error.to_string(),
            r#"A locale key must be 8 hexadecimal digits but "04ü9" has 4 characters"#
        );
    }

    #[rstest]
    #[case("0409xyz0")]
    #[case("+40904b0")]
    #[case("0x0409b0")]
    fn parse_rejects_non_hex(#[case] key: &str) {
        assert_eq!(
            key.parse::<Locale>(),
            Err(ParseLocaleError::InvalidDigit(key.to_owned()))
        );
    }

    #[test]
    fn default_locales_order() {
        assert_eq!(
            DEFAULT_LOCALES.map(|locale| locale.to_string()),
            ["040904e4", "040904b0", "04090000"]
        );
    }
}
