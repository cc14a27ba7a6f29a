//! Allowed values for the channel `language` element.
//!
//! RSS accepts the two-letter ISO 639 codes (every W3C language code is a
//! valid RSS code) plus the region variants from the list Netscape and
//! UserLand published for RSS 0.91.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

const ISO_639_CODES: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bh",
    "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da",
    "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj", "fo", "fr",
    "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz",
    "ia", "id", "ie", "ig", "ii", "ik", "in", "io", "is", "it", "iu", "iw", "ja", "ji", "jv", "ka",
    "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb",
    "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mo", "mr", "ms",
    "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om",
    "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd",
    "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta",
    "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur",
    "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi", "yo", "za", "zh", "zu",
];

const RSS_REGION_CODES: &[&str] = &[
    "zh-cn", "zh-tw", "nl-be", "nl-nl", "en-au", "en-bz", "en-ca", "en-ie", "en-jm", "en-nz",
    "en-ph", "en-za", "en-tt", "en-gb", "en-us", "en-zw", "fr-be", "fr-ca", "fr-fr", "fr-lu",
    "fr-mc", "fr-ch", "de-at", "de-de", "de-li", "de-lu", "de-ch", "haw", "it-it", "it-ch",
    "pt-br", "pt-pt", "ro-mo", "ro-ro", "ru-mo", "ru-ru", "es-ar", "es-bo", "es-cl", "es-co",
    "es-cr", "es-do", "es-ec", "es-sv", "es-gt", "es-hn", "es-mx", "es-ni", "es-pa", "es-py",
    "es-pe", "es-pr", "es-es", "es-uy", "es-ve", "sv-fi", "sv-se",
];

static GLOBAL: OnceLock<Arc<LanguageCodes>> = OnceLock::new();

/// A read-only set of accepted language codes. Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCodes {
    codes: HashSet<String>,
}

impl LanguageCodes {
    /// ISO 639 two-letter codes plus the RSS region variants.
    pub fn rss_default() -> Self {
        Self::from_codes(ISO_639_CODES.iter().chain(RSS_REGION_CODES))
    }

    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes.into_iter().map(|c| c.as_ref().to_owned()).collect(),
        }
    }

    /// Returns this table extended with additional codes.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.codes
            .extend(extra.into_iter().map(|c| c.as_ref().to_owned()));
        self
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All codes in lexical order, for error messages.
    pub fn sorted(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// The process-wide table, initialised with [`LanguageCodes::rss_default`]
    /// on first use unless [`LanguageCodes::install_global`] ran earlier.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::rss_default())))
    }

    /// Installs the process-wide table. Call once at startup, before the
    /// first [`LanguageCodes::global`] lookup.
    ///
    /// Returns the rejected table if one was already in place.
    pub fn install_global(codes: Self) -> Result<(), Self> {
        GLOBAL.set(Arc::new(codes)).map_err(Arc::unwrap_or_clone)
    }
}

impl Default for LanguageCodes {
    fn default() -> Self {
        Self::rss_default()
    }
}
