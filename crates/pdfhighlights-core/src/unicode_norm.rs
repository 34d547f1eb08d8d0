//! Unicode normalisation of assembled highlight text.
//!
//! Normalisation runs after assembly, so it never shifts the character
//! offsets used by band extraction.

use unicode_normalization::UnicodeNormalization;

/// Normalisation form applied to highlight text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeNorm {
    /// Leave text as extracted.
    #[default]
    None,
    Nfc,
    Nfd,
    /// Compatibility composition; also unfolds ligatures such as `ﬁ`.
    Nfkc,
    Nfkd,
}

impl UnicodeNorm {
    pub fn normalize(&self, text: &str) -> String {
        match self {
            UnicodeNorm::None => text.to_string(),
            UnicodeNorm::Nfc => text.nfc().collect(),
            UnicodeNorm::Nfd => text.nfd().collect(),
            UnicodeNorm::Nfkc => text.nfkc().collect(),
            UnicodeNorm::Nfkd => text.nfkd().collect(),
        }
    }
}
