//! ptbr-g2p - Grapheme-to-phoneme transcriber for Brazilian Portuguese
//!
//! Given a single lowercase word, this library produces its syllabification,
//! an annotation of the stressed (tonic) syllable, and an IPA transcription
//! with syllable dots and a primary-stress marker.
//!
//! # Example
//!
//! ```rust
//! use ptbr_g2p::{transcribe, Algorithm};
//!
//! let t = transcribe("chocolate", Algorithm::Silva).unwrap();
//! assert_eq!(t.ipa, "ʃo.ko.ˈla.ʧɪ");
//! assert_eq!(t.syllables, "cho-co-la-te");
//! assert_eq!(t.annotated, "cho-co-[la]-te");
//! ```

pub mod error;
pub mod letters;
pub mod pipeline;
pub mod resources;
pub mod stress;
pub mod syllables;
pub mod transcriber;

pub use error::Error;
pub use pipeline::{transcribe, Algorithm, Transcription};
pub use stress::StressDetector;
pub use syllables::{CeciSyllabifier, Silva2011Syllabifier};
pub use transcriber::G2PTranscriber;

use once_cell::sync::Lazy;
use regex::Regex;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Letters a word may contain: the lowercase alphabet plus the accented
/// vowels and ç.
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-záéíóúâêôàãõüç]+$").unwrap());

/// True when `word` is a single lowercase Portuguese word.
pub fn is_valid_word(word: &str) -> bool {
    WORD_RE.is_match(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_word() {
        assert!(is_valid_word("chocolate"));
        assert!(is_valid_word("coração"));
        assert!(is_valid_word("àquela"));
        assert!(!is_valid_word("two words"));
        assert!(!is_valid_word("Upper"));
        assert!(!is_valid_word("hyphen-ated"));
        assert!(!is_valid_word(""));
    }

    #[test]
    fn test_transcribe_reexport() {
        let t = transcribe("casa", Algorithm::Silva).unwrap();
        assert_eq!(t.syllables, "ca-sa");
        assert_eq!(t.ipa, "ˈka.za");
    }
}
