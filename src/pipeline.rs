//! Transcription pipeline
//!
//! The top-level entry point: pick a syllabification algorithm, run the
//! stress detector, syllabifier and transcriber, and return the three
//! output strings together.

use crate::error::Result;
use crate::transcriber::G2PTranscriber;

/// Syllabification algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Rule cascade driven by the stress position.
    #[default]
    Silva,
    /// Table-driven finite-state separator.
    Ceci,
}

impl Algorithm {
    /// Parse a selector name, defaulting to the Silva2011 cascade.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ceci" => Algorithm::Ceci,
            _ => Algorithm::Silva,
        }
    }

    /// The selector name.
    pub fn code(&self) -> &'static str {
        match self {
            Algorithm::Silva => "silva",
            Algorithm::Ceci => "ceci",
        }
    }
}

/// Result of transcribing one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    /// IPA with `.` between syllables and `ˈ` before the stressed one.
    pub ipa: String,
    /// Hyphen-joined syllables, e.g. `cho-co-la-te`.
    pub syllables: String,
    /// Hyphenated form with the stressed syllable bracketed, e.g.
    /// `cho-co-[la]-te`.
    pub annotated: String,
}

/// Transcribe a single lowercase word.
pub fn transcribe(word: &str, algorithm: Algorithm) -> Result<Transcription> {
    let transcriber = G2PTranscriber::new(word, algorithm)?;
    Ok(Transcription {
        ipa: transcriber.transcribe(),
        syllables: transcriber.syllables_hyphenated().to_string(),
        annotated: transcriber.syllables_annotated(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!(Algorithm::from_str("silva"), Algorithm::Silva);
        assert_eq!(Algorithm::from_str("CECI"), Algorithm::Ceci);
        assert_eq!(Algorithm::from_str("anything"), Algorithm::Silva);
        assert_eq!(Algorithm::default().code(), "silva");
    }

    #[test]
    fn test_transcribe_triple() {
        let t = transcribe("chocolate", Algorithm::Silva).unwrap();
        assert_eq!(t.ipa, "ʃo.ko.ˈla.ʧɪ");
        assert_eq!(t.syllables, "cho-co-la-te");
        assert_eq!(t.annotated, "cho-co-[la]-te");
    }

    #[test]
    fn test_both_algorithms_produce_output() {
        for algo in [Algorithm::Silva, Algorithm::Ceci] {
            let t = transcribe("chocolate", algo).unwrap();
            assert!(!t.ipa.is_empty(), "empty ipa for {}", algo.code());
        }
    }
}
