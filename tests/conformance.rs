//! End-to-end conformance tests
//!
//! Exercises the full pipeline over the documented scenario words and the
//! pipeline invariants, for both syllabification algorithms.

use std::path::Path;

use ptbr_g2p::resources::{HomographTable, PrefixTable};
use ptbr_g2p::{transcribe, Algorithm, StressDetector};

const WORDS: &[&str] = &[
    "chocolate",
    "porque",
    "muito",
    "arroz",
    "casa",
    "saúde",
    "telefone",
    "segundo",
    "caixa",
    "piano",
    "quem",
    "jardim",
];

fn stress(word: &str) -> isize {
    StressDetector::new(word).stress_vowel()
}

#[test]
fn scenario_chocolate() {
    let t = transcribe("chocolate", Algorithm::Silva).unwrap();
    assert_eq!(t.syllables, "cho-co-la-te");
    assert_eq!(t.annotated, "cho-co-[la]-te");
    assert_eq!(t.ipa, "ʃo.ko.ˈla.ʧɪ");
}

#[test]
fn scenario_homograph_molho() {
    for algo in [Algorithm::Silva, Algorithm::Ceci] {
        let t = transcribe("molho", algo).unwrap();
        assert_eq!(t.ipa, "ˈmo.ʎʊ, ˈmɔ.ʎʊ");
    }
}

#[test]
fn scenario_porque() {
    assert_eq!(stress("porque"), 5);
    let t = transcribe("porque", Algorithm::Silva).unwrap();
    assert_eq!(t.syllables, "por-que");
    assert_eq!(t.annotated, "por-[que]");
}

#[test]
fn scenario_quem() {
    assert_eq!(stress("quem"), 2);
}

#[test]
fn scenario_muito() {
    let t = transcribe("muito", Algorithm::Silva).unwrap();
    assert_eq!(t.syllables, "mui-to");
    // nasalised i in the first syllable
    assert_eq!(t.ipa, "ˈmu\u{129}.tʊ");
}

#[test]
fn scenario_arroz() {
    let word = "arroz";
    assert_eq!(stress(word), word.chars().count() as isize - 2);
    let t = transcribe(word, Algorithm::Silva).unwrap();
    assert_eq!(t.ipa, "a.ˈxɔs");
    // the CECI separation triggers the closed-o exception
    let t = transcribe(word, Algorithm::Ceci).unwrap();
    assert_eq!(t.syllables, "ar-roz");
    assert_eq!(t.ipa, "a.ˈxos");
}

#[test]
fn scenario_unmatched_grapheme_is_kept() {
    let t = transcribe("kiwi", Algorithm::Silva).unwrap();
    assert!(t.ipa.contains('k'), "k vanished from {}", t.ipa);
}

#[test]
fn invariant_syllables_concatenate_to_word() {
    for algo in [Algorithm::Silva, Algorithm::Ceci] {
        for word in WORDS {
            let t = transcribe(word, algo).unwrap();
            assert_eq!(
                t.syllables.replace('-', ""),
                *word,
                "identity broken for {} with {}",
                word,
                algo.code()
            );
        }
    }
}

#[test]
fn invariant_stress_lands_on_a_vowel() {
    for word in WORDS {
        let s = stress(word);
        let n = word.chars().count() as isize;
        assert!(s == -1 || (0..n).contains(&s), "stress out of range for {}", word);
        if s >= 0 {
            let c = word.chars().nth(s as usize).unwrap();
            assert!(
                "aeiouáéíóúâêôàãõü".contains(c),
                "stress of {} landed on {:?}",
                word,
                c
            );
        }
    }
}

#[test]
fn invariant_exactly_one_stress_marker() {
    for algo in [Algorithm::Silva, Algorithm::Ceci] {
        for word in WORDS {
            let t = transcribe(word, algo).unwrap();
            assert_eq!(
                t.ipa.matches('ˈ').count(),
                1,
                "stress markers off for {} with {}",
                word,
                algo.code()
            );
        }
    }
}

#[test]
fn invariant_dot_count_matches_hyphen_count() {
    for algo in [Algorithm::Silva, Algorithm::Ceci] {
        for word in WORDS {
            let t = transcribe(word, algo).unwrap();
            assert_eq!(
                t.ipa.matches('.').count(),
                t.syllables.matches('-').count(),
                "separator counts diverge for {} with {}",
                word,
                algo.code()
            );
        }
    }
}

#[test]
fn invariant_resource_files_reload_identically() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let prefixes_path = root.join("resources/prefixes.txt");
    let homographs_path = root.join("resources/homographs_heterophones.txt");

    let a = PrefixTable::load(&prefixes_path).unwrap();
    let b = PrefixTable::load(&prefixes_path).unwrap();
    assert_eq!(a.entries(), b.entries());

    let a = HomographTable::load(&homographs_path).unwrap();
    let b = HomographTable::load(&homographs_path).unwrap();
    assert_eq!(a.len(), b.len());
    assert_eq!(a.get("molho"), b.get("molho"));
    assert_eq!(a.get("molho"), Some("ˈmo.ʎʊ|ˈmɔ.ʎʊ"));
}

#[test]
fn invariant_first_prefix_in_file_order_wins() {
    let table = PrefixTable::parse("e-co\tɛ-kɔ\ne-co-lo-gi\tɛ-kɔ-lo-ʒi\n").unwrap();
    let hit = table.find("e-co-lo-gi-a").unwrap();
    assert_eq!(hit.0, "e-co");
}

#[test]
fn fault_recovery_yields_single_syllable() {
    // no vowel: the separator faults and the word is kept whole
    let t = transcribe("xyz", Algorithm::Silva).unwrap();
    assert_eq!(t.syllables, "xyz");
    assert_eq!(t.ipa.matches('ˈ').count(), 1);
}
