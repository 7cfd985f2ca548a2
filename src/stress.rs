//! Tonic vowel detection
//!
//! Locates the stressed vowel of an orthographic word with an ordered
//! cascade of rules over the word's final letters, then derives the stress
//! syllable interval in the hyphenated and phonetic forms.
//!
//! Rule order is load-bearing: the first matching rule wins, and several
//! later rules only make sense because an earlier rule already claimed the
//! accented words.

use crate::letters::Letters;

/// Accented vowels that pin the stress directly (`ü` is deliberately
/// absent: a diaeresis never marks stress).
const ACCENTED: &[char] = &['á', 'é', 'í', 'ó', 'ú', 'â', 'ê', 'ô', 'à', 'ã', 'õ'];

/// The five plain vowel letters used by the suffix rules.
const PLAIN: &[char] = &['a', 'e', 'i', 'o', 'u'];

const SEMI: &[char] = &['i', 'u'];

/// Consonant letters accepted between the nasal coda and the final vowel
/// in rule 16.
const RULE16_CONSONANTS: &[char] = &[
    'b', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'ñ', 'p', 'q', 'r', 's', 't', 'v', 'x', 'y',
    'z',
];

/// One position of a suffix pattern.
enum Pat {
    In(&'static [char]),
    NotIn(&'static [char]),
    Lit(char),
}

/// Stress detector for a single lowercase word.
pub struct StressDetector {
    word: Letters,
}

impl StressDetector {
    pub fn new(word: &str) -> Self {
        Self {
            word: Letters::new(&word.to_lowercase()),
        }
    }

    /// True when the last `pattern.len()` characters match `pattern`.
    fn suffix(&self, pattern: &[Pat]) -> bool {
        let n = self.word.len();
        if n < pattern.len() {
            return false;
        }
        let start = n - pattern.len();
        pattern.iter().enumerate().all(|(k, p)| {
            let c = self.word.at((start + k) as isize).unwrap();
            match p {
                Pat::In(set) => set.contains(&c),
                Pat::NotIn(set) => !set.contains(&c),
                Pat::Lit(l) => c == *l,
            }
        })
    }

    /// Positions of the plain vowels `a e i o u` in the word.
    fn plain_vowels(&self) -> Vec<usize> {
        self.word.positions(|c| PLAIN.contains(&c))
    }

    /// Position of the tonic vowel, or `-1` when no rule applies.
    ///
    /// The cascade mirrors the stress chapter of Silva (2011): accent mark
    /// first, then the terminal-letter patterns, then two literal words,
    /// then the penultimate-vowel default.
    pub fn stress_vowel(&self) -> isize {
        use Pat::{In, Lit, NotIn};

        let n = self.word.len() as isize;

        // Rule 1: an accented vowel is the tonic vowel.
        if let Some(pos) = self
            .word
            .chars()
            .iter()
            .position(|c| ACCENTED.contains(c))
        {
            return pos as isize;
        }

        // Rule 2: final r, l, z, x or n.
        if self.suffix(&[In(&['r', 'l', 'z', 'x', 'n'])]) {
            return n - 2;
        }

        // Rule 3: final -im, -om, -um.
        if self.suffix(&[In(&['i', 'o', 'u']), Lit('m')]) {
            return n - 2;
        }

        // Rule 4: final -ins, -ons, -uns.
        if self.suffix(&[In(&['i', 'o', 'u']), Lit('n'), Lit('s')]) {
            return n - 3;
        }

        // Rule 5: final -qui, -gui (also with diaeresis).
        if self.suffix(&[In(&['q', 'g']), In(&['u', 'ü']), Lit('i')]) {
            return n - 1;
        }

        // Rule 6: final -quis, -guis.
        if self.suffix(&[In(&['q', 'g']), In(&['u', 'ü']), Lit('i'), Lit('s')]) {
            return n - 2;
        }

        // Rule 7: falling diphthong at the end, or a lone final semivowel.
        if self.suffix(&[In(PLAIN), In(SEMI)]) {
            return n - 2;
        }
        if self.suffix(&[NotIn(PLAIN), In(SEMI)]) {
            return n - 1;
        }

        // Rule 8: falling diphthong + s.
        if self.suffix(&[In(PLAIN), In(SEMI), Lit('s')]) {
            return n - 3;
        }

        // Rule 9: consonant + semivowel + s.
        if self.suffix(&[NotIn(PLAIN), In(SEMI), Lit('s')]) {
            return n - 2;
        }

        // Rule 10: the conjunction "porque" is oxytone.
        if self.word.to_string() == "porque" {
            return n - 1;
        }

        // Rule 11: vowel/consonant + -que, -gue.
        if self.suffix(&[In(PLAIN), In(&['q', 'g']), Lit('u'), Lit('e')]) {
            return n - 4;
        }
        if self.suffix(&[NotIn(PLAIN), In(&['q', 'g']), Lit('u'), Lit('e')]) {
            return n - 5;
        }

        // Rule 12: vowel/consonant + -ques, -gues.
        if self.suffix(&[In(PLAIN), In(&['q', 'g']), Lit('u'), Lit('e'), Lit('s')]) {
            return n - 5;
        }
        if self.suffix(&[NotIn(PLAIN), In(&['q', 'g']), Lit('u'), Lit('e'), Lit('s')]) {
            return n - 6;
        }

        // Rule 13: vowel + semivowel + vowel.
        if self.suffix(&[In(PLAIN), In(SEMI), In(PLAIN)]) {
            return n - 3;
        }

        // Rule 14: diphthong + consonant + vowel, not after q/g.
        if self.suffix(&[NotIn(&['q', 'g']), In(PLAIN), In(SEMI), NotIn(PLAIN), In(PLAIN)]) {
            return n - 4;
        }

        // Rule 15: rule 14 + final s.
        if self.suffix(&[
            NotIn(&['q', 'g']),
            In(PLAIN),
            In(SEMI),
            NotIn(PLAIN),
            In(PLAIN),
            Lit('s'),
        ]) {
            return n - 5;
        }

        // Rule 16: diphthong + nasal coda + consonant + final a/e/o.
        if self.suffix(&[
            In(PLAIN),
            In(SEMI),
            Lit('n'),
            In(RULE16_CONSONANTS),
            In(&['a', 'e', 'o']),
        ]) {
            return n - 4;
        }

        // Rule 17: rising-diphthong penultimate vowel; the stress falls on
        // the vowel before it unless q/g precedes the pair.
        let vowels = self.plain_vowels();
        if vowels.len() >= 2 {
            let k = vowels[vowels.len() - 2] as isize;
            let at_k = self.word.at(k);
            let before = self.word.at(k - 1);
            let after = self.word.at(k + 1);
            if matches!(at_k, Some('i') | Some('u'))
                && before.is_some_and(|c| PLAIN.contains(&c))
                && !after.is_some_and(|c| PLAIN.contains(&c))
            {
                if k - 2 < 0 {
                    return 0;
                }
                if !matches!(self.word.at(k - 2), Some('q') | Some('g')) {
                    return k - 1;
                }
            }
        }

        // Rule 18: "quem" is stressed on the e.
        if self.word.to_string() == "quem" {
            return n - 2;
        }

        // Rule 19: default to the penultimate vowel.
        let vowels = self.plain_vowels();
        if vowels.len() >= 2 {
            return vowels[vowels.len() - 2] as isize;
        }

        -1
    }

    /// Position of the tonic vowel inside the hyphenated form, or `-1`.
    pub fn stress_vowel_hyphenated(&self, syllables: &str) -> isize {
        let syl = Letters::new(syllables);
        let stress = self.stress_vowel();
        let mut a: isize = 0;
        let mut b: isize = 0;
        while a < syl.len() as isize {
            if syl.at(a) != self.word.at(b) {
                a += 1;
            }
            if stress == b {
                return a;
            }
            a += 1;
            b += 1;
        }
        -1
    }

    /// Stress syllable bounds over a syllable list, as offsets into the
    /// concatenated (unhyphenated) word.
    pub fn stress_syllable(&self, syllables: &[String]) -> (usize, usize) {
        let stress = self.stress_vowel();
        let mut a = 0usize;
        let mut b = 0usize;
        for syl in syllables {
            let len = syl.chars().count();
            b += len;
            if stress >= a as isize && stress < b as isize {
                return (a, b);
            }
            a += len;
        }
        (0, syllables[0].chars().count())
    }

    /// Stress syllable bounds `(a, b)` over the hyphenated form: `a` is the
    /// first character of the stressed syllable, `b` the hyphen after it
    /// (or the end of the string).
    pub fn stress_syllable_hyphenated(&self, syllables: &str) -> (usize, usize) {
        let syl = Letters::new(syllables);
        let hyphens = syl.positions(|c| c == '-');
        let stress = self.stress_vowel_hyphenated(syllables);
        let mut tmp1 = 0usize;
        let mut tmp2 = syl.len();
        for &h in &hyphens {
            if (h as isize) < stress {
                tmp1 = h;
            } else {
                tmp2 = h;
                break;
            }
        }
        if tmp1 != 0 {
            tmp1 += 1;
        }
        (tmp1, tmp2)
    }

    /// Project the stress syllable onto the phonetic form by aligning the
    /// hyphen lists ordinally. When the two forms disagree on syllable
    /// count the whole phonetic string is returned.
    pub fn stress_phonetic_syllable(&self, syllables: &str, phonemes: &str) -> (usize, usize) {
        let syl_l = Letters::new(syllables);
        let pho_l = Letters::new(phonemes);

        let mut syl: Vec<isize> = syl_l.positions(|c| c == '-').iter().map(|&p| p as isize).collect();
        syl.push(-1);
        syl.push(syl_l.len() as isize);
        syl.sort_unstable();

        let mut pho: Vec<isize> = pho_l.positions(|c| c == '-').iter().map(|&p| p as isize).collect();
        pho.push(-1);
        pho.push(pho_l.len() as isize);
        pho.sort_unstable();

        let (a, b) = self.stress_syllable_hyphenated(syllables);
        if syl.len() == pho.len() {
            for k in 0..syl.len() - 1 {
                if syl[k] <= a as isize && syl[k + 1] >= b as isize {
                    return ((pho[k] + 1) as usize, pho[k + 1] as usize);
                }
            }
        }
        (0, pho_l.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stress(word: &str) -> isize {
        StressDetector::new(word).stress_vowel()
    }

    #[test]
    fn test_accented_vowel_wins() {
        assert_eq!(stress("sofá"), 3);
        assert_eq!(stress("árvore"), 0);
        assert_eq!(stress("português"), 7);
    }

    #[test]
    fn test_final_consonant_rules() {
        // final r/l/z/x/n
        assert_eq!(stress("amor"), 2);
        assert_eq!(stress("arroz"), 3);
        // final -im/-om/-um
        assert_eq!(stress("jardim"), 4);
        // final -ins/-ons/-uns
        assert_eq!(stress("jardins"), 4);
    }

    #[test]
    fn test_qui_gui_rules() {
        assert_eq!(stress("aqui"), 3);
        assert_eq!(stress("aquis"), 3);
    }

    #[test]
    fn test_diphthong_rules() {
        // vowel + semivowel at the end
        assert_eq!(stress("degrau"), 4);
        assert_eq!(stress("degraus"), 4);
    }

    #[test]
    fn test_literal_words() {
        assert_eq!(stress("porque"), 5);
        assert_eq!(stress("quem"), 2);
    }

    #[test]
    fn test_penultimate_default() {
        assert_eq!(stress("chocolate"), 6);
        assert_eq!(stress("casa"), 1);
        assert_eq!(stress("muito"), 1);
    }

    #[test]
    fn test_no_rule_applies() {
        assert_eq!(stress("sol"), 1); // final l, rule 2
        assert_eq!(stress("x"), -1);
        assert_eq!(stress("pss"), -1);
    }

    #[test]
    fn test_stress_index_is_vowel() {
        for word in ["chocolate", "porque", "quem", "muito", "arroz", "jardim"] {
            let s = stress(word);
            assert!(s >= 0);
            let c = word.chars().nth(s as usize).unwrap();
            assert!(
                "aeiouáéíóúâêôàãõü".contains(c),
                "stress of {} landed on {}",
                word,
                c
            );
        }
    }

    #[test]
    fn test_stress_vowel_hyphenated() {
        let d = StressDetector::new("chocolate");
        assert_eq!(d.stress_vowel_hyphenated("cho-co-la-te"), 8);
        let d = StressDetector::new("porque");
        assert_eq!(d.stress_vowel_hyphenated("por-que"), 6);
    }

    #[test]
    fn test_stress_syllable_hyphenated() {
        let d = StressDetector::new("chocolate");
        assert_eq!(d.stress_syllable_hyphenated("cho-co-la-te"), (7, 9));
        let d = StressDetector::new("porque");
        assert_eq!(d.stress_syllable_hyphenated("por-que"), (4, 7));
        // unknown stress collapses to the first syllable
        let d = StressDetector::new("pss");
        assert_eq!(d.stress_syllable_hyphenated("pss"), (0, 3));
    }

    #[test]
    fn test_stress_syllable_list() {
        let d = StressDetector::new("cachorro");
        let syls: Vec<String> = ["ca", "cho", "rro"].iter().map(|s| s.to_string()).collect();
        assert_eq!(d.stress_syllable(&syls), (2, 5));
    }

    #[test]
    fn test_phonetic_projection() {
        let d = StressDetector::new("chocolate");
        assert_eq!(
            d.stress_phonetic_syllable("cho-co-la-te", "ʃo-ko-la-ʧɪ"),
            (6, 8)
        );
        // diverging hyphen counts fall back to the whole string
        assert_eq!(
            d.stress_phonetic_syllable("cho-co-la-te", "ʃokolaʧɪ"),
            (0, 8)
        );
    }
}
