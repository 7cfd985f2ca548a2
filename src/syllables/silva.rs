//! Silva2011 syllable separation
//!
//! A rule cascade over a working copy of the word, parameterised by the
//! stress vowel position. Each iteration inspects the window around the
//! current vowel pointer and fires the first matching rule, which ends in
//! one of the case transitions from [`cases`](super::cases). Rule order is
//! rigid; reordering guards changes separations silently.
//!
//! A cursor escaping the working buffer is reported as
//! [`Error::SyllabifierFault`] and recovered by the transcriber, which then
//! treats the word as a single syllable.

use crate::error::{Error, Result};
use crate::letters::Letters;
use crate::syllables::cases::{Case, State};

/// Full vowels.
const V: &[char] = &[
    'a', 'e', 'o', 'á', 'é', 'í', 'ó', 'ú', 'ã', 'õ', 'â', 'ê', 'ô', 'à', 'ü',
];

/// Semivowels.
const G: &[char] = &['i', 'u'];

/// Stop consonants.
const CO: &[char] = &['p', 't', 'b', 'd', 'c', 'g', 'q'];

/// Fricative consonants.
const CF: &[char] = &['f', 'v', 's', 'ç', 'z', 'j', 'x'];

/// Liquid consonants.
const CL: &[char] = &['l', 'r'];

/// Nasal consonants.
const CN: &[char] = &['m', 'n'];

/// Orthographic sequences split into coda + onset across two syllables.
const OS: &[&str] = &[
    "bp", "bt", "bd", "bc", "bm", "bn", "bs", "bz", "bj", "bv", "pt", "ps", "pç", "pc", "dm",
    "dv", "dj", "tm", "ct", "cn", "gm", "mn", "ft",
];

fn v(c: char) -> bool {
    V.contains(&c)
}

fn g(c: char) -> bool {
    G.contains(&c)
}

fn co(c: char) -> bool {
    CO.contains(&c)
}

fn cf(c: char) -> bool {
    CF.contains(&c)
}

fn cl(c: char) -> bool {
    CL.contains(&c)
}

fn cn(c: char) -> bool {
    CN.contains(&c)
}

/// Any consonant letter.
fn cons(c: char) -> bool {
    co(c) || cf(c) || cl(c) || cn(c)
}

/// The Silva2011 syllable separator.
pub struct Silva2011Syllabifier {
    word: Letters,
    stress: isize,
}

impl Silva2011Syllabifier {
    /// `stress` is the stress vowel position from the stress detector
    /// (`-1` when unknown).
    pub fn new(word: &str, stress: isize) -> Self {
        Self {
            word: Letters::new(&word.to_lowercase()),
            stress,
        }
    }

    fn fault(&self) -> Error {
        Error::SyllabifierFault {
            word: self.word.to_string(),
        }
    }

    /// Separate the word into syllables.
    pub fn separate(&self) -> Result<Vec<String>> {
        if self.word.len() == 1 {
            return Ok(vec![self.word.to_string()]);
        }

        let mut st = State::new(self.word.clone(), self.stress);

        while st.p0 < st.w.len() {
            match self.step(&st)? {
                Some(case) => st.apply(case),
                None => st.p0 += 1,
            }
        }

        Ok(split_hyphenated(&st.w))
    }

    /// Character at `i` with wrap-around look-behind; anything else out of
    /// range is a fault.
    fn ch(&self, w: &Letters, i: isize) -> Result<char> {
        w.at(i).ok_or_else(|| self.fault())
    }

    /// Evaluate the cascade once and pick the transition to run, if any.
    #[allow(clippy::if_same_then_else)]
    fn step(&self, st: &State) -> Result<Option<Case>> {
        let w = &st.w;
        let n = w.len();
        let p0 = st.p0;
        let pvt = st.pvt;
        let w0 = w.at(p0 as isize).unwrap_or(' ');

        // New rule 1: a splittable cluster sitting at the cursor.
        if OS.contains(&w.span(p0 as isize, p0 as isize + 2).as_str()) {
            if !cons(self.ch(w, p0 as isize + 2)?) {
                return Ok(Some(Case::Case9));
            }
            return Ok(Some(Case::Case10));
        }

        let pk = *st.p.get(st.k).ok_or_else(|| self.fault())?;
        let at = |i: isize| -> Result<char> { self.ch(w, i) };
        let c1 = if pk + 1 < n { w.at(pk as isize + 1).unwrap() } else { ' ' };
        let c2 = if pk + 2 < n { w.at(pk as isize + 2).unwrap() } else { ' ' };
        let c3 = if pk + 3 < n { w.at(pk as isize + 3).unwrap() } else { ' ' };
        let ck = w.at(pk as isize).ok_or_else(|| self.fault())?;
        let prev = w.span(pk as isize - 1, pk as isize + 1);

        // New rule 2: vowel/glide + glide + vowel/glide stays a diphthong;
        // the break goes after it.
        if pk + 2 < n && (v(ck) || g(ck)) && g(c1) && (v(c2) || g(c2)) {
            return Ok(Some(Case::Case1));
        }

        // Rule 1: hiatus of two full vowels.
        if pk + 1 < n && v(w0) && !matches!(ck, 'ã' | 'õ') && v(c1) && !g(c1) {
            return Ok(Some(Case::Case1));
        }

        // Rule 2: vowel + two consonants + stop.
        if pk + 3 < n && v(w0) && cons(c1) && cons(c2) && co(c3) {
            return Ok(Some(Case::Case1));
        }

        // Rule 3: vowel + coda candidate + consonant.
        if pk + 2 < n && v(w0) && (g(c1) || cn(c1) || matches!(c1, 's' | 'r' | 'l' | 'x')) && cons(c2)
        {
            if c1 == 'i' && cn(c2) {
                return Ok(Some(Case::Case1));
            }
            if !matches!(c2, 's' | 'h') && c1 != c2 {
                return Ok(Some(Case::Case2));
            }
            if pk + 3 < n && cn(c1) && c2 == 's' && !v(c3) {
                return Ok(Some(Case::Case7));
            }
            if c1 == c2 || c2 == 'h' {
                return Ok(Some(Case::Case1));
            }
            if pk + 3 < n && c2 == 's' && ((cons(c3) && c3 != 's') || !(cons(c3) || v(c3))) {
                return Ok(Some(Case::Case7));
            }
            return Ok(Some(Case::Case2));
        }

        // Rule 4: vowel + obstruent pair + vowel.
        if pk + 3 < n
            && v(w0)
            && (co(c1) || cf(c1) || matches!(c1, 'g' | 'p'))
            && (co(c2) || cf(c2) || cn(c2) || c2 == 'ç')
            && (v(c3) || g(c3))
        {
            return Ok(Some(Case::Case1));
        }

        // Rule 5: vowel + consonant + vowel-like.
        if pk + 2 < n && v(w0) && cons(c1) && (v(c2) || g(c2) || cl(c2) || c2 == 'h') {
            return Ok(Some(Case::Case1));
        }

        // Rule 6: vowel + glide + s + stop.
        if pk + 3 < n && v(w0) && g(c1) && c2 == 's' && co(c3) {
            return Ok(Some(Case::Case5));
        }

        // Rule 7: onset consonant + vowel + consonant + vowel.
        if pk + 2 < n
            && !v(w0)
            && {
                let b = at(pk as isize - 1)?;
                cons(b) || matches!(b, 'u' | 'ü' | 'q')
            }
            && cons(c1)
            && v(c2)
        {
            return Ok(Some(Case::Case3));
        }

        // Rule 8: glide + r + consonant.
        if pk + 3 < n && !v(w0) && cons(at(pk as isize - 1)?) && g(c1) && c2 == 'r' && cons(c3) {
            return Ok(Some(Case::Case3));
        }

        // Rule 9: glide/nasal + s + stop.
        if pk + 3 < n
            && !v(w0)
            && cons(at(pk as isize - 1)?)
            && (g(c1) || cn(c1))
            && c2 == 's'
            && co(c3)
        {
            return Ok(Some(Case::Case7));
        }

        // Rule 10: vowel pair with a consonant after it; the elaborate
        // sub-ladder decides between diphthong and hiatus.
        if pk + 3 < n
            && !v(w0)
            && {
                let b = at(pk as isize - 1)?;
                cons(b) || g(b)
            }
            && matches!(c1, 'i' | 'u' | 'e' | 'o')
            && pk as isize + 1 != pvt
            && ck != c1
            && cons(c2)
            && (cons(c3) || v(c3))
            && c2 != 's'
        {
            if pk as isize == pvt && c2 != 'n' && !cons(c3) {
                return Ok(Some(Case::Case4));
            }
            if !matches!(at(pk as isize - 1)?, 'q' | 'g') && ck == 'u' && c1 == 'i' && c2 != 'n' {
                return Ok(Some(Case::Case1));
            }
            if pk as isize != pvt && c1 == 'i' && c2 != 'n' {
                return Ok(Some(Case::Case2));
            }
            if (c1 != 'i' && (cn(c2) || c2 == 'r') && !(c3 == 'h' || c3 == at(pvt)?))
                || (matches!(ck, 'a' | 'e' | 'o')
                    && matches!(c1, 'a' | 'e' | 'o')
                    && cn(c2)
                    && !matches!(c3, 'h' | 's')
                    && {
                        let c4 = at(pk as isize + 4)?;
                        v(c4) || cons(c4)
                    })
            {
                if prev == "gu" && v(c1) && cn(c2) {
                    return Ok(Some(Case::Case5));
                }
                if prev == "gu" && v(c1) && cl(c2) {
                    return Ok(Some(Case::Case2));
                }
                return Ok(Some(Case::Case1));
            }
            if g(ck) && matches!(c1, 'a' | 'e' | 'o') && cn(c2) {
                return Ok(Some(Case::Case1));
            }
            if cn(c2) {
                return Ok(Some(Case::Case5));
            }
            return Ok(Some(Case::Case4));
        }

        // Rule 11: consonant + vowel + glide + vowel.
        if pk + 2 < n && !v(w0) && cons(at(pk as isize - 1)?) && g(c1) && v(c2) {
            return Ok(Some(Case::Case4));
        }

        // Rule 12: glide-initial hiatus after a non-velar onset.
        if pk + 3 < n
            && !v(w0)
            && {
                let b = at(pk as isize - 1)?;
                cons(b) && !matches!(b, 'q' | 'g')
            }
            && g(ck)
            && (v(c1) || c1 == 'i')
            && ck != c1
            && cons(c2)
            && v(c3)
        {
            let b = at(pk as isize - 1)?;
            if matches!(b, 'q' | 'g')
                && ((c2 == 'ç' && matches!(c3, 'ã' | 'õ')) || (b == 'q' && v(c1)))
            {
                return Ok(Some(Case::Case2));
            }
            if pk as isize + 1 == pvt || (b == 'r' && pk as isize + 3 == pvt) {
                return Ok(Some(Case::Case1));
            }
            return Ok(Some(Case::Case8));
        }

        // Rule 13: h/l/r in third position (lh, nh, rr, guerra-like).
        if pk + 3 < n
            && !v(w0)
            && (cons(at(pk as isize - 1)?) || matches!(prev.as_str(), "qu" | "qü" | "gu" | "gü"))
            && (v(c1) || cl(c1) || cn(c1) || matches!(c1, 'c' | 'x'))
            && matches!(c2, 'h' | 'l' | 'r')
            && (v(c3) || matches!(c3, 'h' | 'l' | 'r'))
        {
            if c1 == c2 || matches!(c1, 'c' | 'l') || w.span(pk as isize + 1, pk as isize + 3) == "nh"
            {
                return Ok(Some(Case::Case1));
            }
            return Ok(Some(Case::Case4));
        }

        // Rule 14: liquid/nasal/glide + s coda.
        if pk + 2 < n
            && !v(w0)
            && cons(at(pk as isize - 1)?)
            && (cl(c1) || cn(c1) || c1 == 'i')
            && c2 == 's'
        {
            if pk + 3 == n {
                return Ok(Some(Case::Case6));
            }
            if pk as isize == pvt || (pk + 3 < n && v(c3)) {
                return Ok(Some(Case::Case4));
            }
            return Ok(Some(Case::Case5));
        }

        // Rule 15: vowel + vowel + vowel-like, not after qu/gu.
        if pk + 2 < n && !v(w0) && v(c1) && (v(c2) || g(c2)) && !matches!(prev.as_str(), "qu" | "gu")
        {
            if pk + 3 < n && pk as isize == pvt && g(c1) && cons(c3) {
                return Ok(Some(Case::Case2));
            }
            return Ok(Some(Case::Case1));
        }

        // Rule 16: non-u vowel + vowel + nasal.
        if pk + 2 < n && !v(w0) && ck != 'u' && cons(at(pk as isize - 1)?) && v(c1) && cn(c2) {
            return Ok(Some(Case::Case3));
        }

        // Rule 17: i after an accented vowel two or three back.
        if pk + 1 < n
            && pk >= 2
            && !v(w0)
            && ck == 'i'
            && (matches!(at(pk as isize - 2)?, 'á' | 'é' | 'í' | 'ó' | 'ú')
                || matches!(at(pk as isize - 3)?, 'á' | 'é' | 'í' | 'ó' | 'ú'))
            && cons(at(pk as isize - 1)?)
            && matches!(c1, 'a' | 'o')
        {
            return Ok(Some(Case::Case1));
        }

        // Rule 18: nasal vowel + e/o closes the word without a break.
        if pk + 1 < n && !v(w0) && matches!(ck, 'ã' | 'õ') && cons(at(pk as isize - 1)?)
            && matches!(c1, 'e' | 'o')
        {
            return Ok(Some(Case::Case6));
        }

        // Rule 20 (evaluated before rule 19, as renumbered in the cascade):
        // vowel + vowel + nasal + consonant.
        if pk + 3 < n && !v(w0) && cons(at(pk as isize - 1)?) && v(c1) && cn(c2) && cons(c3) {
            return Ok(Some(Case::Case7));
        }

        // Rule 19: the next vowel is the tonic one.
        if pk + 1 < n
            && !v(w0)
            && cons(at(pk as isize - 1)?)
            && pk as isize + 1 == pvt
            && !matches!(c1, 'i' | 'u')
            && !matches!(prev.as_str(), "gu" | "qu")
        {
            if pk + 3 == n
                && matches!(prev.as_str(), "gu" | "qu")
                && v(c1)
                && cons(at(pk as isize + 2)?)
            {
                return Ok(Some(Case::Case6));
            }
            if pk + 2 < n && matches!(prev.as_str(), "gu" | "qu") && v(c1) && (cons(c2) || g(c2)) {
                return Ok(Some(Case::Case5));
            }
            return Ok(Some(Case::Case3));
        }

        // Rule 21: onset cluster ahead.
        if pk + 3 < n
            && !v(w0)
            && (co(c1) || matches!(c1, 'f' | 'v' | 'g'))
            && (cl(c2) || co(c2))
            && (v(c3) || g(c3))
        {
            if matches!(c1, 'f' | 'p') && matches!(c2, 't' | 'ç') {
                return Ok(Some(Case::Case2));
            }
            return Ok(Some(Case::Case1));
        }

        // Rule 22: vowel + vowel with the word ending or a consonant after.
        if pk + 1 < n
            && pk >= 2
            && !v(w0)
            && (cons(at(pk as isize - 1)?) || matches!(prev.as_str(), "qu" | "gu"))
            && v(c1)
            && (pk + 2 == n || cons(at(pk as isize + 2)?))
        {
            if (matches!(ck, 'i' | 'u' | 'í' | 'ú' | 'é' | 'ê') && pk as isize == pvt && c1 != 'u')
                || (pk + 3 < n && !g(ck) && at(pk as isize + 2)? == 's' && !(cons(c3) || v(c3)))
            {
                return Ok(Some(Case::Case3));
            }
            if pk + 2 == n && ck == 'i' && pk as isize == pvt && c1 == 'u' {
                return Ok(Some(Case::Case4));
            }
            if pk + 3 < n
                && ((g(ck) && pk as isize + 1 != pvt && !(cons(c2) || v(c2)))
                    || (c2 == 's' && !(cons(c3) || v(c3)))
                    || (pk as isize != pvt
                        && pk as isize + 1 != pvt
                        && c2 == 's'
                        && pk + 3 == n))
            {
                return Ok(Some(Case::Case2));
            }
            if pk + 3 < n && matches!(prev.as_str(), "qu" | "gu") && cons(c2) && (v(c3) || g(c3)) {
                return Ok(Some(Case::Case2));
            }
            if pk + 2 == n && matches!(prev.as_str(), "qu" | "gu") && (v(c1) || g(c1)) {
                return Ok(Some(Case::Case6));
            }
            if pk + 3 == n && matches!(c1, 'o' | 'u') && pk as isize + 1 != pvt
                && at(pk as isize + 2)? == 's'
            {
                return Ok(Some(Case::Case7));
            }
            if ck == 'u' && matches!(c1, 'e' | 'ê' | 'é')
                && matches!(at(pk as isize + 2)?, 'n' | 's' | 'i' | 'l')
            {
                return Ok(Some(Case::Case5));
            }
            return Ok(Some(Case::Case2));
        }

        // Rule 23: vowel + consonant + consonant.
        if pk + 2 < n
            && !v(w0)
            && (cons(at(pk as isize - 1)?) || w.span(pk as isize - 2, pk as isize - 1) == "qu")
            && cons(c1)
            && cons(c2)
        {
            if c1 == c2 {
                return Ok(Some(Case::Case1));
            }
            if c1 == 's' && c2 != 's' {
                return Ok(Some(Case::Case2));
            }
            if pk + 3 < n && c2 == 's' && co(c3) {
                return Ok(Some(Case::Case5));
            }
            return Ok(Some(Case::Case2));
        }

        // Rule 24: consonant + glide follows.
        if pk + 2 < n && !v(w0) && cons(c1) && g(c2) {
            return Ok(Some(Case::Case1));
        }

        // Rule 26: glide + nasal after qu/gu or a consonant.
        if pk + 2 < n
            && !v(w0)
            && (cons(at(pk as isize - 1)?) || matches!(prev.as_str(), "qu" | "qü" | "gu" | "gü"))
            && g(c1)
            && cn(c2)
        {
            if cons(at(pk as isize + 3)?) {
                return Ok(Some(Case::Case5));
            }
            return Ok(Some(Case::Case4));
        }

        // Rule 27: two consonants back, glide + consonant ahead.
        if pk + 2 < n
            && !v(w0)
            && cons(at(pk as isize - 1)?)
            && cons(at(pk as isize - 2)?)
            && g(c1)
            && cons(c2)
        {
            return Ok(Some(Case::Case1));
        }

        // Rule 28: qu/gu + vowel.
        if pk + 2 < n && !v(w0) && matches!(prev.as_str(), "qu" | "qü" | "gu" | "gü") && v(c1) {
            if pk + 3 < n && cons(c2) && cons(c3) {
                return Ok(Some(Case::Case5));
            }
            if pk + 3 < n && cons(c2) && (v(c3) || g(c3)) {
                return Ok(Some(Case::Case4));
            }
            if v(c2) {
                return Ok(Some(Case::Case4));
            }
            if g(c2) {
                return Ok(Some(Case::Case5));
            }
        }

        Ok(None)
    }
}

/// Collapse hyphen runs, drop a trailing hyphen and split.
fn split_hyphenated(w: &Letters) -> Vec<String> {
    let mut collapsed = String::new();
    let mut prev_hyphen = false;
    for &c in w.chars() {
        if c == '-' {
            if !prev_hyphen {
                collapsed.push('-');
            }
            prev_hyphen = true;
        } else {
            collapsed.push(c);
            prev_hyphen = false;
        }
    }
    let trimmed = collapsed.strip_suffix('-').unwrap_or(&collapsed);
    trimmed.split('-').map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::StressDetector;

    fn separate(word: &str) -> Vec<String> {
        let stress = StressDetector::new(word).stress_vowel();
        Silva2011Syllabifier::new(word, stress).separate().unwrap()
    }

    fn joined(word: &str) -> String {
        separate(word).join("-")
    }

    #[test]
    fn test_basic_words() {
        assert_eq!(joined("chocolate"), "cho-co-la-te");
        assert_eq!(joined("casa"), "ca-sa");
        assert_eq!(joined("porque"), "por-que");
    }

    #[test]
    fn test_double_r() {
        assert_eq!(joined("carro"), "ca-rro");
        assert_eq!(joined("arroz"), "a-rroz");
    }

    #[test]
    fn test_diphthongs() {
        assert_eq!(joined("muito"), "mui-to");
        assert_eq!(joined("caixa"), "cai-xa");
        assert_eq!(joined("mais"), "mais");
    }

    #[test]
    fn test_hiatus() {
        assert_eq!(joined("saúde"), "sa-ú-de");
        assert_eq!(joined("joelho"), "jo-e-lho");
        assert_eq!(joined("piano"), "pi-a-no");
    }

    #[test]
    fn test_coda_clusters() {
        assert_eq!(joined("carta"), "car-ta");
        assert_eq!(joined("constante"), "cons-tan-te");
        assert_eq!(joined("apto"), "ap-to");
    }

    #[test]
    fn test_nasal_diphthong_end() {
        assert_eq!(joined("limões"), "li-mões");
    }

    #[test]
    fn test_single_letter() {
        assert_eq!(separate("a"), vec!["a"]);
    }

    #[test]
    fn test_concatenation_identity() {
        for word in [
            "chocolate",
            "porque",
            "muito",
            "arroz",
            "saúde",
            "carro",
            "constante",
            "aqui",
            "segundo",
            "caixa",
        ] {
            assert_eq!(separate(word).concat(), word, "identity broken for {}", word);
        }
    }

    #[test]
    fn test_vowelless_word_faults() {
        let sep = Silva2011Syllabifier::new("xyz", -1);
        assert!(sep.separate().is_err());
    }

    #[test]
    fn test_cluster_rule_fires_then_pointer_escapes() {
        // "ps" is a splittable cluster, so the first iteration inserts a
        // hyphen; the next iteration has no vowel to point at and faults.
        let sep = Silva2011Syllabifier::new("pss", -1);
        assert!(sep.separate().is_err());
    }
}
