//! Case transitions of the Silva2011 separator
//!
//! Every rule of the cascade terminates in one of ten named transitions.
//! A transition inserts a single hyphen at a fixed offset — relative to the
//! current vowel pointer, or to the syllable cursor for the cluster cases —
//! then advances the cursor past the hyphen, recomputes the vowel-position
//! list, re-derives the vowel pointer, and shifts the stress position when
//! the hyphen landed at or before it. `Case6` inserts nothing and only
//! moves the cursor to the end of the word.

use crate::letters::Letters;

/// Letters that count as vowel positions for the separator (full vowels
/// plus the semivowels `i`/`u`).
pub const SEPARATOR_VOWELS: &[char] = &[
    'a', 'e', 'o', 'i', 'u', 'á', 'é', 'í', 'ó', 'ú', 'ã', 'õ', 'â', 'ê', 'ô', 'à', 'ü',
];

/// The closed set of separator transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Case1,
    Case2,
    Case3,
    Case4,
    Case5,
    Case6,
    Case7,
    Case8,
    Case9,
    Case10,
}

/// Mutable separator state threaded through the rule cascade.
pub struct State {
    /// Working copy of the word; hyphens are inserted in place.
    pub w: Letters,
    /// Vowel positions in the current `w`.
    pub p: Vec<usize>,
    /// Start-of-syllable cursor.
    pub p0: usize,
    /// Stress vowel position in the current `w` (`-1` when unknown).
    pub pvt: isize,
    /// Index into `p` of the vowel under consideration.
    pub k: usize,
    /// Hyphens inserted so far.
    pub c: usize,
}

pub fn vowel_positions(w: &Letters) -> Vec<usize> {
    w.positions(|c| SEPARATOR_VOWELS.contains(&c))
}

impl State {
    pub fn new(w: Letters, stress: isize) -> Self {
        let p = vowel_positions(&w);
        Self {
            w,
            p,
            p0: 0,
            pvt: stress,
            k: 0,
            c: 0,
        }
    }

    /// Hyphen offset of `case`, or `None` for the cursor-only `Case6`.
    fn offset(&self, case: Case) -> Option<usize> {
        let pk = self.p[self.k];
        match case {
            Case::Case1 | Case::Case3 | Case::Case8 => Some(pk + 1),
            Case::Case2 | Case::Case4 => Some(pk + 2),
            Case::Case5 | Case::Case7 => Some(pk + 3),
            Case::Case9 => Some(self.p0 + 1),
            Case::Case10 => Some(self.p0 + 2),
            Case::Case6 => None,
        }
    }

    /// Apply `case`: insert the hyphen, move the cursor past it and resync
    /// the vowel pointer and stress position.
    pub fn apply(&mut self, case: Case) {
        let Some(h) = self.offset(case) else {
            // Case6 closes the final syllable without a hyphen.
            self.p0 = self.w.len();
            return;
        };
        let h = h.min(self.w.len());
        self.w.insert(h, '-');
        if (h as isize) <= self.pvt {
            self.pvt += 1;
        }
        self.p = vowel_positions(&self.w);
        self.p0 = h + 1;
        self.k = self.p.iter().filter(|&&v| v < self.p0).count();
        self.c += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(word: &str, stress: isize) -> State {
        State::new(Letters::new(word), stress)
    }

    #[test]
    fn test_case1_splits_after_vowel() {
        let mut st = state("chocolate", 6);
        st.k = 0; // vowel 'o' at 2
        st.apply(Case::Case1);
        assert_eq!(st.w.to_string(), "cho-colate");
        assert_eq!(st.p0, 4);
        assert_eq!(st.k, 1);
        assert_eq!(st.pvt, 7); // hyphen before the stress shifts it
        assert_eq!(st.c, 1);
    }

    #[test]
    fn test_case2_keeps_coda() {
        let mut st = state("carta", 1);
        st.apply(Case::Case2);
        assert_eq!(st.w.to_string(), "car-ta");
        assert_eq!(st.k, 1);
    }

    #[test]
    fn test_case4_skips_glide() {
        let mut st = state("caixa", 1);
        st.apply(Case::Case4);
        assert_eq!(st.w.to_string(), "cai-xa");
        // the pointer lands on the vowel of the new syllable, past the glide
        assert_eq!(st.k, 2);
    }

    #[test]
    fn test_case7_triple_coda() {
        let mut st = state("constante", 5);
        st.apply(Case::Case7);
        assert_eq!(st.w.to_string(), "cons-tante");
        assert_eq!(st.k, 1);
        assert_eq!(st.pvt, 6);
    }

    #[test]
    fn test_case9_splits_cluster() {
        let mut st = state("apto", 0);
        st.p0 = 1;
        st.apply(Case::Case9);
        assert_eq!(st.w.to_string(), "ap-to");
        assert_eq!(st.p0, 3);
    }

    #[test]
    fn test_case6_only_advances() {
        let mut st = state("mais", 1);
        st.apply(Case::Case6);
        assert_eq!(st.w.to_string(), "mais");
        assert_eq!(st.p0, 4);
        assert_eq!(st.c, 0);
    }

    #[test]
    fn test_stress_untouched_when_hyphen_after_it() {
        let mut st = state("casa", 1);
        st.apply(Case::Case2); // hyphen at 3, after the stress at 1
        assert_eq!(st.w.to_string(), "cas-a");
        assert_eq!(st.pvt, 1);
    }
}
