//! CECI syllable separation
//!
//! A table-driven separator: two cursors (look-behind and look-ahead) walk
//! the word plus a trailing sentinel, and a 39×39 character-indexed table
//! maps each letter pair to an action that extends the current syllable,
//! opens a new one, or retracts the last boundary.
//!
//! Unlike the Silva2011 cascade this separator needs no stress position.

use once_cell::sync::Lazy;

use crate::error::{Error, Result};

/// Canonical letter ordering of the transition table. Row and column
/// indices are positions in this string.
const TABLE_LETTERS: &str = " aáãâbcçdeéêfghiíjklmnoóôõpqrstuúüvwxyz";

/// Letter to table index.
static LETTER_INDEX: phf::Map<char, usize> = phf::phf_map! {
    ' ' => 0, 'a' => 1, 'á' => 2, 'ã' => 3, 'â' => 4, 'b' => 5, 'c' => 6,
    'ç' => 7, 'd' => 8, 'e' => 9, 'é' => 10, 'ê' => 11, 'f' => 12, 'g' => 13,
    'h' => 14, 'i' => 15, 'í' => 16, 'j' => 17, 'k' => 18, 'l' => 19,
    'm' => 20, 'n' => 21, 'o' => 22, 'ó' => 23, 'ô' => 24, 'õ' => 25,
    'p' => 26, 'q' => 27, 'r' => 28, 's' => 29, 't' => 30, 'u' => 31,
    'ú' => 32, 'ü' => 33, 'v' => 34, 'w' => 35, 'x' => 36, 'y' => 37,
    'z' => 38,
};

/// The transition table. Row 0 is the letter header; every other row starts
/// with its own letter label followed by one action cell per column. A blank
/// cell means action 0.
const TABLE: [&str; 39] = [
    " aáãâbcçdeéêfghiíjklmnoóôõpqrstuúüvwxyz",
    "a11113311011111111111101101111101 1 101",
    "á    11110  11 0 111110   111111  1 101",
    "ã        0            0      0       0 ",
    "â    11110     11111110   11111 1 1 101",
    "b000022 200022 002 0220000220220002  0 ",
    "c0000 22 000  000  0240000  002000   0 ",
    "ç0000    000   0      0000     000   0 ",
    "d0000222200022200222220000220220002  00",
    "e1  1111111 11 0111111111 111110101 101",
    "é0   1111   11 0 1 1110   111110  1 101",
    "ê0   1111   11   1 1110   111110  1 101",
    "f0000    000   00  0 20000  0 2000   0 ",
    "g0000    000  000  0240000  0  000   0 ",
    "h0000    000   00     0000     000   0 ",
    "i1111111111111 111 11111111111111 1 101",
    "í1   11111  11 1 111111   11111   1 101",
    "j0000    000   00     0000     000   0 ",
    "k0000    000   00  0 40000  0  000   0 ",
    "l0000222200022000220220000222220002 202",
    "m00002   000   00   2400002    000   0 ",
    "n0000 22200022000222220000 22220002 202",
    "o0111311101111 011111111111111101 11101",
    "ó0   1111   11 0 111111   11111   1 101",
    "ô0   1111   11   1 111    11111   1 101",
    "õ        0                           0 ",
    "p0000 22 000  000  0 40000  044000   0 ",
    "q0000    000   00  0  0000  0  000   0 ",
    "r0000222200022000222220000222220002 202",
    "s00002222000220002222200002222200022202",
    "t0000    000  000  0020000  020000   0 ",
    "u0111111101111 011111101101111111 1 101",
    "ú1   11111  11 1 111111   11101   1 101",
    "ü        000   00     0000           0 ",
    "v0000    000  000  0  0000  0  000   0 ",
    "w0000    000  000  0  0000  0  000   0 ",
    "x0000222200022 002222200002222200022202",
    "y00001111000110001111100001111100011111",
    "z00002222000220002222200002222200022222",
];

/// Table sanity check, run once: every row must be as wide as the header
/// and every cell must be blank or an action digit.
static TABLE_CHECK: Lazy<std::result::Result<(), String>> = Lazy::new(|| {
    let width = TABLE_LETTERS.chars().count();
    if TABLE.len() != width {
        return Err(format!("table has {} rows, expected {}", TABLE.len(), width));
    }
    for (r, row) in TABLE.iter().enumerate() {
        let cells: Vec<char> = row.chars().collect();
        if cells.len() != width {
            return Err(format!("row {} has {} cells, expected {}", r, cells.len(), width));
        }
        if r > 0 {
            for &cell in &cells[1..] {
                if !matches!(cell, ' ' | '0' | '1' | '2' | '3' | '4') {
                    return Err(format!("row {} holds invalid cell {:?}", r, cell));
                }
            }
        }
    }
    Ok(())
});

/// Vowels of the separator (used by the retraction guard of action 3).
const VOWELS: &str = "aáãâeéêiíoóôõuúü";

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// The CECI syllable separator.
pub struct CeciSyllabifier {
    word: Vec<char>,
}

impl CeciSyllabifier {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_lowercase().chars().collect(),
        }
    }

    fn fault(&self) -> Error {
        Error::SyllabifierFault {
            word: self.word.iter().collect(),
        }
    }

    /// Table cell for the `(current, next)` letter pair.
    fn cell(&self, la: char, le: char) -> Result<char> {
        let line = *LETTER_INDEX.get(&la).ok_or_else(|| self.fault())?;
        let column = *LETTER_INDEX.get(&le).ok_or_else(|| self.fault())?;
        TABLE[line].chars().nth(column).ok_or_else(|| self.fault())
    }

    /// Action for the `(current, next)` pair: a non-letter current character
    /// closes the syllable (2), a non-letter next character (the sentinel)
    /// retracts and reopens (3), otherwise the table decides.
    fn action(&self, la: char, le: char) -> Result<u8> {
        if !la.is_alphabetic() {
            return Ok(2);
        }
        if !le.is_alphabetic() {
            return Ok(3);
        }
        let t = self.cell(la, le)?;
        if t == ' ' {
            return Ok(0);
        }
        Ok(t.to_digit(10).unwrap_or(9) as u8)
    }

    /// Separate the word into syllables.
    pub fn separate(&self) -> Result<Vec<String>> {
        if let Err(msg) = &*TABLE_CHECK {
            return Err(Error::ResourceLoad(msg.clone()));
        }

        // Crasis: a leading à is looked up as a and restored afterwards.
        let has_crasis = self.word.first() == Some(&'à');
        let mut word = self.word.clone();
        if has_crasis {
            word[0] = 'a';
        }
        word.push(' ');

        let mut no_syllables = 1usize;
        let mut start_syllable = true;
        let mut result: Vec<char> = vec![word[0]];
        let mut le = 1usize;
        let mut la = 0usize;

        // Drop the character before the last one (the boundary space).
        fn retract(result: &mut Vec<char>) {
            if result.len() >= 2 {
                let last = result.pop().unwrap();
                result.pop();
                result.push(last);
            }
        }

        loop {
            match self.action(word[la], word[le])? {
                0 => {
                    result.push(word[le]);
                    start_syllable = false;
                }
                1 => {
                    result.push(' ');
                    no_syllables += 1;
                    result.push(word[le]);
                    start_syllable = true;
                }
                2 => {
                    if start_syllable && no_syllables > 1 {
                        retract(&mut result);
                        no_syllables -= 1;
                    }
                    result.push(' ');
                    no_syllables += 1;
                    result.push(word[le]);
                    start_syllable = true;
                }
                3 => {
                    if start_syllable && !is_vowel(word[la]) && no_syllables != 1 {
                        if result.len() > 2 {
                            retract(&mut result);
                        }
                        no_syllables -= 1;
                    }
                    result.push(' ');
                    no_syllables += 1;
                    result.push(word[le]);
                    start_syllable = true;
                }
                4 => {
                    if start_syllable && no_syllables == 1 {
                        result.push(word[le]);
                        start_syllable = false;
                    } else {
                        if start_syllable && no_syllables > 1 {
                            retract(&mut result);
                            no_syllables -= 1;
                        }
                        result.push(' ');
                        no_syllables += 1;
                        result.push(word[le]);
                        start_syllable = true;
                    }
                }
                other => {
                    return Err(Error::UnknownAction {
                        word: self.word.iter().collect(),
                        action: other,
                    })
                }
            }
            le += 1;
            la += 1;
            if le == word.len() {
                break;
            }
        }

        if has_crasis {
            result[0] = 'à';
        }

        let joined: String = result.iter().collect();
        Ok(joined.split_whitespace().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separate(word: &str) -> Vec<String> {
        CeciSyllabifier::new(word).separate().unwrap()
    }

    fn joined(word: &str) -> String {
        separate(word).join("-")
    }

    #[test]
    fn test_table_is_well_formed() {
        assert!(TABLE_CHECK.is_ok());
    }

    #[test]
    fn test_basic_words() {
        assert_eq!(joined("chocolate"), "cho-co-la-te");
        assert_eq!(joined("casa"), "ca-sa");
        assert_eq!(joined("porque"), "por-que");
        assert_eq!(joined("telefone"), "te-le-fo-ne");
    }

    #[test]
    fn test_boundary_retraction() {
        // the final consonant is pulled back into the last open syllable
        assert_eq!(joined("arroz"), "ar-roz");
        assert_eq!(joined("carro"), "car-ro");
        assert_eq!(joined("constante"), "cons-tan-te");
    }

    #[test]
    fn test_no_stress_needed() {
        assert_eq!(joined("muito"), "mui-to");
        assert_eq!(joined("quem"), "quem");
        assert_eq!(joined("segundo"), "se-gun-do");
    }

    #[test]
    fn test_hiatus_splits() {
        assert_eq!(joined("saúde"), "sa-ú-de");
        assert_eq!(joined("piano"), "pi-a-no");
        assert_eq!(joined("psicologia"), "psi-co-lo-gi-a");
    }

    #[test]
    fn test_crasis_restored() {
        assert_eq!(joined("àquela"), "à-que-la");
    }

    #[test]
    fn test_concatenation_identity() {
        for word in ["chocolate", "arroz", "porque", "muito", "saúde", "àquela"] {
            assert_eq!(separate(word).concat(), word, "identity broken for {}", word);
        }
    }

    #[test]
    fn test_letter_outside_alphabet_faults() {
        assert!(CeciSyllabifier::new("naïve").separate().is_err());
    }
}
