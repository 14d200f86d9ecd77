//! Character folding and category lookup

use crate::decode::Decoded;

/// Category of a single folded character
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryTag {
    /// `a e i o u` in either case
    Vowel,
    /// Any other ASCII letter
    Consonant,
    /// `0-9`
    Digit,
    /// `_`
    Underscore,
    /// Space, tab, line feed, carriage return
    Whitespace,
    /// Hyphen, brackets, parentheses and double quotes
    Separator,
    /// Sentence and clause punctuation, en dash, ellipsis
    Punctuation,
    /// ASCII apostrophe and single quotation marks
    Apostrophe,
    /// Everything else
    Other,
}

impl CategoryTag {
    /// Whether a chunk may be cut immediately after a character of this category
    ///
    /// Apostrophes are excluded: they occur inside elided words.
    pub const fn is_safe_cut(self) -> bool {
        matches!(
            self,
            CategoryTag::Whitespace | CategoryTag::Separator | CategoryTag::Punctuation
        )
    }

    /// Categorise a decoded character; malformed sequences are [`CategoryTag::Other`]
    pub fn of_decoded(decoded: Decoded) -> Self {
        decoded.ch.map_or(CategoryTag::Other, classify)
    }
}

/// Strip the diacritic from an accented Latin letter
pub fn fold(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' => 'A',
        'è' | 'é' | 'ê' => 'e',
        'È' | 'É' | 'Ê' => 'E',
        'ì' | 'í' => 'i',
        'Ì' | 'Í' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' => 'O',
        'ù' | 'ú' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        other => other,
    }
}

/// Fold `ch` and look up its category
pub fn classify(ch: char) -> CategoryTag {
    match fold(ch) {
        'a' | 'e' | 'i' | 'o' | 'u' | 'A' | 'E' | 'I' | 'O' | 'U' => CategoryTag::Vowel,
        c if c.is_ascii_alphabetic() => CategoryTag::Consonant,
        c if c.is_ascii_digit() => CategoryTag::Digit,
        '_' => CategoryTag::Underscore,
        ' ' | '\t' | '\n' | '\r' => CategoryTag::Whitespace,
        '-' | '"' | '[' | ']' | '(' | ')' | '\u{201C}' | '\u{201D}' => CategoryTag::Separator,
        '.' | ',' | ':' | ';' | '?' | '!' | '\u{2013}' | '\u{2026}' => CategoryTag::Punctuation,
        '\'' | '\u{2018}' | '\u{2019}' => CategoryTag::Apostrophe,
        _ => CategoryTag::Other,
    }
}
