pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "~`!@#$%^&*()_-+={[}]|\\:;\"'<,>.?/";

/// The four character classes a [`Generator`](crate::Generator) draws from.
///
/// Every dictionary keeps the order it was given in. Duplicates are allowed
/// and simply weight the repeated character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionaries {
    pub lower: Vec<char>,
    pub upper: Vec<char>,
    pub digits: Vec<char>,
    pub symbols: Vec<char>,
}

impl Dictionaries {
    pub fn new(lower: &str, upper: &str, digits: &str, symbols: &str) -> Self {
        Self {
            lower: lower.chars().collect(),
            upper: upper.chars().collect(),
            digits: digits.chars().collect(),
            symbols: symbols.chars().collect(),
        }
    }

    pub fn contains_letter(&self, ch: char) -> bool {
        self.lower.contains(&ch) || self.upper.contains(&ch)
    }
}

impl Default for Dictionaries {
    fn default() -> Self {
        Self::new(LOWER, UPPER, DIGITS, SYMBOLS)
    }
}
