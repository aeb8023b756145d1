//! Symbol tokens produced by the classifier.

use std::fmt;
use std::str::FromStr;

/// Prefix used by the text form of word tokens (`"WORD:HELLO"`).
pub const WORD_PREFIX: &str = "WORD:";

/// One classified hand pose.
///
/// The text form matches what the recognizer historically emitted:
/// `"A"`…`"Z"`, `"SPACE"`, `"SPEAK"`, `"DELETE"` and `"WORD:<KEY>"`.
///
/// ```
/// use sign_to_voice::gesture::SymbolToken;
///
/// let tok: SymbolToken = "WORD:HELLO".parse().unwrap();
/// assert_eq!(tok, SymbolToken::word("hello"));
/// assert_eq!(tok.to_string(), "WORD:HELLO");
/// assert_eq!("q".parse::<SymbolToken>().unwrap(), SymbolToken::Letter('Q'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolToken {
    /// An uppercase ASCII letter.
    Letter(char),
    Space,
    Speak,
    Delete,
    /// A word gesture; holds the uppercase word key (e.g. `"THANKYOU"`).
    Word(String),
}

/// Hold-threshold category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    Letter,
    Word,
    Space,
    Speak,
    Delete,
}

impl SymbolToken {
    /// A letter token, or `None` if `c` is not an ASCII letter.
    pub fn letter(c: char) -> Option<Self> {
        c.is_ascii_alphabetic()
            .then(|| Self::Letter(c.to_ascii_uppercase()))
    }

    /// A word token; the key is normalised to uppercase.
    pub fn word(key: &str) -> Self {
        Self::Word(key.trim().to_uppercase())
    }

    pub fn category(&self) -> SymbolCategory {
        match self {
            Self::Letter(_) => SymbolCategory::Letter,
            Self::Word(_) => SymbolCategory::Word,
            Self::Space => SymbolCategory::Space,
            Self::Speak => SymbolCategory::Speak,
            Self::Delete => SymbolCategory::Delete,
        }
    }
}

impl fmt::Display for SymbolToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) => write!(f, "{c}"),
            Self::Space => f.write_str("SPACE"),
            Self::Speak => f.write_str("SPEAK"),
            Self::Delete => f.write_str("DELETE"),
            Self::Word(key) => write!(f, "{WORD_PREFIX}{key}"),
        }
    }
}

/// Error returned when a string is not a valid token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol token {0:?}")]
pub struct UnknownToken(pub String);

impl FromStr for SymbolToken {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_uppercase().as_str() {
            "SPACE" => return Ok(Self::Space),
            "SPEAK" => return Ok(Self::Speak),
            "DELETE" => return Ok(Self::Delete),
            _ => {}
        }

        if let Some(key) = s
            .get(..WORD_PREFIX.len())
            .filter(|p| p.eq_ignore_ascii_case(WORD_PREFIX))
            .map(|_| &s[WORD_PREFIX.len()..])
        {
            if !key.is_empty() {
                return Ok(Self::word(key));
            }
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::letter(c).ok_or_else(|| UnknownToken(s.to_string())),
            _ => Err(UnknownToken(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(SymbolToken::Letter('A').to_string(), "A");
        assert_eq!(SymbolToken::Space.to_string(), "SPACE");
        assert_eq!(SymbolToken::Speak.to_string(), "SPEAK");
        assert_eq!(SymbolToken::Delete.to_string(), "DELETE");
        assert_eq!(SymbolToken::word("ThankYou").to_string(), "WORD:THANKYOU");
    }

    #[test]
    fn letter_constructor_rejects_non_letters() {
        assert_eq!(SymbolToken::letter('b'), Some(SymbolToken::Letter('B')));
        assert_eq!(SymbolToken::letter('1'), None);
        assert_eq!(SymbolToken::letter('é'), None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<SymbolToken>().is_err());
        assert!("AB".parse::<SymbolToken>().is_err());
        assert!("WORD:".parse::<SymbolToken>().is_err());
        assert!("7".parse::<SymbolToken>().is_err());
    }

    #[test]
    fn parse_control_tokens_case_insensitive() {
        assert_eq!("space".parse::<SymbolToken>().unwrap(), SymbolToken::Space);
        assert_eq!("Speak".parse::<SymbolToken>().unwrap(), SymbolToken::Speak);
        assert_eq!("DELETE".parse::<SymbolToken>().unwrap(), SymbolToken::Delete);
        assert_eq!(
            "word:love".parse::<SymbolToken>().unwrap(),
            SymbolToken::Word("LOVE".into())
        );
    }

    #[test]
    fn categories() {
        assert_eq!(SymbolToken::Letter('Z').category(), SymbolCategory::Letter);
        assert_eq!(SymbolToken::word("yes").category(), SymbolCategory::Word);
        assert_eq!(SymbolToken::Space.category(), SymbolCategory::Space);
        assert_eq!(SymbolToken::Speak.category(), SymbolCategory::Speak);
        assert_eq!(SymbolToken::Delete.category(), SymbolCategory::Delete);
    }
}
