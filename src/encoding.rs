//! Repair of tag text that was stored as UTF-8 but decoded as Latin-1.
//!
//! A UTF-8 multi-byte sequence read back one byte per character turns
//! `Motörhead` into `MotÃ¶rhead`. Mapping every character back to its byte
//! and decoding those bytes as UTF-8 restores the original text.

use std::fmt;

/// One accepted correction of a tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    pub before: String,
    pub after: String,
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' -> '{}'", self.before, self.after)
    }
}

/// Encode `text` as Latin-1, or `None` if a character lies above U+00FF.
fn encode_latin1(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}

fn non_ascii_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_ascii()).count()
}

/// C1 control characters and U+FFFD are what mis-decoding leaves behind.
fn artifact_count(text: &str) -> usize {
    text.chars()
        .filter(|&c| ('\u{80}'..='\u{9f}').contains(&c) || c == char::REPLACEMENT_CHARACTER)
        .count()
}

/// Try to recode `source` from mis-decoded Latin-1 back to UTF-8.
///
/// Returns the repair only if the recoded text differs from `source` and is
/// more plausible: fewer non-ASCII characters and no more artifacts.
pub fn fix_utf8(source: &str) -> Option<Repair> {
    let bytes = encode_latin1(source)?;
    let recoded = String::from_utf8(bytes).ok()?;
    if recoded == source {
        return None;
    }
    if non_ascii_count(&recoded) >= non_ascii_count(source)
        || artifact_count(&recoded) > artifact_count(source)
    {
        return None;
    }
    Some(Repair {
        before: source.to_string(),
        after: recoded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reproduce the damage: UTF-8 bytes read one byte per character.
    fn garble(text: &str) -> String {
        text.bytes().map(char::from).collect()
    }

    #[test]
    fn restores_text_decoded_as_latin1() {
        for original in ["Motörhead", "Sigur Rós", "Café del Mar", "東京事変", "Ænima – Live"] {
            let garbled = garble(original);
            assert_ne!(garbled, original);
            let repair = fix_utf8(&garbled).expect("repairable");
            assert_eq!(repair.after, original);
            assert_eq!(repair.before, garbled);
        }
    }

    #[test]
    fn leaves_ascii_untouched() {
        assert_eq!(fix_utf8("Pink Floyd"), None);
        assert_eq!(fix_utf8(""), None);
    }

    #[test]
    fn leaves_correct_latin1_text_untouched() {
        // A lone 0xF6 byte is not valid UTF-8.
        assert_eq!(fix_utf8("Björk"), None);
        assert_eq!(fix_utf8("Ça va"), None);
    }

    #[test]
    fn leaves_correct_unicode_text_untouched() {
        assert_eq!(fix_utf8("Motörhead – Ace of Spades"), None);
        assert_eq!(fix_utf8("東京事変"), None);
    }

    #[test]
    fn repair_displays_before_and_after() {
        let repair = fix_utf8("MotÃ¶rhead").unwrap();
        assert_eq!(repair.to_string(), "'MotÃ¶rhead' -> 'Motörhead'");
    }
}
