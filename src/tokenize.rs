//! Splits raw text into words.
//!
//! ASCII punctuation is deleted outright (so `don't` becomes `dont`), then
//! the remainder is split on whitespace runs. Case is left alone; folding
//! happens in the map function.

/// Unicode whitespace plus the ASCII file/group/record/unit separators.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Strip ASCII punctuation and split on whitespace. Empty tokens never
/// appear in the output.
pub fn tokenize(text: &str) -> Vec<String> {
    let stripped: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    stripped
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_before_splitting() {
        assert_eq!(
            tokenize("The cat sat. The CAT sat!"),
            vec!["The", "cat", "sat", "The", "CAT", "sat"]
        );
        assert_eq!(tokenize("don't-stop"), vec!["dontstop"]);
    }

    #[test]
    fn discards_empty_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t ").is_empty());
        assert!(tokenize("... --- !!!").is_empty());
        assert_eq!(tokenize("  a \n\n b  "), vec!["a", "b"]);
    }

    #[test]
    fn splits_on_ascii_separators() {
        assert_eq!(tokenize("a\x1cb\x1dc\x1ed\x1fe"), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(tokenize("x\u{a0}y\u{2003}z"), vec!["x", "y", "z"]);
    }

    #[test]
    fn keeps_non_ascii_letters() {
        assert_eq!(tokenize("Café «naïve»"), vec!["Café", "«naïve»"]);
    }
}
