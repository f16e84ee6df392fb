// ============================================================
// Layer 4 — Built-in Tokenizers
// ============================================================
// Two small rule-based tokenizers that need no model files.
//
// BasicEnglishTokenizer (the default):
//   1. lowercase everything
//   2. "<br />" → space
//   3. apostrophe gets padded, double quotes are dropped
//   4. . , ( ) ! ? become their own tokens
//   5. ; and : become spaces
//   6. split on whitespace
//
//   "Don't panic, (ok)?" → ["don", "'", "t", "panic", ",", "(", "ok", ")", "?"]
//
// WhitespaceTokenizer keeps case and only peels trailing
// sentence punctuation off each word:
//
//   "A cat sat." → ["A", "cat", "sat", "."]
//
// Both are deterministic, which the span arithmetic relies on:
// the prefix of a context must tokenize to a prefix of the
// context's tokens.

use crate::domain::error::Result;
use crate::domain::traits::Tokenize;

/// Lowercasing, punctuation-splitting English tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicEnglishTokenizer;

impl BasicEnglishTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn normalize(text: &str) -> String {
        let lowered = text.to_lowercase().replace("<br />", " ");
        let mut out = String::with_capacity(lowered.len() + 16);

        for c in lowered.chars() {
            match c {
                '\''                               => out.push_str(" '  "),
                '"'                                => {}
                '.' | ',' | '(' | ')' | '!' | '?'  => {
                    out.push(' ');
                    out.push(c);
                    out.push(' ');
                }
                ';' | ':'                          => out.push(' '),
                c                                  => out.push(c),
            }
        }
        out
    }
}

impl Tokenize for BasicEnglishTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(Self::normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }
}

/// Case-preserving whitespace tokenizer that splits trailing punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self
    }
}

const TRAILING_PUNCT: [char; 6] = ['.', ',', '!', '?', ';', ':'];

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut tokens = Vec::new();

        for word in text.split_whitespace() {
            let stem = word.trim_end_matches(TRAILING_PUNCT);
            if !stem.is_empty() {
                tokens.push(stem.to_string());
            }
            tokens.extend(word[stem.len()..].chars().map(String::from));
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(t: &dyn Tokenize, s: &str) -> Vec<String> {
        t.tokenize(s).unwrap()
    }

    #[test]
    fn test_basic_english_lowercases_and_splits_punctuation() {
        let t = BasicEnglishTokenizer::new();
        assert_eq!(toks(&t, "A cat sat."), vec!["a", "cat", "sat", "."]);
        assert_eq!(
            toks(&t, "Hello, (World)!"),
            vec!["hello", ",", "(", "world", ")", "!"]
        );
    }

    #[test]
    fn test_basic_english_apostrophes_and_quotes() {
        let t = BasicEnglishTokenizer::new();
        assert_eq!(toks(&t, "don't"), vec!["don", "'", "t"]);
        assert_eq!(toks(&t, "say \"hi\""), vec!["say", "hi"]);
    }

    #[test]
    fn test_basic_english_drops_colons_and_line_breaks() {
        let t = BasicEnglishTokenizer::new();
        assert_eq!(toks(&t, "a:b;c<br />d"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_whitespace_peels_trailing_punctuation() {
        let t = WhitespaceTokenizer::new();
        assert_eq!(toks(&t, "A cat sat."), vec!["A", "cat", "sat", "."]);
        assert_eq!(toks(&t, "Wait?! ok"), vec!["Wait", "?", "!", "ok"]);
        assert_eq!(toks(&t, "A "), vec!["A"]);
    }

    #[test]
    fn test_empty_input_has_no_tokens() {
        assert!(toks(&BasicEnglishTokenizer, "").is_empty());
        assert!(toks(&WhitespaceTokenizer, "   ").is_empty());
    }

    #[test]
    fn test_closures_are_tokenizers() {
        let t = |s: &str| s.split('-').map(String::from).collect::<Vec<_>>();
        assert_eq!(toks(&t, "a-b"), vec!["a", "b"]);
    }
}
