//! # Parsing Utils
//!
//! Splits prefixed chat text into a command name and its arguments.
//! Arguments follow a small shell-like grammar: whitespace separates, `"..."` and `'...'`
//! group words, and a backslash escapes the next character inside double quotes.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// Splits `text` at the first whitespace into `(name, args)`; `args` has leading whitespace
/// removed. Text with no whitespace is all name.
pub fn split_command(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim_start()),
        None => (text, ""),
    }
}

pub fn tokenize(input: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // A quoted empty string still counts as a token.
    let mut in_token = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => return Err(ParseError::UnterminatedQuote('"')),
                        },
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote('"')),
                    }
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote('\'')),
                    }
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Folds surplus tokens into the last argument so a command taking `arity` arguments can
/// accept unquoted values containing spaces. Returns the tokens unchanged when there are
/// not more than `arity` of them.
pub fn fold_trailing(mut tokens: Vec<String>, arity: usize) -> Vec<String> {
    if arity == 0 || tokens.len() <= arity {
        return tokens;
    }
    let tail = tokens.split_off(arity - 1).join(" ");
    tokens.push(tail);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        assert_eq!(split_command("set alpha http://a"), ("set", "alpha http://a"));
        assert_eq!(split_command("servers"), ("servers", ""));
        assert_eq!(split_command("help   set"), ("help", "set"));
        assert_eq!(split_command(""), ("", ""));
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(tokenize("  a  b\tc ").unwrap(), vec!["a", "b", "c"]);
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_quotes_group_words() {
        assert_eq!(
            tokenize(r#""my server" 'http://x.example/a b'"#).unwrap(),
            vec!["my server", "http://x.example/a b"]
        );
        assert_eq!(tokenize(r#"pre"fix suf"fix"#).unwrap(), vec!["prefix suffix"]);
    }

    #[test]
    fn test_escapes_and_empty_quotes() {
        assert_eq!(tokenize(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
        assert_eq!(tokenize(r#""" x"#).unwrap(), vec!["", "x"]);
        assert_eq!(tokenize(r"'a\b'").unwrap(), vec![r"a\b"]);
    }

    #[test]
    fn test_unterminated_quotes() {
        assert_eq!(tokenize(r#""open"#), Err(ParseError::UnterminatedQuote('"')));
        assert_eq!(tokenize("'open"), Err(ParseError::UnterminatedQuote('\'')));
        assert_eq!(tokenize(r#""trailing\"#), Err(ParseError::UnterminatedQuote('"')));
    }

    #[test]
    fn test_fold_trailing() {
        let folded = fold_trailing(vec!["a".into(), "b".into(), "c".into(), "d".into()], 2);
        assert_eq!(folded, vec!["a", "b c d"]);

        let exact = fold_trailing(vec!["a".into(), "b".into()], 2);
        assert_eq!(exact, vec!["a", "b"]);

        let short = fold_trailing(vec!["a".into()], 2);
        assert_eq!(short, vec!["a"]);

        let none = fold_trailing(vec!["a".into(), "b".into()], 0);
        assert_eq!(none, vec!["a", "b"]);
    }
}
