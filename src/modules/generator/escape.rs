//! Shell quoting for generated scripts
//!
//! Every piece of model text that ends up in the script goes through one of
//! these helpers; nothing else in the generator writes user-controlled text.

use std::borrow::Cow;

/// Characters that never need quoting, neither as a plain shell word nor
/// inside a `compgen -W` word list
fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ',' | ':' | '/' | '=' | '+' | '@' | '%')
}

/// Wrap `s` in single quotes, escaping embedded single quotes
pub fn single_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        if c == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(c);
        }
    }
    quoted.push('\'');
    quoted
}

/// Render `s` as one literal shell word, bare when possible
pub fn shell_word(s: &str) -> Cow<'_, str> {
    if !s.is_empty() && s.chars().all(is_safe) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(single_quote(s))
    }
}

/// Render tokens as a `case` pattern matching any of them literally
///
/// Every alternative is quoted: a bare `esac` or `in` is read as a reserved
/// word in pattern position.
pub fn case_pattern<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| single_quote(t.as_ref()))
        .collect::<Vec<_>>()
        .join("|")
}

/// Escape one word so that `compgen -W` expands it back to itself
fn compgen_word(word: &str) -> String {
    let mut escaped = String::with_capacity(word.len());
    for c in word.chars() {
        if !is_safe(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Render a complete `compgen -W` word list as one single-quoted shell word
pub fn compgen_words<S: AsRef<str>>(words: &[S]) -> String {
    let list = words
        .iter()
        .map(|w| compgen_word(w.as_ref()))
        .collect::<Vec<_>>()
        .join(" ");
    single_quote(&list)
}

/// Make arbitrary text safe to place after `#` on a single line
pub fn comment(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
