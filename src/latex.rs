//! Best-effort LaTeX markup to plain Unicode text.
//!
//! The bibliography parser already resolves most markup, but field values can still carry brace
//! groups, accent macros and escaped specials. Decoding never fails: anything that is not
//! understood is dropped or passed through.

use std::{iter::Peekable, str::Chars};

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Decode `markup` to plain text.
pub fn to_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut chars = markup.chars().peekable();
    decode_into(&mut chars, &mut out);

    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\r\n]+").unwrap());
    WS_RE
        .replace_all(&out, " ")
        .trim_matches(|c: char| c.is_ascii_whitespace())
        .to_string()
}

fn decode_into(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => expand_macro(chars, out),
            '{' | '}' | '$' => {}
            '~' => out.push('\u{a0}'),
            '-' if chars.peek() == Some(&'-') => {
                chars.next();
                if chars.peek() == Some(&'-') {
                    chars.next();
                    out.push('—');
                } else {
                    out.push('–');
                }
            }
            c => out.push(c),
        }
    }
}

fn expand_macro(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let Some(&next) = chars.peek() else {
        out.push('\\');
        return;
    };

    if !next.is_ascii_alphabetic() {
        chars.next();
        match next {
            '\'' | '`' | '^' | '"' | '~' | '=' | '.' => {
                let base = accent_argument(chars);
                out.push_str(&compose(next, &base));
            }
            // Line break.
            '\\' => out.push(' '),
            // Discretionary hyphen.
            '-' => {}
            other => out.push(other),
        }
        return;
    }

    let mut name = String::new();
    while let Some(&c) = chars.peek()
        && c.is_ascii_alphabetic()
    {
        name.push(c);
        chars.next();
    }
    skip_spaces(chars);

    if let Some(accent) = letter_accent(&name) {
        let base = accent_argument(chars);
        out.push_str(&compose(accent, &base));
    } else if let Some(symbol) = symbol(&name) {
        out.push_str(symbol);
    }
    // Anything else (\emph, \textbf, ...) is dropped; its argument is decoded by the caller.
}

/// Read the argument of an accent macro: either a brace group or a single character.
fn accent_argument(chars: &mut Peekable<Chars<'_>>) -> String {
    skip_spaces(chars);
    match chars.peek() {
        Some('{') => {
            chars.next();
            let mut depth = 1;
            let mut group = String::new();
            for c in chars.by_ref() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                group.push(c);
            }
            let mut inner = String::new();
            decode_into(&mut group.chars().peekable(), &mut inner);
            inner
        }
        Some('\\') => {
            chars.next();
            let mut inner = String::new();
            expand_macro(chars, &mut inner);
            inner
        }
        Some(_) => chars.next().map(String::from).unwrap_or_default(),
        None => String::new(),
    }
}

fn skip_spaces(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| *c == ' ').is_some() {}
}

fn letter_accent(name: &str) -> Option<char> {
    match name {
        "c" | "v" | "u" | "H" | "r" | "k" | "d" | "b" => name.chars().next(),
        _ => None,
    }
}

fn symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "ss" => "ß",
        "o" => "ø",
        "O" => "Ø",
        "ae" => "æ",
        "AE" => "Æ",
        "oe" => "œ",
        "OE" => "Œ",
        "aa" => "å",
        "AA" => "Å",
        "l" => "ł",
        "L" => "Ł",
        "i" => "ı",
        "j" => "ȷ",
        "dh" => "ð",
        "DH" => "Ð",
        "th" => "þ",
        "TH" => "Þ",
        "textendash" => "–",
        "textemdash" => "—",
        "ldots" | "dots" | "textellipsis" => "…",
        "TeX" => "TeX",
        "LaTeX" => "LaTeX",
        _ => return None,
    })
}

fn combining_mark(accent: char) -> char {
    match accent {
        '\'' => '\u{301}',
        '`' => '\u{300}',
        '^' => '\u{302}',
        '"' => '\u{308}',
        '~' => '\u{303}',
        '=' => '\u{304}',
        '.' => '\u{307}',
        'c' => '\u{327}',
        'v' => '\u{30c}',
        'u' => '\u{306}',
        'H' => '\u{30b}',
        'r' => '\u{30a}',
        'k' => '\u{328}',
        'd' => '\u{323}',
        _ => '\u{331}',
    }
}

fn compose(accent: char, base: &str) -> String {
    let mut it = base.chars();
    let (Some(first), rest) = (it.next(), it.as_str()) else {
        return combining_mark(accent).to_string();
    };
    // Dotless i/j take accents in place of their dot.
    let first = match first {
        'ı' => 'i',
        'ȷ' => 'j',
        c => c,
    };

    let mut out = String::with_capacity(base.len() + 2);
    out.push(first);
    out.push(combining_mark(accent));
    out.push_str(rest);
    out.nfc().collect()
}
