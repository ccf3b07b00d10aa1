//! Reclassification of raw units into semantic kinds
//!
//! Pure helpers (`alias`, `classify_literal`) decide a kind from text alone.
//! `classify` adds the continuation reads needed by strings and comments.
use crate::lexical::LexerError;
use crate::scanner::{Quote, RawSource};
use crate::tokens::Kind;
use crate::utils::Position;
use std::borrow::Cow;

/// A unit after classification, with its text possibly extended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'src> {
    pub kind: Kind,
    pub text: Cow<'src, str>,
}

impl<'src> Classified<'src> {
    pub fn borrowed(kind: Kind, text: &'src str) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
        }
    }

    pub fn owned(kind: Kind, text: String) -> Self {
        Self {
            kind,
            text: Cow::Owned(text),
        }
    }
}

/// Collapse literal spellings onto their value kinds
pub fn alias(kind: Kind) -> Kind {
    match kind {
        Kind::True | Kind::False => Kind::Bool,
        Kind::NaN | Kind::Infinite => Kind::Float,
        other => other,
    }
}

/// Kind of a word with no fixed spelling: a number, a name, or a placeholder
pub fn classify_literal(text: &str) -> Kind {
    match text.as_bytes().first() {
        None => Kind::Placeholder,
        Some(first) if first.is_ascii_digit() => classify_number(text),
        Some(_) => classify_name(text),
    }
}

fn classify_number(text: &str) -> Kind {
    let bytes = text.as_bytes();
    // Hex and binary bodies are not inspected
    if bytes.len() > 2 && bytes[0] == b'0' && matches!(bytes[1], b'x' | b'b') {
        return Kind::Integer;
    }

    let mut kind = Kind::Integer;
    for c in text.chars() {
        match c {
            '.' | 'e' => kind = Kind::Float,
            'T' | ':' | 'Z' => kind = Kind::Datetime,
            '0'..='9' | '+' | '-' | '_' => {}
            _ => return Kind::Placeholder,
        }
    }
    kind
}

fn classify_name(text: &str) -> Kind {
    let mut dots = 0;
    for c in text.chars() {
        match c {
            '.' => dots += 1,
            '_' => {}
            c if c.is_ascii_alphanumeric() => {}
            _ => return Kind::Placeholder,
        }
    }

    match dots {
        0 => Kind::Ident,
        1 => Kind::Member,
        _ => Kind::Members,
    }
}

/// Classify one raw unit that opened at `position`.
///
/// Horizontal runs are not handled here; the indentation tracker decides
/// their role first.
pub fn classify<'src, R>(
    source: &mut R,
    position: Position,
    kind: Kind,
    text: &'src str,
) -> Result<Classified<'src>, LexerError>
where
    R: RawSource<'src>,
{
    match kind {
        Kind::Comment => {
            let tail = source.rest_of_line(false)?;
            Ok(Classified::owned(Kind::Comment, format!("{}{}", text, tail)))
        }
        Kind::BlockComment => read_block_comment(source, position, text),
        Kind::True | Kind::False | Kind::NaN | Kind::Infinite => {
            Ok(Classified::borrowed(alias(kind), text))
        }
        Kind::Placeholder => match Quote::from_unit(text) {
            Some(quote) => read_string(source, position, quote, text),
            None => Ok(Classified::borrowed(classify_literal(text), text)),
        },
        _ => Ok(Classified::borrowed(kind, text)),
    }
}

fn read_string<'src, R>(
    source: &mut R,
    position: Position,
    quote: Quote,
    opening: &'src str,
) -> Result<Classified<'src>, LexerError>
where
    R: RawSource<'src>,
{
    let tail = source.rest_of_string(quote)?;
    if !tail.terminated {
        return Err(LexerError::IncompleteString { position });
    }
    Ok(Classified::owned(
        Kind::Str,
        format!("{}{}", opening, tail.text),
    ))
}

fn read_block_comment<'src, R>(
    source: &mut R,
    position: Position,
    opening: &'src str,
) -> Result<Classified<'src>, LexerError>
where
    R: RawSource<'src>,
{
    let mut text = String::from(opening);
    loop {
        let unit = source.next_unit()?;
        match Kind::lookup(unit) {
            Kind::Eof => return Err(LexerError::IncompleteBlockComment { position }),
            Kind::BlockComment => {
                text.push_str(unit);
                break;
            }
            _ => text.push_str(unit),
        }
    }

    text.push_str(source.rest_of_line(false)?);
    Ok(Classified::owned(Kind::BlockComment, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;
    use assert_matches::assert_matches;

    fn classify_first(src: &str) -> Result<Classified<'_>, LexerError> {
        let mut scanner = Scanner::new(src.as_bytes());
        let position = scanner.position();
        let text = scanner.next_unit()?;
        classify(&mut scanner, position, Kind::lookup(text), text)
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(classify_literal("0x1A"), Kind::Integer);
        assert_eq!(classify_literal("0b101"), Kind::Integer);
        assert_eq!(classify_literal("1.5e10"), Kind::Float);
        assert_eq!(classify_literal("2020-01-01T00:00:00Z"), Kind::Datetime);
        assert_eq!(classify_literal("1_000"), Kind::Integer);
        assert_eq!(classify_literal("12a"), Kind::Placeholder);
    }

    #[test]
    fn test_numeric_downgrade_is_final() {
        // The trailing `e` would upgrade to float if the scan continued
        assert_eq!(classify_literal("1x.e"), Kind::Placeholder);
        // A bare `0x` is not a hex literal
        assert_eq!(classify_literal("0x"), Kind::Placeholder);
        // Last upgrade wins
        assert_eq!(classify_literal("10:30.5"), Kind::Float);
    }

    #[test]
    fn test_dotted_names() {
        assert_eq!(classify_literal("a"), Kind::Ident);
        assert_eq!(classify_literal("a.b"), Kind::Member);
        assert_eq!(classify_literal("a.b.c"), Kind::Members);
        assert_eq!(classify_literal("snake_case2"), Kind::Ident);
        assert_eq!(classify_literal("a-b"), Kind::Placeholder);
        assert_eq!(classify_literal("名字"), Kind::Placeholder);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(alias(Kind::True), Kind::Bool);
        assert_eq!(alias(Kind::False), Kind::Bool);
        assert_eq!(alias(Kind::NaN), Kind::Float);
        assert_eq!(alias(Kind::Infinite), Kind::Float);
        assert_eq!(alias(Kind::Ident), Kind::Ident);
    }

    #[test]
    fn test_string_includes_both_quotes() {
        let classified = classify_first(r#""it's \"ok\"" rest"#).unwrap();
        assert_eq!(classified.kind, Kind::Str);
        assert_eq!(classified.text, r#""it's \"ok\"""#);

        let classified = classify_first("'multi\nline'").unwrap();
        assert_eq!(classified.kind, Kind::Str);
        assert_eq!(classified.text, "'multi\nline'");
    }

    #[test]
    fn test_unterminated_string_fails() {
        let error = classify_first("\"never closed").unwrap_err();
        assert_matches!(error, LexerError::IncompleteString { position } if position.offset == 0);
    }

    #[test]
    fn test_line_comment_stops_before_break() {
        let classified = classify_first("// note here\nnext").unwrap();
        assert_eq!(classified.kind, Kind::Comment);
        assert_eq!(classified.text, "// note here");
    }

    #[test]
    fn test_block_comment_reads_to_closer_and_line_end() {
        let classified = classify_first("---\nline one\n--- tail\nnext").unwrap();
        assert_eq!(classified.kind, Kind::BlockComment);
        assert_eq!(classified.text, "---\nline one\n--- tail");
    }

    #[test]
    fn test_unterminated_block_comment_fails() {
        let error = classify_first("---\nno closer\n").unwrap_err();
        assert_matches!(error, LexerError::IncompleteBlockComment { .. });
    }

    #[test]
    fn test_fixed_spellings_pass_through() {
        let classified = classify_first("func").unwrap();
        assert_eq!(classified.kind, Kind::Func);
        assert_eq!(classified.text, "func");
    }
}
