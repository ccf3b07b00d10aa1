//! Byte-slice raw unit source
use super::{Quote, RawSource, StringTail};
use crate::lexical::LexerError;
use crate::utils::{LineIndex, Position};

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'[' | b']' | b'{' | b'}' | b',' | b';' | b'"' | b'\''
    )
}

/// Splits a byte slice into raw units, validating UTF-8 one unit at a time
pub struct Scanner<'src> {
    src: &'src [u8],
    offset: usize,
    lines: LineIndex,
}

impl<'src> Scanner<'src> {
    pub fn new(src: &'src [u8]) -> Self {
        Self {
            src,
            offset: 0,
            lines: LineIndex::new(src),
        }
    }

    fn rest(&self) -> &'src [u8] {
        &self.src[self.offset..]
    }

    fn run_len(&self, byte: u8) -> usize {
        self.rest().iter().take_while(|b| **b == byte).count()
    }

    fn word_len(&self) -> usize {
        let rest = self.rest();
        let mut len = 0;
        while len < rest.len() {
            let byte = rest[len];
            if is_whitespace(byte) || is_delimiter(byte) {
                break;
            }
            if byte == b'/' && rest.get(len + 1) == Some(&b'/') {
                break;
            }
            len += 1;
        }
        len
    }

    fn unit_len(&self) -> usize {
        let rest = self.rest();
        match rest {
            [] => 0,
            [b'\r', b'\n', ..] => 2,
            [b'\n' | b'\r', ..] => 1,
            [b' ', ..] => self.run_len(b' '),
            [b'\t', ..] => self.run_len(b'\t'),
            [b'/', b'/', ..] => 2,
            [first, ..] if is_delimiter(*first) => 1,
            _ => self.word_len(),
        }
    }

    /// Consume `len` bytes as text
    fn take(&mut self, len: usize) -> Result<&'src str, LexerError> {
        let start = self.offset;
        let bytes = &self.src[start..start + len];
        let text = std::str::from_utf8(bytes).map_err(|e| LexerError::InvalidEncoding {
            position: self.locate(start + e.valid_up_to()),
        })?;
        self.offset += len;
        Ok(text)
    }
}

impl<'src> RawSource<'src> for Scanner<'src> {
    fn position(&self) -> Position {
        self.locate(self.offset)
    }

    fn locate(&self, offset: usize) -> Position {
        self.lines.position_at(self.src, offset)
    }

    fn next_unit(&mut self) -> Result<&'src str, LexerError> {
        let len = self.unit_len();
        self.take(len)
    }

    fn rest_of_line(&mut self, include_break: bool) -> Result<&'src str, LexerError> {
        let rest = self.rest();
        let mut len = rest
            .iter()
            .position(|b| matches!(b, b'\n' | b'\r'))
            .unwrap_or(rest.len());

        if include_break {
            len += match &rest[len..] {
                [b'\r', b'\n', ..] => 2,
                [_, ..] => 1,
                [] => 0,
            };
        }

        self.take(len)
    }

    fn rest_of_string(&mut self, quote: Quote) -> Result<StringTail<'src>, LexerError> {
        let rest = self.rest();
        let closing = quote.as_byte();
        let mut len = 0;
        let mut terminated = false;

        while len < rest.len() {
            match rest[len] {
                b'\\' => len += 2,
                byte if byte == closing => {
                    len += 1;
                    terminated = true;
                    break;
                }
                _ => len += 1,
            }
        }

        let text = self.take(len.min(rest.len()))?;
        Ok(StringTail { text, terminated })
    }

    fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn units(src: &str) -> Vec<String> {
        let mut scanner = Scanner::new(src.as_bytes());
        let mut units = Vec::new();
        loop {
            let unit = scanner.next_unit().unwrap();
            if unit.is_empty() {
                break;
            }
            units.push(unit.to_string());
        }
        units
    }

    #[test]
    fn test_splits_runs_delimiters_and_words() {
        assert_eq!(
            units("use  fmt\r\n\tx(\"a\",b)//c"),
            vec![
                "use", "  ", "fmt", "\r\n", "\t", "x", "(", "\"", "a", "\"", ",", "b", ")", "//",
                "c"
            ]
        );
    }

    #[test]
    fn test_words_keep_dots_and_colons() {
        assert_eq!(
            units("a.b.c 2020-01-01T00:00:00Z 1.5e10"),
            vec!["a.b.c", " ", "2020-01-01T00:00:00Z", " ", "1.5e10"]
        );
    }

    #[test]
    fn test_eof_repeats_empty_unit() {
        let mut scanner = Scanner::new(b"x");
        assert_eq!(scanner.next_unit().unwrap(), "x");
        assert!(scanner.is_eof());
        assert_eq!(scanner.next_unit().unwrap(), "");
        assert_eq!(scanner.next_unit().unwrap(), "");
    }

    #[test]
    fn test_rest_of_line_with_and_without_break() {
        let mut scanner = Scanner::new(b"// note\r\nnext");
        assert_eq!(scanner.next_unit().unwrap(), "//");
        assert_eq!(scanner.rest_of_line(false).unwrap(), " note");
        assert_eq!(scanner.next_unit().unwrap(), "\r\n");

        let mut scanner = Scanner::new(b"abc def\nghi");
        assert_eq!(scanner.rest_of_line(true).unwrap(), "abc def\n");
        assert_eq!(scanner.position(), Position::new(8, 2, 1));
        assert_eq!(scanner.rest_of_line(true).unwrap(), "ghi");
    }

    #[test]
    fn test_rest_of_string_honours_escapes() {
        let mut scanner = Scanner::new(br#""a\"b" tail"#);
        assert_eq!(scanner.next_unit().unwrap(), "\"");
        let tail = scanner.rest_of_string(Quote::Double).unwrap();
        assert_eq!(tail.text, r#"a\"b""#);
        assert!(tail.terminated);
        assert_eq!(scanner.next_unit().unwrap(), " ");
    }

    #[test]
    fn test_rest_of_string_reports_missing_quote() {
        let mut scanner = Scanner::new(br"'abc\'");
        scanner.next_unit().unwrap();
        let tail = scanner.rest_of_string(Quote::Single).unwrap();
        assert_eq!(tail.text, r"abc\'");
        assert!(!tail.terminated);
        assert!(scanner.is_eof());
    }

    #[test]
    fn test_invalid_utf8_reports_offending_byte() {
        let mut scanner = Scanner::new(b"ok ab\xFFcd");
        assert_eq!(scanner.next_unit().unwrap(), "ok");
        assert_eq!(scanner.next_unit().unwrap(), " ");
        let error = scanner.next_unit().unwrap_err();
        assert_matches!(
            error,
            LexerError::InvalidEncoding { position } if position == Position::new(5, 1, 6)
        );
    }
}
