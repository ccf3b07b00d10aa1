//! The single-pass classification loop shared by every driver
use super::classifier::{self, Classified};
use super::indentation::{IndentationTracker, RunRole};
use super::sink::Sink;
use super::trivia::TriviaCoalescer;
use super::LexerError;
use crate::log_debug;
use crate::scanner::RawSource;
use crate::tokens::{Kind, Symbol};
use crate::utils::Position;
use std::borrow::Cow;
use std::marker::PhantomData;

/// Everything one pass mutates. Created fresh for every run.
#[derive(Debug, Clone, Default)]
pub struct PassState {
    indentation: IndentationTracker,
    trivia: TriviaCoalescer,
    /// Kind of the previous unit after classification
    prev: Option<Kind>,
    /// Whether the next unit is the first of the document
    top_level: bool,
    /// Length of the last separator run that nothing held
    separator: usize,
}

impl PassState {
    pub fn new(prev: Option<Kind>) -> Self {
        Self {
            prev,
            top_level: true,
            ..Self::default()
        }
    }

    pub fn prev(&self) -> Option<Kind> {
        self.prev
    }
}

pub struct Engine<'src, R, S> {
    source: R,
    sink: S,
    state: PassState,
    _src: PhantomData<&'src ()>,
}

impl<'src, R, S> Engine<'src, R, S>
where
    R: RawSource<'src>,
    S: Sink,
{
    pub fn new(source: R, sink: S) -> Self {
        let state = PassState::new(sink.last_kind());
        Self {
            source,
            sink,
            state,
            _src: PhantomData,
        }
    }

    /// Drive the pass to Eof or the first error
    pub fn run(mut self) -> Result<(), LexerError> {
        loop {
            let position = self.source.position();
            let text = self.source.next_unit()?;
            let kind = Kind::lookup(text);

            let opens_declaration = kind == Kind::Eof || kind.is_declaration();
            let (position, kind, text) = if self.at_root() && !opens_declaration {
                self.absorb(text)?
            } else {
                (position, kind, text)
            };

            if kind == Kind::Eof {
                self.hold_trailing_separator();
                return self.emit(position, Classified::borrowed(Kind::Eof, text));
            }
            self.step(position, kind, text)?;
        }
    }

    /// Focus is at the root when the sink says so, otherwise only for the
    /// first unit of the pass
    fn at_root(&mut self) -> bool {
        let first = std::mem::take(&mut self.state.top_level);
        self.sink.at_document_root().unwrap_or(first)
    }

    /// Merge `first` and every following line into one placeholder, up to
    /// Eof or a unit that opens a declaration. Returns that stopping unit.
    fn absorb(&mut self, first: &'src str) -> Result<(Position, Kind, &'src str), LexerError> {
        self.state.separator = 0;
        let mut absorbed = String::from(first);
        let mut unit = first;

        loop {
            if Kind::lookup(unit) != Kind::Newline {
                absorbed.push_str(self.source.rest_of_line(true)?);
            }

            let position = self.source.position();
            let next = self.source.next_unit()?;
            let kind = Kind::lookup(next);

            if kind == Kind::Eof || kind.is_declaration() {
                log_debug!("Absorbed top-level placeholder",
                    "bytes" => absorbed.len(),
                    "stopped_at" => position
                );
                self.state.trivia.hold(self.state.prev, Kind::Placeholder, &absorbed);
                self.state.prev = Some(Kind::Placeholder);
                return Ok((position, kind, next));
            }

            absorbed.push_str(next);
            unit = next;
        }
    }

    fn step(&mut self, position: Position, kind: Kind, text: &'src str) -> Result<(), LexerError> {
        let prev = self.state.prev;
        self.state.separator = 0;

        let classified = match kind {
            Kind::Spaces | Kind::Tabs => {
                match self.state.indentation.observe(kind, prev, position)? {
                    RunRole::Indentation => Classified::borrowed(Kind::Indentation, text),
                    RunRole::Separator => {
                        if !self.state.trivia.absorb_separator(text) {
                            self.state.separator = text.len();
                        }
                        self.state.prev = Some(Kind::Spaces);
                        return Ok(());
                    }
                    RunRole::TrailingComment => {
                        let tail = self.source.rest_of_line(false)?;
                        Classified::owned(Kind::Comment, format!("{}{}", text, tail))
                    }
                }
            }
            _ => classifier::classify(&mut self.source, position, kind, text)?,
        };

        self.state.prev = Some(classified.kind);
        if self
            .state
            .trivia
            .hold(prev, classified.kind, &classified.text)
        {
            return Ok(());
        }
        self.emit(position, classified)
    }

    /// Spaces closing the input have no following symbol to restore them
    fn hold_trailing_separator(&mut self) {
        let len = std::mem::take(&mut self.state.separator);
        if len > 0 {
            let spaces = " ".repeat(len);
            self.state.trivia.hold(self.state.prev, Kind::Placeholder, &spaces);
            self.state.prev = Some(Kind::Placeholder);
        }
    }

    /// Release held trivia, then hand the meaningful unit to the sink
    fn emit(&mut self, position: Position, classified: Classified<'src>) -> Result<(), LexerError> {
        for (offset, kind, text) in self.state.trivia.flush(position.offset) {
            let at = self.source.locate(offset);
            self.deliver(Symbol::new(at, kind, text))?;
        }

        let Classified { kind, text } = classified;
        self.deliver(Symbol::new(position, kind, Cow::into_owned(text)))
    }

    fn deliver(&mut self, symbol: Symbol) -> Result<(), LexerError> {
        let position = symbol.position;
        self.sink
            .accept(symbol)
            .map_err(|source| LexerError::Sink { position, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::sink::Collector;
    use crate::scanner::Scanner;

    fn run(src: &str) -> Vec<(Kind, String)> {
        let mut collector = Collector::new();
        Engine::new(Scanner::new(src.as_bytes()), &mut collector)
            .run()
            .unwrap();
        collector
            .into_symbols()
            .into_iter()
            .map(|s| (s.kind, s.source))
            .collect()
    }

    fn kinds(src: &str) -> Vec<Kind> {
        run(src).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_first_unit_declaration_is_not_absorbed() {
        assert_eq!(
            run("use fmt\n"),
            vec![
                (Kind::Use, "use".to_string()),
                (Kind::Ident, "fmt".to_string()),
                (Kind::Newline, "\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_indentation_before_meaningful_unit() {
        assert_eq!(
            kinds("func f(\n\tx,\n)\n"),
            vec![
                Kind::Func,
                Kind::Ident,
                Kind::LeftParen,
                Kind::Newline,
                Kind::Indentation,
                Kind::Ident,
                Kind::Comma,
                Kind::Newline,
                Kind::RightParen,
                Kind::Newline,
            ]
        );
    }

    #[test]
    fn test_stray_tab_turns_rest_of_line_into_comment() {
        assert_eq!(
            run("var x\tnote this\nvar y"),
            vec![
                (Kind::Var, "var".to_string()),
                (Kind::Ident, "x".to_string()),
                (Kind::Placeholder, "\tnote this".to_string()),
                (Kind::Newline, "\n".to_string()),
                (Kind::Var, "var".to_string()),
                (Kind::Ident, "y".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_lines_collapse_into_one_placeholder() {
        assert_eq!(
            run("var a\n\n\n// c\n\nvar b"),
            vec![
                (Kind::Var, "var".to_string()),
                (Kind::Ident, "a".to_string()),
                (Kind::Newline, "\n".to_string()),
                (Kind::Placeholder, "\n\n// c".to_string()),
                (Kind::Newline, "\n".to_string()),
                (Kind::Placeholder, "\n".to_string()),
                (Kind::Var, "var".to_string()),
                (Kind::Ident, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_trailing_trivia_is_flushed_at_eof() {
        assert_eq!(
            run("const k = 1 // one"),
            vec![
                (Kind::Const, "const".to_string()),
                (Kind::Ident, "k".to_string()),
                (Kind::Assign, "=".to_string()),
                (Kind::Integer, "1".to_string()),
                (Kind::Placeholder, "// one".to_string()),
            ]
        );
    }

    #[test]
    fn test_literal_aliases_in_stream() {
        assert_eq!(
            kinds("var t = true\nvar n = NaN"),
            vec![
                Kind::Var,
                Kind::Ident,
                Kind::Assign,
                Kind::Bool,
                Kind::Newline,
                Kind::Var,
                Kind::Ident,
                Kind::Assign,
                Kind::Float,
            ]
        );
    }

    #[test]
    fn test_pass_state_starts_fresh() {
        let state = PassState::new(Some(Kind::Newline));
        assert!(state.top_level);
        assert_eq!(state.prev(), Some(Kind::Newline));
        assert!(state.trivia.is_empty());
        assert_eq!(state.separator, 0);
    }

    #[test]
    fn test_spaces_closing_input_are_kept() {
        assert_eq!(
            run("var x = 1   "),
            vec![
                (Kind::Var, "var".to_string()),
                (Kind::Ident, "x".to_string()),
                (Kind::Assign, "=".to_string()),
                (Kind::Integer, "1".to_string()),
                (Kind::Placeholder, "   ".to_string()),
            ]
        );
    }

    #[test]
    fn test_spaces_before_line_break_stay_dropped() {
        assert_eq!(
            kinds("var x  
var y"),
            vec![
                Kind::Var,
                Kind::Ident,
                Kind::Newline,
                Kind::Var,
                Kind::Ident,
            ]
        );
    }
}
