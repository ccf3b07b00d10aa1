//! Document-wide indentation style
use crate::lexical::LexerError;
use crate::tokens::Kind;
use crate::utils::Position;

pub use crate::lexical::error::IndentMixture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndentStyle {
    #[default]
    Unset,
    Spaces,
    Tabs,
}

/// What a horizontal run turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunRole {
    /// Leading run of a line
    Indentation,
    /// Spaces between two units on a line, never emitted
    Separator,
    /// Tabs in the middle of a line; the rest of the line is commentary
    TrailingComment,
}

/// Fixes the style on the first leading run and rejects any later mixing
#[derive(Debug, Clone, Default)]
pub struct IndentationTracker {
    style: IndentStyle,
}

fn at_line_start(prev: Option<Kind>) -> bool {
    matches!(prev, None | Some(Kind::Newline))
}

impl IndentationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self) -> IndentStyle {
        self.style
    }

    /// Decide the role of a `Spaces` or `Tabs` run given the kind before it
    pub fn observe(
        &mut self,
        run: Kind,
        prev: Option<Kind>,
        position: Position,
    ) -> Result<RunRole, LexerError> {
        let leading = at_line_start(prev);
        let follows_indentation = prev == Some(Kind::Indentation);

        match run {
            Kind::Spaces => {
                if follows_indentation || (leading && self.style == IndentStyle::Tabs) {
                    return Err(LexerError::BadIndentation {
                        mixture: IndentMixture::TabsThenSpaces,
                        position,
                    });
                }
                if leading {
                    self.fix(IndentStyle::Spaces);
                    return Ok(RunRole::Indentation);
                }
                Ok(RunRole::Separator)
            }
            Kind::Tabs => {
                if follows_indentation || (leading && self.style == IndentStyle::Spaces) {
                    return Err(LexerError::BadIndentation {
                        mixture: IndentMixture::SpacesThenTabs,
                        position,
                    });
                }
                if leading {
                    self.fix(IndentStyle::Tabs);
                    return Ok(RunRole::Indentation);
                }
                Ok(RunRole::TrailingComment)
            }
            _ => Ok(RunRole::Separator),
        }
    }

    fn fix(&mut self, style: IndentStyle) {
        if self.style == IndentStyle::Unset {
            self.style = style;
        }
    }
}
