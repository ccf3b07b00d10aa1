//! Symbol kinds and the raw-text lookup table
use serde::{Serialize, Serializer};
use std::fmt;

/// Every kind a raw unit or a classified symbol can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    // === SPECIAL ===
    Eof,
    Newline,
    Spaces,
    Tabs,
    Indentation,
    Placeholder,
    Comment,
    BlockComment,

    // === LITERAL SPELLINGS (aliased during classification) ===
    True,
    False,
    NaN,
    Infinite,

    // === VALUES ===
    Bool,
    Float,
    Integer,
    Datetime,
    Str,

    // === NAMES ===
    Ident,
    Member,
    Members,

    // === PUNCTUATION ===
    Dot,
    Comma,
    Semicolon,
    Colon,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,

    // === OPERATORS ===
    Assign,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    Not,
    And,
    Or,

    // === DECLARATION KEYWORDS ===
    Use,
    Pub,
    Const,
    Var,
    Type,
    Func,

    // === STATEMENT KEYWORDS ===
    If,
    Else,
    For,
    Return,
    Break,
    Continue,
    Null,
}

/// Coarse grouping of kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// End of input and line breaks
    Special,
    /// Indentation, whitespace runs, comments and placeholders
    Trivia,
    Literal,
    Name,
    Delimiter,
    Operator,
    /// Keywords that may start a top-level declaration
    Declaration,
    Keyword,
}

impl Kind {
    /// Map raw text onto a kind. Text with no fixed spelling is a placeholder.
    pub fn lookup(text: &str) -> Kind {
        if text.is_empty() {
            return Kind::Eof;
        }
        if text.bytes().all(|b| b == b' ') {
            return Kind::Spaces;
        }
        if text.bytes().all(|b| b == b'\t') {
            return Kind::Tabs;
        }

        match text {
            "\n" | "\r\n" | "\r" => Kind::Newline,
            "//" => Kind::Comment,
            "---" => Kind::BlockComment,

            "true" => Kind::True,
            "false" => Kind::False,
            "NaN" => Kind::NaN,
            "Infinite" => Kind::Infinite,

            "." => Kind::Dot,
            "," => Kind::Comma,
            ";" => Kind::Semicolon,
            ":" => Kind::Colon,
            "(" => Kind::LeftParen,
            ")" => Kind::RightParen,
            "[" => Kind::LeftBracket,
            "]" => Kind::RightBracket,
            "{" => Kind::LeftBrace,
            "}" => Kind::RightBrace,

            "=" => Kind::Assign,
            "==" => Kind::Eq,
            "!=" => Kind::NotEq,
            "<" => Kind::Less,
            "<=" => Kind::LessEq,
            ">" => Kind::Greater,
            ">=" => Kind::GreaterEq,
            "+" => Kind::Add,
            "-" => Kind::Sub,
            "*" => Kind::Mul,
            "/" => Kind::Quo,
            "%" => Kind::Rem,
            "!" => Kind::Not,
            "&&" => Kind::And,
            "||" => Kind::Or,

            "use" => Kind::Use,
            "pub" => Kind::Pub,
            "const" => Kind::Const,
            "var" => Kind::Var,
            "type" => Kind::Type,
            "func" => Kind::Func,

            "if" => Kind::If,
            "else" => Kind::Else,
            "for" => Kind::For,
            "return" => Kind::Return,
            "break" => Kind::Break,
            "continue" => Kind::Continue,
            "null" => Kind::Null,

            _ => Kind::Placeholder,
        }
    }

    pub fn category(self) -> TokenClass {
        match self {
            Kind::Eof | Kind::Newline => TokenClass::Special,
            Kind::Spaces
            | Kind::Tabs
            | Kind::Indentation
            | Kind::Placeholder
            | Kind::Comment
            | Kind::BlockComment => TokenClass::Trivia,
            Kind::True
            | Kind::False
            | Kind::NaN
            | Kind::Infinite
            | Kind::Bool
            | Kind::Float
            | Kind::Integer
            | Kind::Datetime
            | Kind::Str
            | Kind::Null => TokenClass::Literal,
            Kind::Ident | Kind::Member | Kind::Members => TokenClass::Name,
            Kind::Dot
            | Kind::Comma
            | Kind::Semicolon
            | Kind::Colon
            | Kind::LeftParen
            | Kind::RightParen
            | Kind::LeftBracket
            | Kind::RightBracket
            | Kind::LeftBrace
            | Kind::RightBrace => TokenClass::Delimiter,
            Kind::Assign
            | Kind::Eq
            | Kind::NotEq
            | Kind::Less
            | Kind::LessEq
            | Kind::Greater
            | Kind::GreaterEq
            | Kind::Add
            | Kind::Sub
            | Kind::Mul
            | Kind::Quo
            | Kind::Rem
            | Kind::Not
            | Kind::And
            | Kind::Or => TokenClass::Operator,
            Kind::Use | Kind::Pub | Kind::Const | Kind::Var | Kind::Type | Kind::Func => {
                TokenClass::Declaration
            }
            Kind::If | Kind::Else | Kind::For | Kind::Return | Kind::Break | Kind::Continue => {
                TokenClass::Keyword
            }
        }
    }

    /// Whether this kind may begin a top-level declaration
    pub fn is_declaration(self) -> bool {
        self.category() == TokenClass::Declaration
    }

    /// Kinds that never carry program meaning on their own
    pub fn is_trivia(self) -> bool {
        self.category() == TokenClass::Trivia
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Eof => "EOF",
            Kind::Newline => "NEWLINE",
            Kind::Spaces => "SPACES",
            Kind::Tabs => "TABS",
            Kind::Indentation => "INDENTATION",
            Kind::Placeholder => "PLACEHOLDER",
            Kind::Comment => "COMMENT",
            Kind::BlockComment => "BLOCK_COMMENT",
            Kind::True => "TRUE",
            Kind::False => "FALSE",
            Kind::NaN => "NAN",
            Kind::Infinite => "INFINITE",
            Kind::Bool => "BOOL",
            Kind::Float => "FLOAT",
            Kind::Integer => "INTEGER",
            Kind::Datetime => "DATETIME",
            Kind::Str => "STRING",
            Kind::Ident => "IDENT",
            Kind::Member => "MEMBER",
            Kind::Members => "MEMBERS",
            Kind::Dot => "DOT",
            Kind::Comma => "COMMA",
            Kind::Semicolon => "SEMICOLON",
            Kind::Colon => "COLON",
            Kind::LeftParen => "LPAREN",
            Kind::RightParen => "RPAREN",
            Kind::LeftBracket => "LBRACK",
            Kind::RightBracket => "RBRACK",
            Kind::LeftBrace => "LBRACE",
            Kind::RightBrace => "RBRACE",
            Kind::Assign => "ASSIGN",
            Kind::Eq => "EQ",
            Kind::NotEq => "NEQ",
            Kind::Less => "LSS",
            Kind::LessEq => "LEQ",
            Kind::Greater => "GTR",
            Kind::GreaterEq => "GEQ",
            Kind::Add => "ADD",
            Kind::Sub => "SUB",
            Kind::Mul => "MUL",
            Kind::Quo => "QUO",
            Kind::Rem => "REM",
            Kind::Not => "NOT",
            Kind::And => "LAND",
            Kind::Or => "LOR",
            Kind::Use => "USE",
            Kind::Pub => "PUB",
            Kind::Const => "CONST",
            Kind::Var => "VAR",
            Kind::Type => "TYPE",
            Kind::Func => "FUNC",
            Kind::If => "IF",
            Kind::Else => "ELSE",
            Kind::For => "FOR",
            Kind::Return => "RETURN",
            Kind::Break => "BREAK",
            Kind::Continue => "CONTINUE",
            Kind::Null => "NULL",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_special_units() {
        assert_eq!(Kind::lookup(""), Kind::Eof);
        assert_eq!(Kind::lookup("\n"), Kind::Newline);
        assert_eq!(Kind::lookup("\r\n"), Kind::Newline);
        assert_eq!(Kind::lookup("\r"), Kind::Newline);
        assert_eq!(Kind::lookup("    "), Kind::Spaces);
        assert_eq!(Kind::lookup("\t\t"), Kind::Tabs);
        assert_eq!(Kind::lookup("//"), Kind::Comment);
        assert_eq!(Kind::lookup("---"), Kind::BlockComment);
    }

    #[test]
    fn test_lookup_fixed_spellings() {
        assert_eq!(Kind::lookup("func"), Kind::Func);
        assert_eq!(Kind::lookup("return"), Kind::Return);
        assert_eq!(Kind::lookup(">="), Kind::GreaterEq);
        assert_eq!(Kind::lookup("NaN"), Kind::NaN);
        assert_eq!(Kind::lookup("."), Kind::Dot);
    }

    #[test]
    fn test_lookup_falls_back_to_placeholder() {
        assert_eq!(Kind::lookup("\""), Kind::Placeholder);
        assert_eq!(Kind::lookup("hello"), Kind::Placeholder);
        assert_eq!(Kind::lookup("42"), Kind::Placeholder);
        assert_eq!(Kind::lookup("--"), Kind::Placeholder);
        assert_eq!(Kind::lookup(" \t"), Kind::Placeholder);
    }

    #[test]
    fn test_declaration_membership() {
        let declarations: Vec<Kind> = ["use", "pub", "const", "var", "type", "func"]
            .iter()
            .map(|word| Kind::lookup(word))
            .collect();
        assert!(declarations.iter().all(|kind| kind.is_declaration()));

        for kind in [
            Kind::Comment,
            Kind::BlockComment,
            Kind::Indentation,
            Kind::Newline,
            Kind::If,
            Kind::Ident,
            Kind::Eof,
        ] {
            assert!(!kind.is_declaration(), "{} must not open a declaration", kind);
        }
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&Kind::Datetime).unwrap();
        assert_eq!(json, "\"DATETIME\"");
    }
}
