//! Arena-backed document tree
use super::{BuildError, TreeBuilder};
use crate::config::compile_time::tree::MAX_NESTING_DEPTH;
use crate::tokens::{reconstruct, Kind, Symbol};
use crate::utils::Position;
use serde::Serialize;

pub type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "keyword")]
pub enum NodeKind {
    Document,
    /// Opened by a declaration keyword at the root
    Declaration(Kind),
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Indices into [`File::symbols`], in push order
    pub symbols: Vec<usize>,
    pub finalized: bool,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            symbols: Vec::new(),
            finalized: false,
        }
    }
}

/// A document: the root node, one child per top-level declaration, and the
/// flat list of every pushed symbol
#[derive(Debug, Clone, Serialize)]
pub struct File {
    nodes: Vec<Node>,
    symbols: Vec<Symbol>,
    #[serde(skip)]
    active: NodeId,
    #[serde(skip)]
    last_kind: Option<Kind>,
    #[serde(skip)]
    depth: usize,
}

impl Default for File {
    fn default() -> Self {
        Self::new()
    }
}

impl File {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document, None)],
            symbols: Vec::new(),
            active: ROOT,
            last_kind: None,
            depth: 0,
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn declarations(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.root()
            .children
            .iter()
            .filter_map(move |id| self.nodes.get(*id).map(|node| (*id, node)))
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn active(&self) -> NodeId {
        self.active
    }

    /// Source text covered by a node's own symbols
    pub fn text_of(&self, id: NodeId) -> Option<String> {
        let node = self.nodes.get(id)?;
        let symbols: Vec<Symbol> = node
            .symbols
            .iter()
            .filter_map(|index| self.symbols.get(*index).cloned())
            .collect();
        Some(reconstruct(&symbols))
    }

    /// Whether Eof has been pushed
    pub fn is_closed(&self) -> bool {
        self.root().finalized
    }

    fn attach(&mut self, position: Position, kind: Kind, text: &str) {
        let index = self.symbols.len();
        self.symbols.push(Symbol::new(position, kind, text));
        self.nodes[self.active].symbols.push(index);
    }

    fn open(&mut self, keyword: Kind) {
        let id = self.nodes.len();
        self.nodes
            .push(Node::new(NodeKind::Declaration(keyword), Some(ROOT)));
        self.nodes[ROOT].children.push(id);
        self.active = id;
        self.depth = 0;
    }

    fn finalize(&mut self) {
        self.nodes[self.active].finalized = true;
        self.active = ROOT;
    }

    fn push_at_root(&mut self, position: Position, kind: Kind, text: &str) -> Result<(), BuildError> {
        match kind {
            Kind::Eof => {
                self.attach(position, kind, text);
                self.finalize();
            }
            keyword if keyword.is_declaration() => {
                self.open(keyword);
                self.attach(position, kind, text);
            }
            _ => return Err(BuildError::UnexpectedAtRoot { kind, position }),
        }
        Ok(())
    }

    fn push_in_declaration(
        &mut self,
        position: Position,
        kind: Kind,
        text: &str,
    ) -> Result<(), BuildError> {
        match kind {
            Kind::LeftParen | Kind::LeftBracket | Kind::LeftBrace => {
                if self.depth >= MAX_NESTING_DEPTH {
                    return Err(BuildError::NestingTooDeep {
                        limit: MAX_NESTING_DEPTH,
                        position,
                    });
                }
                self.depth += 1;
                self.attach(position, kind, text);
            }
            Kind::RightParen | Kind::RightBracket | Kind::RightBrace => {
                if self.depth == 0 {
                    return Err(BuildError::UnbalancedDelimiter { kind, position });
                }
                self.depth -= 1;
                self.attach(position, kind, text);
            }
            Kind::Newline | Kind::Semicolon if self.depth == 0 => {
                self.attach(position, kind, text);
                self.finalize();
            }
            Kind::Eof => {
                if self.depth > 0 {
                    return Err(BuildError::UnclosedDelimiter {
                        open: self.depth,
                        position,
                    });
                }
                self.finalize();
                self.attach(position, kind, text);
                self.finalize();
            }
            _ => self.attach(position, kind, text),
        }
        Ok(())
    }
}

impl TreeBuilder for File {
    fn is_root(&self) -> bool {
        self.active == ROOT
    }

    fn last_kind(&self) -> Option<Kind> {
        self.last_kind
    }

    fn push(&mut self, position: Position, kind: Kind, text: &str) -> Result<(), BuildError> {
        if self.is_closed() {
            return Err(BuildError::UnexpectedAtRoot { kind, position });
        }

        if kind.is_trivia() {
            self.attach(position, kind, text);
        } else if self.is_root() {
            self.push_at_root(position, kind, text)?;
        } else {
            self.push_in_declaration(position, kind, text)?;
        }

        self.last_kind = Some(kind);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn at(offset: usize) -> Position {
        Position::new(offset, 1, offset as u32 + 1)
    }

    #[test]
    fn test_declaration_opens_and_newline_finalizes() {
        let mut file = File::new();
        file.push(at(0), Kind::Use, "use").unwrap();
        assert!(!file.is_root());
        file.push(at(4), Kind::Ident, "fmt").unwrap();
        file.push(at(7), Kind::Newline, "\n").unwrap();
        assert!(file.is_root());
        assert_eq!(file.last_kind(), Some(Kind::Newline));

        let declarations: Vec<_> = file.declarations().collect();
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].1.kind, NodeKind::Declaration(Kind::Use));
        assert!(declarations[0].1.finalized);
        assert_eq!(file.text_of(declarations[0].0).unwrap(), "use fmt\n");
    }

    #[test]
    fn test_newline_inside_brackets_keeps_focus() {
        let mut file = File::new();
        file.push(at(0), Kind::Func, "func").unwrap();
        file.push(at(4), Kind::LeftParen, "(").unwrap();
        file.push(at(5), Kind::Newline, "\n").unwrap();
        assert!(!file.is_root());
        file.push(at(6), Kind::RightParen, ")").unwrap();
        file.push(at(7), Kind::Semicolon, ";").unwrap();
        assert!(file.is_root());
    }

    #[test]
    fn test_trivia_attaches_to_active_node() {
        let mut file = File::new();
        file.push(at(0), Kind::Placeholder, "notes\n").unwrap();
        assert!(file.is_root());
        assert_eq!(file.root().symbols, vec![0]);

        file.push(at(6), Kind::Var, "var").unwrap();
        file.push(at(9), Kind::Comment, "\t// x").unwrap();
        let (id, node) = file.declarations().next().unwrap();
        assert_eq!(node.symbols.len(), 2);
        assert_eq!(file.active(), id);
    }

    #[test]
    fn test_unexpected_symbol_at_root() {
        let mut file = File::new();
        let error = file.push(at(0), Kind::Ident, "hello").unwrap_err();
        assert_matches!(error, BuildError::UnexpectedAtRoot { kind: Kind::Ident, .. });
        assert_eq!(error.error_code(), crate::logging::codes::tree::UNEXPECTED_AT_ROOT);
    }

    #[test]
    fn test_bracket_errors() {
        let mut file = File::new();
        file.push(at(0), Kind::Const, "const").unwrap();
        let error = file.push(at(5), Kind::RightBrace, "}").unwrap_err();
        assert_matches!(error, BuildError::UnbalancedDelimiter { kind: Kind::RightBrace, .. });

        let mut file = File::new();
        file.push(at(0), Kind::Type, "type").unwrap();
        file.push(at(4), Kind::LeftBrace, "{").unwrap();
        let error = file.push(at(5), Kind::Eof, "").unwrap_err();
        assert_matches!(error, BuildError::UnclosedDelimiter { open: 1, .. });
    }

    #[test]
    fn test_nesting_limit() {
        let mut file = File::new();
        file.push(at(0), Kind::Var, "var").unwrap();
        for offset in 0..MAX_NESTING_DEPTH {
            file.push(at(offset + 3), Kind::LeftBracket, "[").unwrap();
        }
        let error = file
            .push(at(MAX_NESTING_DEPTH + 3), Kind::LeftBracket, "[")
            .unwrap_err();
        assert_matches!(error, BuildError::NestingTooDeep { limit, .. } if limit == MAX_NESTING_DEPTH);
    }

    #[test]
    fn test_eof_closes_open_declaration_and_document() {
        let mut file = File::new();
        file.push(at(0), Kind::Pub, "pub").unwrap();
        file.push(at(3), Kind::Eof, "").unwrap();
        assert!(file.is_closed());
        assert!(file.declarations().all(|(_, node)| node.finalized));
        assert_eq!(file.root().symbols, vec![1]);

        let error = file.push(at(3), Kind::Use, "use").unwrap_err();
        assert_matches!(error, BuildError::UnexpectedAtRoot { .. });
    }

    #[test]
    fn test_serializes_nodes_and_symbols() {
        let mut file = File::new();
        file.push(at(0), Kind::Use, "use").unwrap();
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["nodes"][1]["kind"]["type"], "Declaration");
        assert_eq!(value["nodes"][1]["kind"]["keyword"], "USE");
        assert_eq!(value["symbols"][0]["source"], "use");
    }
}
