//! Arena syntax tree.
//!
//! Nodes are appended bottom-up as grammar rules complete and never change
//! afterwards. Children and parents are plain indices, so the tree cannot
//! contain cycles and every traversal terminates.
//!
//! The builder mirrors a green-tree builder: `start_node`, `token`,
//! `checkpoint`, `start_node_at` and `finish_node`.

use super::kinds::TokenKind;

/// Grammar production of a node.
///
/// Operator-carrying productions keep the operator in the variant so a
/// single `match` can tell `a + b` from `a * b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    SourceFile,
    /// Tokens skipped during recovery, or a missing operand.
    Error,

    // Declarations
    Inherit,
    FunctionDef,
    FunctionPrototype,
    Modifiers,
    TypeSpec,
    ParameterList,
    Parameter,
    VariableDecl,
    VariableDeclarator,
    ClassDef,

    // Statements
    Block,
    ExprStatement,
    EmptyStatement,
    IfStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForeachStatement,
    ForeachVar,
    SwitchStatement,
    CaseLabel,
    DefaultLabel,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,

    // Expressions
    CommaExpr,
    AssignExpr { op: AssignOp },
    ConditionalExpr,
    BinaryExpr { op: BinaryOp },
    UnaryExpr { op: UnaryOp },
    PostfixExpr { op: PostfixOp },
    CastExpr,
    CatchExpr,
    CallExpr,
    ArgumentList,
    SliceExpr { kind: SliceKind },
    /// `obj->name`
    MemberAccess,
    /// `base::name`, `::name`, `efun::name`
    ScopeAccess,
    /// `value.field`
    FieldAccess,
    ParenExpr,
    Name,
    IntLiteral,
    FloatLiteral,
    CharLiteral,
    /// One or more adjacent string literals.
    StringLiteral,
    HeredocString,
    HeredocArray,
    ArrayLiteral,
    MappingLiteral,
    MappingEntry,
    Closure,
    FunctionPointer,
    AnonymousFunction,
    Placeholder,
}

impl RuleKind {
    pub fn is_expression(self) -> bool {
        use RuleKind::*;
        matches!(
            self,
            CommaExpr
                | AssignExpr { .. }
                | ConditionalExpr
                | BinaryExpr { .. }
                | UnaryExpr { .. }
                | PostfixExpr { .. }
                | CastExpr
                | CatchExpr
                | CallExpr
                | SliceExpr { .. }
                | MemberAccess
                | ScopeAccess
                | FieldAccess
                | ParenExpr
                | Name
                | IntLiteral
                | FloatLiteral
                | CharLiteral
                | StringLiteral
                | HeredocString
                | HeredocArray
                | ArrayLiteral
                | MappingLiteral
                | Closure
                | FunctionPointer
                | AnonymousFunction
                | Placeholder
        )
    }

    pub fn is_statement(self) -> bool {
        use RuleKind::*;
        matches!(
            self,
            Block
                | ExprStatement
                | EmptyStatement
                | IfStatement
                | WhileStatement
                | DoWhileStatement
                | ForStatement
                | ForeachStatement
                | SwitchStatement
                | CaseLabel
                | DefaultLabel
                | ReturnStatement
                | BreakStatement
                | ContinueStatement
                | VariableDecl
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PipePipe => Self::Or,
            TokenKind::AmpAmp => Self::And,
            TokenKind::Pipe => Self::BitOr,
            TokenKind::Caret => Self::BitXor,
            TokenKind::Amp => Self::BitAnd,
            TokenKind::EqEq => Self::Eq,
            TokenKind::BangEq => Self::NotEq,
            TokenKind::Lt => Self::Lt,
            TokenKind::Gt => Self::Gt,
            TokenKind::LtEq => Self::LtEq,
            TokenKind::GtEq => Self::GtEq,
            TokenKind::Shl => Self::Shl,
            TokenKind::Shr => Self::Shr,
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Percent => Self::Rem,
            _ => return None,
        })
    }

    /// Binding strength, higher binds tighter. All levels are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::BitOr => 3,
            Self::BitXor => 4,
            Self::BitAnd => 5,
            Self::Eq | Self::NotEq => 6,
            Self::Lt | Self::Gt | Self::LtEq | Self::GtEq => 7,
            Self::Shl | Self::Shr => 8,
            Self::Add | Self::Sub => 9,
            Self::Mul | Self::Div | Self::Rem => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl AssignOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Eq => Self::Assign,
            TokenKind::PlusEq => Self::Add,
            TokenKind::MinusEq => Self::Sub,
            TokenKind::StarEq => Self::Mul,
            TokenKind::SlashEq => Self::Div,
            TokenKind::PercentEq => Self::Rem,
            TokenKind::AmpEq => Self::BitAnd,
            TokenKind::PipeEq => Self::BitOr,
            TokenKind::CaretEq => Self::BitXor,
            TokenKind::ShlEq => Self::Shl,
            TokenKind::ShrEq => Self::Shr,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Rem => "%=",
            Self::BitAnd => "&=",
            Self::BitOr => "|=",
            Self::BitXor => "^=",
            Self::Shl => "<<=",
            Self::Shr => ">>=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    PreIncrement,
    PreDecrement,
    Plus,
    Minus,
    Not,
    BitNot,
    /// `ref x` and `&x` argument passing.
    Ref,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PlusPlus => Self::PreIncrement,
            TokenKind::MinusMinus => Self::PreDecrement,
            TokenKind::Plus => Self::Plus,
            TokenKind::Minus => Self::Minus,
            TokenKind::Bang => Self::Not,
            TokenKind::Tilde => Self::BitNot,
            TokenKind::KwRef | TokenKind::Amp => Self::Ref,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreIncrement => "++",
            Self::PreDecrement => "--",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Ref => "ref",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

impl PostfixOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }
}

/// Shape of a `[ ... ]` subscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKind {
    /// `a[i]`
    Index,
    /// `a[<i]`
    TailIndex,
    /// `a[x..y]` with each bound optional and independently tail-relative.
    Range { start: RangeBound, end: RangeBound },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    /// Bound omitted.
    Open,
    /// `i`, counted from the start.
    FromHead,
    /// `<i`, counted from the end.
    FromTail,
}

impl RangeBound {
    fn as_str(self) -> &'static str {
        match self {
            Self::Open => "",
            Self::FromHead => "i",
            Self::FromTail => "<i",
        }
    }
}

/// Subscript shape in source notation: `[i]`, `[<i]`, `[i..<i]`, `[..]`.
impl std::fmt::Display for SliceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index => f.write_str("[i]"),
            Self::TailIndex => f.write_str("[<i]"),
            Self::Range { start, end } => write!(f, "[{}..{}]", start.as_str(), end.as_str()),
        }
    }
}

/// Index of a node in its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a token in the [`TokenStream`](super::TokenStream) the tree was
/// built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);

impl TokenId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Node(NodeId),
    Token(TokenId),
}

/// Half-open range of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSpan {
    pub start: u32,
    pub end: u32,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start as u32,
            end: end as u32,
        }
    }

    pub fn empty(at: usize) -> Self {
        Self::new(at, at)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn contains(&self, token: TokenId) -> bool {
        self.start <= token.0 && token.0 < self.end
    }

    pub fn contains_span(&self, other: TokenSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }

    fn cover(self, other: TokenSpan) -> TokenSpan {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        TokenSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Node record stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    rule: RuleKind,
    children: std::ops::Range<u32>,
    span: TokenSpan,
}

impl SyntaxNode {
    pub fn rule(&self) -> RuleKind {
        self.rule
    }

    /// Token indices covered by this node, trivia included.
    pub fn span(&self) -> TokenSpan {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    elements: Vec<Element>,
    parents: Vec<Option<NodeId>>,
    root: NodeId,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn rule(&self, id: NodeId) -> RuleKind {
        self.node(id).rule
    }

    pub fn span(&self, id: NodeId) -> TokenSpan {
        self.node(id).span
    }

    pub fn children(&self, id: NodeId) -> &[Element] {
        let range = &self.node(id).children;
        &self.elements[range.start as usize..range.end as usize]
    }

    pub fn child_nodes(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).iter().filter_map(|e| match e {
            Element::Node(n) => Some(*n),
            Element::Token(_) => None,
        })
    }

    /// Direct child tokens, trivia included.
    pub fn child_tokens(&self, id: NodeId) -> impl Iterator<Item = TokenId> + '_ {
        self.children(id).iter().filter_map(|e| match e {
            Element::Token(t) => Some(*t),
            Element::Node(_) => None,
        })
    }

    pub fn first_child(&self, id: NodeId, rule: RuleKind) -> Option<NodeId> {
        self.child_nodes(id).find(|c| self.rule(*c) == rule)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()]
    }

    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |n| self.parent(*n))
    }

    /// Preorder walk starting at (and including) `id`.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Every node, in creation order (children before parents).
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }
}

pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        for element in self.tree.children(id).iter().rev() {
            if let Element::Node(child) = element {
                self.stack.push(*child);
            }
        }
        Some(id)
    }
}

/// Builder position for retroactive wrapping.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

struct OpenNode {
    rule: RuleKind,
    first_child: usize,
}

/// Append-only tree construction.
pub(crate) struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    elements: Vec<Element>,
    parents: Vec<Option<NodeId>>,
    /// Children of open nodes, flattened.
    pending: Vec<(Element, TokenSpan)>,
    open: Vec<OpenNode>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            elements: Vec::new(),
            parents: Vec::new(),
            pending: Vec::new(),
            open: Vec::new(),
        }
    }

    pub(crate) fn start_node(&mut self, rule: RuleKind) {
        self.open.push(OpenNode {
            rule,
            first_child: self.pending.len(),
        });
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pending.len())
    }

    /// Opens a node that adopts every child emitted since `checkpoint`.
    pub(crate) fn start_node_at(&mut self, checkpoint: Checkpoint, rule: RuleKind) {
        debug_assert!(
            self.open.last().is_none_or(|n| n.first_child <= checkpoint.0),
            "checkpoint predates the innermost open node"
        );
        self.open.push(OpenNode {
            rule,
            first_child: checkpoint.0,
        });
    }

    pub(crate) fn token(&mut self, index: usize) {
        self.pending.push((
            Element::Token(TokenId::new(index)),
            TokenSpan::new(index, index + 1),
        ));
    }

    /// Closes the innermost open node. `empty_at` positions nodes without
    /// children.
    pub(crate) fn finish_node(&mut self, empty_at: usize) {
        let Some(open) = self.open.pop() else {
            return;
        };
        let id = NodeId(self.nodes.len() as u32);
        let start = self.elements.len() as u32;
        let mut span = TokenSpan::empty(empty_at);
        let mut first = true;
        for (element, child_span) in self.pending.drain(open.first_child..) {
            if let Element::Node(child) = element {
                self.parents[child.index()] = Some(id);
            }
            span = if first {
                first = false;
                child_span
            } else {
                span.cover(child_span)
            };
            self.elements.push(element);
        }
        let end = self.elements.len() as u32;
        self.nodes.push(SyntaxNode {
            rule: open.rule,
            children: start..end,
            span,
        });
        self.parents.push(None);
        self.pending.push((Element::Node(id), span));
    }

    pub(crate) fn finish(mut self, empty_at: usize) -> SyntaxTree {
        while !self.open.is_empty() {
            self.finish_node(empty_at);
        }
        let root = match self.pending.last() {
            Some((Element::Node(id), _)) => *id,
            _ => {
                self.start_node(RuleKind::SourceFile);
                self.finish_node(empty_at);
                NodeId(self.nodes.len() as u32 - 1)
            }
        };
        SyntaxTree {
            nodes: self.nodes,
            elements: self.elements,
            parents: self.parents,
            root,
        }
    }
}
