//! In-memory block tree.
//!
//! Each [`Node`] exclusively owns its children: the value/statement blocks plugged into its inputs and the next
//! statement in its chain. There are no back-references; the compiler only ever reads the tree.
//!
//! Chains can be arbitrarily long, so dropping, cloning, comparing and debug-printing a [`Node`] walk `next` in a loop
//! instead of recursing along it. Only the nesting of inputs uses the call stack, and the parser bounds that.

use std::fmt;

use indexmap::IndexMap;

/// Byte range in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// A whole editor workspace: the root element's attributes and every top-level block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workspace {
    /// Attributes of the `<xml>` root element (e.g. `xmlns`), in document order.
    pub attributes: IndexMap<String, String>,
    /// Top-level blocks; each one starts its own chain.
    pub blocks: Vec<Node>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspace holding a single top-level chain.
    pub fn with_chain(first: Node) -> Self {
        Self {
            attributes: IndexMap::new(),
            blocks: vec![first],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Attribute list of a `<mutation>` element (e.g. `elseif="1" else="1"`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mutation {
    pub attributes: IndexMap<String, String>,
}

impl Mutation {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Whether an input holds an expression subtree or a nested statement chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// `<value name="…">`
    Value,
    /// `<statement name="…">`
    Statement,
}

impl InputKind {
    pub fn tag(self) -> &'static str {
        match self {
            InputKind::Value => "value",
            InputKind::Statement => "statement",
        }
    }
}

/// A named socket on a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub kind: InputKind,
    /// Shadow block the editor shows when nothing is plugged in.
    pub shadow: Option<Box<Node>>,
    /// Block the user plugged in.
    pub block: Option<Box<Node>>,
}

impl Input {
    pub fn value(block: Node) -> Self {
        Self {
            kind: InputKind::Value,
            shadow: None,
            block: Some(Box::new(block)),
        }
    }

    pub fn statement(block: Node) -> Self {
        Self {
            kind: InputKind::Statement,
            shadow: None,
            block: Some(Box::new(block)),
        }
    }

    pub fn empty(kind: InputKind) -> Self {
        Self {
            kind,
            shadow: None,
            block: None,
        }
    }

    /// The effective child: the plugged-in block, else the shadow.
    pub fn connected(&self) -> Option<&Node> {
        self.block.as_deref().or(self.shadow.as_deref())
    }
}

/// One block of the program tree.
pub struct Node {
    /// Registry key (`type` attribute).
    pub type_id: String,
    /// Written as `<shadow>` rather than `<block>`.
    pub shadow: bool,
    /// Every other attribute (`id`, `x`, `y`, `disabled`, ...), in document order.
    pub attributes: IndexMap<String, String>,
    pub mutation: Option<Mutation>,
    /// Field name → raw field text.
    pub fields: IndexMap<String, String>,
    /// Input name → socket, in document order.
    pub inputs: IndexMap<String, Input>,
    /// Following statement in the chain.
    pub next: Option<Box<Node>>,
}

impl Node {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            shadow: false,
            attributes: IndexMap::new(),
            mutation: None,
            fields: IndexMap::new(),
            inputs: IndexMap::new(),
            next: None,
        }
    }

    /// Set a field (builder style).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Plug `child` into the value input `name` (builder style).
    pub fn with_value(mut self, name: impl Into<String>, child: Node) -> Self {
        self.inputs.insert(name.into(), Input::value(child));
        self
    }

    /// Plug a statement chain into the statement input `name` (builder style).
    pub fn with_statement(mut self, name: impl Into<String>, child: Node) -> Self {
        self.inputs.insert(name.into(), Input::statement(child));
        self
    }

    /// Set a mutation attribute (builder style).
    pub fn with_mutation(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.mutation
            .get_or_insert_with(Mutation::default)
            .attributes
            .insert(name.into(), value.into());
        self
    }

    /// Set an element attribute such as `id` or `disabled` (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Attach `next` as the following statement (builder style).
    pub fn then(mut self, next: Node) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    /// Build a chain from an ordered list of statements.
    pub fn chain(nodes: impl IntoIterator<Item = Node>) -> Option<Node> {
        let nodes: Vec<Node> = nodes.into_iter().collect();
        nodes.into_iter().rev().fold(None, |next, mut node| {
            node.next = next.map(Box::new);
            Some(node)
        })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.get(name)
    }

    pub fn mutation_attr(&self, name: &str) -> Option<&str> {
        self.mutation.as_ref().and_then(|m| m.get(name))
    }

    /// Whether the editor disabled this block (`disabled="true"`).
    pub fn is_disabled(&self) -> bool {
        self.attributes.get("disabled").is_some_and(|v| v == "true")
    }

    /// Iterate this node and every node after it in its chain.
    pub fn iter_chain(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(Some(self), |n| n.next.as_deref())
    }
}

impl Node {
    /// Copy of this node without its `next`.
    fn clone_unlinked(&self) -> Node {
        Node {
            type_id: self.type_id.clone(),
            shadow: self.shadow,
            attributes: self.attributes.clone(),
            mutation: self.mutation.clone(),
            fields: self.fields.clone(),
            inputs: self.inputs.clone(),
            next: None,
        }
    }

    /// Equality of everything except `next`.
    fn eq_unlinked(&self, other: &Node) -> bool {
        self.type_id == other.type_id
            && self.shadow == other.shadow
            && self.attributes == other.attributes
            && self.mutation == other.mutation
            && self.fields == other.fields
            && self.inputs == other.inputs
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        let mut copies: Vec<Node> = self.iter_chain().map(Node::clone_unlinked).collect();
        let mut chain: Option<Box<Node>> = None;
        while let Some(mut node) = copies.pop() {
            node.next = chain;
            chain = Some(Box::new(node));
        }
        // `copies` held at least `self`.
        chain.map_or_else(|| self.clone_unlinked(), |node| *node)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter_chain();
        let mut right = other.iter_chain();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.eq_unlinked(b) => {}
                _ => return false,
            }
        }
    }
}

/// Debug view of a single node, without its chain.
struct Unlinked<'a>(&'a Node);

impl fmt::Debug for Unlinked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0;
        f.debug_struct("Node")
            .field("type_id", &node.type_id)
            .field("shadow", &node.shadow)
            .field("attributes", &node.attributes)
            .field("mutation", &node.mutation)
            .field("fields", &node.fields)
            .field("inputs", &node.inputs)
            .finish()
    }
}

/// Prints the node followed by the rest of its chain as a flat list.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.next.is_none() {
            return fmt::Debug::fmt(&Unlinked(self), f);
        }
        f.debug_list().entries(self.iter_chain().map(Unlinked)).finish()
    }
}
