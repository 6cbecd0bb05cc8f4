//! Emission engine: walks a block tree and asks each block's generator for code.
//!
//! ## Model
//!
//! - A statement chain is walked iteratively along `next`; each enabled block
//!   contributes its fragment followed by a newline.
//! - Expressions report a binding strength. The engine parenthesizes a child
//!   whose strength is looser than what its position requires.
//! - Sockets with nothing connected fall back to the default declared in the
//!   block's schema.
//! - Nesting (a block inside another block's socket) is bounded by
//!   [`GeneratorConfig::max_depth`].
//!
//! Generators receive `&mut Emitter` and use it to reach their children and to
//! record declarations and setup lines in the run's [`GenerationContext`].

use blockc_core::lang::order::Order;
use blockc_syntax::{Input, Node, Workspace};
use tracing::trace;

use super::config::GeneratorConfig;
use super::context::GenerationContext;
use super::errors::CompileError;
use super::registry::{Generator, NodeDef, NodeKind, Registry};
use super::sketch_emitter::indent_lines;

/// Upper bound on a mutation's item count (`elseif`, `items`).
const MAX_MUTATION_ITEMS: usize = 1024;

/// State for one compilation run.
pub struct Emitter<'a> {
    registry: &'a Registry,
    config: &'a GeneratorConfig,
    context: GenerationContext,
    depth: usize,
}

impl<'a> Emitter<'a> {
    /// Start a run with a fresh context.
    pub fn new(registry: &'a Registry, config: &'a GeneratorConfig) -> Self {
        Self {
            registry,
            config,
            context: GenerationContext::new(),
            depth: 0,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Hand the collected declarations and init lines to the assembler.
    pub fn finish(self) -> GenerationContext {
        self.context
    }

    pub fn add_declaration(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.context.add_declaration(key, text);
    }

    pub fn add_init_line(&mut self, text: impl Into<String>) {
        self.context.add_init_line(text);
    }

    /// One level of indentation.
    pub fn indent_unit(&self) -> String {
        self.config.indent_unit()
    }

    // ---------------------------------------------------------------------
    // Tree walking
    // ---------------------------------------------------------------------

    /// Emit every top-level chain of a workspace, in document order.
    ///
    /// A top-level expression block is a naked value and becomes `expr;`.
    pub fn emit_workspace(&mut self, workspace: &Workspace) -> Result<String, CompileError> {
        let mut code = String::new();
        for root in &workspace.blocks {
            if !root.is_disabled() && self.definition(root)?.kind() == NodeKind::Expression {
                let expr = self.emit_expression(Some(root), Order::NONE, "")?;
                if !expr.is_empty() {
                    code.push_str(&expr);
                    code.push_str(";\n");
                }
                continue;
            }
            code.push_str(&self.emit_statement_chain(Some(root))?);
        }
        Ok(code)
    }

    /// Emit a statement chain starting at `first`.
    ///
    /// Disabled blocks are skipped. A block whose fragment is empty adds no line.
    pub fn emit_statement_chain(&mut self, first: Option<&Node>) -> Result<String, CompileError> {
        let mut code = String::new();
        for node in first.into_iter().flat_map(|n| n.iter_chain()) {
            if node.is_disabled() {
                trace!(type_id = %node.type_id, "skipping disabled block");
                continue;
            }
            let def = self.definition(node)?;
            let Generator::Statement(generate) = def.generator else {
                return Err(CompileError::malformed_tree(format!(
                    "value block `{}` used where a statement is expected",
                    node.type_id
                )));
            };
            def.schema.validate(node)?;
            trace!(type_id = %node.type_id, depth = self.depth, "emit statement");
            let fragment = self.nested(|e| generate(node, e))?;
            let fragment = fragment.trim_end_matches('\n');
            if fragment.is_empty() {
                continue;
            }
            code.push_str(fragment);
            code.push('\n');
        }
        Ok(code)
    }

    /// Emit an expression block for a position requiring `required` strength.
    ///
    /// With no block (or a disabled one) the result is `default`. The result is
    /// parenthesized when the block binds looser than `required`.
    pub fn emit_expression(
        &mut self,
        node: Option<&Node>,
        required: Order,
        default: &str,
    ) -> Result<String, CompileError> {
        let Some(node) = node.filter(|n| !n.is_disabled()) else {
            return Ok(default.to_string());
        };
        let def = self.definition(node)?;
        let Generator::Expression(generate) = def.generator else {
            return Err(CompileError::malformed_tree(format!(
                "statement block `{}` plugged into a value input",
                node.type_id
            )));
        };
        if node.next.is_some() {
            return Err(CompileError::malformed_tree(format!(
                "value block `{}` cannot be followed by another block",
                node.type_id
            )));
        }
        def.schema.validate(node)?;
        trace!(type_id = %node.type_id, depth = self.depth, %required, "emit expression");
        let (code, order) = self.nested(|e| generate(node, e))?;
        if code.is_empty() {
            return Ok(default.to_string());
        }
        Ok(order.wrap(code, required))
    }

    // ---------------------------------------------------------------------
    // Helpers for generators
    // ---------------------------------------------------------------------

    /// Emit the block in value socket `name` of `parent`, falling back to the
    /// socket's schema default.
    pub fn value(&mut self, parent: &Node, name: &str, required: Order) -> Result<String, CompileError> {
        let default = self.socket_default(parent, name)?;
        let child = connected(parent, name);
        match (child, default) {
            (None, None) => Err(CompileError::missing_input(&parent.type_id, name)),
            (child, default) => self.emit_expression(child, required, default.unwrap_or_default()),
        }
    }

    /// Like [`value`](Self::value) with an explicit fallback instead of the schema default.
    pub fn value_or(
        &mut self,
        parent: &Node,
        name: &str,
        required: Order,
        default: &str,
    ) -> Result<String, CompileError> {
        self.emit_expression(connected(parent, name), required, default)
    }

    /// Whether an enabled block is plugged into socket `name`.
    pub fn is_connected(&self, parent: &Node, name: &str) -> bool {
        connected(parent, name).is_some()
    }

    /// Emit the chain in statement socket `name`, indented one level.
    pub fn statement_input(&mut self, parent: &Node, name: &str) -> Result<String, CompileError> {
        let first = parent.input(name).and_then(Input::connected);
        let body = self.emit_statement_chain(first)?;
        Ok(indent_lines(&body, &self.indent_unit()))
    }

    /// Raw text of a field.
    pub fn field<'n>(&self, node: &'n Node, name: &str) -> Result<&'n str, CompileError> {
        node.field(name)
            .ok_or_else(|| CompileError::malformed_field(&node.type_id, name, "missing"))
    }

    /// A field parsed as a base-10 integer.
    pub fn field_int(&self, node: &Node, name: &str) -> Result<i64, CompileError> {
        let raw = self.field(node, name)?;
        raw.parse()
            .map_err(|_| CompileError::malformed_field(&node.type_id, name, format!("`{}` is not an integer", raw)))
    }

    /// A mutation attribute read as an item count, `fallback` when absent.
    pub fn mutation_count(&self, node: &Node, name: &str, fallback: usize) -> Result<usize, CompileError> {
        let Some(raw) = node.mutation_attr(name) else {
            return Ok(fallback);
        };
        match raw.parse::<usize>() {
            Ok(n) if n <= MAX_MUTATION_ITEMS => Ok(n),
            _ => Err(CompileError::malformed_tree(format!(
                "mutation `{}` of block `{}` has invalid count `{}`",
                name, node.type_id, raw
            ))),
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn definition(&self, node: &Node) -> Result<&'a NodeDef, CompileError> {
        let registry = self.registry;
        registry.lookup(&node.type_id)
    }

    fn socket_default(&self, parent: &Node, name: &str) -> Result<Option<&'static str>, CompileError> {
        let def = self.definition(parent)?;
        match def.schema.input(name) {
            Some(spec) => Ok(spec.default),
            None => Err(CompileError::malformed_tree(format!(
                "block `{}` has no input named `{}`",
                parent.type_id, name
            ))),
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, CompileError>) -> Result<T, CompileError> {
        if self.depth >= self.config.max_depth {
            return Err(CompileError::malformed_tree(format!(
                "blocks nested deeper than {} levels",
                self.config.max_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

fn connected<'n>(parent: &'n Node, name: &str) -> Option<&'n Node> {
    parent
        .input(name)
        .and_then(Input::connected)
        .filter(|n| !n.is_disabled())
}
