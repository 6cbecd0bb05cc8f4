//! Element tree → [`Workspace`].

use indexmap::IndexMap;

use super::elements::{Content, Element};
use crate::ast::{Input, InputKind, Mutation, Node, Workspace};
use crate::diagnostics::SyntaxError;

use super::MAX_NESTING;

pub(super) fn build_workspace(root: &Element) -> Result<Workspace, SyntaxError> {
    if root.name != "xml" {
        return Err(SyntaxError::InvalidRoot {
            found: root.name.clone(),
            span: root.span.into(),
        });
    }

    let mut workspace = Workspace {
        attributes: attribute_map(root, &[]),
        blocks: Vec::new(),
    };
    for element in child_elements(root)? {
        match element.name.as_str() {
            "block" | "shadow" => workspace.blocks.push(build_chain(element, 0)?),
            _ => return Err(unexpected(element, root)),
        }
    }
    Ok(workspace)
}

/// Build a block and the statements chained after it.
///
/// Walks the `<next>` links iteratively, then links the nodes back to front. `depth` counts the inputs this chain
/// is plugged into.
fn build_chain(first: &Element, depth: usize) -> Result<Node, SyntaxError> {
    if depth > MAX_NESTING {
        return Err(SyntaxError::TooDeep {
            limit: MAX_NESTING,
            span: first.span.into(),
        });
    }
    let mut nodes = Vec::new();
    let mut current = Some(first);
    while let Some(element) = current {
        let (node, next) = build_node(element, depth)?;
        nodes.push(node);
        current = next;
    }

    let mut chain: Option<Box<Node>> = None;
    while let Some(mut node) = nodes.pop() {
        node.next = chain;
        chain = Some(Box::new(node));
    }
    // `nodes` held at least `first`.
    chain
        .map(|node| *node)
        .ok_or_else(|| SyntaxError::eof("a block", first.span.end))
}

/// Build one `<block>`/`<shadow>` without its `next`; returns the `<next>` block element, if any.
fn build_node(element: &Element, depth: usize) -> Result<(Node, Option<&Element>), SyntaxError> {
    let type_id = element
        .attribute("type")
        .ok_or_else(|| SyntaxError::MissingAttribute {
            element: element.name.clone(),
            attribute: "type",
            span: element.span.into(),
        })?;

    let mut node = Node::new(type_id);
    node.shadow = element.name == "shadow";
    node.attributes = attribute_map(element, &["type"]);

    let mut next = None;
    for child in child_elements(element)? {
        match child.name.as_str() {
            "mutation" => {
                if node.mutation.is_some() {
                    return Err(duplicate("mutation", "mutation", child));
                }
                node.mutation = Some(build_mutation(child)?);
            }
            "field" => {
                let name = required_name(child)?;
                if node.fields.contains_key(name) {
                    return Err(duplicate("field", name, child));
                }
                node.fields.insert(name.to_string(), field_text(child)?);
            }
            "value" | "statement" => {
                let name = required_name(child)?;
                if node.inputs.contains_key(name) {
                    return Err(duplicate("input", name, child));
                }
                node.inputs.insert(name.to_string(), build_input(child, depth + 1)?);
            }
            "next" => {
                if next.is_some() {
                    return Err(duplicate("next", "next", child));
                }
                next = Some(single_block(child)?);
            }
            _ => return Err(unexpected(child, element)),
        }
    }
    Ok((node, next))
}

fn build_mutation(element: &Element) -> Result<Mutation, SyntaxError> {
    if let Some(child) = child_elements(element)?.into_iter().next() {
        return Err(unexpected(child, element));
    }
    Ok(Mutation {
        attributes: attribute_map(element, &[]),
    })
}

fn build_input(element: &Element, depth: usize) -> Result<Input, SyntaxError> {
    let kind = if element.name == "value" {
        InputKind::Value
    } else {
        InputKind::Statement
    };
    let mut input = Input::empty(kind);

    for child in child_elements(element)? {
        let slot = match child.name.as_str() {
            "block" => &mut input.block,
            "shadow" => &mut input.shadow,
            _ => return Err(unexpected(child, element)),
        };
        if slot.is_some() {
            return Err(duplicate(
                if child.name == "block" { "connected block" } else { "shadow block" },
                element.attribute("name").unwrap_or_default(),
                child,
            ));
        }
        *slot = Some(Box::new(build_chain(child, depth)?));
    }
    Ok(input)
}

/// The one block element inside `<next>`.
fn single_block(element: &Element) -> Result<&Element, SyntaxError> {
    let mut found = None;
    for child in child_elements(element)? {
        match child.name.as_str() {
            "block" | "shadow" if found.is_none() => found = Some(child),
            "block" | "shadow" => return Err(duplicate("next block", "next", child)),
            _ => return Err(unexpected(child, element)),
        }
    }
    found.ok_or_else(|| SyntaxError::EmptyElement {
        name: element.name.clone(),
        span: element.span.into(),
    })
}

/// Text of a `<field>` element, kept exactly as written.
fn field_text(element: &Element) -> Result<String, SyntaxError> {
    let mut text = String::new();
    for child in &element.children {
        match child {
            Content::Text { text: part, .. } => text.push_str(part),
            Content::Element(inner) => return Err(unexpected(inner, element)),
        }
    }
    Ok(text)
}

/// Child elements, rejecting any non-whitespace text between them.
fn child_elements(element: &Element) -> Result<Vec<&Element>, SyntaxError> {
    let mut out = Vec::new();
    for child in &element.children {
        match child {
            Content::Element(inner) => out.push(inner),
            Content::Text { .. } if child.is_blank() => {}
            Content::Text { span, .. } => {
                return Err(SyntaxError::UnexpectedText {
                    parent: element.name.clone(),
                    span: (*span).into(),
                });
            }
        }
    }
    Ok(out)
}

fn required_name(element: &Element) -> Result<&str, SyntaxError> {
    element
        .attribute("name")
        .ok_or_else(|| SyntaxError::MissingAttribute {
            element: element.name.clone(),
            attribute: "name",
            span: element.span.into(),
        })
}

fn attribute_map(element: &Element, skip: &[&str]) -> IndexMap<String, String> {
    element
        .attributes
        .iter()
        .filter(|a| !skip.contains(&a.name.as_str()))
        .map(|a| (a.name.clone(), a.value.clone()))
        .collect()
}

fn unexpected(child: &Element, parent: &Element) -> SyntaxError {
    SyntaxError::UnexpectedElement {
        name: child.name.clone(),
        parent: parent.name.clone(),
        span: child.span.into(),
    }
}

fn duplicate(what: &'static str, name: &str, at: &Element) -> SyntaxError {
    SyntaxError::Duplicate {
        what,
        name: name.to_string(),
        span: at.span.into(),
    }
}
