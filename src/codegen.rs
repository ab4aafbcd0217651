//! Introspection over a parsed usage: the discovered leaves as `Node`s,
//! and a generated struct definition ready for `deserialize`.

use std::fmt::Write;

use crate::dopt::{ArgvMap, Docarg, Value};
use crate::errors::Result;
use crate::pattern::Leaf;

/// What kind of usage element a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Argument,
    Command,
    Flag,
}

/// The shape of the value a node produces in the result map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Count,
    String,
    List,
}

impl ValueKind {
    fn rust_type(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Count => "u64",
            ValueKind::String => "String",
            ValueKind::List => "Vec<String>",
        }
    }
}

/// One element discovered in a usage string.
#[derive(Clone, Debug)]
pub struct Node {
    /// The usage spelling: `--flag`, `<arg>`, `FILE` or `cmd`.
    pub name: String,
    pub kind: NodeKind,
    pub value_kind: ValueKind,
}

/// Lists every flag, argument and command of the usage, in the order the
/// normalized pattern mentions them.
pub fn get_nodes(doc: &str) -> Result<Vec<Node>> {
    let d = Docarg::new(doc)?;
    let parser = d.parser();
    let mut seen = Vec::new();
    let mut nodes = Vec::new();
    for id in parser.pattern.flat() {
        if seen.contains(&id) {
            continue;
        }
        seen.push(id);
        let leaf = &parser.leaves[id];
        let kind = match leaf {
            Leaf::Argument { .. } => NodeKind::Argument,
            Leaf::Command { .. } => NodeKind::Command,
            Leaf::Option(_) => NodeKind::Flag,
        };
        let value_kind = match leaf.value() {
            Value::Switch(_) => ValueKind::Bool,
            Value::Counted(_) => ValueKind::Count,
            Value::Plain(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
        };
        nodes.push(Node {
            name: leaf.name().to_string(),
            kind,
            value_kind,
        });
    }
    Ok(nodes)
}

/// Emits a struct definition whose fields bind every node of the usage,
/// ready to be pasted next to a `deserialize` call.
pub fn generate_code(doc: &str, struct_name: &str) -> Result<String> {
    let nodes = get_nodes(doc)?;
    let mut out = String::new();
    out.push_str("#[derive(Debug, Deserialize)]\n");
    let _ = writeln!(out, "struct {} {{", struct_name);
    for node in &nodes {
        let _ = writeln!(
            out,
            "    {}: {},",
            ArgvMap::key_to_struct_field(&node.name),
            node.value_kind.rust_type()
        );
    }
    out.push_str("}\n");
    Ok(out)
}
