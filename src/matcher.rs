//! The backtracking matcher: reconciles a parsed argv against a fixed
//! pattern tree.
//!
//! Matching a node either fails, leaving the caller's state untouched, or
//! succeeds with the remaining argv (`left`) and the bindings made so far
//! (`collected`). `Either` tries every child against the same state and
//! keeps the outcome with the smallest remainder, first one winning a tie;
//! `OneOrMore` repeats its child until an iteration stops consuming input.

use crate::dopt::Value;
use crate::pattern::{ArgvItem, Leaf, LeafId, Leaves, Pattern};

/// One binding produced by matching: a leaf name and its accumulated value.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Value,
}

/// Matches `pattern` against `left`. `None` means no match; the caller's
/// `left` and `collected` remain valid. `Some` carries the new state.
pub fn match_pattern(
    pattern: &Pattern,
    leaves: &Leaves,
    left: &[ArgvItem],
    collected: &[Binding],
) -> Option<(Vec<ArgvItem>, Vec<Binding>)> {
    match pattern {
        Pattern::Leaf(id) => match_leaf(*id, leaves, left, collected),
        Pattern::Required(children) => {
            let (mut l, mut c) = (left.to_vec(), collected.to_vec());
            for child in children {
                let (l2, c2) = match_pattern(child, leaves, &l, &c)?;
                l = l2;
                c = c2;
            }
            Some((l, c))
        }
        Pattern::Optional(children) | Pattern::OptionsShortcut(children) => {
            let (mut l, mut c) = (left.to_vec(), collected.to_vec());
            for child in children {
                if let Some((l2, c2)) = match_pattern(child, leaves, &l, &c) {
                    l = l2;
                    c = c2;
                }
            }
            Some((l, c))
        }
        Pattern::Either(children) => {
            // min_by_key keeps the first minimum, which is the tie-break
            // rule: alternatives are tried in source order.
            let outcome = children
                .iter()
                .filter_map(|child| match_pattern(child, leaves, left, collected))
                .min_by_key(|(l, _)| l.len());
            if let Some((ref l, _)) = outcome {
                log::trace!("either matched with {} tokens left", l.len());
            }
            outcome
        }
        Pattern::OneOrMore(child) => {
            let (mut l, mut c) = (left.to_vec(), collected.to_vec());
            let mut times = 0usize;
            let mut previous: Option<Vec<ArgvItem>> = None;
            loop {
                match match_pattern(child, leaves, &l, &c) {
                    None => break,
                    Some((l2, c2)) => {
                        l = l2;
                        c = c2;
                        times += 1;
                    }
                }
                // An iteration that consumed nothing would loop forever.
                if previous.as_ref() == Some(&l) {
                    break;
                }
                previous = Some(l.clone());
            }
            if times >= 1 {
                Some((l, c))
            } else {
                None
            }
        }
    }
}

fn match_leaf(
    id: LeafId,
    leaves: &Leaves,
    left: &[ArgvItem],
    collected: &[Binding],
) -> Option<(Vec<ArgvItem>, Vec<Binding>)> {
    let leaf = &leaves[id];
    let (pos, name, value) = single_match(leaf, left)?;
    let mut l = left.to_vec();
    l.remove(pos);
    let mut c = collected.to_vec();
    // The leaf's post-normalization default decides whether repeated
    // matches count, append or overwrite.
    match leaf.value() {
        Value::Counted(_) => match c.iter_mut().find(|b| b.name == name) {
            Some(prior) => {
                if let Value::Counted(n) = &mut prior.value {
                    *n += 1;
                }
            }
            None => c.push(Binding {
                name,
                value: Value::Counted(1),
            }),
        },
        Value::List(_) => {
            let incoming = match value {
                Value::Plain(Some(s)) => vec![s],
                Value::List(items) => items,
                _ => vec![],
            };
            match c.iter_mut().find(|b| b.name == name) {
                Some(prior) => {
                    if let Value::List(items) = &mut prior.value {
                        items.extend(incoming);
                    }
                }
                None => c.push(Binding {
                    name,
                    value: Value::List(incoming),
                }),
            }
        }
        _ => c.push(Binding { name, value }),
    }
    Some((l, c))
}

/// Finds the argv item this leaf consumes, if any: its index, the leaf's
/// name and the matched value.
fn single_match(leaf: &Leaf, left: &[ArgvItem]) -> Option<(usize, String, Value)> {
    match leaf {
        Leaf::Argument { name, .. } => left.iter().enumerate().find_map(|(i, item)| match item {
            ArgvItem::Positional(v) => {
                Some((i, name.clone(), Value::Plain(Some(v.clone()))))
            }
            ArgvItem::Flag(_) => None,
        }),
        Leaf::Command { name, .. } => {
            // Only the first positional is considered; a command never
            // looks past it.
            for (i, item) in left.iter().enumerate() {
                if let ArgvItem::Positional(v) = item {
                    if v == name {
                        return Some((i, name.clone(), Value::Switch(true)));
                    }
                    return None;
                }
            }
            None
        }
        Leaf::Option(spec) => {
            let name = spec.name();
            left.iter().enumerate().find_map(|(i, item)| match item {
                ArgvItem::Flag(o) if o.name() == name => {
                    Some((i, name.to_string(), o.value.clone()))
                }
                _ => None,
            })
        }
    }
}
