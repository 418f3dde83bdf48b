//! The evaluation engine for executing a compiled path against a document.
//!
//! Evaluation keeps a frontier of candidate nodes, starting with the root, and
//! lets every selector turn the current frontier into the next one. The
//! frontier is ordered; matches come out in discovery order and are never
//! de-duplicated.
use super::ast::{CompiledPath, NormalizedPath, PathElement, Selector};
use jsonpick_types::Value;
use std::ops::Index;

/// The ordered matches of one evaluation, borrowed from the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchSet<'a> {
    matches: Vec<&'a Value>,
}

impl<'a> MatchSet<'a> {
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn first(&self) -> Option<&'a Value> {
        self.matches.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.matches.get(index).copied()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, &'a Value>> {
        self.matches.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a Value] {
        &self.matches
    }

    pub fn into_vec(self) -> Vec<&'a Value> {
        self.matches
    }

    /// Clones every match, detaching the result from the document.
    pub fn to_values(&self) -> Vec<Value> {
        self.matches.iter().map(|v| (*v).clone()).collect()
    }
}

impl<'a> Index<usize> for MatchSet<'a> {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.matches[index]
    }
}

impl<'a> IntoIterator for MatchSet<'a> {
    type Item = &'a Value;
    type IntoIter = std::vec::IntoIter<&'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s MatchSet<'a> {
    type Item = &'a Value;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter().copied()
    }
}

/// A match together with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<'a> {
    pub path: NormalizedPath,
    pub value: &'a Value,
}

/// A position in the document during evaluation. Plain evaluation walks bare
/// references; [`locate`] also threads the path taken to reach each node.
trait Cursor<'a>: Clone {
    fn node(&self) -> &'a Value;
    fn member(&self, key: &'a str, child: &'a Value) -> Self;
    fn element(&self, index: usize, child: &'a Value) -> Self;
}

impl<'a> Cursor<'a> for &'a Value {
    fn node(&self) -> &'a Value {
        *self
    }

    fn member(&self, _key: &'a str, child: &'a Value) -> Self {
        child
    }

    fn element(&self, _index: usize, child: &'a Value) -> Self {
        child
    }
}

impl<'a> Cursor<'a> for Located<'a> {
    fn node(&self) -> &'a Value {
        self.value
    }

    fn member(&self, key: &'a str, child: &'a Value) -> Self {
        Located {
            path: self.path.child(PathElement::Key(key.to_string())),
            value: child,
        }
    }

    fn element(&self, index: usize, child: &'a Value) -> Self {
        Located {
            path: self.path.child(PathElement::Index(index)),
            value: child,
        }
    }
}

/// Evaluates a compiled path against a document root.
///
/// A path that matches nothing yields an empty set; evaluation itself cannot
/// fail.
pub fn evaluate<'a>(plan: &CompiledPath, root: &'a Value) -> MatchSet<'a> {
    MatchSet {
        matches: run(plan, root),
    }
}

/// Like [`evaluate`], but also reports the normalized path of every match.
/// Matches come out in the same order.
pub fn locate<'a>(plan: &CompiledPath, root: &'a Value) -> Vec<Located<'a>> {
    run(
        plan,
        Located {
            path: NormalizedPath::root(),
            value: root,
        },
    )
}

fn run<'a, C: Cursor<'a>>(plan: &CompiledPath, start: C) -> Vec<C> {
    let selectors = plan.selectors();
    let mut frontier = vec![start];
    let mut step = 0;

    while step < selectors.len() && !frontier.is_empty() {
        let mut next = Vec::new();
        match (&selectors[step], selectors.get(step + 1)) {
            // Applying the following selector while visiting gives the same
            // order as expanding the whole subtree first.
            (Selector::RecursiveDescent, Some(following)) => {
                for cursor in &frontier {
                    descend(cursor.clone(), &mut |visited: &C| {
                        apply(following, visited, &mut next)
                    });
                }
                step += 2;
            }
            (selector, _) => {
                for cursor in &frontier {
                    apply(selector, cursor, &mut next);
                }
                step += 1;
            }
        }
        frontier = next;
    }

    frontier
}

/// Applies one selector to one node, appending the results to `out`.
fn apply<'a, C: Cursor<'a>>(selector: &Selector, cursor: &C, out: &mut Vec<C>) {
    match (selector, cursor.node()) {
        (Selector::Field(name), Value::Object(members)) => {
            if let Some((key, child)) = members.get_key_value(name.as_str()) {
                out.push(cursor.member(key, child));
            }
        }
        (Selector::Index(i), Value::Array(items)) => {
            if let Some(child) = items.get(*i) {
                out.push(cursor.element(*i, child));
            }
        }
        // Numeric segments also address object members keyed by the digits.
        (Selector::Index(i), Value::Object(members)) => {
            let mut buffer = itoa::Buffer::new();
            if let Some((key, child)) = members.get_key_value(buffer.format(*i)) {
                out.push(cursor.member(key, child));
            }
        }
        (Selector::Wildcard, Value::Array(items)) => {
            out.extend(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, child)| cursor.element(i, child)),
            );
        }
        (Selector::Wildcard, Value::Object(members)) => {
            out.extend(members.iter().map(|(key, child)| cursor.member(key, child)));
        }
        (Selector::RecursiveDescent, _) => {
            descend(cursor.clone(), &mut |visited: &C| out.push(visited.clone()));
        }
        _ => {}
    }
}

/// Visits `start` and all of its descendants in pre-order: self first, then
/// children depth-first, arrays by position and objects by insertion order.
/// Uses an explicit stack so deeply nested documents cannot overflow.
fn descend<'a, C, F>(start: C, visit: &mut F)
where
    C: Cursor<'a>,
    F: FnMut(&C),
{
    let mut stack = vec![start];
    while let Some(cursor) = stack.pop() {
        visit(&cursor);
        match cursor.node() {
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate().rev() {
                    stack.push(cursor.element(i, child));
                }
            }
            Value::Object(members) => {
                for (key, child) in members.iter().rev() {
                    stack.push(cursor.member(key, child));
                }
            }
            _ => {}
        }
    }
}
