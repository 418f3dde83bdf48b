//! Defines the compiled form of a path expression.
use crate::error::JPathError;
use std::fmt;
use std::str::FromStr;

/// One step of a compiled path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// An object member by exact key (e.g., `.name` or `['name']`).
    Field(String),
    /// An array element by zero-based index (e.g., `[0]` or `.0`).
    ///
    /// Numeric segments are ambiguous in real documents, which often nest
    /// data under object keys such as `"10"`. An `Index` therefore also
    /// matches an object member whose key is the index written in decimal.
    Index(usize),
    /// Every child of an array or object (`*`, `[*]`).
    Wildcard,
    /// The current node and all of its descendants (`..`). The compiler
    /// always emits another selector right after this one.
    RecursiveDescent,
}

/// An immutable, document-independent query plan.
///
/// A plan holds no reference to any document, so one plan can be evaluated
/// against many documents, from many threads at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CompiledPath {
    selectors: Vec<Selector>,
}

impl CompiledPath {
    /// Assembles a plan by hand.
    ///
    /// Rejects plans the compiler could never produce: a trailing
    /// `RecursiveDescent`, or two in a row.
    pub fn from_selectors(selectors: Vec<Selector>) -> Result<Self, JPathError> {
        for (i, pair) in selectors.windows(2).enumerate() {
            if pair[0] == Selector::RecursiveDescent && pair[1] == Selector::RecursiveDescent {
                return Err(JPathError::InvalidPlan(format!(
                    "consecutive recursive descent at step {}",
                    i + 1
                )));
            }
        }
        if selectors.last() == Some(&Selector::RecursiveDescent) {
            return Err(JPathError::InvalidPlan(
                "recursive descent must be followed by a selector".to_string(),
            ));
        }
        Ok(Self { selectors })
    }

    /// Used by the compiler, which upholds the invariants itself.
    pub(crate) fn new_unchecked(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// An empty plan selects the root itself (`$`).
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selector> {
        self.selectors.iter()
    }

    /// True when the plan can return at most one match.
    pub fn is_singular(&self) -> bool {
        self.selectors
            .iter()
            .all(|s| matches!(s, Selector::Field(_) | Selector::Index(_)))
    }
}

impl<'p> IntoIterator for &'p CompiledPath {
    type Item = &'p Selector;
    type IntoIter = std::slice::Iter<'p, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

impl FromStr for CompiledPath {
    type Err = JPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::compile(s)
    }
}

/// Characters that end an unquoted member name.
pub(crate) fn is_name_char(c: char) -> bool {
    !matches!(c, '.' | '[' | ']' | '*' | '\'' | '"') && !c.is_whitespace()
}

/// A key that can be written after a dot and read back as the same `Field`.
fn is_plain_name(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_name_char) && !key.bytes().all(|b| b.is_ascii_digit())
}

fn write_quoted(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    f.write_str("['")?;
    for c in key.chars() {
        if c == '\'' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("']")
}

impl fmt::Display for CompiledPath {
    /// Writes the canonical form, e.g. `$.a[0]..b[*]`. Compiling the output
    /// yields an equal plan.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        let mut after_descent = false;
        for selector in &self.selectors {
            match selector {
                Selector::RecursiveDescent => {
                    f.write_str("..")?;
                    after_descent = true;
                    continue;
                }
                Selector::Field(key) if is_plain_name(key) => {
                    if !after_descent {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Selector::Field(key) => write_quoted(f, key)?,
                Selector::Index(i) => write!(f, "[{}]", i)?,
                Selector::Wildcard if after_descent => f.write_str("*")?,
                Selector::Wildcard => f.write_str("[*]")?,
            }
            after_descent = false;
        }
        Ok(())
    }
}

/// One concrete step from the root to a matched node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    Key(String),
    Index(usize),
}

/// The location of a match, as the exact sequence of keys and indices that
/// leads from the root to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedPath(Vec<PathElement>);

impl NormalizedPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn child(&self, element: PathElement) -> Self {
        let mut elements = Vec::with_capacity(self.0.len() + 1);
        elements.extend_from_slice(&self.0);
        elements.push(element);
        Self(elements)
    }

    /// Converts the location into a plan that selects exactly this node.
    pub fn to_compiled(&self) -> CompiledPath {
        CompiledPath::new_unchecked(
            self.0
                .iter()
                .map(|e| match e {
                    PathElement::Key(k) => Selector::Field(k.clone()),
                    PathElement::Index(i) => Selector::Index(*i),
                })
                .collect(),
        )
    }
}

impl fmt::Display for NormalizedPath {
    /// Writes the bracketed form, e.g. `$['store']['book'][0]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for element in &self.0 {
            match element {
                PathElement::Key(k) => write_quoted(f, k)?,
                PathElement::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_selectors_rejects_trailing_descent() {
        let err = CompiledPath::from_selectors(vec![
            Selector::Field("a".into()),
            Selector::RecursiveDescent,
        ])
        .unwrap_err();
        assert!(matches!(err, JPathError::InvalidPlan(_)));
        assert!(!err.is_syntax());
    }

    #[test]
    fn test_from_selectors_rejects_double_descent() {
        let err = CompiledPath::from_selectors(vec![
            Selector::RecursiveDescent,
            Selector::RecursiveDescent,
            Selector::Wildcard,
        ])
        .unwrap_err();
        assert!(matches!(err, JPathError::InvalidPlan(_)));
    }

    #[test]
    fn test_display_canonical_form() {
        let plan = CompiledPath::from_selectors(vec![
            Selector::Field("store".into()),
            Selector::Index(0),
            Selector::RecursiveDescent,
            Selector::Field("price".into()),
            Selector::Wildcard,
            Selector::RecursiveDescent,
            Selector::Wildcard,
        ])
        .unwrap();
        assert_eq!(plan.to_string(), "$.store[0]..price[*]..*");
    }

    #[test]
    fn test_display_quotes_keys_that_are_not_plain_names() {
        let plan = CompiledPath::from_selectors(vec![
            Selector::Field("10".into()),
            Selector::Field("first name".into()),
            Selector::Field("it's".into()),
            Selector::RecursiveDescent,
            Selector::Field("a.b".into()),
        ])
        .unwrap();
        assert_eq!(plan.to_string(), r"$['10']['first name']['it\'s']..['a.b']");
    }

    #[test]
    fn test_empty_plan_displays_as_root() {
        assert_eq!(CompiledPath::default().to_string(), "$");
        assert!(CompiledPath::default().is_singular());
    }

    #[test]
    fn test_normalized_path_display_and_plan() {
        let path = NormalizedPath::root()
            .child(PathElement::Key("errors".into()))
            .child(PathElement::Index(3));
        assert_eq!(path.to_string(), "$['errors'][3]");
        assert_eq!(
            path.to_compiled().selectors(),
            &[Selector::Field("errors".into()), Selector::Index(3)]
        );
    }
}
