//! Value-equality element sets
//!
//! FIRST and FOLLOW sets compare members by semantic value (any two
//! epsilons are equal, terminals and non-terminals by their value string),
//! never by node identity. `ElementSet` wraps an insertion-ordered set with
//! the handful of operations the analysis stages need.

use std::fmt;

use indexmap::IndexSet;

use crate::ast::Element;

/// A set of grammar elements with value-based membership and deterministic
/// (insertion-order) iteration. Set equality is order-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSet {
    elements: IndexSet<Element>,
}

impl ElementSet {
    pub fn new() -> Self {
        ElementSet {
            elements: IndexSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the element was not already present.
    pub fn insert(&mut self, element: Element) -> bool {
        self.elements.insert(element)
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.elements.contains(element)
    }

    pub fn contains_epsilon(&self) -> bool {
        self.elements.contains(&Element::Epsilon)
    }

    /// A copy of this set with every epsilon member removed.
    pub fn without_epsilon(&self) -> ElementSet {
        ElementSet {
            elements: self
                .elements
                .iter()
                .filter(|e| !e.is_epsilon())
                .cloned()
                .collect(),
        }
    }

    pub fn is_disjoint(&self, other: &ElementSet) -> bool {
        self.elements.is_disjoint(&other.elements)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}

impl Extend<Element> for ElementSet {
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl FromIterator<Element> for ElementSet {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        ElementSet {
            elements: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", element)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_deduplicates_by_value() {
        let mut set = ElementSet::new();
        assert!(set.insert(Element::terminal("a")));
        assert!(!set.insert(Element::terminal("a")));
        assert!(set.insert(Element::Epsilon));
        assert!(!set.insert(Element::Epsilon));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_without_epsilon() {
        let set: ElementSet = [
            Element::terminal("a"),
            Element::Epsilon,
            Element::terminal("b"),
        ]
        .into_iter()
        .collect();

        let stripped = set.without_epsilon();
        assert_eq!(stripped.len(), 2);
        assert!(!stripped.contains_epsilon());
        assert!(stripped.contains(&Element::terminal("a")));
    }

    #[test]
    fn test_disjointness() {
        let a: ElementSet = [Element::terminal("x")].into_iter().collect();
        let b: ElementSet = [Element::terminal("y")].into_iter().collect();
        let c: ElementSet = [Element::terminal("x"), Element::terminal("z")]
            .into_iter()
            .collect();

        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a: ElementSet = [Element::terminal("x"), Element::terminal("y")]
            .into_iter()
            .collect();
        let b: ElementSet = [Element::terminal("y"), Element::terminal("x")]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let set: ElementSet = [Element::terminal("("), Element::non_terminal("E")]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "{(, <E>}");
        assert_eq!(ElementSet::new().to_string(), "{}");
    }
}
