//! Grammar model for BNF analysis
//!
//! This module defines the data structures representing a parsed BNF grammar
//! and the per-non-terminal analysis results filled in by the pipeline.
//!
//! Non-terminal cross-references inside alternatives are stored as name keys
//! into the grammar's ordered map rather than owning pointers, so key
//! equality after resolution is canonical-node identity.

use std::fmt;

use indexmap::IndexMap;

use crate::sets::ElementSet;

/// One symbol inside an alternative.
///
/// Two `Epsilon`s are always equal; `Terminal` and `NonTerminal` compare by
/// their value string and never across kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    /// Atomic symbol, not further expanded.
    Terminal(String),
    /// Named symbol expandable via productions; the name is the key of the
    /// canonical node in the [`Grammar`] map.
    NonTerminal(String),
    /// The empty-string symbol.
    Epsilon,
}

impl Element {
    pub fn terminal(value: impl Into<String>) -> Self {
        Element::Terminal(value.into())
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        Element::NonTerminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Element::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Element::NonTerminal(_))
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Element::Epsilon)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Terminal(value) => write!(f, "{}", value),
            Element::NonTerminal(name) => write!(f, "<{}>", name),
            Element::Epsilon => write!(f, "ε"),
        }
    }
}

/// One concatenation sequence forming a production's right-hand side option.
/// Element order is semantically significant.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub elements: Vec<Element>,
}

impl Alternative {
    pub fn new(elements: Vec<Element>) -> Self {
        Alternative { elements }
    }

    /// The alternative rendered back to text, elements joined by single
    /// spaces. Common-prefix reporting keys alternative sources on this.
    pub fn source(&self) -> String {
        let parts: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();
        parts.join(" ")
    }
}

/// The right-hand side of one `::=` rule line, split on `|` into
/// alternatives. Multiple rule lines for the same non-terminal each
/// contribute one production.
#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    /// Raw right-hand-side text of the rule line.
    pub source: String,
    pub alternatives: Vec<Alternative>,
}

impl Production {
    pub fn new(source: impl Into<String>, alternatives: Vec<Alternative>) -> Self {
        Production {
            source: source.into(),
            alternatives,
        }
    }
}

/// Left- or right-recursion finding for one non-terminal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recursion {
    pub exists: bool,
    /// Witness path joining the visited non-terminal names with ` → `,
    /// ending with the target itself. `None` until recursion is found.
    pub path: Option<String>,
}

/// One shared leading element sequence between alternatives, keyed by its
/// rendered text, with the source strings of every alternative involved.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonPrefix {
    pub common: String,
    pub sources: Vec<String>,
}

/// Common-prefix detection result for one non-terminal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonPrefixes {
    pub exist: bool,
    pub warnings: Vec<String>,
    pub prefixes: Vec<CommonPrefix>,
}

/// A named grammar symbol together with its productions and every derived
/// analysis field. Derived fields start at their defaults and are written
/// by the pipeline stages in order.
#[derive(Debug, Clone, PartialEq)]
pub struct NonTerminal {
    pub name: String,
    pub productions: Vec<Production>,
    /// True only for the first non-terminal defined in source order; used
    /// solely to seed FOLLOW with the end-of-input marker.
    pub is_start_symbol: bool,
    pub is_nullable: bool,
    pub left_recursion: Recursion,
    pub right_recursion: Recursion,
    pub first_set: ElementSet,
    pub first_set_warnings: Vec<String>,
    pub follow_set: ElementSet,
    pub common_prefixes: CommonPrefixes,
}

impl NonTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        NonTerminal {
            name: name.into(),
            productions: Vec::new(),
            is_start_symbol: false,
            is_nullable: false,
            left_recursion: Recursion::default(),
            right_recursion: Recursion::default(),
            first_set: ElementSet::new(),
            first_set_warnings: Vec::new(),
            follow_set: ElementSet::new(),
            common_prefixes: CommonPrefixes::default(),
        }
    }

    /// All alternatives across all productions of this non-terminal, in
    /// source order.
    pub fn all_alternatives(&self) -> impl Iterator<Item = &Alternative> {
        self.productions.iter().flat_map(|p| p.alternatives.iter())
    }
}

/// A name→non-terminal mapping in first-appearance order. Insertion order
/// is significant: the first entry is the start symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grammar {
    non_terminals: IndexMap<String, NonTerminal>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            non_terminals: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.non_terminals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.non_terminals.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.non_terminals.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&NonTerminal> {
        self.non_terminals.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut NonTerminal> {
        self.non_terminals.get_mut(name)
    }

    /// Append a production under `name`, creating the non-terminal on first
    /// sight. Repeated rule lines for one name accumulate productions.
    pub fn add_production(&mut self, name: impl Into<String>, production: Production) {
        let name = name.into();
        self.non_terminals
            .entry(name.clone())
            .or_insert_with(|| NonTerminal::new(name))
            .productions
            .push(production);
    }

    /// Flag the first non-terminal defined in source order as the start
    /// symbol. Called once after all rule lines are parsed.
    pub(crate) fn mark_start_symbol(&mut self) {
        if let Some((_, non_terminal)) = self.non_terminals.first_mut() {
            non_terminal.is_start_symbol = true;
        }
    }

    pub fn start_symbol(&self) -> Option<&NonTerminal> {
        self.non_terminals.values().find(|nt| nt.is_start_symbol)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.non_terminals.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NonTerminal)> {
        self.non_terminals.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &NonTerminal> {
        self.non_terminals.values()
    }

    pub fn non_terminals_mut(&mut self) -> impl Iterator<Item = &mut NonTerminal> {
        self.non_terminals.values_mut()
    }
}
