//! bnflint - LL(1) suitability analysis for BNF grammars
//!
//! Parses grammars written in a BNF-like notation and analyzes whether they
//! are suitable for single-token-lookahead recursive-descent parsing:
//! left/right recursion detection with witness paths, FIRST/FOLLOW sets,
//! nullability, and common-prefix/ambiguity warnings.
//!
//! # Quick Start
//!
//! ```rust
//! use bnflint::check_grammar;
//!
//! let source = "\
//! <expr> ::= <term> + <expr> | <term>
//! <term> ::= id";
//!
//! let (grammar, diagnostics) = check_grammar(source, "demo").expect("invalid grammar");
//!
//! let expr = grammar.get("expr").unwrap();
//! assert!(expr.right_recursion.exists);
//! assert!(!expr.left_recursion.exists);
//! assert!(expr.common_prefixes.exist);
//! assert!(!diagnostics.is_empty());
//! ```
//!
//! The engine performs no rendering: the grammar plus the ordered
//! diagnostics stream are handed back to the caller, and the label passed
//! to [`check_grammar`]/[`analyze`] only groups diagnostics for display.

pub mod analysis;
pub mod ast;
pub mod diagnostics;
pub mod grammar_parser;
pub mod samples;
pub mod sets;

pub use analysis::{analyze, END_MARK};
pub use ast::{
    Alternative, CommonPrefix, CommonPrefixes, Element, Grammar, NonTerminal, Production,
    Recursion,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use grammar_parser::{parse_grammar, GrammarError};
pub use sets::ElementSet;

/// Parse BNF source text and run the full analysis pipeline over it.
///
/// The grammar is built once per call; an interactive caller re-runs this
/// atomically on each edit rather than patching prior results.
pub fn check_grammar(text: &str, label: &str) -> Result<(Grammar, Diagnostics), GrammarError> {
    let mut grammar = parse_grammar(text)?;
    let diagnostics = analyze(&mut grammar, label);
    Ok((grammar, diagnostics))
}
