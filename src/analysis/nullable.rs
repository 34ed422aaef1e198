//! Nullability flag
//!
//! A non-terminal is nullable exactly when epsilon is in its FIRST set, so
//! this stage runs after FIRST has settled and derives the flag directly.

use crate::ast::Grammar;

pub fn mark_nullable(grammar: &mut Grammar) {
    for non_terminal in grammar.non_terminals_mut() {
        non_terminal.is_nullable = non_terminal.first_set.contains_epsilon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::first_follow::add_firsts;
    use crate::analysis::recursion::check_left_recursion;
    use crate::diagnostics::Diagnostics;
    use crate::grammar_parser::parse_grammar;

    #[test]
    fn test_nullable_tracks_epsilon_in_first() {
        let mut grammar = parse_grammar("<a> ::= x | ε\n<b> ::= y\n<c> ::= <a>").unwrap();
        check_left_recursion(&mut grammar);
        let mut diagnostics = Diagnostics::new();
        add_firsts(&mut grammar, "test", &mut diagnostics);
        mark_nullable(&mut grammar);

        assert!(grammar.get("a").unwrap().is_nullable);
        assert!(!grammar.get("b").unwrap().is_nullable);
        // <c> derives epsilon through <a>
        assert!(grammar.get("c").unwrap().is_nullable);
    }
}
