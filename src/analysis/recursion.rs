//! Left- and right-recursion detection
//!
//! For each non-terminal T, a depth-first search follows chains of first
//! elements (left mode) or last elements (right mode) through non-terminal
//! edges only. Reaching T again proves recursion and yields a witness path.
//! A per-target visited set keeps the walk terminating on cyclic grammars.

use std::collections::HashSet;

use crate::ast::{Element, Grammar, Recursion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

pub fn check_left_recursion(grammar: &mut Grammar) {
    check(grammar, Direction::Left);
}

pub fn check_right_recursion(grammar: &mut Grammar) {
    check(grammar, Direction::Right);
}

fn check(grammar: &mut Grammar, direction: Direction) {
    let names: Vec<String> = grammar.names().map(str::to_string).collect();

    for name in &names {
        let mut visited = HashSet::new();
        let mut result = Recursion::default();
        find_recursion(grammar, direction, name, name, &mut visited, "", &mut result);

        if result.exists {
            log::debug!(
                "<{}> is {}-recursive: {}",
                name,
                match direction {
                    Direction::Left => "left",
                    Direction::Right => "right",
                },
                result.path.as_deref().unwrap_or_default()
            );
        }

        if let Some(non_terminal) = grammar.get_mut(name) {
            match direction {
                Direction::Left => non_terminal.left_recursion = result,
                Direction::Right => non_terminal.right_recursion = result,
            }
        }
    }
}

/// One DFS step from `current` towards `target`. An alternative whose probe
/// element (first or last, by direction) is a terminal or epsilon is a dead
/// end; the target itself is a hit; any other non-terminal joins the
/// frontier for deeper exploration.
fn find_recursion(
    grammar: &Grammar,
    direction: Direction,
    target: &str,
    current: &str,
    visited: &mut HashSet<String>,
    path: &str,
    result: &mut Recursion,
) -> bool {
    let Some(current_nt) = grammar.get(current) else {
        return false;
    };

    let new_path = if path.is_empty() {
        format!("<{}>", current)
    } else {
        format!("{} → <{}>", path, current)
    };

    let mut frontier: Vec<String> = Vec::new();

    for alternative in current_nt.all_alternatives() {
        let probe = match direction {
            Direction::Left => alternative.elements.first(),
            Direction::Right => alternative.elements.last(),
        };
        let Some(Element::NonTerminal(name)) = probe else {
            continue;
        };

        if name == target {
            result.exists = true;
            result.path = Some(format!("{} → <{}>", new_path, target));
            return true;
        }
        frontier.push(name.clone());
    }

    visited.insert(current.to_string());

    for next in frontier {
        if visited.contains(&next) {
            continue;
        }
        if find_recursion(grammar, direction, target, &next, visited, &new_path, result) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar_parser::parse_grammar;

    fn analyzed(source: &str) -> Grammar {
        let mut grammar = parse_grammar(source).unwrap();
        check_left_recursion(&mut grammar);
        check_right_recursion(&mut grammar);
        grammar
    }

    #[test]
    fn test_direct_left_recursion() {
        let grammar = analyzed("<expr> ::= <expr> + <term> | <term>\n<term> ::= x");
        let expr = grammar.get("expr").unwrap();

        assert!(expr.left_recursion.exists);
        assert_eq!(
            expr.left_recursion.path.as_deref(),
            Some("<expr> → <expr>")
        );
        assert!(!grammar.get("term").unwrap().left_recursion.exists);
    }

    #[test]
    fn test_indirect_left_recursion_path() {
        let grammar = analyzed("<a> ::= <b> x\n<b> ::= <c> y\n<c> ::= <a> z | w");
        let a = grammar.get("a").unwrap();

        assert!(a.left_recursion.exists);
        assert_eq!(
            a.left_recursion.path.as_deref(),
            Some("<a> → <b> → <c> → <a>")
        );
    }

    #[test]
    fn test_direct_right_recursion() {
        let grammar = analyzed("<list> ::= <item> , <list> | <item>\n<item> ::= x");
        let list = grammar.get("list").unwrap();

        assert!(list.right_recursion.exists);
        assert!(!list.left_recursion.exists);
        assert_eq!(
            list.right_recursion.path.as_deref(),
            Some("<list> → <list>")
        );
    }

    #[test]
    fn test_terminal_and_epsilon_probes_are_dead_ends() {
        let grammar = analyzed("<e> ::= a <e> | e | ε");
        let e = grammar.get("e").unwrap();

        assert!(!e.left_recursion.exists);
        assert_eq!(e.left_recursion.path, None);
        // last element of the first alternative is <e> itself
        assert!(e.right_recursion.exists);
    }

    #[test]
    fn test_empty_alternative_contributes_nothing() {
        let grammar = analyzed("<a> ::= | x");
        assert!(!grammar.get("a").unwrap().left_recursion.exists);
        assert!(!grammar.get("a").unwrap().right_recursion.exists);
    }

    #[test]
    fn test_cyclic_grammar_terminates() {
        // mutual cycle that never returns to <a> through first elements
        let grammar = analyzed("<a> ::= <b> x\n<b> ::= <c> y\n<c> ::= <b> z | q");
        assert!(!grammar.get("a").unwrap().left_recursion.exists);
        assert!(grammar.get("b").unwrap().left_recursion.exists);
        assert!(grammar.get("c").unwrap().left_recursion.exists);
    }
}
