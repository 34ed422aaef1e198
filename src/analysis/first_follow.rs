//! FIRST and FOLLOW set computation
//!
//! FIRST is derived recursively per non-terminal with memoization. The
//! FIRST of a left-recursive non-terminal is not computable by this
//! recursion; it is left empty and a warning is recorded instead of
//! looping — a documented limitation, not a silent patch.
//!
//! FOLLOW is seeded with the end-of-input marker on the start symbol and
//! then propagated in two sweeps over every alternative: suffix FIRSTs
//! first, then owner FOLLOWs into final or nullable-suffix positions. The
//! second sweep is iterated to a fixed point so mutually nullable chains
//! propagate fully.

use std::collections::{HashMap, HashSet};

use crate::ast::{Element, Grammar};
use crate::diagnostics::Diagnostics;
use crate::sets::ElementSet;

/// End-of-input marker seeded into FOLLOW of the start symbol.
pub const END_MARK: &str = "$";

/// Compute and store the FIRST set of every non-terminal, recording a
/// warning diagnostic for each left-recursive non-terminal whose FIRST
/// cannot be derived.
pub fn add_firsts(grammar: &mut Grammar, label: &str, diagnostics: &mut Diagnostics) {
    let names: Vec<String> = grammar.names().map(str::to_string).collect();
    let mut cache: HashMap<String, ElementSet> = HashMap::new();
    let mut warnings: HashMap<String, Vec<String>> = HashMap::new();

    for name in &names {
        let mut in_progress = HashSet::new();
        first_of_non_terminal(grammar, name, &mut cache, &mut warnings, &mut in_progress);
    }

    for name in &names {
        for warning in warnings.get(name).into_iter().flatten() {
            log::warn!("{}", warning);
            diagnostics.warning(scoped(label, &format!("FIRST of <{}>", name)), warning);
        }
    }

    for name in &names {
        if let Some(non_terminal) = grammar.get_mut(name) {
            non_terminal.first_set = cache.remove(name).unwrap_or_default();
            non_terminal.first_set_warnings = warnings.remove(name).unwrap_or_default();
        }
    }
}

fn scoped(label: &str, scope: &str) -> String {
    if label.is_empty() {
        scope.to_string()
    } else {
        format!("{}: {}", label, scope)
    }
}

fn first_of_non_terminal(
    grammar: &Grammar,
    name: &str,
    cache: &mut HashMap<String, ElementSet>,
    warnings: &mut HashMap<String, Vec<String>>,
    in_progress: &mut HashSet<String>,
) -> ElementSet {
    if let Some(cached) = cache.get(name) {
        return cached.clone();
    }
    let Some(non_terminal) = grammar.get(name) else {
        // resolution guarantees this cannot happen for parsed grammars
        return ElementSet::new();
    };

    if non_terminal.left_recursion.exists {
        warnings.entry(name.to_string()).or_insert_with(|| {
            vec![format!(
                "Could not calculate FIRST of <{}> as it's left recursive",
                name
            )]
        });
        cache.insert(name.to_string(), ElementSet::new());
        return ElementSet::new();
    }

    // Re-entry through a nullable-prefix cycle would not terminate; the
    // re-entered non-terminal contributes nothing to its caller.
    if !in_progress.insert(name.to_string()) {
        return ElementSet::new();
    }

    let mut first = ElementSet::new();
    for alternative in non_terminal.all_alternatives() {
        if alternative.elements.len() == 1 && alternative.elements[0].is_epsilon() {
            first.insert(Element::Epsilon);
        } else {
            let list_first =
                first_of_list(grammar, &alternative.elements, cache, warnings, in_progress);
            first.extend(list_first.iter().cloned());
        }
    }

    in_progress.remove(name);
    cache.insert(name.to_string(), first.clone());
    first
}

fn first_of_element(
    grammar: &Grammar,
    element: &Element,
    cache: &mut HashMap<String, ElementSet>,
    warnings: &mut HashMap<String, Vec<String>>,
    in_progress: &mut HashSet<String>,
) -> ElementSet {
    match element {
        Element::Terminal(_) | Element::Epsilon => {
            let mut set = ElementSet::new();
            set.insert(element.clone());
            set
        }
        Element::NonTerminal(name) => {
            first_of_non_terminal(grammar, name, cache, warnings, in_progress)
        }
    }
}

/// FIRST(Y1..Yk): FIRST(Y1) if it lacks epsilon, otherwise
/// (FIRST(Y1) ∖ ε) ∪ FIRST(Y2..Yk). The empty sequence derives epsilon,
/// so epsilon survives exactly when every Yi is nullable.
fn first_of_list(
    grammar: &Grammar,
    elements: &[Element],
    cache: &mut HashMap<String, ElementSet>,
    warnings: &mut HashMap<String, Vec<String>>,
    in_progress: &mut HashSet<String>,
) -> ElementSet {
    let Some((head, tail)) = elements.split_first() else {
        let mut set = ElementSet::new();
        set.insert(Element::Epsilon);
        return set;
    };

    let head_first = first_of_element(grammar, head, cache, warnings, in_progress);
    if !head_first.contains_epsilon() {
        return head_first;
    }

    let mut first = head_first.without_epsilon();
    let tail_first = first_of_list(grammar, tail, cache, warnings, in_progress);
    first.extend(tail_first.iter().cloned());
    first
}

/// FIRST of an element sequence using only the FIRST sets already stored
/// on the grammar; no re-derivation. Used by FOLLOW and the common-prefix
/// detector after `add_firsts` has run.
pub fn first_of_list_cached(grammar: &Grammar, elements: &[Element]) -> ElementSet {
    let Some((head, tail)) = elements.split_first() else {
        let mut set = ElementSet::new();
        set.insert(Element::Epsilon);
        return set;
    };

    let head_first = first_of_element_cached(grammar, head);
    if !head_first.contains_epsilon() {
        return head_first;
    }

    let mut first = head_first.without_epsilon();
    let tail_first = first_of_list_cached(grammar, tail);
    first.extend(tail_first.iter().cloned());
    first
}

/// FIRST of a single element from the stored sets.
pub fn first_of_element_cached(grammar: &Grammar, element: &Element) -> ElementSet {
    match element {
        Element::Terminal(_) | Element::Epsilon => {
            let mut set = ElementSet::new();
            set.insert(element.clone());
            set
        }
        Element::NonTerminal(name) => grammar
            .get(name)
            .map(|nt| nt.first_set.clone())
            .unwrap_or_default(),
    }
}

/// Compute and store the FOLLOW set of every non-terminal. Requires FIRST
/// sets to be in place.
pub fn add_follows(grammar: &mut Grammar) {
    let names: Vec<String> = grammar.names().map(str::to_string).collect();
    let mut follows: HashMap<String, ElementSet> =
        names.iter().map(|n| (n.clone(), ElementSet::new())).collect();

    if let Some(start) = grammar.start_symbol() {
        if let Some(set) = follows.get_mut(&start.name) {
            set.insert(Element::terminal(END_MARK));
        }
    }

    // Sweep 1: for every occurrence of X not in final position, add
    // FIRST(elements after X) minus epsilon to FOLLOW(X).
    for owner in &names {
        let Some(owner_nt) = grammar.get(owner) else {
            continue;
        };
        for alternative in owner_nt.all_alternatives() {
            for (i, element) in alternative.elements.iter().enumerate() {
                let Element::NonTerminal(x) = element else {
                    continue;
                };
                if i + 1 >= alternative.elements.len() {
                    continue;
                }
                let suffix_first =
                    first_of_list_cached(grammar, &alternative.elements[i + 1..]);
                if let Some(set) = follows.get_mut(x) {
                    set.extend(suffix_first.without_epsilon().iter().cloned());
                }
            }
        }
    }

    // Sweep 2: for every occurrence of X in final position or followed
    // only by a nullable suffix, add the owner's FOLLOW to FOLLOW(X).
    // Iterated to a fixed point so chains of nullable tails settle.
    let mut changed = true;
    while changed {
        changed = false;
        for owner in &names {
            let Some(owner_follow) = follows.get(owner).cloned() else {
                continue;
            };
            let Some(owner_nt) = grammar.get(owner) else {
                continue;
            };
            for alternative in owner_nt.all_alternatives() {
                for (i, element) in alternative.elements.iter().enumerate() {
                    let Element::NonTerminal(x) = element else {
                        continue;
                    };
                    let suffix = &alternative.elements[i + 1..];
                    if !first_of_list_cached(grammar, suffix).contains_epsilon() {
                        continue;
                    }
                    if let Some(set) = follows.get_mut(x) {
                        for member in owner_follow.iter() {
                            if set.insert(member.clone()) {
                                changed = true;
                            }
                        }
                    }
                }
            }
        }
    }

    for name in &names {
        if let Some(non_terminal) = grammar.get_mut(name) {
            non_terminal.follow_set = follows.remove(name).unwrap_or_default();
        }
    }
}
