//! Common-prefix and ambiguity detection
//!
//! Alternatives of one non-terminal that share leading symbols defeat
//! one-token lookahead. Every unordered pair of distinct alternatives is
//! walked position by position while elements compare equal by value; a
//! non-empty match is recorded as a common prefix, merged across pairs by
//! prefix text. At the first mismatch a warning is emitted only when the
//! already-computed FIRST sets cannot rule the ambiguity out.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::analysis::first_follow::first_of_element_cached;
use crate::ast::{Alternative, CommonPrefix, CommonPrefixes, Element, Grammar};
use crate::diagnostics::Diagnostics;

pub fn check_common_prefixes(grammar: &mut Grammar, label: &str, diagnostics: &mut Diagnostics) {
    let names: Vec<String> = grammar.names().map(str::to_string).collect();

    for name in &names {
        let Some(non_terminal) = grammar.get(name) else {
            continue;
        };
        let result = prefixes_of(grammar, non_terminal.all_alternatives().collect());

        for warning in &result.warnings {
            log::warn!("<{}>: {}", name, warning);
            let scope = if label.is_empty() {
                format!("common prefixes of <{}>", name)
            } else {
                format!("{}: common prefixes of <{}>", label, name)
            };
            diagnostics.warning(scope, warning);
        }

        if let Some(non_terminal) = grammar.get_mut(name) {
            non_terminal.common_prefixes = result;
        }
    }
}

fn prefixes_of(grammar: &Grammar, alternatives: Vec<&Alternative>) -> CommonPrefixes {
    let mut prefixes: IndexMap<String, CommonPrefix> = IndexMap::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut reported: HashSet<(String, String)> = HashSet::new();

    for i in 0..alternatives.len() {
        for j in i + 1..alternatives.len() {
            compare_pair(
                grammar,
                alternatives[i],
                alternatives[j],
                &mut prefixes,
                &mut warnings,
                &mut reported,
            );
        }
    }

    CommonPrefixes {
        exist: !prefixes.is_empty(),
        warnings,
        prefixes: prefixes.into_values().collect(),
    }
}

fn compare_pair(
    grammar: &Grammar,
    a: &Alternative,
    b: &Alternative,
    prefixes: &mut IndexMap<String, CommonPrefix>,
    warnings: &mut Vec<String>,
    reported: &mut HashSet<(String, String)>,
) {
    let mut common: Vec<String> = Vec::new();
    let mut mismatch: Option<(&Element, &Element)> = None;

    let limit = a.elements.len().min(b.elements.len());
    for i in 0..limit {
        let element_a = &a.elements[i];
        let element_b = &b.elements[i];
        if element_a == element_b {
            common.push(element_a.to_string());
        } else {
            mismatch = Some((element_a, element_b));
            break;
        }
    }

    if let Some((element_a, element_b)) = mismatch {
        maybe_warn(grammar, element_a, element_b, reported, warnings);
    }

    if common.is_empty() {
        return;
    }

    let text = common.join(" ");
    let entry = prefixes
        .entry(text.clone())
        .or_insert_with(|| CommonPrefix {
            common: text,
            sources: Vec::new(),
        });
    for source in [a.source(), b.source()] {
        if !entry.sources.contains(&source) {
            entry.sources.push(source);
        }
    }
}

/// Emit a warning for a mismatching element pair unless ambiguity can be
/// ruled out: two non-terminals are fine when their epsilon-stripped FIRST
/// sets are disjoint, a non-terminal against a terminal is fine unless the
/// terminal is in the non-terminal's FIRST, and epsilon never warns. Each
/// unordered value pair is reported at most once per non-terminal.
fn maybe_warn(
    grammar: &Grammar,
    a: &Element,
    b: &Element,
    reported: &mut HashSet<(String, String)>,
    warnings: &mut Vec<String>,
) {
    if a.is_epsilon() || b.is_epsilon() {
        return;
    }

    let key = pair_key(a, b);
    if reported.contains(&key) {
        return;
    }

    match (a, b) {
        (Element::NonTerminal(name_a), Element::NonTerminal(name_b)) => {
            let first_a = first_of_element_cached(grammar, a).without_epsilon();
            let first_b = first_of_element_cached(grammar, b).without_epsilon();
            if first_a.is_disjoint(&first_b) {
                return;
            }
            warnings.push(format!(
                "<{}> and <{}>: FIRST sets overlap, one token of lookahead cannot separate these alternatives",
                name_a, name_b
            ));
            reported.insert(key);
        }
        (Element::NonTerminal(name), Element::Terminal(value))
        | (Element::Terminal(value), Element::NonTerminal(name)) => {
            if !first_of_element_cached(grammar, &Element::non_terminal(name.clone()))
                .contains(&Element::terminal(value.clone()))
            {
                return;
            }
            warnings.push(format!(
                "<{}> and {}: the terminal is in FIRST(<{}>), one token of lookahead cannot separate these alternatives",
                name, value, name
            ));
            reported.insert(key);
        }
        // two distinct terminals are separable by definition
        _ => {}
    }
}

fn pair_key(a: &Element, b: &Element) -> (String, String) {
    let a = a.to_string();
    let b = b.to_string();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
