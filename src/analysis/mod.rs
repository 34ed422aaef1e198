//! Grammar analysis pipeline
//!
//! The stages run in a fixed order because each reads fields the previous
//! one wrote: recursion flags gate FIRST (a left-recursive FIRST would not
//! terminate), FOLLOW and the common-prefix detector read FIRST, and
//! nullability is derived from FIRST. The grammar is mutated in place and
//! treated as read-only once `analyze` returns.

pub mod common_prefix;
pub mod first_follow;
pub mod nullable;
pub mod recursion;

pub use first_follow::END_MARK;

use crate::ast::Grammar;
use crate::diagnostics::Diagnostics;

/// Run the full analysis pipeline over a parsed grammar.
///
/// `label` groups the returned diagnostics for presentation purposes only
/// and carries no semantic weight. The diagnostics hold every analysis
/// warning in emission order followed by a per-non-terminal summary.
pub fn analyze(grammar: &mut Grammar, label: &str) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    recursion::check_left_recursion(grammar);
    recursion::check_right_recursion(grammar);
    first_follow::add_firsts(grammar, label, &mut diagnostics);
    first_follow::add_follows(grammar);
    nullable::mark_nullable(grammar);
    common_prefix::check_common_prefixes(grammar, label, &mut diagnostics);

    summarize(grammar, label, &mut diagnostics);

    log::debug!(
        "analyzed {} non-terminals, {} warnings",
        grammar.len(),
        diagnostics.warnings().count()
    );
    diagnostics
}

/// Append one informational block per non-terminal: FIRST, FOLLOW,
/// nullability, recursion findings, and common-prefix groups.
fn summarize(grammar: &Grammar, label: &str, diagnostics: &mut Diagnostics) {
    for (name, non_terminal) in grammar.iter() {
        let scope = if label.is_empty() {
            format!("<{}>", name)
        } else {
            format!("{}: <{}>", label, name)
        };

        diagnostics.info(&scope, format!("FIRST = {}", non_terminal.first_set));
        diagnostics.info(&scope, format!("FOLLOW = {}", non_terminal.follow_set));
        diagnostics.info(&scope, format!("nullable = {}", non_terminal.is_nullable));

        match non_terminal.left_recursion.path.as_deref() {
            Some(path) if non_terminal.left_recursion.exists => {
                diagnostics.info(&scope, format!("left recursive via {}", path));
            }
            _ => diagnostics.info(&scope, "left recursion: none"),
        }
        match non_terminal.right_recursion.path.as_deref() {
            Some(path) if non_terminal.right_recursion.exists => {
                diagnostics.info(&scope, format!("right recursive via {}", path));
            }
            _ => diagnostics.info(&scope, "right recursion: none"),
        }

        for prefix in &non_terminal.common_prefixes.prefixes {
            diagnostics.info(
                &scope,
                format!(
                    "common prefix \"{}\" shared by: {}",
                    prefix.common,
                    prefix.sources.join(" | ")
                ),
            );
        }
    }
}
