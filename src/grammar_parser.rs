//! BNF grammar text parser
//!
//! Converts line-oriented BNF source into the grammar model. Each non-blank
//! line is one rule of the form `<name> ::= alt1 | alt2 | ...`; alternatives
//! are tokenized on single spaces and each token is scanned character by
//! character, splitting at `<`/`>` boundaries so an identifier glued to
//! punctuation (e.g. `(<E>)`) still yields separate elements.
//!
//! After all lines are parsed, a resolution pass checks that every
//! non-terminal named inside an alternative is defined by some rule line,
//! and the first non-terminal defined becomes the start symbol.

use crate::ast::{Alternative, Element, Grammar, Production};

/// Fatal grammar-text failures. Analysis-time anomalies are diagnostics,
/// never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// Malformed rule line: missing or repeated `::=`, a bad left-hand
    /// side, or a `<` opened but never closed before its token ends.
    Syntax { fragment: String },

    /// A non-terminal referenced in an alternative but never defined by a
    /// rule line. Parsing fails fast at resolution time.
    UnresolvedReference { name: String, referenced_in: String },
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::Syntax { fragment } => {
                write!(f, "Malformed grammar rule: '{}'", fragment)
            }
            GrammarError::UnresolvedReference {
                name,
                referenced_in,
            } => {
                write!(
                    f,
                    "Non-terminal <{}> is referenced in the rules for <{}> but never defined",
                    name, referenced_in
                )
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Parse BNF source text into a [`Grammar`].
///
/// Empty or all-blank input yields an empty grammar. Structural failures
/// abort the parse with a [`GrammarError`].
pub fn parse_grammar(text: &str) -> Result<Grammar, GrammarError> {
    let mut grammar = Grammar::new();

    if text.trim().is_empty() {
        return Ok(grammar);
    }

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        parse_rule_line(&mut grammar, line)?;
    }

    resolve_references(&grammar)?;
    grammar.mark_start_symbol();

    log::debug!("parsed grammar with {} non-terminals", grammar.len());
    Ok(grammar)
}

fn parse_rule_line(grammar: &mut Grammar, line: &str) -> Result<(), GrammarError> {
    let mut parts = line.splitn(3, "::=");
    let lhs = parts.next().unwrap_or_default().trim();
    let rhs = match parts.next() {
        Some(rhs) => rhs.trim(),
        None => {
            return Err(GrammarError::Syntax {
                fragment: line.to_string(),
            })
        }
    };
    if parts.next().is_some() {
        // more than one ::= on the line
        return Err(GrammarError::Syntax {
            fragment: line.to_string(),
        });
    }

    let name = parse_rule_name(lhs).ok_or_else(|| GrammarError::Syntax {
        fragment: lhs.to_string(),
    })?;

    let alternatives = rhs
        .split('|')
        .map(str::trim)
        .map(parse_alternative)
        .collect::<Result<Vec<_>, _>>()?;

    grammar.add_production(name, Production::new(rhs, alternatives));
    Ok(())
}

/// The left-hand side must be exactly one well-formed `<name>` token.
fn parse_rule_name(lhs: &str) -> Option<String> {
    let inner = lhs.strip_prefix('<')?.strip_suffix('>')?;
    if inner.is_empty() || inner.contains(['<', '>', ' ']) {
        return None;
    }
    Some(inner.to_string())
}

fn parse_alternative(source: &str) -> Result<Alternative, GrammarError> {
    let mut elements = Vec::new();
    for token in source.split(' ').map(str::trim).filter(|t| !t.is_empty()) {
        scan_token(token, &mut elements)?;
    }
    Ok(Alternative::new(elements))
}

/// Classify one space-delimited token into elements.
///
/// Tokens of one or two characters are always a single terminal, so bare
/// punctuation like `<` or `<=` stays literal. Longer tokens are scanned
/// character by character: a `<` opens a non-terminal name running to the
/// matching `>`, anything else accumulates into a terminal until the next
/// `<` or the end of the token.
fn scan_token(token: &str, elements: &mut Vec<Element>) -> Result<(), GrammarError> {
    if token == "ε" || token == "\\e" {
        elements.push(Element::Epsilon);
        return Ok(());
    }

    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 2 {
        elements.push(Element::terminal(token));
        return Ok(());
    }

    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '<' {
            let start = i;
            i += 1;
            let mut name = String::new();
            while i < chars.len() && chars[i] != '>' {
                name.push(chars[i]);
                i += 1;
            }
            if i == chars.len() {
                return Err(GrammarError::Syntax {
                    fragment: chars[start..].iter().collect(),
                });
            }
            i += 1; // consume '>'
            elements.push(Element::NonTerminal(name));
        } else {
            let mut value = String::new();
            while i < chars.len() && chars[i] != '<' {
                value.push(chars[i]);
                i += 1;
            }
            elements.push(Element::Terminal(value));
        }
    }
    Ok(())
}

/// Every non-terminal named inside an alternative must map to a defined
/// rule; name keys into the grammar map are the canonical node identities
/// the later analysis stages rely on.
fn resolve_references(grammar: &Grammar) -> Result<(), GrammarError> {
    for (owner, non_terminal) in grammar.iter() {
        for alternative in non_terminal.all_alternatives() {
            for element in &alternative.elements {
                if let Element::NonTerminal(name) = element {
                    if !grammar.contains(name) {
                        return Err(GrammarError::UnresolvedReference {
                            name: name.clone(),
                            referenced_in: owner.to_string(),
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
