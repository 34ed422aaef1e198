//! End-to-end pipeline tests over the sample grammars.

use bnflint::{check_grammar, samples, Element, ElementSet, Severity, END_MARK};
use pretty_assertions::assert_eq;

fn init_logs() {
    let _ = pretty_env_logger::try_init();
}

fn terminals(values: &[&str]) -> ElementSet {
    values.iter().map(|v| Element::terminal(*v)).collect()
}

#[test]
fn empty_input_yields_empty_grammar_and_no_diagnostics() {
    let (grammar, diagnostics) = check_grammar("", "empty").unwrap();
    assert!(grammar.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn reparsing_yields_value_equal_results() {
    let (first, _) = check_grammar(samples::EXPRESSION, "run 1").unwrap();
    let (second, _) = check_grammar(samples::EXPRESSION, "run 2").unwrap();
    assert_eq!(first, second);
}

#[test]
fn circular_left_recursion_is_found_transitively() {
    init_logs();
    let (grammar, _) = check_grammar(samples::CIRCULAR_LEFT_RECURSION, "scenario A").unwrap();

    // <a>, <b>, <c>, <d> all sit on the a→b→c→d cycle
    for name in ["a", "b", "c", "d"] {
        let nt = grammar.get(name).unwrap();
        assert!(nt.left_recursion.exists, "<{}> should be left recursive", name);
        let path = nt.left_recursion.path.as_deref().unwrap();
        assert!(path.starts_with(&format!("<{}>", name)));
        assert!(path.ends_with(&format!("<{}>", name)));
    }

    // no alternative chain of first elements leads <e> back to itself
    let e = grammar.get("e").unwrap();
    assert!(!e.left_recursion.exists);
    assert_eq!(e.left_recursion.path, None);
}

#[test]
fn left_recursive_first_is_empty_and_warned_about() {
    let (grammar, diagnostics) =
        check_grammar(samples::CIRCULAR_LEFT_RECURSION, "scenario A").unwrap();

    for name in ["a", "b", "c", "d"] {
        let nt = grammar.get(name).unwrap();
        assert!(nt.first_set.is_empty());
        assert_eq!(nt.first_set_warnings.len(), 1);
        assert!(nt.first_set_warnings[0].contains(&format!("<{}>", name)));
        assert!(diagnostics
            .warnings()
            .any(|d| d.message.contains(&format!("<{}>", name))));
    }
}

#[test]
fn expression_grammar_first_sets() {
    let (grammar, _) = check_grammar(samples::EXPRESSION, "scenario B").unwrap();

    let f_first = &grammar.get("F").unwrap().first_set;
    assert_eq!(*f_first, terminals(&["(", "id"]));
    assert_eq!(grammar.get("T").unwrap().first_set, *f_first);
    assert_eq!(grammar.get("E").unwrap().first_set, *f_first);

    let mut tail_first = terminals(&["+"]);
    tail_first.insert(Element::Epsilon);
    assert_eq!(grammar.get("E'").unwrap().first_set, tail_first);
}

#[test]
fn expression_grammar_recursion_flags() {
    let (grammar, _) = check_grammar(samples::EXPRESSION, "scenario B").unwrap();

    for name in ["E", "E'", "T", "T'", "F"] {
        assert!(!grammar.get(name).unwrap().left_recursion.exists);
    }
    for name in ["E", "T", "F"] {
        assert!(!grammar.get(name).unwrap().right_recursion.exists);
    }
    // the tail rules end in themselves
    assert!(grammar.get("E'").unwrap().right_recursion.exists);
    assert!(grammar.get("T'").unwrap().right_recursion.exists);
}

#[test]
fn expression_grammar_follow_sets() {
    let (grammar, _) = check_grammar(samples::EXPRESSION, "scenario B").unwrap();

    assert_eq!(
        grammar.get("E").unwrap().follow_set,
        terminals(&[END_MARK, ")"])
    );
    assert_eq!(
        grammar.get("T").unwrap().follow_set,
        terminals(&["+", END_MARK, ")"])
    );
    assert_eq!(
        grammar.get("F").unwrap().follow_set,
        terminals(&["*", "+", END_MARK, ")"])
    );
}

#[test]
fn end_mark_is_in_follow_of_start_symbol() {
    for source in [samples::EXPRESSION, samples::NULLABLE_CHAINS, samples::CD19] {
        let (grammar, _) = check_grammar(source, "follow seed").unwrap();
        let start = grammar.start_symbol().unwrap();
        assert!(
            start.follow_set.contains(&Element::terminal(END_MARK)),
            "$ missing from FOLLOW(<{}>)",
            start.name
        );
    }
}

#[test]
fn nullability_matches_epsilon_in_first() {
    let (grammar, _) = check_grammar(samples::NULLABLE_CHAINS, "nullable").unwrap();

    for nt in grammar.non_terminals() {
        assert_eq!(nt.is_nullable, nt.first_set.contains_epsilon());
    }
    assert!(grammar.get("A").unwrap().is_nullable);
    assert!(grammar.get("B").unwrap().is_nullable);
    assert!(!grammar.get("D").unwrap().is_nullable);
    assert!(!grammar.get("S").unwrap().is_nullable);
}

#[test]
fn first_sets_contain_no_non_terminals() {
    for source in [
        samples::CD19,
        samples::CIRCULAR_LEFT_RECURSION,
        samples::EXPRESSION,
        samples::NULLABLE_CHAINS,
    ] {
        let (grammar, _) = check_grammar(source, "members").unwrap();
        for nt in grammar.non_terminals() {
            assert!(
                nt.first_set.iter().all(|e| !e.is_non_terminal()),
                "FIRST(<{}>) contains a non-terminal",
                nt.name
            );
        }
    }
}

#[test]
fn call_statement_common_prefix() {
    // scenario C, with the referenced rules defined
    let source = "\
<stat> ::= <id> ( <elist> ) | <id> ( )
<id> ::= id
<elist> ::= id";
    let (grammar, _) = check_grammar(source, "scenario C").unwrap();
    let result = &grammar.get("stat").unwrap().common_prefixes;

    assert!(result.exist);
    assert_eq!(result.prefixes.len(), 1);
    assert_eq!(result.prefixes[0].common, "<id> (");
    assert_eq!(
        result.prefixes[0].sources,
        vec!["<id> ( <elist> )".to_string(), "<id> ( )".to_string()]
    );
}

#[test]
fn prefix_pairs_are_reported_once() {
    let source = "<s> ::= <a> x | a y | a z\n<a> ::= a";
    let (grammar, diagnostics) = check_grammar(source, "dedupe").unwrap();
    let result = &grammar.get("s").unwrap().common_prefixes;

    // <a> vs 'a' mismatches twice but is warned about once
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(diagnostics.warnings().count(), 1);
}

#[test]
fn disjoint_first_sets_suppress_prefix_warnings() {
    // <B> and <D> mismatch after the shared <A>, but their FIRST sets are
    // disjoint so one token of lookahead can still decide
    let (grammar, diagnostics) = check_grammar(samples::NULLABLE_CHAINS, "suppress").unwrap();
    let s = grammar.get("S").unwrap();

    assert!(s.common_prefixes.exist);
    assert_eq!(s.common_prefixes.prefixes[0].common, "<A>");
    assert!(s.common_prefixes.warnings.is_empty());
    assert!(diagnostics
        .warnings()
        .all(|d| !d.scope.contains("common prefixes of <S>")));
}

#[test]
fn cd19_pipeline_end_to_end() {
    init_logs();
    let (grammar, diagnostics) = check_grammar(samples::CD19, "CD19").unwrap();

    for name in ["bool", "expr", "fact", "term"] {
        let nt = grammar.get(name).unwrap();
        assert!(nt.left_recursion.exists, "<{}> should be left recursive", name);
        assert!(nt.first_set.is_empty());
        assert!(!nt.first_set_warnings.is_empty());
    }

    let callstat = &grammar.get("callstat").unwrap().common_prefixes;
    assert!(callstat.exist);
    assert!(callstat.prefixes.iter().any(|p| p.common == "<id> ("));

    let stats = &grammar.get("stats").unwrap().common_prefixes;
    assert!(stats.prefixes.iter().any(|p| p.common == "<stat> ;"));
    assert!(stats.prefixes.iter().any(|p| p.common == "<strstat>"));

    // analysis limitations never abort the pipeline
    assert!(diagnostics.iter().any(|d| d.severity == Severity::Info));
}
