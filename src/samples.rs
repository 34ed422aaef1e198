//! Sample grammars
//!
//! Fixture grammars exercising the analysis pipeline: the CD19 course
//! grammar (a realistically sized language with left recursion in its
//! expression rules), a circular left-recursion stress case, and the
//! textbook LL(1) expression grammar.

/// The CD19 compiler-course grammar. Several expression rules
/// (`<bool>`, `<expr>`, `<fact>`, `<term>`) are directly left recursive.
pub const CD19: &str = "\
<program> ::= CD19 <id> <consts> <types> <arrays> <funcs> <mainbody>
<consts> ::= constants <initlist> | ε
<initlist> ::= <init> | <init> , <initlist>
<init> ::= <id> = <expr>
<types> ::= types <typelist> | ε
<arrays> ::= arrays <arrdecls> | ε
<funcs> ::= <func> <funcs> | ε
<mainbody> ::= main <slist> begin <stats> end CD19 <id>
<slist> ::= <sdecl> | <sdecl> , <slist>
<typelist> ::= <type> <typelist> | <type>
<type> ::= <structid> is <fields> end
<type> ::= <typeid> is array [ <expr> ] of <structid>
<fields> ::= <sdecl> | <sdecl> , <fields>
<sdecl> ::= <id> : <stype>
<arrdecls> ::= <arrdecl> | <arrdecl> , <arrdecls>
<arrdecl> ::= <id> : <typeid>
<func> ::= function <id> ( <plist> ) : <rtype> <funcbody>
<rtype> ::= <stype> | void
<plist> ::= <params> | ε
<params> ::= <param> , <params> | <param>
<param> ::= <sdecl> | <arrdecl> | const <arrdecl>
<funcbody> ::= <locals> begin <stats> end
<locals> ::= <dlist> | ε
<dlist> ::= <decl> | <decl> , <dlist>
<decl> ::= <sdecl> | <arrdecl>
<stype> ::= integer | real | boolean
<stats> ::= <stat> ; <stats> | <strstat> <stats> | <stat> ; | <strstat>
<strstat> ::= <forstat> | <ifstat>
<stat> ::= <repstat> | <asgnstat> | <iostat> | <callstat> | <returnstat>
<forstat> ::= for ( <asgnlist> ; <bool> ) <stats> end
<repstat> ::= repeat ( <asgnlist> ) <stats> until <bool>
<asgnlist> ::= <alist> | ε
<alist> ::= <asgnstat> | <asgnstat> , <alist>
<ifstat> ::= if ( <bool> ) <stats> end
<ifstat> ::= if ( <bool> ) <stats> else <stats> end
<asgnstat> ::= <var> <asgnop> <bool>
<asgnop> ::= = | += | -= | *= | /=
<iostat> ::= input <vlist> | print <prlist> | printline <prlist>
<callstat> ::= <id> ( <elist> ) | <id> ( )
<returnstat> ::= return | return <expr>
<vlist> ::= <var> , <vlist> | <var>
<var> ::= <id> | <id> [ <expr> ] . <id>
<elist> ::= <bool> , <elist> | <bool>
<bool> ::= <bool> <logop> <rel> | <rel>
<rel> ::= not <expr> <relop> <expr> | <expr> <relop> <expr> | <expr>
<logop> ::= and | or | xor
<relop> ::= == | != | > | <= | < | >=
<expr> ::= <expr> + <fact> | <expr> - <fact> | <fact>
<fact> ::= <fact> * <term> | <fact> / <term> | <fact> % <term> | <term>
<term> ::= <term> ^ <exponent> | <exponent>
<exponent> ::= <var> | <intlit> | <reallit> | <fncall> | true | false
<exponent> ::= ( <bool> )
<fncall> ::= <id> ( <elist> ) | <id> ( )
<prlist> ::= <printitem> , <prlist> | <printitem>
<printitem> ::= <expr> | <string>
<id> ::= id
<structid> ::= id
<typeid> ::= id
<intlit> ::= 42
<reallit> ::= 0.0000001000000100000110
<string> ::= strlit";

/// A grammar whose left recursion only appears through a transitive chain:
/// `<d>` reaches itself via `<a>` or `<b>`, while `<e>` never does.
pub const CIRCULAR_LEFT_RECURSION: &str = "\
<a> ::= <b> <a> | a | ε
<b> ::= <c> | b | ε
<c> ::= c | ε | <d>
<d> ::= d | <a> d | <b> d | <e> | ε
<e> ::= a <e> | e | ε";

/// The textbook LL(1) expression grammar with nullable tail rules.
pub const EXPRESSION: &str = "\
<E> ::= <T> <E'>
<E'> ::= + <T> <E'>
<E'> ::= ε
<T> ::= <F> <T'>
<T'> ::= * <F> <T'>
<T'> ::= ε
<F> ::= (<E>)
<F> ::= id";

/// A FIRST/FOLLOW exercise with several nullable non-terminals and
/// alternatives sharing a nullable leading `<A>`.
pub const NULLABLE_CHAINS: &str = "\
<S> ::= <A> <B> <C> | <A> <D>
<A> ::= ε | a <A>
<B> ::= b | c | ε
<C> ::= <D> d <C>
<D> ::= e b | f c";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar_parser::parse_grammar;

    #[test]
    fn test_all_samples_parse() {
        for source in [CD19, CIRCULAR_LEFT_RECURSION, EXPRESSION, NULLABLE_CHAINS] {
            let grammar = parse_grammar(source).unwrap();
            assert!(!grammar.is_empty());
        }
    }

    #[test]
    fn test_cd19_shape() {
        let grammar = parse_grammar(CD19).unwrap();
        assert_eq!(grammar.start_symbol().unwrap().name, "program");
        // <type> and <ifstat> are each defined by two rule lines
        assert_eq!(grammar.get("type").unwrap().productions.len(), 2);
        assert_eq!(grammar.get("ifstat").unwrap().productions.len(), 2);
    }
}
