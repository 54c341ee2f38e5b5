//! Tests for compiled predicates.

use super::*;
use crate::eval::eval_predicate;
use crate::expr::{Param, PredicateExpr};
use crate::test_utils::{sample_people, Person, Probe};

fn sample_exprs() -> Vec<PredicateExpr> {
    let p = Param::fresh();
    vec![
        p.lambda(Expr::bool(true)),
        p.lambda(Expr::bool(false)),
        p.lambda(p.field("has_consent")),
        p.lambda(Expr::ge(p.field("age"), Expr::int(18))),
        p.lambda(Expr::lt(Expr::int(40), p.field("age"))),
        p.lambda(Expr::eq(p.field("email"), Expr::null())),
        p.lambda(Expr::ne(p.field("name"), Expr::string("Ada"))),
        p.lambda(Expr::le(p.field("age"), Expr::float(17.5))),
        p.lambda(Expr::not(p.field("has_consent"))),
        p.lambda(Expr::and(
            Expr::gt(p.field("age"), Expr::int(17)),
            p.field("has_consent"),
        )),
        p.lambda(Expr::any([
            Expr::eq(p.field("name"), Expr::string("Ed")),
            Expr::eq(p.field("name"), Expr::string("Bo")),
            Expr::not(Expr::ne(p.field("age"), Expr::int(18))),
        ])),
        p.lambda(Expr::all([
            Expr::ge(p.field("age"), Expr::int(18)),
            Expr::ne(p.field("email"), Expr::null()),
            Expr::eq(p.field("has_consent"), Expr::bool(true)),
        ])),
    ]
}

#[test]
fn test_compiled_matches_interpreter() {
    let people = sample_people();
    for expr in sample_exprs() {
        let compiled = compile::<Person>(&expr);
        for person in &people {
            assert_eq!(
                compiled.test(person),
                eval_predicate(&expr, person),
                "{expr} on {person:?}"
            );
        }
    }
}

#[test]
fn test_compilation_is_repeatable() {
    let people = sample_people();
    for expr in sample_exprs() {
        let first = compile::<Person>(&expr);
        let second = compile::<Person>(&expr);
        for person in &people {
            assert_eq!(first.test(person), second.test(person));
        }
    }
}

#[test]
fn test_and_short_circuits() {
    let p = Param::fresh();
    let compiled = compile::<Probe>(&p.lambda(Expr::and(p.field("flag"), p.field("counted"))));

    let off = Probe::new(false);
    assert!(!compiled.test(&off));
    assert_eq!(off.reads(), 0);

    let on = Probe::new(true);
    assert!(compiled.test(&on));
    assert_eq!(on.reads(), 1);
}

#[test]
fn test_or_short_circuits() {
    let p = Param::fresh();
    let compiled = compile::<Probe>(&p.lambda(Expr::or(p.field("flag"), p.field("counted"))));

    let on = Probe::new(true);
    assert!(compiled.test(&on));
    assert_eq!(on.reads(), 0);

    let off = Probe::new(false);
    assert!(compiled.test(&off));
    assert_eq!(off.reads(), 1);
}

#[test]
fn test_nary_short_circuits() {
    let p = Param::fresh();
    let compiled = compile::<Probe>(&p.lambda(Expr::all([
        p.field("flag"),
        p.field("counted"),
        p.field("counted"),
    ])));

    let off = Probe::new(false);
    assert!(!compiled.test(&off));
    assert_eq!(off.reads(), 0);
}

#[test]
fn test_always() {
    let yes = CompiledPredicate::<Person>::always(true);
    let no = CompiledPredicate::<Person>::always(false);
    assert!(yes.test(&Person::default()));
    assert!(!no.test(&Person::default()));
}
