//! Tests for the specification facade.

use std::sync::Arc;

use crate::prelude::*;
use crate::{CompileMode, SpecConfig};

#[derive(Debug, Clone, Default, Entity)]
struct Ticket {
    title: String,
    priority: u8,
    estimate: Option<f64>,
    #[entity(rename = "open")]
    is_open: bool,
    #[entity(skip)]
    #[allow(dead_code)]
    tags: Vec<String>,
    owner: Option<Arc<str>>,
}

fn ticket(priority: u8, is_open: bool) -> Ticket {
    Ticket {
        title: format!("p{priority}"),
        priority,
        is_open,
        ..Ticket::default()
    }
}

fn urgent() -> Specification<Ticket> {
    Specification::from_fn(|t| Expr::ge(t.field("priority"), Expr::int(3))).unwrap()
}

fn open() -> Specification<Ticket> {
    Specification::from_fn(|t| t.field("open")).unwrap()
}

struct Unassigned;

impl Rule<Ticket> for Unassigned {
    fn body(&self, ticket: &Param) -> Expr {
        Expr::eq(ticket.field("owner"), Expr::null())
    }
}

#[test]
fn test_derived_fields() {
    let names: Vec<_> = <Ticket as crate::Entity>::fields()
        .iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["title", "priority", "estimate", "open", "owner"]);

    let estimate = <Ticket as crate::Entity>::field_def("estimate").unwrap();
    assert!(estimate.nullable);
    assert_eq!(estimate.kind, crate::ValueKind::Float);
}

#[test]
fn test_operators_match_methods() {
    let (u, o) = (urgent(), open());
    let tickets = [ticket(1, false), ticket(1, true), ticket(5, false), ticket(5, true)];

    for t in &tickets {
        assert_eq!((&u & &o).is_satisfied_by(t), u.and(&o).is_satisfied_by(t));
        assert_eq!((&u | &o).is_satisfied_by(t), u.or(&o).is_satisfied_by(t));
        assert_eq!((!&u).is_satisfied_by(t), !u.is_satisfied_by(t));
        assert_eq!(
            (u.clone() & o.clone()).is_satisfied_by(t),
            u.is_satisfied_by(t) && o.is_satisfied_by(t)
        );
    }
}

#[test]
fn test_rule_struct() {
    let unassigned = Specification::new(Unassigned).unwrap();
    assert!(unassigned.is_satisfied_by(&ticket(1, true)));

    let mut owned = ticket(1, true);
    owned.owner = Some(Arc::from("kim"));
    assert!(!unassigned.is_satisfied_by(&owned));
    assert_eq!(Rule::<Ticket>::name(&Unassigned), "Unassigned");
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = Specification::<Ticket>::from_fn(|t| t.field("tags")).unwrap_err();
    assert!(matches!(
        err,
        SpecError::Malformed(crate::MalformedExpression::UnknownField { .. })
    ));
}

#[test]
fn test_empty_and_none() {
    let empty = Specification::<Ticket>::empty();
    assert!(empty.is_empty());
    assert!(empty.expression().is_none());
    assert!(empty.is_satisfied_by(&Ticket::default()));

    let none = Specification::<Ticket>::none();
    assert!(!none.is_empty());
    assert!(!none.is_satisfied_by(&Ticket::default()));
}

#[test]
fn test_all_and_any() {
    let tickets = [ticket(1, false), ticket(5, false), ticket(5, true)];

    let both = Specification::all([urgent(), open()]);
    let either = Specification::any([urgent(), open()]);
    for t in &tickets {
        assert_eq!(both.is_satisfied_by(t), t.priority >= 3 && t.is_open);
        assert_eq!(either.is_satisfied_by(t), t.priority >= 3 || t.is_open);
    }

    assert!(Specification::<Ticket>::all([]).is_empty());
    assert!(!Specification::<Ticket>::any([]).is_satisfied_by(&ticket(5, true)));
}

#[test]
fn test_filter_and_predicate() {
    let tickets = vec![ticket(1, true), ticket(4, true), ticket(5, false)];
    let spec = urgent();

    let titles: Vec<_> = spec.filter(&tickets).map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["p4", "p5"]);

    let is_urgent = spec.predicate();
    let count = tickets.iter().filter(|&t| is_urgent(t)).count();
    assert_eq!(count, 2);
}

#[test]
fn test_with_config_uses_compile_mode() {
    let config = SpecConfig::new().with_compile_mode(CompileMode::Lazy);
    let spec = Specification::with_config(Unassigned, &config).unwrap();
    assert!(!spec.as_predicate().is_compiled());

    assert!(spec.is_satisfied_by(&ticket(1, true)));
    assert!(spec.as_predicate().is_compiled());
}

#[test]
fn test_with_config_applies_depth_limit() {
    let config = SpecConfig::new().with_max_depth(1);
    let err = Specification::with_config(Unassigned, &config).unwrap_err();
    assert!(matches!(
        err,
        SpecError::Malformed(crate::MalformedExpression::TooDeep { .. })
    ));
}

#[test]
fn test_display() {
    assert_eq!(Specification::<Ticket>::empty().to_string(), "<identity>");
    let shown = urgent().to_string();
    assert!(shown.contains("priority"), "{shown}");
}

#[test]
fn test_catalog_combines_by_name() {
    let mut catalog = Catalog::new();
    catalog.insert("urgent", urgent());
    catalog.insert("open", open());
    catalog.register(Unassigned).unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.names().collect::<Vec<_>>(),
        ["Unassigned", "open", "urgent"]
    );

    let triage = catalog.all_of(&["urgent", "open", "Unassigned"]).unwrap();
    assert!(triage.is_satisfied_by(&ticket(5, true)));
    assert!(!triage.is_satisfied_by(&ticket(5, false)));

    let either = catalog.any_of(&["urgent", "open"]).unwrap();
    assert!(either.is_satisfied_by(&ticket(1, true)));
    assert!(!either.is_satisfied_by(&ticket(1, false)));

    let closed = catalog.negate("open").unwrap();
    assert!(closed.is_satisfied_by(&ticket(1, false)));

    let flat = catalog.all_of(&["urgent", "open", "urgent", "open"]).unwrap();
    match flat.expression().map(PredicateExpr::body) {
        Some(Expr::Logical { operands, .. }) => assert_eq!(operands.len(), 4),
        other => panic!("expected one AND node, got {other:?}"),
    }

    assert!(catalog.all_of(&[]).unwrap().is_empty());
    assert!(!catalog.any_of(&[]).unwrap().is_satisfied_by(&ticket(5, true)));
}

#[test]
fn test_catalog_rejects_unknown_names() {
    let mut catalog = Catalog::new();
    catalog.insert("urgent", urgent());

    let err = catalog.all_of(&["urgent", "stale"]).unwrap_err();
    assert_eq!(
        err,
        SpecError::InvalidArgument(
            "unknown specification `stale`: operand 1 of AND is missing".to_string()
        )
    );

    let err = catalog.negate("stale").unwrap_err();
    assert_eq!(
        err,
        SpecError::InvalidArgument(
            "unknown specification `stale`: operand of NOT is missing".to_string()
        )
    );

    let err = catalog.any_of(&["stale"]).unwrap_err();
    assert_eq!(
        err,
        SpecError::InvalidArgument(
            "unknown specification `stale`: operand 0 of OR is missing".to_string()
        )
    );

    let err = catalog.require("stale").unwrap_err();
    assert_eq!(
        err,
        SpecError::InvalidArgument("unknown specification `stale`".to_string())
    );
}
