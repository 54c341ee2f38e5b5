//! Integration tests for `#[derive(Entity)]`.
//!
//! These tests verify that the derive produces a field table in declaration
//! order and reads each supported field type as the matching value.

use std::sync::Arc;

use specforge::prelude::*;
use specforge::{Value, ValueKind};

/// A product listing covering every supported field type.
#[derive(Entity)]
pub struct Listing {
    pub sku: &'static str,
    pub title: String,
    pub seller: Arc<str>,
    pub in_stock: bool,
    pub quantity: u16,
    pub delta: i32,
    pub views: u64,
    pub price: f32,
    pub rating: Option<f64>,
    pub note: Option<String>,
    #[entity(rename = "category")]
    pub category_code: Option<&'static str>,
    #[entity(skip)]
    pub images: Vec<String>,
}

fn listing() -> Listing {
    Listing {
        sku: "SKU-1",
        title: "Desk".to_string(),
        seller: Arc::from("acme"),
        in_stock: true,
        quantity: 4,
        delta: -2,
        views: u64::MAX,
        price: 12.5,
        rating: None,
        note: Some("as new".to_string()),
        category_code: Some("furniture"),
        images: vec!["front.png".to_string()],
    }
}

#[test]
fn test_field_table_order_and_kinds() {
    let table: Vec<_> = Listing::fields()
        .iter()
        .map(|f| (f.name, f.kind, f.nullable))
        .collect();

    assert_eq!(
        table,
        vec![
            ("sku", ValueKind::Str, false),
            ("title", ValueKind::Str, false),
            ("seller", ValueKind::Str, false),
            ("in_stock", ValueKind::Bool, false),
            ("quantity", ValueKind::Int, false),
            ("delta", ValueKind::Int, false),
            ("views", ValueKind::Int, false),
            ("price", ValueKind::Float, false),
            ("rating", ValueKind::Float, true),
            ("note", ValueKind::Str, true),
            ("category", ValueKind::Str, true),
        ]
    );
    assert_eq!(Listing::entity_name(), "Listing");
}

#[test]
fn test_reads_field_values() {
    let item = listing();
    assert_eq!(item.images.len(), 1);

    assert_eq!(item.field("sku"), Some(Value::from("SKU-1")));
    assert_eq!(item.field("title"), Some(Value::from("Desk")));
    assert_eq!(item.field("seller"), Some(Value::from("acme")));
    assert_eq!(item.field("in_stock"), Some(Value::Bool(true)));
    assert_eq!(item.field("quantity"), Some(Value::Int(4)));
    assert_eq!(item.field("delta"), Some(Value::Int(-2)));
    assert_eq!(item.field("views"), Some(Value::Int(i64::MAX)));
    assert_eq!(item.field("price"), Some(Value::Float(12.5)));
    assert_eq!(item.field("rating"), Some(Value::Null));
    assert_eq!(item.field("note"), Some(Value::from("as new")));
    assert_eq!(item.field("category"), Some(Value::from("furniture")));
    assert_eq!(item.field("category_code"), None);
    assert_eq!(item.field("images"), None);
}

#[test]
fn test_derived_entity_in_specification() {
    let available = Specification::<Listing>::from_fn(|l| {
        Expr::and(
            l.field("in_stock"),
            Expr::gt(l.field("quantity"), Expr::int(0)),
        )
    })
    .unwrap();
    let unrated = Specification::<Listing>::from_fn(|l| Expr::eq(l.field("rating"), Expr::null()))
        .unwrap();

    let mut item = listing();
    assert!((&available & &unrated).is_satisfied_by(&item));

    item.rating = Some(4.5);
    item.quantity = 0;
    assert!(!(&available | &unrated).is_satisfied_by(&item));
}

#[test]
fn test_skipped_field_is_unknown_to_rules() {
    let err = Specification::<Listing>::from_fn(|l| Expr::eq(l.field("images"), Expr::null()))
        .unwrap_err();
    assert!(matches!(err, SpecError::Malformed(_)));
}

/// Ledger row with integers wider than `i64`.
#[derive(Entity)]
pub struct Ledger {
    pub balance: i128,
    pub offset: isize,
    pub total: u128,
}

#[test]
fn test_wide_integers_saturate_by_sign() {
    let row = Ledger {
        balance: -(1 << 100),
        offset: -3,
        total: 1 << 100,
    };
    assert_eq!(row.field("balance"), Some(Value::Int(i64::MIN)));
    assert_eq!(row.field("offset"), Some(Value::Int(-3)));
    assert_eq!(row.field("total"), Some(Value::Int(i64::MAX)));

    let overdrawn =
        Specification::<Ledger>::from_fn(|l| Expr::lt(l.field("balance"), Expr::int(0))).unwrap();
    assert!(overdrawn.is_satisfied_by(&row));

    let in_credit = Ledger {
        balance: 1 << 100,
        ..row
    };
    assert!(!overdrawn.is_satisfied_by(&in_credit));
    assert_eq!(in_credit.field("balance"), Some(Value::Int(i64::MAX)));
}
