//! Person entity and the rules the integration tests build on.

use specforge::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Entity)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub has_consent: bool,
    pub email: Option<String>,
}

impl Person {
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
            ..Self::default()
        }
    }

    pub fn with_consent(mut self) -> Self {
        self.has_consent = true;
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }
}

/// `age >= 18`
pub fn is_adult() -> Specification<Person> {
    Specification::from_fn(|p| Expr::ge(p.field("age"), Expr::int(18)))
        .expect("is_adult is well-formed")
}

/// `has_consent`
pub fn has_consent() -> Specification<Person> {
    Specification::from_fn(|p| p.field("has_consent")).expect("has_consent is well-formed")
}

/// `email != null`
pub fn has_email() -> Specification<Person> {
    Specification::from_fn(|p| Expr::ne(p.field("email"), Expr::null()))
        .expect("has_email is well-formed")
}

/// A spread of people around the adult boundary.
pub fn sample_people() -> Vec<Person> {
    vec![
        Person::default(),
        Person::new("Ada", 17),
        Person::new("Bo", 17).with_consent(),
        Person::new("Cy", 18),
        Person::new("Di", 42)
            .with_consent()
            .with_email("di@example.com"),
        Person::new("Ed", 90).with_email("ed@example.com"),
    ]
}
