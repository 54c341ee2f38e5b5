//! Test fixtures for specforge-core.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::entity::{Entity, FieldDef};
use crate::value::{Value, ValueKind};

#[derive(Debug, Clone, Default)]
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

impl Entity for Person {
    fn entity_name() -> &'static str {
        "Person"
    }

    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::new("name", ValueKind::Str),
            FieldDef::new("age", ValueKind::Int),
            FieldDef::new("has_consent", ValueKind::Bool),
            FieldDef::nullable("email", ValueKind::Str),
        ];
        FIELDS
    }

    fn read_field(&self, index: usize) -> Value {
        match index {
            0 => Value::from(self.name.as_str()),
            1 => Value::Int(self.age as i64),
            2 => Value::Bool(self.has_consent),
            3 => Value::from(self.email.as_deref()),
            _ => Value::Null,
        }
    }
}

/// Entity that counts how often its flag is read.
#[derive(Debug, Default)]
pub struct Probe {
    pub flag: bool,
    pub reads: AtomicUsize,
}

impl Probe {
    pub fn new(flag: bool) -> Self {
        Self {
            flag,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Entity for Probe {
    fn entity_name() -> &'static str {
        "Probe"
    }

    fn fields() -> &'static [FieldDef] {
        const FIELDS: &[FieldDef] = &[
            FieldDef::new("flag", ValueKind::Bool),
            FieldDef::new("counted", ValueKind::Bool),
        ];
        FIELDS
    }

    fn read_field(&self, index: usize) -> Value {
        match index {
            0 => Value::Bool(self.flag),
            1 => {
                self.reads.fetch_add(1, Ordering::SeqCst);
                Value::Bool(true)
            }
            _ => Value::Null,
        }
    }
}

/// A spread of people around the adult boundary.
pub fn sample_people() -> Vec<Person> {
    vec![
        Person::default(),
        Person::new("Ada", 17),
        Person::new("Bo", 17).with_consent(),
        Person::new("Cy", 18),
        Person::new("Di", 42).with_consent().with_email("di@example.com"),
        Person::new("Ed", 90).with_email("ed@example.com"),
    ]
}
