//! An entity that records how often one of its fields is read.

use std::sync::atomic::{AtomicUsize, Ordering};

use specforge::{Entity, FieldDef, Value, ValueKind};

/// `flag` is a plain bool. Reading `counted` bumps [`Probe::reads`] and
/// yields `true`.
#[derive(Debug, Default)]
pub struct Probe {
    pub flag: bool,
    reads: AtomicUsize,
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
