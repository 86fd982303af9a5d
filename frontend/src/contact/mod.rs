pub mod guard;
pub mod lead;
pub mod sink;
pub mod view;
pub mod wizard;

use thiserror::Error;

use lead::LeadField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("unknown form field `{0}`")]
    UnknownField(String),
    #[error("`{value}` is not a valid choice for {field}")]
    InvalidChoice { field: LeadField, value: String },
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::guard::{Clock, KeyValueStore};
    use super::lead::{BudgetRange, LeadSubmission, LeadStatus, ProjectType};

    #[derive(Default)]
    pub struct ManualClock(Cell<i64>);

    impl ManualClock {
        pub fn at(ms: i64) -> Self {
            Self(Cell::new(ms))
        }

        pub fn advance(&self, ms: i64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.0.get()
        }
    }

    #[derive(Default)]
    pub struct MemoryStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    pub fn valid_record() -> LeadSubmission {
        LeadSubmission {
            name: "Grace Hopper".into(),
            email: "grace@navy.mil".into(),
            company: String::new(),
            role: "Rear Admiral".into(),
            project_type: ProjectType::WebApp,
            budget: BudgetRange::OneToFiveThousand,
            description: "A compiler explorer for the whole fleet".into(),
            competitors: "Godbolt".into(),
            status: LeadStatus::New,
        }
    }
}
