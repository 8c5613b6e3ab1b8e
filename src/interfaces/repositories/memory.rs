use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::entities::{contact::ContactSubmission, education::EducationRecord};

/// Process-local store used for development runs and tests.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    pub(crate) contacts: Arc<DashMap<Uuid, ContactSubmission>>,
    pub(crate) education: Arc<Vec<EducationRecord>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_education(records: Vec<EducationRecord>) -> Self {
        MemoryRepo {
            contacts: Arc::default(),
            education: Arc::new(records),
        }
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }
}
