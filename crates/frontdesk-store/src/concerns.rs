//! Concern queries and mutations.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Concern, ConcernStatus, NewConcern};
use crate::store::Store;

impl Store {
    pub async fn concern(&self, id: Uuid) -> Option<Concern> {
        self.tables().await.concerns.get(&id).cloned()
    }

    /// All concerns, most recently touched first.
    pub async fn concerns(&self) -> Vec<Concern> {
        let tables = self.tables().await;
        by_recency(tables.concerns.values().cloned().collect())
    }

    /// Concerns whose category matches exactly, most recently touched first.
    pub async fn concerns_by_category(&self, category: &str) -> Vec<Concern> {
        let tables = self.tables().await;
        by_recency(
            tables
                .concerns
                .values()
                .filter(|c| c.category == category)
                .cloned()
                .collect(),
        )
    }

    /// Concerns for one patient, matched on both name and date of birth.
    pub async fn concerns_by_patient(&self, patient_name: &str, patient_dob: &str) -> Vec<Concern> {
        let tables = self.tables().await;
        by_recency(
            tables
                .concerns
                .values()
                .filter(|c| c.patient_name == patient_name && c.patient_dob == patient_dob)
                .cloned()
                .collect(),
        )
    }

    /// Insert a new concern with a fresh id and both timestamps set to now.
    pub async fn create_concern(&self, new: NewConcern) -> Concern {
        let now = Utc::now();
        let concern = Concern {
            id: Uuid::new_v4(),
            patient_name: new.patient_name,
            patient_dob: new.patient_dob,
            category: new.category,
            title: new.title,
            status: new.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.tables_mut()
            .await
            .concerns
            .insert(concern.id, concern.clone());
        concern
    }

    /// Replace the status of an existing concern, bumping `updated_at`.
    ///
    /// Returns `None` for an unknown id; no other field is touched.
    pub async fn update_concern_status(
        &self,
        id: Uuid,
        status: ConcernStatus,
    ) -> Option<Concern> {
        let mut tables = self.tables_mut().await;
        let current = tables.concerns.get(&id)?;
        let updated = Concern {
            status,
            updated_at: Utc::now(),
            ..current.clone()
        };
        tables.concerns.insert(id, updated.clone());
        Some(updated)
    }
}

fn by_recency(mut concerns: Vec<Concern>) -> Vec<Concern> {
    concerns.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    concerns
}
