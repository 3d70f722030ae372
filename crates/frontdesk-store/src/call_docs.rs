//! Call documentation queries and mutations.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{CallDoc, NewCallDoc};
use crate::store::Store;

impl Store {
    /// Call docs for one concern, newest first.
    pub async fn call_docs(&self, concern_id: Uuid) -> Vec<CallDoc> {
        let tables = self.tables().await;
        let mut docs: Vec<CallDoc> = tables
            .call_docs
            .values()
            .filter(|doc| doc.concern_id == concern_id)
            .cloned()
            .collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        docs
    }

    /// Insert a new call doc with a fresh id and creation timestamp.
    pub async fn create_call_doc(&self, new: NewCallDoc) -> CallDoc {
        let doc = CallDoc {
            id: Uuid::new_v4(),
            concern_id: new.concern_id,
            agent_name: new.agent_name,
            call_notes: new.call_notes,
            resolution: new.resolution,
            agent_message: new.agent_message,
            created_at: Utc::now(),
        };
        self.tables_mut().await.call_docs.insert(doc.id, doc.clone());
        doc
    }
}
