//! Image metadata queries and mutations.
//!
//! Only the metadata lives here; the bytes belong to the server's content
//! store.  Deleting a record does not touch the underlying blob — that is
//! the ingestion pipeline's job at the API boundary.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Image, NewImage};
use crate::store::Store;

impl Store {
    pub async fn image(&self, id: Uuid) -> Option<Image> {
        self.tables().await.images.get(&id).cloned()
    }

    /// Images filtered by optional, conjunctive association filters.
    ///
    /// No filters returns everything; each supplied filter narrows by exact
    /// match.  Newest upload first.
    pub async fn images(
        &self,
        concern_id: Option<Uuid>,
        call_doc_id: Option<Uuid>,
    ) -> Vec<Image> {
        let tables = self.tables().await;
        let mut images: Vec<Image> = tables
            .images
            .values()
            .filter(|img| {
                if let Some(concern_id) = concern_id {
                    if img.concern_id != Some(concern_id) {
                        return false;
                    }
                }
                if let Some(call_doc_id) = call_doc_id {
                    if img.call_doc_id != Some(call_doc_id) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        images.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        images
    }

    /// Register metadata for a stored upload.
    pub async fn create_image(&self, new: NewImage) -> Image {
        let image = Image {
            id: Uuid::new_v4(),
            concern_id: new.concern_id,
            call_doc_id: new.call_doc_id,
            filename: new.filename,
            mimetype: new.mimetype,
            size: new.size,
            path: new.path,
            uploaded_at: Utc::now(),
        };
        self.tables_mut().await.images.insert(image.id, image.clone());
        image
    }

    /// Remove the metadata record.  Returns whether a record existed.
    pub async fn delete_image(&self, id: Uuid) -> bool {
        self.tables_mut().await.images.remove(&id).is_some()
    }
}
