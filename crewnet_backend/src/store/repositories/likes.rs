use chrono::Utc;

use crate::store::models::{CreateLikeInput, LikeRecord};
use crate::store::{StoreResult, Tables};

pub trait LikeRepository {
    fn create(&mut self, input: CreateLikeInput) -> StoreResult<LikeRecord>;
    fn list_for_post(&self, post_id: i64) -> StoreResult<Vec<LikeRecord>>;
    /// Removes the oldest like matching the pair, if any. Unliking a post
    /// that was never liked is not an error.
    fn delete(&mut self, user_id: i64, post_id: i64) -> StoreResult<()>;
}

pub struct MemLikeRepository<'t> {
    tables: &'t mut Tables,
}

impl<'t> MemLikeRepository<'t> {
    pub fn new(tables: &'t mut Tables) -> Self {
        Self { tables }
    }
}

impl LikeRepository for MemLikeRepository<'_> {
    fn create(&mut self, input: CreateLikeInput) -> StoreResult<LikeRecord> {
        // Duplicate likes from the same user are allowed; callers that want
        // uniqueness delete before re-creating.
        Ok(self.tables.likes.insert_with(|id| LikeRecord {
            id,
            user_id: input.user_id,
            post_id: input.post_id,
            created_at: Utc::now(),
        }))
    }

    fn list_for_post(&self, post_id: i64) -> StoreResult<Vec<LikeRecord>> {
        Ok(self
            .tables
            .likes
            .iter()
            .filter(|like| like.post_id == post_id)
            .cloned()
            .collect())
    }

    fn delete(&mut self, user_id: i64, post_id: i64) -> StoreResult<()> {
        let found = self
            .tables
            .likes
            .iter()
            .find(|like| like.user_id == user_id && like.post_id == post_id)
            .map(|like| like.id);
        if let Some(id) = found {
            self.tables.likes.remove(id);
        }
        Ok(())
    }
}
