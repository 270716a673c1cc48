use chrono::Utc;

use crate::store::models::{CreatePostInput, PostRecord};
use crate::store::{StoreResult, Tables};

pub trait PostRepository {
    fn create(&mut self, input: CreatePostInput) -> StoreResult<PostRecord>;
    fn get(&self, id: i64) -> StoreResult<Option<PostRecord>>;
    fn list(&self) -> StoreResult<Vec<PostRecord>>;
    fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<PostRecord>>;
}

pub struct MemPostRepository<'t> {
    tables: &'t mut Tables,
}

impl<'t> MemPostRepository<'t> {
    pub fn new(tables: &'t mut Tables) -> Self {
        Self { tables }
    }
}

impl PostRepository for MemPostRepository<'_> {
    fn create(&mut self, input: CreatePostInput) -> StoreResult<PostRecord> {
        // Author ids are taken at face value; the store does not enforce
        // referential integrity between tables.
        Ok(self.tables.posts.insert_with(|id| PostRecord {
            id,
            user_id: input.user_id,
            content: input.content,
            created_at: Utc::now(),
        }))
    }

    fn get(&self, id: i64) -> StoreResult<Option<PostRecord>> {
        Ok(self.tables.posts.get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<PostRecord>> {
        Ok(self.tables.posts.iter().cloned().collect())
    }

    fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<PostRecord>> {
        Ok(self
            .tables
            .posts
            .iter()
            .filter(|post| post.user_id == user_id)
            .cloned()
            .collect())
    }
}
