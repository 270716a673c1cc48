use chrono::Utc;

use crate::store::models::{CommentRecord, CreateCommentInput};
use crate::store::{StoreResult, Tables};

pub trait CommentRepository {
    fn create(&mut self, input: CreateCommentInput) -> StoreResult<CommentRecord>;
    fn list_for_post(&self, post_id: i64) -> StoreResult<Vec<CommentRecord>>;
}

pub struct MemCommentRepository<'t> {
    tables: &'t mut Tables,
}

impl<'t> MemCommentRepository<'t> {
    pub fn new(tables: &'t mut Tables) -> Self {
        Self { tables }
    }
}

impl CommentRepository for MemCommentRepository<'_> {
    fn create(&mut self, input: CreateCommentInput) -> StoreResult<CommentRecord> {
        Ok(self.tables.comments.insert_with(|id| CommentRecord {
            id,
            post_id: input.post_id,
            user_id: input.user_id,
            content: input.content,
            created_at: Utc::now(),
        }))
    }

    fn list_for_post(&self, post_id: i64) -> StoreResult<Vec<CommentRecord>> {
        Ok(self
            .tables
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn comment_on(post_id: i64, content: &str) -> CreateCommentInput {
        CreateCommentInput {
            post_id,
            user_id: 1,
            content: content.to_string(),
        }
    }

    #[test]
    fn list_for_post_filters_and_keeps_order() {
        let store = Store::new();
        let comments = store
            .with_repositories(|repos| {
                let mut comments = repos.comments();
                comments.create(comment_on(1, "nice"))?;
                comments.create(comment_on(2, "elsewhere"))?;
                comments.create(comment_on(1, "agreed"))?;
                comments.list_for_post(1)
            })
            .unwrap();
        let contents: Vec<_> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["nice", "agreed"]);
    }

    #[test]
    fn list_for_post_without_comments_is_empty() {
        let store = Store::new();
        let comments = store
            .with_repositories(|repos| repos.comments().list_for_post(7))
            .unwrap();
        assert!(comments.is_empty());
    }
}
