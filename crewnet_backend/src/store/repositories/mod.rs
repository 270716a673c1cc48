pub mod comments;
pub mod connections;
pub mod likes;
pub mod posts;
pub mod users;

pub use comments::CommentRepository;
pub use connections::ConnectionRepository;
pub use likes::LikeRepository;
pub use posts::PostRepository;
pub use users::UserRepository;

use super::Tables;

/// Accessor bundle handed to [`crate::store::Store::with_repositories`]
/// closures. Each accessor reborrows the tables, so hold at most one
/// repository at a time.
pub struct MemRepositories<'t> {
    tables: &'t mut Tables,
}

impl<'t> MemRepositories<'t> {
    pub(crate) fn new(tables: &'t mut Tables) -> Self {
        Self { tables }
    }

    pub fn users(&mut self) -> impl UserRepository + '_ {
        users::MemUserRepository::new(self.tables)
    }

    pub fn posts(&mut self) -> impl PostRepository + '_ {
        posts::MemPostRepository::new(self.tables)
    }

    pub fn comments(&mut self) -> impl CommentRepository + '_ {
        comments::MemCommentRepository::new(self.tables)
    }

    pub fn connections(&mut self) -> impl ConnectionRepository + '_ {
        connections::MemConnectionRepository::new(self.tables)
    }

    pub fn likes(&mut self) -> impl LikeRepository + '_ {
        likes::MemLikeRepository::new(self.tables)
    }
}
