use chrono::Utc;

use crate::store::models::{CreateUserInput, UserRecord};
use crate::store::{StoreResult, Tables};

pub trait UserRepository {
    fn create(&mut self, input: CreateUserInput) -> StoreResult<UserRecord>;
    fn get(&self, id: i64) -> StoreResult<Option<UserRecord>>;
    fn list(&self) -> StoreResult<Vec<UserRecord>>;
}

pub struct MemUserRepository<'t> {
    tables: &'t mut Tables,
}

impl<'t> MemUserRepository<'t> {
    pub fn new(tables: &'t mut Tables) -> Self {
        Self { tables }
    }
}

impl UserRepository for MemUserRepository<'_> {
    fn create(&mut self, input: CreateUserInput) -> StoreResult<UserRecord> {
        Ok(self.tables.users.insert_with(|id| UserRecord {
            id,
            name: input.name,
            headline: input.headline,
            bio: input.bio,
            location: input.location,
            avatar: input.avatar,
            cover_image: input.cover_image,
            created_at: Utc::now(),
        }))
    }

    fn get(&self, id: i64) -> StoreResult<Option<UserRecord>> {
        Ok(self.tables.users.get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<UserRecord>> {
        Ok(self.tables.users.iter().cloned().collect())
    }
}
