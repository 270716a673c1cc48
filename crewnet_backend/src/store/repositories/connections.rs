use chrono::Utc;

use crate::store::models::{ConnectionRecord, ConnectionStatus, CreateConnectionInput};
use crate::store::{StoreError, StoreResult, Tables};

pub trait ConnectionRepository {
    fn create(&mut self, input: CreateConnectionInput) -> StoreResult<ConnectionRecord>;
    /// Connections where the user appears on either side of the edge.
    fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<ConnectionRecord>>;
    fn update_status(&mut self, id: i64, status: ConnectionStatus)
        -> StoreResult<ConnectionRecord>;
}

pub struct MemConnectionRepository<'t> {
    tables: &'t mut Tables,
}

impl<'t> MemConnectionRepository<'t> {
    pub fn new(tables: &'t mut Tables) -> Self {
        Self { tables }
    }
}

impl ConnectionRepository for MemConnectionRepository<'_> {
    fn create(&mut self, input: CreateConnectionInput) -> StoreResult<ConnectionRecord> {
        Ok(self.tables.connections.insert_with(|id| ConnectionRecord {
            id,
            user_id: input.user_id,
            connected_user_id: input.connected_user_id,
            status: input.status,
            created_at: Utc::now(),
        }))
    }

    fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<ConnectionRecord>> {
        Ok(self
            .tables
            .connections
            .iter()
            .filter(|conn| conn.user_id == user_id || conn.connected_user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_status(
        &mut self,
        id: i64,
        status: ConnectionStatus,
    ) -> StoreResult<ConnectionRecord> {
        let row = self
            .tables
            .connections
            .get_mut(id)
            .ok_or(StoreError::ConnectionNotFound(id))?;
        row.status = status;
        Ok(row.clone())
    }
}
