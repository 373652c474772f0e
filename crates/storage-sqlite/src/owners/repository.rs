use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::owners;
use crate::schema::owners::dsl::*;

use kabutrack_core::errors::{Error, Result};
use kabutrack_core::owners::{NewOwner, Owner, OwnerRepositoryTrait};

use super::model::OwnerDB;

/// Repository for managing owner data in the database
pub struct OwnerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl OwnerRepository {
    /// Creates a new OwnerRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl OwnerRepositoryTrait for OwnerRepository {
    async fn create(&self, new_owner: NewOwner) -> Result<Owner> {
        new_owner.validate()?;

        let mut owner_db: OwnerDB = new_owner.into();
        if owner_db.id.is_empty() {
            owner_db.id = uuid::Uuid::new_v4().to_string();
        }

        self.writer
            .exec(move |conn| {
                diesel::insert_into(owners::table)
                    .values(&owner_db)
                    .execute(conn)
                    .into_core()?;
                Ok(owner_db.into())
            })
            .await
    }

    fn get_by_id(&self, owner_id: &str) -> Result<Owner> {
        let mut conn = get_connection(&self.pool)?;

        let owner = owners
            .select(OwnerDB::as_select())
            .find(owner_id)
            .first::<OwnerDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound("Owner", owner_id.to_string()))?;

        Ok(owner.into())
    }

    fn list(&self) -> Result<Vec<Owner>> {
        let mut conn = get_connection(&self.pool)?;

        let results = owners
            .select(OwnerDB::as_select())
            .order(name.asc())
            .load::<OwnerDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Owner::from).collect())
    }

    async fn delete(&self, owner_id: &str) -> Result<usize> {
        let id_to_delete = owner_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(owners.find(id_to_delete))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
