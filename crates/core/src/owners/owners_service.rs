use log::debug;
use std::sync::Arc;

use super::owners_model::{NewOwner, Owner};
use super::owners_traits::{OwnerRepositoryTrait, OwnerServiceTrait};
use crate::errors::Result;

/// Service for managing owners.
pub struct OwnerService {
    repository: Arc<dyn OwnerRepositoryTrait>,
}

impl OwnerService {
    /// Creates a new OwnerService instance
    pub fn new(repository: Arc<dyn OwnerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl OwnerServiceTrait for OwnerService {
    /// Creates a new owner after validating the input
    async fn create_owner(&self, new_owner: NewOwner) -> Result<Owner> {
        new_owner.validate()?;
        debug!("Creating owner {}", new_owner.name);
        self.repository.create(new_owner).await
    }

    /// Retrieves an owner by its ID
    fn get_owner(&self, owner_id: &str) -> Result<Owner> {
        self.repository.get_by_id(owner_id)
    }

    /// Lists all owners
    fn list_owners(&self) -> Result<Vec<Owner>> {
        self.repository.list()
    }

    /// Deletes an owner by its ID
    async fn delete_owner(&self, owner_id: &str) -> Result<()> {
        self.repository.delete(owner_id).await?;
        Ok(())
    }
}
