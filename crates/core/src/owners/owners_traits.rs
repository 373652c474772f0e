//! Owner repository and service traits.
//!
//! These traits define the contract for owner operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::owners_model::{NewOwner, Owner};
use crate::errors::Result;

/// Trait defining the contract for Owner repository operations.
#[async_trait]
pub trait OwnerRepositoryTrait: Send + Sync {
    /// Creates a new owner.
    async fn create(&self, new_owner: NewOwner) -> Result<Owner>;

    /// Retrieves an owner by its ID.
    fn get_by_id(&self, owner_id: &str) -> Result<Owner>;

    /// Lists all owners.
    fn list(&self) -> Result<Vec<Owner>>;

    /// Deletes an owner by its ID. Returns the number of deleted records.
    async fn delete(&self, owner_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Owner service operations.
#[async_trait]
pub trait OwnerServiceTrait: Send + Sync {
    /// Creates a new owner with business validation.
    async fn create_owner(&self, new_owner: NewOwner) -> Result<Owner>;

    /// Retrieves an owner by ID.
    fn get_owner(&self, owner_id: &str) -> Result<Owner>;

    /// Lists all owners.
    fn list_owners(&self) -> Result<Vec<Owner>>;

    /// Deletes an owner.
    async fn delete_owner(&self, owner_id: &str) -> Result<()>;
}
