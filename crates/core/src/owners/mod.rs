//! Owners module - domain models, services, and traits.

mod owners_model;
mod owners_service;
mod owners_traits;

#[cfg(test)]
mod owners_model_tests;

// Re-export the public interface
pub use owners_model::{NewOwner, Owner};
pub use owners_service::OwnerService;
pub use owners_traits::{OwnerRepositoryTrait, OwnerServiceTrait};
