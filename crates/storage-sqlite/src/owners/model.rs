//! Database model for owners.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use kabutrack_core::owners::{NewOwner, Owner};

/// Database model for owners
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::owners)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OwnerDB {
    pub id: String,
    pub name: String,
}

impl From<OwnerDB> for Owner {
    fn from(db: OwnerDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
        }
    }
}

impl From<NewOwner> for OwnerDB {
    fn from(domain: NewOwner) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            name: domain.name,
        }
    }
}
