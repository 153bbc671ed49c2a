//! Query interfaces of the catalog.
//!
//! Each module provides a query struct that borrows the [`Database`](crate::connection::Database)
//! (and the [`ReferenceCache`](crate::cache::ReferenceCache) where filters are validated)
//! and exposes methods returning typed `Result<T>` values.

pub mod admin;
pub mod cards;
pub mod enums;
pub mod members;
pub mod sets;
pub mod trivia;

pub use admin::CardAdmin;
pub use cards::{CardQuery, ListCardsParams};
pub use enums::EnumQuery;
pub use members::{ListSetMembersParams, SetMemberQuery, SetSelector};
pub use sets::{ListSetsParams, SetQuery};
pub use trivia::{ListTriviaParams, TriviaQuery};
