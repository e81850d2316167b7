//! This crate provides a client for a task-management REST service.
//!
//! It provides a plain REST client in the [`client`] module, that can be used as a
//! stand-alone module.
//!
//! Because a UI cannot afford a network round trip on every read, this crate also provides
//! a [`TaskStore`]: a local mirror of one user's task collection. The store applies
//! create/update/toggle/delete with the backend's confirmation rules, derives the views a
//! front end displays (unfinished/completed partitions, paginated slices), and reports
//! every operation outcome on a single dismissible notice channel. \
//! The [`TaskSource`](traits::TaskSource) trait is the seam between the two: the store can
//! run against the real [`Client`](client::Client), or against the in-memory source from
//! the [`memory`] module in tests and offline demos.

pub mod traits;

mod task;
pub use task::{Priority, Task, TaskId, UserId};
mod draft;
pub use draft::{TaskCreate, TaskDraft, TaskEdit, TaskPatch};
mod session;
pub use session::Session;
pub mod store;
pub use store::TaskStore;

pub mod client;
pub mod dashboard;

pub mod memory;
pub mod mock_behaviour;

pub mod config;
