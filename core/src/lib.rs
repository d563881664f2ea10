//! Todo client core: resource client and client-side state manager.
//!
//! # Overview
//! Two layers talk to a remote todo service:
//! - The resource client turns list/create/update/delete/clear-completed into
//!   HTTP round-trips. `TodoClient` builds and parses requests without touching
//!   the network; a `Transport` executes them; `HttpTaskResource` glues the two
//!   behind the `TaskResource` trait.
//! - `TodoStore` owns the local task list, the loading flag and the last error,
//!   and applies only server-confirmed results to local state.
//!
//! # Design
//! - Pessimistic updates only; local state never runs ahead of the server.
//! - Every failure is caught at the store boundary and turned into a
//!   user-facing `StoreError`; callers never see transport errors.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod resource;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, Mutation, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{HttpTaskResource, TaskResource};
pub use store::{TodoSnapshot, TodoStore};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CreateTask, Task, TaskId, UpdateTask};
