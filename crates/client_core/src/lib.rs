//! Client for a to-do list server: polls the full list on a fixed cadence,
//! renders it into a [`ListContainer`], and turns form submissions into
//! create / mark-complete / delete requests.

use shared::protocol::ClientRequest;

pub mod config;
pub mod controller;
pub mod error;
pub mod forms;
pub mod poller;
pub mod render;
pub mod transport;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::UiController;
pub use error::ClientError;
pub use forms::{FormData, FormKind, FormSubmission};
pub use poller::{Poller, PollerHandle};
pub use transport::{HttpTodoApi, TodoApi};
pub use view::ListContainer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    ListRendered { count: usize },
    RefreshFailed { reason: String },
    MutationSent { request: ClientRequest },
    MutationFailed { request: ClientRequest, reason: String },
    FormRejected { form: String, reason: String },
}

#[cfg(test)]
#[path = "tests/fake_server.rs"]
mod fake_server;
