//! A terminal client for a user-management REST API.
//!
//! The [FormController] binds a user table and a two-mode (create/edit) form to the backend,
//! reached through a [UserGateway], and renders through a [UserView].

mod infrastructure;
mod interface;
mod model;

pub use infrastructure::*;
pub use interface::*;
pub use model::*;
