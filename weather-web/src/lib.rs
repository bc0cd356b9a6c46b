//! Single-page weather lookup server.
//!
//! `GET /?q=<city>` resolves the city, fetches current conditions once and
//! renders them; failures render an error panel with a retry link.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;
pub mod view;

pub use error::PageError;
pub use state::AppState;
