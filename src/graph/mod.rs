//! Microsoft Graph access: the paged application listing and the owners sub-resource.

pub mod client;
pub mod models;

pub use client::GraphClient;
pub use models::{Application, Owner};
