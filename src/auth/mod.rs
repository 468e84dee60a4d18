//! Azure AD authentication module.
//!
//! App-only access tokens via the OAuth2 client credentials grant.

pub mod client_credentials;

pub use client_credentials::{AccessToken, ClientCredentialsClient};
