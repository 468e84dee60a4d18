//! Microsoft Graph response models for application registrations and their owners.

use serde::Deserialize;

/// Placeholder for a missing display name or app id.
const NOT_AVAILABLE: &str = "N/A";

/// One page of a Graph collection.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    /// Continuation cursor. Absent on the last page.
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// An application registration from `/applications`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Directory object id, used to address the owners sub-resource.
    #[serde(default)]
    pub id: Option<String>,

    /// Application (client) id.
    #[serde(default)]
    pub app_id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Settings for web platform clients.
    #[serde(default)]
    pub web: Option<WebApplication>,

    /// Settings for single-page application clients.
    #[serde(default)]
    pub spa: Option<SpaApplication>,
}

impl Application {
    /// Display name, or `N/A`.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Application (client) id, or `N/A`.
    pub fn client_id(&self) -> &str {
        self.app_id.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApplication {
    #[serde(default)]
    pub redirect_uris: Option<Vec<String>>,
    #[serde(default)]
    pub home_page_url: Option<String>,
    #[serde(default)]
    pub logout_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaApplication {
    #[serde(default)]
    pub redirect_uris: Option<Vec<String>>,
}

/// An owner directory object (user or service principal).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
}

impl Owner {
    /// Get the best available display name.
    pub fn display_name_or_upn(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.user_principal_name.clone())
            .unwrap_or_else(|| "Unknown Owner".to_string())
    }
}
