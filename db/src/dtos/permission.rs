use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PermissionInput {
    /// Label for the permission (e.g. "AI").
    pub name: String,
    /// Endpoint this permission controls (e.g. "/ai").
    pub endpoint: String,
    pub description: String,
}
