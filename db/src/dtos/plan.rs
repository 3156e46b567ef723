use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlanInput {
    /// Unique name of the plan.
    pub name: String,
    pub description: String,
    /// Service usage limits.
    #[serde(default)]
    pub limits: HashMap<String, i64>,
    /// List of allowed services.
    #[serde(default)]
    pub permissions: Vec<String>,
}
