use serde::{Deserialize, Serialize};

/// A department owning a slice of the roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Short slug used by features to reference the department.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub description: String,
}

impl Department {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: String::new(),
            description: String::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>, description: impl Into<String>) -> Self {
        self.role = role.into();
        self.description = description.into();
        self
    }
}
