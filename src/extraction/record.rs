use serde::Serialize;

/// One page from the export, kept only if it belongs to the analyzed policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub description: String,
    pub policy_name: String,
    pub created_at: String,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        policy_name: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            policy_name: policy_name.into(),
            created_at: created_at.into(),
        }
    }
}
