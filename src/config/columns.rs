/// Positions of the fields read from each export row (0-indexed).
///
/// PagerDuty incident exports put the incident number in column 1, the
/// description in column 2, the escalation policy in column 6 and the
/// creation timestamp in column 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: usize,
    pub description: usize,
    pub policy_name: usize,
    pub created_at: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: 1,
            description: 2,
            policy_name: 6,
            created_at: 7,
        }
    }
}

impl ColumnMap {
    /// Minimum number of fields a row must carry.
    pub fn required_width(&self) -> usize {
        [self.id, self.description, self.policy_name, self.created_at]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}
