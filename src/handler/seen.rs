use std::collections::HashSet;

use crate::model::NormalizedTransfer;

/// Ids already handed to the renderer during this session. Owned by the
/// poller, cleared whenever the watched token changes.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    ids: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the transfers whose id was not seen before and records them.
    /// Order is preserved and repeats inside `transfers` are dropped too.
    pub fn admit(
        &mut self,
        transfers: Vec<NormalizedTransfer>,
    ) -> Vec<NormalizedTransfer> {
        transfers.into_iter().filter(|t| self.ids.insert(t.id.clone())).collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
