use serde::{Deserialize, Serialize};
use setlist_core::{Result, TransferError};

/// Per-call transfer limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferLimits {
    /// Most tracks a single execute call will try to add
    pub max_tracks_per_action: usize,
    /// Track ids sent per `add_tracks` call
    pub add_chunk_size: usize,
    /// Size of the matched/duplicate samples in a preview
    pub preview_sample_size: usize,
    /// Result limit for counterparty search
    pub search_limit: usize,
}

impl Default for TransferLimits {
    fn default() -> Self {
        Self {
            max_tracks_per_action: 500,
            add_chunk_size: 100,
            preview_sample_size: 10,
            search_limit: 12,
        }
    }
}

impl TransferLimits {
    /// Reject limits that would make every transfer a no-op
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_tracks_per_action", self.max_tracks_per_action),
            ("add_chunk_size", self.add_chunk_size),
            ("search_limit", self.search_limit),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(TransferError::invalid_request(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}
