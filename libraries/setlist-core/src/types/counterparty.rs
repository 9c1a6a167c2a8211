/// Counterparty candidates offered to a caller before a transfer
use crate::types::PlaylistRef;
use serde::{Deserialize, Serialize};

/// Where a candidate playlist lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrigin {
    Provider,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartyCandidate {
    /// Canonical identity, see `PlaylistRef::key`
    pub key: String,
    pub label: String,
    pub origin: CandidateOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub reference: PlaylistRef,
}

impl CounterpartyCandidate {
    pub fn new(
        reference: PlaylistRef,
        label: impl Into<String>,
        image_url: Option<String>,
    ) -> Self {
        let origin = match reference {
            PlaylistRef::Provider { .. } => CandidateOrigin::Provider,
            PlaylistRef::Internal { .. } => CandidateOrigin::Internal,
        };
        Self {
            key: reference.key(),
            label: label.into(),
            origin,
            image_url,
            reference,
        }
    }
}
