/// Selection criteria for choosing source tracks
use crate::error::{Result, TransferError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rule determining which source tracks are candidates for transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    All,
    Genre,
    Artist,
    Songs,
}

impl SelectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionMode::All => "all",
            SelectionMode::Genre => "genre",
            SelectionMode::Artist => "artist",
            SelectionMode::Songs => "songs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionCriteria {
    #[serde(default)]
    pub mode: SelectionMode,
    #[serde(default)]
    pub values: Vec<String>,
}

impl SelectionCriteria {
    pub fn new<I, S>(mode: SelectionMode, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    /// Trimmed, deduplicated selection values.
    ///
    /// Genre and artist values are case-folded; song ids are kept verbatim.
    /// `all` always yields an empty list. Any other mode without a usable
    /// value is rejected.
    pub fn sanitized_values(&self) -> Result<Vec<String>> {
        if self.mode == SelectionMode::All {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let cleaned: Vec<String> = self
            .values
            .iter()
            .map(|value| match self.mode {
                SelectionMode::Songs => value.trim().to_string(),
                _ => fold_value(value),
            })
            .filter(|value| !value.is_empty() && seen.insert(value.clone()))
            .collect();

        if cleaned.is_empty() {
            return Err(TransferError::invalid_criteria(format!(
                "selection mode '{}' requires at least one value",
                self.mode.as_str()
            )));
        }

        Ok(cleaned)
    }
}

/// Trim and case-fold a facet value for comparison
pub fn fold_value(value: &str) -> String {
    value.trim().to_lowercase()
}
