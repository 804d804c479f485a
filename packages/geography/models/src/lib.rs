#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State-level geography types.
//!
//! The boundary dataset used by the map identifies each state by its
//! two-digit FIPS code while incident rows carry a postal abbreviation.
//! [`fips`] bridges the two; [`ChoroplethEntry`] is what a map layer
//! consumes after the join.

pub mod fips;

use serde::{Deserialize, Serialize};

/// One shape on the state map together with its incident count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethEntry {
    /// Boundary code as supplied by the geometry dataset.
    pub code: String,
    /// Postal abbreviation, `None` when the code is not in the state table.
    pub label: Option<String>,
    /// Full state name, `None` when the code is not in the state table.
    pub name: Option<String>,
    /// Incidents attributed to the state.
    pub count: u64,
}

impl ChoroplethEntry {
    /// Whether the code resolved to a known state.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.label.is_some()
    }
}

/// All map entries plus the upper bound of the color domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choropleth {
    /// One entry per requested boundary code, in request order.
    pub entries: Vec<ChoroplethEntry>,
    /// Largest count among resolved entries (0 when there are none).
    pub max_count: u64,
}
