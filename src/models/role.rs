use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::constants::{
    DEPTH_CANDIDATES, LATITUDE_CANDIDATES, LONGITUDE_CANDIDATES, MAGNITUDE_CANDIDATES,
    TSUNAMI_CANDIDATES,
};

/// Semantic field the pipeline tries to locate among raw columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Magnitude,
    Depth,
    Latitude,
    Longitude,
    TsunamiIndicator,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Magnitude,
        Role::Depth,
        Role::Latitude,
        Role::Longitude,
        Role::TsunamiIndicator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Magnitude => "magnitude",
            Role::Depth => "depth",
            Role::Latitude => "latitude",
            Role::Longitude => "longitude",
            Role::TsunamiIndicator => "tsunami_indicator",
        }
    }

    /// Roles a row must carry to survive filtering
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Role::Magnitude | Role::Depth | Role::TsunamiIndicator
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered candidate substrings per role, tried in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTable {
    pub magnitude: Vec<String>,
    pub depth: Vec<String>,
    pub latitude: Vec<String>,
    pub longitude: Vec<String>,
    pub tsunami_indicator: Vec<String>,
}

impl CandidateTable {
    pub fn candidates(&self, role: Role) -> &[String] {
        match role {
            Role::Magnitude => &self.magnitude,
            Role::Depth => &self.depth,
            Role::Latitude => &self.latitude,
            Role::Longitude => &self.longitude,
            Role::TsunamiIndicator => &self.tsunami_indicator,
        }
    }

    pub fn with_candidates(mut self, role: Role, candidates: &[&str]) -> Self {
        let list: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
        match role {
            Role::Magnitude => self.magnitude = list,
            Role::Depth => self.depth = list,
            Role::Latitude => self.latitude = list,
            Role::Longitude => self.longitude = list,
            Role::TsunamiIndicator => self.tsunami_indicator = list,
        }
        self
    }
}

impl Default for CandidateTable {
    fn default() -> Self {
        let owned = |list: &[&str]| -> Vec<String> { list.iter().map(|c| c.to_string()).collect() };
        Self {
            magnitude: owned(MAGNITUDE_CANDIDATES),
            depth: owned(DEPTH_CANDIDATES),
            latitude: owned(LATITUDE_CANDIDATES),
            longitude: owned(LONGITUDE_CANDIDATES),
            tsunami_indicator: owned(TSUNAMI_CANDIDATES),
        }
    }
}

/// Which normalized column (if any) plays each role. Built once by the
/// resolver and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    magnitude: Option<String>,
    depth: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    tsunami_indicator: Option<String>,
}

impl RoleAssignment {
    pub(crate) fn from_fn<F>(mut column_for: F) -> Self
    where
        F: FnMut(Role) -> Option<String>,
    {
        Self {
            magnitude: column_for(Role::Magnitude),
            depth: column_for(Role::Depth),
            latitude: column_for(Role::Latitude),
            longitude: column_for(Role::Longitude),
            tsunami_indicator: column_for(Role::TsunamiIndicator),
        }
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Magnitude => self.magnitude.as_deref(),
            Role::Depth => self.depth.as_deref(),
            Role::Latitude => self.latitude.as_deref(),
            Role::Longitude => self.longitude.as_deref(),
            Role::TsunamiIndicator => self.tsunami_indicator.as_deref(),
        }
    }

    pub fn is_assigned(&self, role: Role) -> bool {
        self.get(role).is_some()
    }

    pub fn unassigned_required(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| role.is_required() && !self.is_assigned(*role))
            .collect()
    }

    pub fn has_coordinates(&self) -> bool {
        self.is_assigned(Role::Latitude) && self.is_assigned(Role::Longitude)
    }

    pub fn summary(&self) -> String {
        Role::ALL
            .iter()
            .map(|role| {
                format!(
                    "{:<18} -> {}",
                    role.as_str(),
                    self.get(*role).unwrap_or("(unassigned)")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
