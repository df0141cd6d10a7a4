use crate::utils::constants::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Binary tsunami indicator. Absence is modelled as `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TsunamiFlag {
    No = 0,
    Yes = 1,
}

impl TsunamiFlag {
    pub const ALL: [TsunamiFlag; 2] = [TsunamiFlag::No, TsunamiFlag::Yes];

    /// Numeric encodings count as a tsunami when strictly positive.
    pub fn from_positive(value: f64) -> Self {
        if value > 0.0 {
            TsunamiFlag::Yes
        } else {
            TsunamiFlag::No
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            TsunamiFlag::No => "0 = No Tsunami",
            TsunamiFlag::Yes => "1 = Tsunami",
        }
    }
}

impl From<TsunamiFlag> for u8 {
    fn from(flag: TsunamiFlag) -> Self {
        flag.as_u8()
    }
}

impl TryFrom<u8> for TsunamiFlag {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TsunamiFlag::No),
            1 => Ok(TsunamiFlag::Yes),
            other => Err(format!("invalid tsunami flag: {}", other)),
        }
    }
}

impl fmt::Display for TsunamiFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A normalized event row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanRow {
    pub magnitude: Option<f64>,
    pub depth: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tsunami_flag: Option<TsunamiFlag>,
}

impl CleanRow {
    pub fn new(magnitude: f64, depth: f64, tsunami_flag: TsunamiFlag) -> Self {
        Self {
            magnitude: Some(magnitude),
            depth: Some(depth),
            latitude: None,
            longitude: None,
            tsunami_flag: Some(tsunami_flag),
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Magnitude, depth and tsunami flag are all present
    pub fn is_complete(&self) -> bool {
        self.magnitude.is_some() && self.depth.is_some() && self.tsunami_flag.is_some()
    }

    pub fn is_tsunami(&self) -> bool {
        self.tsunami_flag == Some(TsunamiFlag::Yes)
    }

    pub fn geo_point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = MIN_LAT, max = MAX_LAT))]
    pub latitude: f64,

    #[validate(range(min = MIN_LON, max = MAX_LON))]
    pub longitude: f64,
}
