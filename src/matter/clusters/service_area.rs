//! ServiceArea cluster (0x0150) state.

use serde::{Deserialize, Serialize};
use strum::FromRepr;

/// Feature flags for ServiceArea
pub mod features {
    pub const SELECT_WHILE_RUNNING: u32 = 0x01;
    pub const PROGRESS_REPORTING: u32 = 0x02;
    pub const MAPS: u32 = 0x04;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr, Serialize, Deserialize)]
#[repr(u8)]
pub enum SelectAreasStatus {
    Success = 0x00,
    UnsupportedArea = 0x01,
    InvalidInMode = 0x02,
    InvalidSet = 0x03,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, FromRepr, Serialize, Deserialize)]
#[repr(u8)]
pub enum SkipAreaStatus {
    Success = 0x00,
    InvalidAreaList = 0x01,
    InvalidInMode = 0x02,
    InvalidSkippedArea = 0x03,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDescriptor {
    pub location_name: String,
    pub floor_number: Option<i16>,
    pub area_type: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkInfo {
    pub landmark_tag: u8,
    pub relative_position_tag: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaInfo {
    pub location_info: Option<LocationDescriptor>,
    pub landmark_info: Option<LandmarkInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStruct {
    pub area_id: u32,
    pub map_id: Option<u32>,
    pub area_info: AreaInfo,
}

impl AreaStruct {
    /// Named area without a map or landmark.
    pub fn named(area_id: u32, name: impl Into<String>) -> Self {
        Self {
            area_id,
            map_id: None,
            area_info: AreaInfo {
                location_info: Some(LocationDescriptor {
                    location_name: name.into(),
                    floor_number: None,
                    area_type: None,
                }),
                landmark_info: None,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStruct {
    pub map_id: u32,
    pub name: String,
}

cluster_state! {
    pub struct ServiceAreaState(ServiceAreaAttribute) {
        0x0000 => SupportedAreas("supportedAreas") supported_areas: Vec<AreaStruct>,
        0x0001 => SupportedMaps("supportedMaps") supported_maps: Vec<MapStruct>
            where features::MAPS,
        0x0002 => SelectedAreas("selectedAreas") selected_areas: Vec<u32>,
        0x0003 => CurrentArea("currentArea") current_area: Option<u32>,
        /// Epoch seconds
        0x0004 => EstimatedEndTime("estimatedEndTime") estimated_end_time: Option<u32>,
    }
}

impl ServiceAreaState {
    pub fn new(supported_areas: Vec<AreaStruct>) -> Self {
        Self {
            supported_areas,
            ..Self::default()
        }
    }

    pub fn supports_area(&self, area_id: u32) -> bool {
        self.supported_areas.iter().any(|a| a.area_id == area_id)
    }

    /// First id in `areas` that is not a supported area.
    pub fn first_unsupported(&self, areas: &[u32]) -> Option<u32> {
        areas.iter().copied().find(|id| !self.supports_area(*id))
    }
}

impl Default for ServiceAreaState {
    fn default() -> Self {
        Self {
            supported_areas: Vec::new(),
            supported_maps: Vec::new(),
            selected_areas: Vec::new(),
            current_area: None,
            estimated_end_time: None,
        }
    }
}
