//! Breeder API resources.
//!
//! # Design
//! These mirror the backend's JSON schema but are defined independently of
//! the mock-server crate; the integration tests catch drift. Optional
//! columns are `Option` and skipped when absent so partial updates only send
//! what changed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PuppyStatus {
    #[default]
    Available,
    Reserved,
    Sold,
    #[serde(rename = "Not For Sale")]
    NotForSale,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum LitterStatus {
    #[default]
    Active,
    #[serde(rename = "Available Soon")]
    AvailableSoon,
    #[serde(rename = "All Reserved")]
    AllReserved,
    #[serde(rename = "All Sold")]
    AllSold,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Puppy {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub status: PuppyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub litter_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload for creating a puppy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPuppy {
    pub name: String,
    pub breed: String,
    #[serde(default)]
    pub status: PuppyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub litter_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Partial update; omitted fields stay unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PuppyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PuppyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Litter {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub status: LitterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sire_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppy_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLitter {
    pub name: String,
    pub breed: String,
    #[serde(default)]
    pub status: LitterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sire_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppy_count: Option<u32>,
}

/// Partial litter update; omitted fields stay unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LitterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LitterStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puppy_count: Option<u32>,
}
