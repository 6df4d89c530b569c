use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use thiserror::Error;

pub mod controller;
pub mod model;
pub mod planner;
pub mod sector;

pub use controller::{Activation, HoverUpdate, RingMenu};
pub use model::{ContainerSpec, ElementSpec, Item};
pub use planner::{plan_collapsed, plan_expanded, plan_resting};
pub use sector::resolve_sector;

pub const FULL_TURN: f64 = TAU;

/// Wraps an angle into `[0, FULL_TURN)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // a tiny negative angle plus a full turn rounds up to exactly FULL_TURN
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Stable handle of an attached menu instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("menu#{_0}")]
pub struct MenuHandle(u64);

/// Identity of the host container a menu is attached to.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ContainerId(String);

crate::impl_string_newtype!(ContainerId);

/// Resource an item navigates to when anchor redirection is enabled.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Href(String);

crate::impl_string_newtype!(Href);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    #[error("Container '{container}' has no children matching '{selector}'")]
    NoItems {
        container: ContainerId,
        selector: String,
    },
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("Unknown menu {0}")]
    UnknownMenu(MenuHandle),
    #[error("A menu is already attached to container '{0}'")]
    DuplicateContainer(ContainerId),
}
