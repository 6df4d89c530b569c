use crate::menu::{ElementSpec, MenuError};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, DurationMilliSeconds, serde_as};
use std::f64::consts::FRAC_PI_2;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

pub const DEFAULT_ANGULAR_OFFSET: f64 = FRAC_PI_2;
pub const DEFAULT_ITEM_SELECTOR: &str = "li";
pub const DEFAULT_RADIUS: f64 = 100.0;
pub const DEFAULT_DURATION: Duration = Duration::from_millis(350);

/// Where items travel when the ring collapses.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum CollapsePolicy {
    /// Every item returns to a zero offset.
    #[strum(to_string = "origin", serialize = "zero")]
    Origin,
    /// Every item returns to the container's centered resting offset.
    #[default]
    #[strum(to_string = "resting", serialize = "center")]
    Resting,
}

/// Picks which children of a container become ring items.
///
/// Accepts `tag`, `.class`, `tag.class.other` or `*`. Tag names compare
/// case-insensitively, classes exactly.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemSelector(String);

crate::impl_string_newtype!(ItemSelector);

impl Default for ItemSelector {
    fn default() -> Self {
        Self::from(DEFAULT_ITEM_SELECTOR)
    }
}

impl ItemSelector {
    pub fn matches(&self, element: &ElementSpec) -> bool {
        let selector = self.0.trim();
        if selector.is_empty() || selector == "*" {
            return true;
        }

        let mut parts = selector.split('.');
        let tag = parts.next().unwrap_or_default();
        let tag_matches = tag.is_empty() || tag == "*" || tag.eq_ignore_ascii_case(&element.tag);

        tag_matches && parts.all(|class| element.classes.iter().any(|c| c == class))
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    /// Rotation of item 0, in radians counter-clockwise from the positive x axis.
    pub angular_offset: f64,
    pub item_selector: ItemSelector,
    /// Ring radius in pixels.
    pub radius: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub duration: Duration,
    pub use_anchor_redirect: bool,
    pub show_first_item_on_load: bool,
    pub collapse_policy: CollapsePolicy,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            angular_offset: DEFAULT_ANGULAR_OFFSET,
            item_selector: ItemSelector::default(),
            radius: DEFAULT_RADIUS,
            duration: DEFAULT_DURATION,
            use_anchor_redirect: false,
            show_first_item_on_load: false,
            collapse_policy: CollapsePolicy::default(),
        }
    }
}

impl MenuOptions {
    pub fn with_angular_offset(mut self, radians: f64) -> Self {
        self.angular_offset = radians;
        self
    }

    pub fn with_item_selector(mut self, selector: impl Into<String>) -> Self {
        self.item_selector = ItemSelector::new(selector);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_anchor_redirect(mut self, enabled: bool) -> Self {
        self.use_anchor_redirect = enabled;
        self
    }

    pub fn with_first_item_on_load(mut self, enabled: bool) -> Self {
        self.show_first_item_on_load = enabled;
        self
    }

    pub fn with_collapse_policy(mut self, policy: CollapsePolicy) -> Self {
        self.collapse_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), MenuError> {
        if !self.angular_offset.is_finite() {
            return Err(MenuError::InvalidOption {
                name: "angular_offset",
                reason: format!("{} is not a finite angle", self.angular_offset),
            });
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(MenuError::InvalidOption {
                name: "radius",
                reason: format!("{} is not a non-negative length", self.radius),
            });
        }
        Ok(())
    }
}
