use super::{ContainerId, Href};
use crate::config::ItemSelector;
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ITEM_TAG: &str = "li";
pub const DEFAULT_ITEM_SIZE: Size = Size {
    width: 48.0,
    height: 48.0,
};

fn default_tag() -> String {
    DEFAULT_ITEM_TAG.to_string()
}

fn default_item_size() -> Size {
    DEFAULT_ITEM_SIZE
}

/// The parts of a host element the ring needs to know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub href: Option<Href>,
    #[serde(default = "default_item_size")]
    pub size: Size,
}

impl ElementSpec {
    pub fn item(label: impl Into<String>) -> Self {
        Self {
            tag: default_tag(),
            classes: Vec::new(),
            label: label.into(),
            href: None,
            size: DEFAULT_ITEM_SIZE,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(Href::new(href));
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }
}

/// A host container: its page geometry and children in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub id: ContainerId,
    pub origin: Point,
    pub size: Size,
    pub children: Vec<ElementSpec>,
}

impl ContainerSpec {
    pub fn select<'a>(
        &'a self,
        selector: &'a ItemSelector,
    ) -> impl Iterator<Item = &'a ElementSpec> + 'a {
        self.children.iter().filter(move |child| selector.matches(child))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub label: String,
    pub href: Option<Href>,
    pub size: Size,
    /// Where the item rests while the ring is collapsed.
    pub resting: Point,
    pub visible: bool,
    pub hovered: bool,
}

impl Item {
    pub fn from_element(element: &ElementSpec, resting: Point) -> Self {
        Self {
            label: element.label.clone(),
            href: element.href.clone(),
            size: element.size,
            resting,
            visible: false,
            hovered: false,
        }
    }
}
