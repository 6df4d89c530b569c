pub mod animation;
pub mod config;
pub mod geometry;
pub mod macros;
pub mod menu;
pub mod registry;

pub use animation::{AnimationRequest, Animator, CompletionToken, ElementRef};
pub use config::{CollapsePolicy, ItemSelector, MenuOptions};
pub use geometry::{Point, Size};
pub use menu::{
    Activation, ContainerId, ContainerSpec, ElementSpec, HoverUpdate, Href, Item, MenuError,
    MenuHandle, RingMenu, plan_collapsed, plan_expanded, plan_resting, resolve_sector,
};
pub use registry::MenuRegistry;
