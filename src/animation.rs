//! The seam between ring menus and whatever engine moves their items.
//!
//! A menu never waits on an animation. It hands the engine a batch of
//! [`AnimationRequest`]s in one pass and, for collapses, expects each request
//! carrying a [`CompletionToken`] to be reported back exactly once through
//! [`crate::MenuRegistry::complete`] (or [`crate::RingMenu::animation_complete`]).

use crate::geometry::Point;
use crate::menu::MenuHandle;
use std::time::Duration;

/// Identifies one item element of one menu instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub menu: MenuHandle,
    pub item: usize,
}

impl ElementRef {
    pub fn new(menu: MenuHandle, item: usize) -> Self {
        Self { menu, item }
    }
}

/// Ties a finished animation back to the collapse batch that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionToken {
    pub menu: MenuHandle,
    pub batch: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub element: ElementRef,
    /// Target offset of the item relative to its container.
    pub to: Point,
    pub duration: Duration,
    pub on_complete: Option<CompletionToken>,
}

pub trait Animator {
    /// Starts moving `request.element` towards `request.to`.
    ///
    /// Must return without waiting for the animation, and must not delay
    /// requests for other elements behind this one.
    fn animate(&mut self, request: AnimationRequest);
}

/// Records requests instead of running them; useful for headless hosts.
impl Animator for Vec<AnimationRequest> {
    fn animate(&mut self, request: AnimationRequest) {
        self.push(request);
    }
}

impl<A: Animator + ?Sized> Animator for &mut A {
    fn animate(&mut self, request: AnimationRequest) {
        (**self).animate(request);
    }
}
