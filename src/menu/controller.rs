use super::model::{ContainerSpec, Item};
use super::planner::{plan_collapsed, plan_expanded};
use super::sector::resolve_sector;
use super::{ContainerId, Href, MenuError, MenuHandle};
use crate::animation::{AnimationRequest, Animator, CompletionToken, ElementRef};
use crate::config::MenuOptions;
use crate::geometry::{Point, Size};
use std::num::NonZeroUsize;

/// An item picked by a click on the expanded ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub index: usize,
    pub label: String,
    /// Set only when anchor redirection is enabled and the item has a target.
    pub navigate: Option<Href>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverUpdate {
    pub hovered: Option<usize>,
    pub changed: bool,
}

impl HoverUpdate {
    pub fn new(hovered: Option<usize>, changed: bool) -> Self {
        Self { hovered, changed }
    }
}

#[derive(Debug, Clone, Copy)]
struct CollapseBatch {
    id: u64,
    remaining: usize,
}

/// State and event handling of one ring menu attached to one container.
pub struct RingMenu {
    handle: MenuHandle,
    container: ContainerId,
    origin: Point,
    size: Size,
    options: MenuOptions,
    items: Vec<Item>,
    item_count: NonZeroUsize,
    expanded: bool,
    tracking: bool,
    selected: Option<usize>,
    pending_collapse: Option<CollapseBatch>,
    next_batch: u64,
}

impl RingMenu {
    /// Enumerates the container's items once and hides them. Fails when the
    /// selector matches nothing, since the ring has no sectors to resolve.
    pub fn attach(
        handle: MenuHandle,
        container: &ContainerSpec,
        options: MenuOptions,
    ) -> Result<Self, MenuError> {
        options.validate()?;

        let items: Vec<Item> = container
            .select(&options.item_selector)
            .map(|element| {
                let resting = plan_collapsed(options.collapse_policy, container.size, element.size);
                Item::from_element(element, resting)
            })
            .collect();

        let item_count = NonZeroUsize::new(items.len()).ok_or_else(|| MenuError::NoItems {
            container: container.id.clone(),
            selector: options.item_selector.to_string(),
        })?;

        let mut menu = Self {
            handle,
            container: container.id.clone(),
            origin: container.origin,
            size: container.size,
            options,
            items,
            item_count,
            expanded: false,
            tracking: false,
            selected: None,
            pending_collapse: None,
            next_batch: 0,
        };
        menu.restore_visibility();

        log::debug!(
            "{} attached to '{}' with {} items",
            menu.handle,
            menu.container,
            menu.item_count
        );
        Ok(menu)
    }

    pub fn handle(&self) -> MenuHandle {
        self.handle
    }

    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn is_collapsing(&self) -> bool {
        self.pending_collapse.is_some()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.items.iter().position(|item| item.hovered)
    }

    pub fn sector_at(&self, pointer: Point) -> usize {
        resolve_sector(
            pointer,
            self.origin,
            self.size,
            self.item_count,
            self.options.angular_offset,
        )
    }

    /// Host click on the container. While expanded the item under the pointer
    /// is selected first; either way the ring then toggles.
    pub fn click<A: Animator + ?Sized>(
        &mut self,
        pointer: Option<Point>,
        animator: &mut A,
    ) -> Option<Activation> {
        let Some(pointer) = pointer else {
            log::debug!("{}: click without coordinates ignored", self.handle);
            return None;
        };

        let activation = self.expanded.then(|| self.select_at(pointer));
        self.toggle(animator);
        activation
    }

    pub fn toggle<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        self.expanded = !self.expanded;
        if self.expanded {
            self.expand(animator);
        } else {
            self.collapse(animator);
        }
    }

    pub fn pointer_enter(&mut self) {
        self.tracking = true;
    }

    pub fn pointer_leave(&mut self) {
        self.tracking = false;
        self.clear_hover();
    }

    pub fn pointer_move(&mut self, pointer: Option<Point>) -> HoverUpdate {
        let Some(pointer) = pointer else {
            return HoverUpdate::new(self.hovered(), false);
        };

        if !self.tracking || !self.expanded {
            return self.clear_hover();
        }

        let index = self.sector_at(pointer);
        let changed = self.hovered() != Some(index);
        for (i, item) in self.items.iter_mut().enumerate() {
            item.hovered = i == index;
        }
        HoverUpdate::new(Some(index), changed)
    }

    /// Reports one finished collapse animation. Returns `true` when this was
    /// the last one of the current batch and visibility was restored.
    pub fn animation_complete(&mut self, token: CompletionToken) -> bool {
        if token.menu != self.handle {
            log::warn!("{}: completion for {} ignored", self.handle, token.menu);
            return false;
        }

        match self.pending_collapse.as_mut() {
            Some(batch) if batch.id == token.batch => {
                batch.remaining = batch.remaining.saturating_sub(1);
                if batch.remaining > 0 {
                    return false;
                }
                self.pending_collapse = None;
                self.restore_visibility();
                log::debug!("{}: collapse batch {} finished", self.handle, token.batch);
                true
            }
            _ => {
                log::debug!(
                    "{}: completion of superseded batch {} ignored",
                    self.handle,
                    token.batch
                );
                false
            }
        }
    }

    fn select_at(&mut self, pointer: Point) -> Activation {
        let index = self.sector_at(pointer);
        self.selected = Some(index);

        let item = &self.items[index];
        let navigate = if self.options.use_anchor_redirect {
            item.href.clone()
        } else {
            None
        };
        log::info!("{}: selected item {} ('{}')", self.handle, index, item.label);

        Activation {
            index,
            label: item.label.clone(),
            navigate,
        }
    }

    fn expand<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        if let Some(batch) = self.pending_collapse.take() {
            log::debug!(
                "{}: expanding before collapse batch {} finished",
                self.handle,
                batch.id
            );
        }

        let center = self.size.half();
        for (index, item) in self.items.iter_mut().enumerate() {
            let to = plan_expanded(
                index,
                self.item_count,
                self.options.radius,
                self.options.angular_offset,
                item.size,
                center,
            );
            item.visible = true;
            animator.animate(AnimationRequest {
                element: ElementRef::new(self.handle, index),
                to,
                duration: self.options.duration,
                on_complete: None,
            });
        }
        log::debug!("{}: expanded", self.handle);
    }

    fn collapse<A: Animator + ?Sized>(&mut self, animator: &mut A) {
        self.clear_hover();
        let id = self.next_batch;
        self.next_batch += 1;
        self.pending_collapse = Some(CollapseBatch {
            id,
            remaining: self.items.len(),
        });

        let token = CompletionToken {
            menu: self.handle,
            batch: id,
        };
        for (index, item) in self.items.iter().enumerate() {
            animator.animate(AnimationRequest {
                element: ElementRef::new(self.handle, index),
                to: item.resting,
                duration: self.options.duration,
                on_complete: Some(token),
            });
        }
        log::debug!("{}: collapsing (batch {})", self.handle, id);
    }

    fn clear_hover(&mut self) -> HoverUpdate {
        let changed = self.items.iter().any(|item| item.hovered);
        for item in &mut self.items {
            item.hovered = false;
        }
        HoverUpdate::new(None, changed)
    }

    fn restore_visibility(&mut self) {
        let shown = self
            .selected
            .or(self.options.show_first_item_on_load.then_some(0));
        for (i, item) in self.items.iter_mut().enumerate() {
            item.visible = shown == Some(i);
        }
    }
}
