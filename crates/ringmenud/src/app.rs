use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::tween::Stage;
use ringmenu::{ContainerId, ElementRef, Href, MenuRegistry, RingMenu};

/// Owns every attached menu and applies host events to them in order.
pub struct App<S: Stage> {
    registry: MenuRegistry,
    stage: S,
}

impl<S: Stage> App<S> {
    pub fn new(config: &Config, stage: S) -> Self {
        let mut app = Self {
            registry: MenuRegistry::new(),
            stage,
        };
        app.attach_all(config);
        app
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    /// Applies one event. Returns a navigation target when a click selected
    /// an item that redirects.
    pub fn update(&mut self, event: AppEvent) -> Option<Href> {
        match event {
            AppEvent::Toggle(id) => {
                self.with_menu(&id, |menu, stage| menu.toggle(stage));
                None
            }
            AppEvent::Click(id, pointer) => self
                .with_menu(&id, |menu, stage| menu.click(pointer, stage))
                .flatten()
                .and_then(|activation| {
                    log::info!("'{}': activated '{}'", id, activation.label);
                    activation.navigate
                }),
            AppEvent::Enter(id) => {
                self.with_menu(&id, |menu, _| menu.pointer_enter());
                None
            }
            AppEvent::Leave(id) => {
                self.with_menu(&id, |menu, _| menu.pointer_leave());
                None
            }
            AppEvent::Move(id, pointer) => {
                if let Some(update) = self.with_menu(&id, |menu, _| menu.pointer_move(pointer))
                    && update.changed
                {
                    log::debug!("'{}': hovering {:?}", id, update.hovered);
                }
                None
            }
            AppEvent::Status(id, reply) => {
                let line = match self.status(&id) {
                    Some(status) => {
                        log::info!("{}", status);
                        status
                    }
                    None => {
                        log::warn!("Unknown menu '{}'", id);
                        format!("Unknown menu '{}'", id)
                    }
                };
                if let Some(reply) = reply
                    && reply.try_send(line).is_err()
                {
                    log::debug!("Nobody waiting for the status of '{}'", id);
                }
                None
            }
            AppEvent::AnimationDone(token) => {
                if let Err(e) = self.registry.complete(token) {
                    log::debug!("Late completion dropped: {}", e);
                }
                None
            }
            AppEvent::ConfigReload => {
                match config::load_config() {
                    Ok(new_config) => {
                        self.reload(&new_config);
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
                None
            }
        }
    }

    /// Detaches every menu and attaches the ones in `config` from scratch.
    pub fn reload(&mut self, config: &Config) {
        for handle in self.registry.handles().collect::<Vec<_>>() {
            self.stage.release(handle);
        }
        self.registry.clear();
        self.attach_all(config);
    }

    pub fn status(&self, id: &ContainerId) -> Option<String> {
        let handle = self.registry.lookup(id)?;
        let menu = self.registry.get(handle).ok()?;
        Some(describe(menu))
    }

    fn attach_all(&mut self, config: &Config) {
        for menu_config in &config.menus {
            let container = menu_config.container();
            match self.registry.attach(&container, menu_config.options.clone()) {
                Ok(handle) => {
                    if let Ok(menu) = self.registry.get(handle) {
                        for (index, item) in menu.items().iter().enumerate() {
                            self.stage.place(ElementRef::new(handle, index), item.resting);
                        }
                    }
                    log::info!("Attached '{}' as {}", menu_config.id, handle);
                }
                Err(e) => log::error!("Skipping menu '{}': {}", menu_config.id, e),
            }
        }
    }

    fn with_menu<T>(
        &mut self,
        id: &ContainerId,
        f: impl FnOnce(&mut RingMenu, &mut S) -> T,
    ) -> Option<T> {
        let Some(handle) = self.registry.lookup(id) else {
            log::warn!("Unknown menu '{}'", id);
            return None;
        };
        match self.registry.get_mut(handle) {
            Ok(menu) => Some(f(menu, &mut self.stage)),
            Err(e) => {
                log::error!("{}", e);
                None
            }
        }
    }
}

fn describe(menu: &RingMenu) -> String {
    let visible: Vec<&str> = menu
        .items()
        .iter()
        .filter(|item| item.visible)
        .map(|item| item.label.as_str())
        .collect();

    format!(
        "'{}' ({}): {}{}, selected {}, hovered {}, visible [{}], collapses to {}",
        menu.container(),
        menu.handle(),
        if menu.is_expanded() { "expanded" } else { "collapsed" },
        if menu.is_tracking() { ", tracking" } else { "" },
        menu.selected_item()
            .map(|item| item.label.as_str())
            .unwrap_or("none"),
        menu.hovered()
            .and_then(|i| menu.items().get(i))
            .map(|item| item.label.as_str())
            .unwrap_or("none"),
        visible.join(", "),
        menu.options().collapse_policy,
    )
}
