use crate::animation::CompletionToken;
use crate::config::MenuOptions;
use crate::menu::{ContainerId, ContainerSpec, MenuError, MenuHandle, RingMenu};
use std::collections::HashMap;

/// Owns every attached ring menu, addressed by handle or by container.
#[derive(Default)]
pub struct MenuRegistry {
    menus: HashMap<MenuHandle, RingMenu>,
    containers: HashMap<ContainerId, MenuHandle>,
    next_handle: u64,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(
        &mut self,
        container: &ContainerSpec,
        options: MenuOptions,
    ) -> Result<MenuHandle, MenuError> {
        if self.containers.contains_key(&container.id) {
            return Err(MenuError::DuplicateContainer(container.id.clone()));
        }

        let handle = MenuHandle::from(self.next_handle);
        let menu = RingMenu::attach(handle, container, options)?;
        self.next_handle += 1;

        self.containers.insert(container.id.clone(), handle);
        self.menus.insert(handle, menu);
        Ok(handle)
    }

    pub fn detach(&mut self, handle: MenuHandle) -> Option<RingMenu> {
        let menu = self.menus.remove(&handle)?;
        self.containers.remove(menu.container());
        log::debug!("{} detached from '{}'", handle, menu.container());
        Some(menu)
    }

    pub fn clear(&mut self) {
        self.menus.clear();
        self.containers.clear();
    }

    pub fn lookup(&self, container: &ContainerId) -> Option<MenuHandle> {
        self.containers.get(container).copied()
    }

    pub fn get(&self, handle: MenuHandle) -> Result<&RingMenu, MenuError> {
        self.menus.get(&handle).ok_or(MenuError::UnknownMenu(handle))
    }

    pub fn get_mut(&mut self, handle: MenuHandle) -> Result<&mut RingMenu, MenuError> {
        self.menus
            .get_mut(&handle)
            .ok_or(MenuError::UnknownMenu(handle))
    }

    /// Routes a finished animation to the menu that issued it.
    pub fn complete(&mut self, token: CompletionToken) -> Result<bool, MenuError> {
        Ok(self.get_mut(token.menu)?.animation_complete(token))
    }

    pub fn handles(&self) -> impl Iterator<Item = MenuHandle> + '_ {
        self.menus.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationRequest;
    use crate::geometry::{Point, Size};
    use crate::menu::ElementSpec;

    fn container(id: &str, count: usize) -> ContainerSpec {
        ContainerSpec {
            id: ContainerId::from(id),
            origin: Point::ORIGIN,
            size: Size::new(200.0, 200.0),
            children: (0..count).map(|i| ElementSpec::item(format!("{i}"))).collect(),
        }
    }

    #[test]
    fn test_attach_and_lookup() {
        let mut registry = MenuRegistry::new();
        let a = registry.attach(&container("a", 3), MenuOptions::default()).unwrap();
        let b = registry.attach(&container("b", 5), MenuOptions::default()).unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup(&ContainerId::from("b")), Some(b));
        assert_eq!(registry.get(b).unwrap().items().len(), 5);
    }

    #[test]
    fn test_attach_rejects_duplicates_and_empty_containers() {
        let mut registry = MenuRegistry::new();
        registry.attach(&container("a", 3), MenuOptions::default()).unwrap();

        assert_eq!(
            registry.attach(&container("a", 2), MenuOptions::default()).err(),
            Some(MenuError::DuplicateContainer(ContainerId::from("a")))
        );
        assert!(matches!(
            registry.attach(&container("empty", 0), MenuOptions::default()),
            Err(MenuError::NoItems { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_detach_frees_container() {
        let mut registry = MenuRegistry::new();
        let handle = registry.attach(&container("a", 3), MenuOptions::default()).unwrap();

        assert!(registry.detach(handle).is_some());
        assert!(registry.is_empty());
        assert_eq!(registry.lookup(&ContainerId::from("a")), None);
        assert_eq!(registry.get(handle).err(), Some(MenuError::UnknownMenu(handle)));
        assert!(registry.attach(&container("a", 3), MenuOptions::default()).is_ok());
    }

    #[test]
    fn test_complete_routes_to_owner() {
        let mut registry = MenuRegistry::new();
        let a = registry.attach(&container("a", 2), MenuOptions::default()).unwrap();
        let b = registry.attach(&container("b", 2), MenuOptions::default()).unwrap();

        let mut requests: Vec<AnimationRequest> = Vec::new();
        for handle in [a, b] {
            let menu = registry.get_mut(handle).unwrap();
            menu.toggle(&mut requests);
            menu.toggle(&mut requests);
        }

        let restored: Vec<bool> = requests
            .iter()
            .filter_map(|r| r.on_complete)
            .map(|token| registry.complete(token).unwrap())
            .collect();
        assert_eq!(restored, vec![false, true, false, true]);
        assert!(!registry.get(a).unwrap().is_collapsing());
        assert!(!registry.get(b).unwrap().is_collapsing());
    }
}
