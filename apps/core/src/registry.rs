//! Explicit mapping from mount targets to live backdrops.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::driver::{Backdrop, DriverState, FrameScheduler, Host};
use crate::error::BackdropError;

type Shared<H, S> = Rc<RefCell<Backdrop<H, S>>>;
type Entries<K, H, S> = RefCell<Vec<(K, Shared<H, S>)>>;

/// One instance per mount target.
///
/// Keys are compared with `PartialEq`, so for DOM elements this is identity.
/// Entries are inserted by [`mount`](Self::mount) and removed by
/// [`BackdropHandle::destroy`].
pub struct BackdropRegistry<K, H: Host, S: FrameScheduler> {
    entries: Rc<Entries<K, H, S>>,
}

impl<K, H: Host, S: FrameScheduler> Default for BackdropRegistry<K, H, S> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<K: PartialEq, H: Host, S: FrameScheduler> BackdropRegistry<K, H, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn get(&self, key: &K) -> Option<BackdropHandle<K, H, S>> {
        self.entries
            .borrow()
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, backdrop)| self.handle(Rc::clone(backdrop)))
    }

    /// Returns the backdrop already mounted on `key`, or builds one with
    /// `create`.
    ///
    /// `key` is `None` when the mount selector resolved to nothing, which is
    /// a configuration error. `mount` only labels that error.
    pub fn mount<F>(
        &self,
        key: Option<K>,
        mount: &str,
        create: F,
    ) -> Result<BackdropHandle<K, H, S>, BackdropError>
    where
        F: FnOnce(&K) -> Result<Shared<H, S>, BackdropError>,
    {
        let Some(key) = key else {
            log::warn!("mount target {mount:?} not found");
            return Err(BackdropError::missing_mount(mount));
        };

        if let Some(existing) = self.get(&key) {
            log::debug!("mount target {mount:?} already has a backdrop");
            return Ok(existing);
        }

        let backdrop = create(&key)?;
        self.entries.borrow_mut().push((key, Rc::clone(&backdrop)));
        Ok(self.handle(backdrop))
    }

    fn handle(&self, inner: Shared<H, S>) -> BackdropHandle<K, H, S> {
        BackdropHandle {
            inner,
            registry: Rc::downgrade(&self.entries),
        }
    }
}

/// Shared control handle for a registered backdrop.
pub struct BackdropHandle<K, H: Host, S: FrameScheduler> {
    inner: Shared<H, S>,
    registry: Weak<Entries<K, H, S>>,
}

impl<K, H: Host, S: FrameScheduler> Clone for BackdropHandle<K, H, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            registry: Weak::clone(&self.registry),
        }
    }
}

impl<K, H: Host, S: FrameScheduler> BackdropHandle<K, H, S> {
    /// Whether both handles control the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn start(&self) {
        self.inner.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.inner.borrow_mut().stop();
    }

    pub fn resize(&self) {
        self.inner.borrow_mut().resize();
    }

    pub fn set_speed(&self, radians_per_second: f64) {
        self.inner.borrow_mut().set_speed(radians_per_second);
    }

    pub fn set_fov_degrees(&self, degrees: f64) {
        self.inner.borrow_mut().set_fov_degrees(degrees);
    }

    /// Tears the instance down and forgets its mount, so the next `mount`
    /// on the same target builds a fresh backdrop.
    pub fn destroy(&self) {
        self.inner.borrow_mut().destroy();
        if let Some(entries) = self.registry.upgrade() {
            entries
                .borrow_mut()
                .retain(|(_, backdrop)| !Rc::ptr_eq(backdrop, &self.inner));
        }
    }

    pub fn state(&self) -> DriverState {
        self.inner.borrow().state()
    }

    pub fn backdrop(&self) -> Ref<'_, Backdrop<H, S>> {
        self.inner.borrow()
    }

    /// Runs the frame callback. Schedulers hold a [`Weak`] from
    /// [`downgrade`](Self::downgrade) and call this when the frame fires.
    pub fn frame(&self, timestamp_ms: f64) {
        self.inner.borrow_mut().frame(timestamp_ms);
    }

    pub fn downgrade(&self) -> Weak<RefCell<Backdrop<H, S>>> {
        Rc::downgrade(&self.inner)
    }
}

/// Remembers one host-side wrapper per live instance, so every mount of the
/// same target hands back the very same wrapper object.
pub struct WrapperCache<K, H: Host, S: FrameScheduler, V> {
    entries: Vec<(BackdropHandle<K, H, S>, V)>,
}

impl<K, H: Host, S: FrameScheduler, V> Default for WrapperCache<K, H, S, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K, H: Host, S: FrameScheduler, V: Clone> WrapperCache<K, H, S, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The wrapper cached for `handle`'s instance, built by `wrap` on first
    /// use. Wrappers of destroyed instances are dropped first.
    pub fn get_or_wrap<F>(&mut self, handle: &BackdropHandle<K, H, S>, wrap: F) -> V
    where
        F: FnOnce(BackdropHandle<K, H, S>) -> V,
    {
        self.entries
            .retain(|(cached, _)| cached.state() != DriverState::Destroyed);
        if let Some((_, wrapper)) = self.entries.iter().find(|(cached, _)| cached.ptr_eq(handle)) {
            return wrapper.clone();
        }
        let wrapper = wrap(handle.clone());
        self.entries.push((handle.clone(), wrapper.clone()));
        wrapper
    }

    pub fn forget(&mut self, handle: &BackdropHandle<K, H, S>) {
        self.entries.retain(|(cached, _)| !cached.ptr_eq(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{backdrop_with, ManualScheduler, RecordingHost};

    type Registry = BackdropRegistry<&'static str, RecordingHost, ManualScheduler>;

    fn create(_: &&'static str) -> Result<Shared<RecordingHost, ManualScheduler>, BackdropError> {
        Ok(Rc::new(RefCell::new(backdrop_with(RecordingHost::new(
            640.0, 480.0, 1.0,
        )))))
    }

    #[test]
    fn missing_mount_is_a_configuration_error() {
        let registry = Registry::new();
        let error = registry.mount(None, "#nope", create).err();
        assert_eq!(error, Some(BackdropError::missing_mount("#nope")));
        assert_eq!(
            BackdropError::missing_mount("#nope").to_string(),
            "AIBackdrop: mount element not found."
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn mounting_twice_returns_the_same_instance() {
        let registry = Registry::new();
        let first = registry.mount(Some("body"), "body", create).ok();
        let mut calls = 0;
        let second = registry
            .mount(Some("body"), "body", |key| {
                calls += 1;
                create(key)
            })
            .ok();

        assert_eq!(calls, 0);
        assert_eq!(registry.len(), 1);
        match (first, second) {
            (Some(a), Some(b)) => assert!(a.ptr_eq(&b)),
            _ => panic!("mount failed"),
        }
    }

    #[test]
    fn distinct_mounts_get_distinct_instances() {
        let registry = Registry::new();
        let a = registry.mount(Some("#a"), "#a", create).ok();
        let b = registry.mount(Some("#b"), "#b", create).ok();
        assert_eq!(registry.len(), 2);
        assert!(!a.zip(b).is_some_and(|(a, b)| a.ptr_eq(&b)));
    }

    #[test]
    fn destroy_frees_the_mount_for_a_fresh_instance() {
        let registry = Registry::new();
        let Ok(first) = registry.mount(Some("body"), "body", create) else {
            panic!("mount failed");
        };
        first.start();
        first.destroy();
        assert!(registry.is_empty());
        assert_eq!(first.state(), DriverState::Destroyed);
        assert_eq!(first.backdrop().host().teardowns, 1);

        let Ok(second) = registry.mount(Some("body"), "body", create) else {
            panic!("remount failed");
        };
        assert!(!first.ptr_eq(&second));
        assert_eq!(second.state(), DriverState::Stopped);
    }

    #[test]
    fn destroying_one_leaves_others_registered() {
        let registry = Registry::new();
        let Ok(a) = registry.mount(Some("#a"), "#a", create) else {
            panic!("mount failed");
        };
        let _b = registry.mount(Some("#b"), "#b", create);
        a.destroy();
        a.destroy();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&"#b").is_some());
        assert!(registry.get(&"#a").is_none());
    }

    #[test]
    fn handle_outliving_registry_still_destroys() {
        let registry = Registry::new();
        let Ok(handle) = registry.mount(Some("body"), "body", create) else {
            panic!("mount failed");
        };
        drop(registry);
        handle.destroy();
        assert_eq!(handle.state(), DriverState::Destroyed);
    }

    #[test]
    fn wrappers_are_shared_until_the_instance_is_destroyed() {
        let registry = Registry::new();
        let mut wrappers: WrapperCache<_, _, _, Rc<u32>> = WrapperCache::new();
        let mut built = 0;
        let mut wrap = |_: BackdropHandle<&'static str, RecordingHost, ManualScheduler>| {
            built += 1;
            Rc::new(built)
        };

        let Ok(first) = registry.mount(Some("body"), "body", create) else {
            panic!("mount failed");
        };
        let a = wrappers.get_or_wrap(&first, &mut wrap);
        let Ok(again) = registry.mount(Some("body"), "body", create) else {
            panic!("mount failed");
        };
        let b = wrappers.get_or_wrap(&again, &mut wrap);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(wrappers.len(), 1);

        first.destroy();
        let Ok(fresh) = registry.mount(Some("body"), "body", create) else {
            panic!("remount failed");
        };
        let c = wrappers.get_or_wrap(&fresh, &mut wrap);
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(wrappers.len(), 1);

        wrappers.forget(&fresh);
        assert!(wrappers.is_empty());
    }
}
