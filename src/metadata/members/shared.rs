use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::{
    metadata::{declid::DeclId, member::MemberRc, members::MemberRegistry},
    Error, Result,
};

/// Serialized, cloneable surface over one [`MemberRegistry`].
///
/// Every operation runs under a reentrant lock held for the whole call, so
/// concurrent callers see each operation complete atomically — there is no visible
/// partial materialization. The lock being reentrant lets a caller that already
/// holds it (inside [`SharedMemberRegistry::with`], say) issue further calls on the
/// same thread without deadlocking; actual nested *mutation* is rejected with
/// [`Error::Lock`] instead, since two overlapping mutable views of the registry can
/// never be sound.
///
/// Backing-source work happens while only this lock is held. A source
/// implementation must therefore not call back into the same shared registry.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use declscope::prelude::*;
///
/// let source = Arc::new(TableSource::new());
/// let id = source.add_global("g_mode", MemberPayload::default());
///
/// let registry = SharedMemberRegistry::new(MemberRegistry::new(source, None));
/// registry.load()?;
///
/// let handle = registry.get(id)?.unwrap();
/// assert_eq!(handle.name(), "g_mode");
/// # Ok::<(), declscope::Error>(())
/// ```
#[derive(Clone)]
pub struct SharedMemberRegistry {
    inner: Arc<ReentrantMutex<RefCell<MemberRegistry>>>,
}

impl SharedMemberRegistry {
    /// Wraps a registry for shared use.
    #[must_use]
    pub fn new(registry: MemberRegistry) -> Self {
        SharedMemberRegistry {
            inner: Arc::new(ReentrantMutex::new(RefCell::new(registry))),
        }
    }

    /// Runs `f` with exclusive access to the registry, under the lock.
    ///
    /// # Errors
    /// [`Error::Lock`] when called while another `with` on the same thread is still
    /// borrowing the registry.
    pub fn with<R>(&self, f: impl FnOnce(&mut MemberRegistry) -> R) -> Result<R> {
        let guard = self.inner.lock();
        let mut registry = guard.try_borrow_mut().map_err(|_| Error::Lock)?;
        Ok(f(&mut registry))
    }

    /// Populates the registry from its source. See [`MemberRegistry::load`].
    ///
    /// # Errors
    /// [`Error::Lock`] on nested mutation from the same thread.
    pub fn load(&self) -> Result<()> {
        self.with(MemberRegistry::load)
    }

    /// Handle for a declaration id. See [`MemberRegistry::get`].
    ///
    /// # Errors
    /// [`Error::Lock`] on nested mutation from the same thread.
    pub fn get(&self, id: DeclId) -> Result<Option<MemberRc>> {
        self.with(|r| r.get(id))
    }

    /// Handle for a member name. See [`MemberRegistry::find_by_name`].
    ///
    /// # Errors
    /// [`Error::Lock`] on nested mutation from the same thread.
    pub fn find_by_name(&self, name: &str) -> Result<Option<MemberRc>> {
        self.with(|r| r.find_by_name(name))
    }

    /// Parks every active handle. See [`MemberRegistry::unload`].
    ///
    /// # Errors
    /// [`Error::Lock`] on nested mutation from the same thread.
    pub fn unload(&self) -> Result<()> {
        self.with(MemberRegistry::unload)
    }

    /// Empties the registry. See [`MemberRegistry::clear`].
    ///
    /// # Errors
    /// [`Error::Lock`] on nested mutation from the same thread.
    pub fn clear(&self) -> Result<()> {
        self.with(MemberRegistry::clear)
    }

    /// Active handle count.
    ///
    /// # Errors
    /// [`Error::Lock`] on nested mutation from the same thread.
    pub fn len(&self) -> Result<usize> {
        self.with(|r| r.len())
    }

    /// True when no handle is active.
    ///
    /// # Errors
    /// [`Error::Lock`] on nested mutation from the same thread.
    pub fn is_empty(&self) -> Result<bool> {
        self.with(|r| r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::member::MemberPayload;
    use crate::metadata::source::TableSource;

    fn fixture() -> (Arc<TableSource>, SharedMemberRegistry) {
        let source = Arc::new(TableSource::new());
        let registry = SharedMemberRegistry::new(MemberRegistry::new(source.clone(), None));
        (source, registry)
    }

    #[test]
    fn test_shared_load_and_get() {
        let (source, registry) = fixture();
        let id = source.add_global("g", MemberPayload::default());

        registry.load().unwrap();
        assert_eq!(registry.len().unwrap(), 1);

        let handle = registry.get(id).unwrap().unwrap();
        assert_eq!(handle.name(), "g");
    }

    #[test]
    fn test_with_composes_operations() {
        let (source, registry) = fixture();
        source.add_global("g", MemberPayload::default());

        // load + lookup as one atomic unit under the lock
        let name = registry
            .with(|r| {
                r.load();
                r.find_by_name("g").map(|m| m.name().to_string())
            })
            .unwrap()
            .unwrap();
        assert_eq!(name, "g");
    }

    #[test]
    fn test_nested_mutation_is_reported_not_deadlocked() {
        let (_source, registry) = fixture();
        let registry2 = registry.clone();

        let result = registry.with(|_outer| registry2.load());
        assert!(matches!(result.unwrap(), Err(Error::Lock)));
    }

    #[test]
    fn test_shared_across_threads() {
        let (source, registry) = fixture();
        for i in 0..32 {
            source.add_global(&format!("g_{i}"), MemberPayload::default());
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.load().unwrap();
                    registry.find_by_name("g_7").unwrap().unwrap()
                })
            })
            .collect();

        let found: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(registry.len().unwrap(), 32);
        for pair in found.windows(2) {
            assert!(Arc::ptr_eq(&pair[0], &pair[1]));
        }
    }
}
