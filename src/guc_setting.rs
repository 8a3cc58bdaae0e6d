use super::*;

/// Type-erased view of a storage cell, as held by the registry.
pub trait GucStorage: Send + Sync + fmt::Debug {
    fn kind(&self) -> GucKind;
    fn bound_name(&self) -> Option<Arc<str>>;
    fn bind(&self, name: &Arc<str>) -> GucResult<()>;
    fn unbind(&self);
    fn load(&self) -> GucValue;
    fn store(&self, value: &GucValue) -> GucResult<()>;
}

/// Process-wide storage cell for one tunable.
///
/// The cell holds the value every session sees until it assigns its own.
/// It is bound to at most one registered tunable for the life of the process;
/// consumers read it through [`GucSession::get`] so that session overrides
/// take effect, or through [`GucSetting::get`] for the process-wide value.
#[derive(Debug)]
pub struct GucSetting<T: GucType> {
    value: RwLock<T>,
    binding: Mutex<Option<Arc<str>>>,
}

impl<T: GucType> GucSetting<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value: const_rwlock(value),
            binding: const_mutex(None),
        }
    }

    pub fn get(&self) -> T {
        *self.value.read()
    }

    /// The fully-qualified name of the tunable this cell is bound to.
    pub fn name(&self) -> Option<Arc<str>> {
        self.binding.lock().clone()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.lock().is_some()
    }

    pub(crate) fn set(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: GucType> GucStorage for GucSetting<T> {
    fn kind(&self) -> GucKind {
        T::KIND
    }

    fn bound_name(&self) -> Option<Arc<str>> {
        self.name()
    }

    fn bind(&self, name: &Arc<str>) -> GucResult<()> {
        let mut binding = self.binding.lock();
        if let Some(bound_to) = binding.as_ref() {
            return Err(GucError::already_bound(name, bound_to));
        }
        *binding = Some(name.clone());
        Ok(())
    }

    fn unbind(&self) {
        *self.binding.lock() = None;
    }

    fn load(&self) -> GucValue {
        self.get().into_guc_value()
    }

    fn store(&self, value: &GucValue) -> GucResult<()> {
        let Some(v) = T::from_guc_value(value) else {
            let name = self.name().unwrap_or_else(|| Arc::from("<unbound>"));
            return Err(GucError::type_mismatch(name, T::KIND, value.kind()));
        };
        self.set(v);
        Ok(())
    }
}
