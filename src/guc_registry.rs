use super::*;

pub(crate) fn guc_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

#[derive(Debug, Default)]
struct GucRegistryInner {
    gucs: BTreeMap<String, Arc<GucDefinition>>,
}

/// The configuration registry: owns the declared tunables and hands out
/// sessions that read and assign them.
///
/// Lookup is by exact name, ignoring ASCII case. The registry is cheap to
/// clone; clones share the same set of tunables.
#[derive(Debug, Clone, Default)]
pub struct GucRegistry {
    inner: Arc<RwLock<GucRegistryInner>>,
}

impl GucRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a batch of tunables.
    ///
    /// Every declaration made through the definer is installed when the
    /// closure returns `Ok`; if it returns an error nothing is installed and
    /// any storage cells claimed by the batch are released.
    ///
    /// The registry is not locked while the closure runs, so the closure may
    /// read this registry or a clone of it. Names are checked for duplicates
    /// again at install time, and a batch that collides with a tunable
    /// installed in the meantime fails as a whole.
    pub fn with_definitions<F, R>(&self, f: F) -> GucResult<R>
    where
        F: FnOnce(&mut GucDefiner) -> GucResult<R>,
    {
        let existing: BTreeSet<String> = self.inner.read().gucs.keys().cloned().collect();
        let mut definer = GucDefiner::new(existing);
        let out = f(&mut definer)?;

        let mut inner = self.inner.write();
        if let Some(def) = definer
            .pending
            .iter()
            .find(|d| inner.gucs.contains_key(&guc_key(d.name())))
        {
            return Err(GucError::duplicate_parameter(def.name()));
        }
        let pending = definer.into_pending();

        for def in &pending {
            def.storage().store(&def.default_value())?;
        }
        for def in pending {
            inner.gucs.insert(guc_key(def.name()), Arc::new(def));
        }
        Ok(out)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn define_int_guc(
        &self,
        name: &str,
        short_desc: &str,
        long_desc: Option<&str>,
        setting: &'static GucSetting<i32>,
        default: i32,
        min: i32,
        max: i32,
        context: GucContext,
        flags: GucFlags,
        hooks: GucHooks,
    ) -> GucResult<()> {
        self.with_definitions(|definer| {
            definer.define_int_guc(
                name, short_desc, long_desc, setting, default, min, max, context, flags, hooks,
            )
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn define_bool_guc(
        &self,
        name: &str,
        short_desc: &str,
        long_desc: Option<&str>,
        setting: &'static GucSetting<bool>,
        default: bool,
        context: GucContext,
        flags: GucFlags,
        hooks: GucHooks,
    ) -> GucResult<()> {
        self.with_definitions(|definer| {
            definer.define_bool_guc(
                name, short_desc, long_desc, setting, default, context, flags, hooks,
            )
        })
    }

    pub fn lookup(&self, name: &str) -> GucResult<Arc<GucDefinition>> {
        self.inner
            .read()
            .gucs
            .get(&guc_key(name))
            .cloned()
            .ok_or_else(|| GucError::unrecognized_parameter(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().gucs.contains_key(&guc_key(name))
    }

    pub fn len(&self) -> usize {
        self.inner.read().gucs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().gucs.is_empty()
    }

    /// All tunables, hidden ones included, ordered by name.
    pub fn definitions(&self) -> Vec<Arc<GucDefinition>> {
        self.inner.read().gucs.values().cloned().collect()
    }

    /// A commented-out sample configuration listing every tunable not marked
    /// [`GucFlag::NotInSample`], with its default.
    pub fn sample_config(&self) -> String {
        let mut out = String::new();
        for def in self.definitions() {
            if def.flags().contains(GucFlag::NotInSample) {
                continue;
            }
            out += &format!(
                "#{} = {}\t\t# {}\n",
                def.name(),
                def.format_value(&def.default_value()),
                def.short_desc()
            );
        }
        out
    }

    pub fn new_session(&self) -> GucSession {
        GucSession::new(self.clone(), false)
    }

    pub fn new_superuser_session(&self) -> GucSession {
        GucSession::new(self.clone(), true)
    }
}

/// Collects the declarations of one [`GucRegistry::with_definitions`] batch.
pub struct GucDefiner {
    existing: BTreeSet<String>,
    pending: Vec<GucDefinition>,
    committed: bool,
}

impl GucDefiner {
    fn new(existing: BTreeSet<String>) -> Self {
        Self {
            existing,
            pending: Vec::new(),
            committed: false,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn define_int_guc(
        &mut self,
        name: &str,
        short_desc: &str,
        long_desc: Option<&str>,
        setting: &'static GucSetting<i32>,
        default: i32,
        min: i32,
        max: i32,
        context: GucContext,
        flags: GucFlags,
        hooks: GucHooks,
    ) -> GucResult<()> {
        self.define(
            name,
            short_desc,
            long_desc,
            GucBounds::Int { default, min, max },
            context,
            flags,
            hooks,
            setting,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn define_bool_guc(
        &mut self,
        name: &str,
        short_desc: &str,
        long_desc: Option<&str>,
        setting: &'static GucSetting<bool>,
        default: bool,
        context: GucContext,
        flags: GucFlags,
        hooks: GucHooks,
    ) -> GucResult<()> {
        self.define(
            name,
            short_desc,
            long_desc,
            GucBounds::Bool { default },
            context,
            flags,
            hooks,
            setting,
        )
    }

    /// Number of declarations collected so far in this batch.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[allow(clippy::too_many_arguments)]
    fn define(
        &mut self,
        name: &str,
        short_desc: &str,
        long_desc: Option<&str>,
        bounds: GucBounds,
        context: GucContext,
        flags: GucFlags,
        hooks: GucHooks,
        storage: &'static dyn GucStorage,
    ) -> GucResult<()> {
        let key = guc_key(name);
        if self.existing.contains(&key)
            || self.pending.iter().any(|d| guc_key(d.name()) == key)
        {
            return Err(GucError::duplicate_parameter(name));
        }

        let name: Arc<str> = Arc::from(name);
        let def = GucDefinition::new(
            name.clone(),
            short_desc,
            long_desc,
            bounds,
            context,
            flags,
            hooks,
            storage,
        )?;
        storage.bind(&name)?;

        debug!(
            "defined {} {} (default {})",
            def.kind(),
            def.name(),
            def.default_value()
        );
        self.pending.push(def);
        Ok(())
    }

    fn into_pending(mut self) -> Vec<GucDefinition> {
        self.committed = true;
        std::mem::take(&mut self.pending)
    }
}

impl Drop for GucDefiner {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for def in &self.pending {
            trace!("releasing storage for {}", def.name());
            def.storage().unbind();
        }
    }
}
