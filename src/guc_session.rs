use super::*;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// One row of `SHOW ALL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GucShowRow {
    pub name: String,
    pub setting: String,
    pub description: String,
}

/// A client session's view of the registry.
///
/// Assignments made through a session are private to it. Reads return the
/// session's own value when it has assigned one and the process-wide value
/// from the storage cell otherwise, so consumers must read on every use
/// rather than cache.
#[derive(Debug)]
pub struct GucSession {
    id: u64,
    registry: GucRegistry,
    superuser: bool,
    overrides: RwLock<HashMap<String, GucValue>>,
}

impl GucSession {
    pub(crate) fn new(registry: GucRegistry, superuser: bool) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            registry,
            superuser,
            overrides: RwLock::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_superuser(&self) -> bool {
        self.superuser
    }

    pub fn registry(&self) -> &GucRegistry {
        &self.registry
    }

    /// Current value of a storage cell as seen by this session.
    pub fn get<T: GucType>(&self, setting: &GucSetting<T>) -> T {
        if let Some(name) = setting.name() {
            let overridden = self
                .overrides
                .read()
                .get(&guc_key(&name))
                .and_then(T::from_guc_value);
            if let Some(v) = overridden {
                return v;
            }
        }
        setting.get()
    }

    /// Assign a storage cell's tunable for this session.
    pub fn set<T: GucType>(&self, setting: &GucSetting<T>, value: T) -> GucResult<()> {
        let Some(name) = setting.name() else {
            gucbail_unrecognized!("<unbound>");
        };
        let def = self.registry.lookup(&name)?;
        self.assign(&def, value.into_guc_value())
    }

    /// `SET name = text`
    pub fn set_config(&self, name: &str, text: &str) -> GucResult<()> {
        let def = self.registry.lookup(name)?;
        let value = GucValue::parse(def.name(), def.kind(), text)?;
        self.assign(&def, value)
    }

    /// `SHOW name`
    pub fn show(&self, name: &str) -> GucResult<String> {
        let def = self.registry.lookup(name)?;
        Ok(def.format_value(&self.value_of(&def)))
    }

    pub fn current_value(&self, name: &str) -> GucResult<GucValue> {
        let def = self.registry.lookup(name)?;
        Ok(self.value_of(&def))
    }

    /// Whether this session has its own value for the tunable.
    pub fn is_overridden(&self, name: &str) -> bool {
        self.overrides.read().contains_key(&guc_key(name))
    }

    /// `RESET name`
    pub fn reset(&self, name: &str) -> GucResult<()> {
        let def = self.registry.lookup(name)?;
        self.check_permission(&def)?;
        if self.overrides.write().remove(&guc_key(def.name())).is_some() {
            self.run_assign_hook(&def, &def.storage().load());
            debug!("session {}: reset {}", self.id, def.name());
        }
        Ok(())
    }

    /// `RESET ALL`
    pub fn reset_all(&self) {
        let cleared: Vec<String> = self.overrides.write().drain().map(|(k, _)| k).collect();
        for key in cleared {
            if let Ok(def) = self.registry.lookup(&key) {
                self.run_assign_hook(&def, &def.storage().load());
            }
        }
        debug!("session {}: reset all", self.id);
    }

    /// `SHOW ALL`: every tunable not marked [`GucFlag::NoShowAll`], ordered by name.
    pub fn show_all(&self) -> Vec<GucShowRow> {
        self.registry
            .definitions()
            .into_iter()
            .filter(|def| !def.flags().contains(GucFlag::NoShowAll))
            .map(|def| GucShowRow {
                name: def.name().to_owned(),
                setting: def.format_value(&self.value_of(&def)),
                description: def.short_desc().to_owned(),
            })
            .collect()
    }

    /// `SHOW ALL` as a JSON array of `{name, setting, description}` objects.
    pub fn show_all_json(&self) -> String {
        serialize_json(self.show_all())
    }

    ////////////////////////////////////////////////////////////////////////////

    fn value_of(&self, def: &GucDefinition) -> GucValue {
        self.overrides
            .read()
            .get(&guc_key(def.name()))
            .copied()
            .unwrap_or_else(|| def.storage().load())
    }

    fn check_permission(&self, def: &GucDefinition) -> GucResult<()> {
        if def.context().session_may_set(self.superuser) {
            return Ok(());
        }
        Err(match def.context() {
            GucContext::Suset => GucError::permission_denied(def.name()),
            _ => GucError::cannot_change_now(def.name()),
        })
    }

    fn assign(&self, def: &GucDefinition, value: GucValue) -> GucResult<()> {
        self.check_permission(def)?;
        def.check_value(&value)?;

        if def.take_deprecation_warning(&value) {
            warn!(
                "parameter \"{}\" is deprecated and only meant for testing",
                def.name()
            );
        }

        self.overrides.write().insert(guc_key(def.name()), value);
        self.run_assign_hook(def, &value);

        debug!("session {}: set {} = {}", self.id, def.name(), value);
        Ok(())
    }

    fn run_assign_hook(&self, def: &GucDefinition, value: &GucValue) {
        if let Some(assign) = &def.hooks().assign {
            assign(value);
        }
    }
}

pub fn serialize_json<T: Serialize + fmt::Debug>(val: T) -> String {
    match serde_json::to_string(&val) {
        Ok(v) => v,
        Err(e) => {
            panic!("failed to serialize json value: {}\nval={:?}", e, val);
        }
    }
}
