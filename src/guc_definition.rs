use super::*;

/// Who may change a tunable, and when.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum GucContext {
    /// Fixed at build time; never assignable.
    Internal,
    /// Set at server start only.
    Postmaster,
    /// Set in server configuration, picked up on reload.
    Sighup,
    /// Any session with superuser rights.
    Suset,
    /// Any session.
    Userset,
}

impl GucContext {
    pub fn session_may_set(&self, superuser: bool) -> bool {
        match self {
            Self::Userset => true,
            Self::Suset => superuser,
            Self::Internal | Self::Postmaster | Self::Sighup => false,
        }
    }
}

#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Debug, Ord, PartialOrd, Hash, EnumSetType, Serialize)]
#[enumset(repr = "u8")]
pub enum GucFlag {
    /// Left out of `SHOW ALL`.
    NoShowAll,
    /// Left out of the sample configuration.
    NotInSample,
    /// Kept for compatibility; assigning a non-default value logs a warning.
    Deprecated,
}
pub type GucFlags = EnumSet<GucFlag>;

pub type GucCheckHook = Arc<dyn Fn(&GucValue) -> Result<(), String> + Send + Sync>;
pub type GucAssignHook = Arc<dyn Fn(&GucValue) + Send + Sync>;
pub type GucShowHook = Arc<dyn Fn(&GucValue) -> String + Send + Sync>;

/// Optional per-tunable callbacks.
#[derive(Clone, Default)]
pub struct GucHooks {
    pub check: Option<GucCheckHook>,
    pub assign: Option<GucAssignHook>,
    pub show: Option<GucShowHook>,
}

impl GucHooks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&GucValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.check = Some(Arc::new(check));
        self
    }

    pub fn with_assign<F>(mut self, assign: F) -> Self
    where
        F: Fn(&GucValue) + Send + Sync + 'static,
    {
        self.assign = Some(Arc::new(assign));
        self
    }

    pub fn with_show<F>(mut self, show: F) -> Self
    where
        F: Fn(&GucValue) -> String + Send + Sync + 'static,
    {
        self.show = Some(Arc::new(show));
        self
    }
}

impl fmt::Debug for GucHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GucHooks")
            .field("check", &self.check.is_some())
            .field("assign", &self.assign.is_some())
            .field("show", &self.show.is_some())
            .finish()
    }
}

/// Kind-specific default and bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GucBounds {
    Bool { default: bool },
    Int { default: i32, min: i32, max: i32 },
}

impl GucBounds {
    pub fn kind(&self) -> GucKind {
        match self {
            Self::Bool { .. } => GucKind::Bool,
            Self::Int { .. } => GucKind::Int,
        }
    }

    pub fn default_value(&self) -> GucValue {
        match self {
            Self::Bool { default } => GucValue::Bool(*default),
            Self::Int { default, .. } => GucValue::Int(*default),
        }
    }
}

/// A registered tunable.
#[derive(Debug, Serialize)]
pub struct GucDefinition {
    name: Arc<str>,
    short_desc: String,
    long_desc: Option<String>,
    bounds: GucBounds,
    context: GucContext,
    flags: GucFlags,
    #[serde(skip)]
    hooks: GucHooks,
    #[serde(skip)]
    storage: &'static dyn GucStorage,
    #[serde(skip)]
    deprecation_warned: AtomicBool,
}

impl GucDefinition {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: Arc<str>,
        short_desc: &str,
        long_desc: Option<&str>,
        bounds: GucBounds,
        context: GucContext,
        flags: GucFlags,
        hooks: GucHooks,
        storage: &'static dyn GucStorage,
    ) -> GucResult<Self> {
        validate_guc_name(&name)?;
        if storage.kind() != bounds.kind() {
            return Err(GucError::type_mismatch(
                &name,
                bounds.kind(),
                storage.kind(),
            ));
        }
        if let GucBounds::Int { default, min, max } = bounds {
            if min > max {
                gucbail_invalid_definition!(
                    name,
                    format!("minimum {} is greater than maximum {}", min, max)
                );
            }
            if default < min || default > max {
                gucbail_invalid_definition!(
                    name,
                    format!("default {} is outside the range {} .. {}", default, min, max)
                );
            }
        }
        Ok(Self {
            name,
            short_desc: short_desc.to_owned(),
            long_desc: long_desc.map(|s| s.to_owned()),
            bounds,
            context,
            flags,
            hooks,
            storage,
            deprecation_warned: AtomicBool::new(false),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn short_desc(&self) -> &str {
        &self.short_desc
    }
    pub fn long_desc(&self) -> Option<&str> {
        self.long_desc.as_deref()
    }
    pub fn kind(&self) -> GucKind {
        self.bounds.kind()
    }
    pub fn bounds(&self) -> GucBounds {
        self.bounds
    }
    pub fn default_value(&self) -> GucValue {
        self.bounds.default_value()
    }
    pub fn context(&self) -> GucContext {
        self.context
    }
    pub fn flags(&self) -> GucFlags {
        self.flags
    }
    pub fn hooks(&self) -> &GucHooks {
        &self.hooks
    }
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(GucFlag::NoShowAll)
    }
    pub fn is_deprecated(&self) -> bool {
        self.flags.contains(GucFlag::Deprecated)
    }

    pub(crate) fn storage(&self) -> &'static dyn GucStorage {
        self.storage
    }

    /// Validate a candidate value against kind, bounds and the check hook.
    pub fn check_value(&self, value: &GucValue) -> GucResult<()> {
        match (self.bounds, value) {
            (GucBounds::Bool { .. }, GucValue::Bool(_)) => {}
            (GucBounds::Int { min, max, .. }, GucValue::Int(v)) => {
                if *v < min || *v > max {
                    return Err(GucError::out_of_range(&self.name, *v as i64, min, max));
                }
            }
            _ => {
                return Err(GucError::type_mismatch(
                    &self.name,
                    self.kind(),
                    value.kind(),
                ))
            }
        }
        if let Some(check) = &self.hooks.check {
            check(value).map_err(|message| GucError::check_failed(&self.name, value, message))?;
        }
        Ok(())
    }

    /// Format a value the way `SHOW` reports it.
    pub fn format_value(&self, value: &GucValue) -> String {
        match &self.hooks.show {
            Some(show) => show(value),
            None => value.to_string(),
        }
    }

    /// Returns true exactly once per process, the first time a deprecated
    /// tunable is given a non-default value.
    pub(crate) fn take_deprecation_warning(&self, value: &GucValue) -> bool {
        self.is_deprecated()
            && *value != self.default_value()
            && !self.deprecation_warned.swap(true, Ordering::AcqRel)
    }
}

/// Names are dot-separated identifier segments with at least one dot.
pub fn validate_guc_name(name: &str) -> GucResult<()> {
    if !name.contains('.') {
        gucbail_invalid_name!(name, "custom parameter names must contain a prefix");
    }
    validate_segments(name).map_err(|reason| GucError::invalid_name(name, reason))
}

/// Prefixes follow the segment rules of names but need no dot.
pub fn validate_guc_prefix(prefix: &str) -> GucResult<()> {
    validate_segments(prefix).map_err(|reason| GucError::invalid_prefix(prefix, reason))
}

fn validate_segments(text: &str) -> Result<(), String> {
    if text.is_empty() {
        return Err("must not be empty".to_owned());
    }
    for segment in text.split('.') {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return Err("contains an empty segment".to_owned());
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(format!(
                "segment \"{}\" must start with a letter or underscore",
                segment
            ));
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$')) {
            return Err(format!(
                "segment \"{}\" contains invalid character '{}'",
                segment, bad
            ));
        }
    }
    Ok(())
}
