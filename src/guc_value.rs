use super::*;

/// The value kinds a tunable may have.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GucKind {
    Bool,
    Int,
}

impl fmt::Display for GucKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Bool => "bool",
            Self::Int => "integer",
        };
        write!(f, "{}", text)
    }
}

/// A tunable value, tagged with its kind.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum GucValue {
    Bool(bool),
    Int(i32),
}

impl GucValue {
    pub fn kind(&self) -> GucKind {
        match self {
            Self::Bool(_) => GucKind::Bool,
            Self::Int(_) => GucKind::Int,
        }
    }

    /// Parse operator text for a tunable of the given kind.
    ///
    /// Integers take an optional sign and either decimal digits or a `0x`
    /// hexadecimal literal. Booleans take any unique prefix of `true`, `false`,
    /// `yes` or `no`, or `on`, `off`, `1`, `0`. Case and surrounding whitespace
    /// are ignored for both.
    pub fn parse(name: &str, kind: GucKind, text: &str) -> GucResult<Self> {
        match kind {
            GucKind::Bool => parse_bool(text)
                .map(Self::Bool)
                .ok_or_else(|| GucError::requires_boolean(name)),
            GucKind::Int => parse_int(name, text).map(Self::Int),
        }
    }
}

impl fmt::Display for GucValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "on"),
            Self::Bool(false) => write!(f, "off"),
            Self::Int(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for GucValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for GucValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

/// Rust types that can back a storage cell.
pub trait GucType: Copy + Send + Sync + PartialEq + fmt::Debug + 'static {
    const KIND: GucKind;

    fn into_guc_value(self) -> GucValue;
    fn from_guc_value(value: &GucValue) -> Option<Self>;
}

impl GucType for bool {
    const KIND: GucKind = GucKind::Bool;

    fn into_guc_value(self) -> GucValue {
        GucValue::Bool(self)
    }
    fn from_guc_value(value: &GucValue) -> Option<Self> {
        match value {
            GucValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl GucType for i32 {
    const KIND: GucKind = GucKind::Int;

    fn into_guc_value(self) -> GucValue {
        GucValue::Int(self)
    }
    fn from_guc_value(value: &GucValue) -> Option<Self> {
        match value {
            GucValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim().to_ascii_lowercase();
    if text.is_empty() {
        return None;
    }
    let is_prefix_of = |word: &str| word.starts_with(text.as_str());

    match text.as_bytes()[0] {
        b't' if is_prefix_of("true") => Some(true),
        b'f' if is_prefix_of("false") => Some(false),
        b'y' if is_prefix_of("yes") => Some(true),
        b'n' if is_prefix_of("no") => Some(false),
        // a lone 'o' is ambiguous between on and off
        b'o' if text.len() >= 2 && is_prefix_of("on") => Some(true),
        b'o' if text.len() >= 2 && is_prefix_of("off") => Some(false),
        b'1' if text.len() == 1 => Some(true),
        b'0' if text.len() == 1 => Some(false),
        _ => None,
    }
}

/// Parse integer text, reporting values that do not fit an `i32` as out of range.
pub fn parse_int(name: &str, text: &str) -> GucResult<i32> {
    let wide = parse_wide_int(text).ok_or_else(|| GucError::invalid_value(name, text))?;
    i32::try_from(wide).map_err(|_| GucError::out_of_range(name, wide, i32::MIN, i32::MAX))
}

fn parse_wide_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}
