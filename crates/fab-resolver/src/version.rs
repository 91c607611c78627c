//! OSGi version cleaning, parsing, and import range synthesis.
//!
//! OSGi versions have exactly three numeric segments and an optional
//! qualifier: `major.minor.micro[.qualifier]`. Maven versions are looser
//! (`1.2-SNAPSHOT`, `2.5.6.SEC02`, `31.0-jre`) and are coerced with [`clean`]
//! before they can be used in a manifest.

use std::fmt;
use std::num::IntErrorKind;

use fab_util::errors::FabError;

/// Range precision used when no valid precision is configured.
pub const DEFAULT_VERSION_DIGITS: RangeDigits = RangeDigits(3);

/// A parsed OSGi version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OsgiVersion {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub qualifier: Option<String>,
}

impl OsgiVersion {
    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: None,
        }
    }

    /// Parse OSGi version text. Missing minor and micro segments default to 0.
    pub fn parse(version: &str) -> Result<Self, FabError> {
        let text = version.trim();
        let mut parts = text.splitn(4, '.');
        let invalid = |message: &str| FabError::Version {
            version: version.to_string(),
            message: message.to_string(),
        };
        let mut number = |name: &str| -> Result<u64, FabError> {
            match parts.next() {
                None => Ok(0),
                Some(s) => s.parse::<u64>().map_err(|e| match e.kind() {
                    IntErrorKind::PosOverflow => {
                        invalid(&format!("{name} segment '{s}' is too large"))
                    }
                    _ => invalid(&format!("{name} segment '{s}' is not a number")),
                }),
            }
        };
        let major = number("major")?;
        let minor = number("minor")?;
        let micro = number("micro")?;
        let qualifier = match parts.next() {
            Some(q) if q.is_empty() => return Err(invalid("empty qualifier")),
            Some(q) if !q.chars().all(is_qualifier_char) => {
                return Err(invalid("qualifier may only contain letters, digits, '_' and '-'"))
            }
            Some(q) => Some(q.to_string()),
            None => None,
        };
        Ok(Self {
            major,
            minor,
            micro,
            qualifier,
        })
    }
}

impl fmt::Display for OsgiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some(ref q) = self.qualifier {
            write!(f, ".{q}")?;
        }
        Ok(())
    }
}

fn is_qualifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Coerce arbitrary version text into OSGi syntax.
///
/// Up to three leading dot-separated numbers become `major.minor.micro`
/// (missing ones are `0`). Whatever follows a single non-alphanumeric
/// separator becomes the qualifier, with characters outside `[A-Za-z0-9_-]`
/// replaced by `_`. Text that does not start with a version is kept whole as
/// the qualifier of `0.0.0`.
pub fn clean(version: &str) -> String {
    if version.is_empty() {
        return "0.0.0".to_string();
    }
    let Some((numbers, qualifier)) = split_fuzzy(version) else {
        return format!("0.0.0.{}", cleanup_qualifier(version));
    };
    let mut result = numbers.join(".");
    for _ in numbers.len()..3 {
        result.push_str(".0");
    }
    if let Some(q) = qualifier.filter(|q| !q.is_empty()) {
        result.push('.');
        result.push_str(&cleanup_qualifier(q));
    }
    result
}

/// Split `version` into its leading numeric segments and trailing qualifier.
///
/// Tries three, two, then one leading numbers; a candidate only fits when
/// the remainder is empty or starts with a non-alphanumeric separator.
fn split_fuzzy(version: &str) -> Option<(Vec<&str>, Option<&str>)> {
    let mut numbers = Vec::new();
    let mut ends = Vec::new();
    let mut pos = 0;
    while numbers.len() < 3 {
        let start = if numbers.is_empty() {
            pos
        } else if version[pos..].starts_with('.') {
            pos + 1
        } else {
            break;
        };
        let len = version[start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if len == 0 {
            break;
        }
        numbers.push(&version[start..start + len]);
        pos = start + len;
        ends.push(pos);
    }

    while let Some(end) = ends.pop() {
        let rest = &version[end..];
        let mut chars = rest.chars();
        match chars.next() {
            None => return Some((numbers, None)),
            Some(sep) if !sep.is_ascii_alphanumeric() => {
                return Some((numbers, Some(chars.as_str())));
            }
            Some(_) => {
                numbers.pop();
            }
        }
    }
    None
}

fn cleanup_qualifier(qualifier: &str) -> String {
    qualifier
        .chars()
        .map(|c| if is_qualifier_char(c) { c } else { '_' })
        .collect()
}

/// Number of leading version segments kept in a synthesized import range.
///
/// `0..=3` produce a half-open range; `4` pins the exact version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RangeDigits(u8);

impl RangeDigits {
    pub const EXACT: RangeDigits = RangeDigits(4);

    /// Validate an explicit precision. Values outside `0..=4` are rejected.
    pub fn new(digits: i64) -> Result<Self, FabError> {
        match u8::try_from(digits) {
            Ok(d) if d <= 4 => Ok(Self(d)),
            _ => Err(FabError::InvalidDigits { digits }),
        }
    }

    /// Resolve a configured precision, falling back to
    /// [`DEFAULT_VERSION_DIGITS`] when the value is absent, not a number, or
    /// out of range. Invalid values are logged, never returned as errors.
    pub fn from_setting(setting: &str, value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return DEFAULT_VERSION_DIGITS;
        };
        let Ok(digits) = value.parse::<i64>() else {
            tracing::warn!(
                "Failed to parse {setting} as a number. Got: '{value}' so ignoring it"
            );
            return DEFAULT_VERSION_DIGITS;
        };
        Self::new(digits).unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid value of {setting}: {digits} is out of range so ignoring it"
            );
            DEFAULT_VERSION_DIGITS
        })
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for RangeDigits {
    fn default() -> Self {
        DEFAULT_VERSION_DIGITS
    }
}

impl fmt::Display for RangeDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An import constraint: either an exact version or `[floor,ceiling)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    Exact(String),
    Range {
        floor: OsgiVersion,
        ceiling: OsgiVersion,
    },
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Exact(v) => f.write_str(v),
            VersionConstraint::Range { floor, ceiling } => write!(f, "[{floor},{ceiling})"),
        }
    }
}

/// Build the import constraint for `version` at the given precision.
///
/// With [`RangeDigits::EXACT`] the version text is returned unchanged.
/// Otherwise the floor keeps the first `digits` segments of the cleaned
/// version (the rest become `0`, the qualifier is dropped) and the ceiling
/// bumps the last kept segment. With zero digits the floor is `0.0.0` and
/// the ceiling `1.0.0`.
pub fn to_version_constraint(
    version: &str,
    digits: RangeDigits,
) -> Result<VersionConstraint, FabError> {
    if digits == RangeDigits::EXACT {
        return Ok(VersionConstraint::Exact(version.to_string()));
    }
    let v = OsgiVersion::parse(&clean(version.trim()))?;
    let (floor, ceiling) = match digits.get() {
        0 => (OsgiVersion::new(0, 0, 0), OsgiVersion::new(1, 0, 0)),
        1 => (
            OsgiVersion::new(v.major, 0, 0),
            OsgiVersion::new(bump(&v, v.major)?, 0, 0),
        ),
        2 => (
            OsgiVersion::new(v.major, v.minor, 0),
            OsgiVersion::new(v.major, bump(&v, v.minor)?, 0),
        ),
        _ => (
            OsgiVersion::new(v.major, v.minor, v.micro),
            OsgiVersion::new(v.major, v.minor, bump(&v, v.micro)?),
        ),
    };
    Ok(VersionConstraint::Range { floor, ceiling })
}

fn bump(v: &OsgiVersion, segment: u64) -> Result<u64, FabError> {
    segment.checked_add(1).ok_or_else(|| FabError::Version {
        version: v.to_string(),
        message: "segment too large to build a range".to_string(),
    })
}

/// Strict string form of [`to_version_constraint`]: `digits` outside `0..=4`
/// is an error.
pub fn to_version_range(version: &str, digits: i64) -> Result<String, FabError> {
    let digits = RangeDigits::new(digits)?;
    Ok(to_version_constraint(version, digits)?.to_string())
}
