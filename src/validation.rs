//! Client-side checks run on options before a request is built.
//!
//! The server remains the authority: options which pass these checks may
//! still be rejected by SonarQube.

use std::fmt;

/// Category of a [ValidationError].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValidationKind {
    /// A required field is empty.
    MissingRequired,
    /// A value is too short, too long, or not in its allowed set.
    OutOfRange,
}

impl ValidationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::MissingRequired => "missing_required",
            ValidationKind::OutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message} ({kind})")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
    pub kind: ValidationKind,
}

impl ValidationError {
    fn missing(field: &'static str) -> Self {
        Self {
            field,
            message: "required field is missing".to_string(),
            kind: ValidationKind::MissingRequired,
        }
    }

    fn out_of_range(field: &'static str, message: String) -> Self {
        Self {
            field,
            message,
            kind: ValidationKind::OutOfRange,
        }
    }
}

/// A fixed set of accepted values for a field. Membership is case-sensitive.
#[derive(Debug, Copy, Clone)]
pub struct AllowedSet(&'static [&'static str]);

impl AllowedSet {
    pub const fn new(values: &'static [&'static str]) -> Self {
        Self(values)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(&value)
    }

    pub fn values(&self) -> &'static [&'static str] {
        self.0
    }
}

/// Options which can be checked before being sent.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Values which have an "empty" state meaning "not given".
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

impl Blank for u32 {
    fn is_blank(&self) -> bool {
        *self == 0
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

pub fn required<T: Blank + ?Sized>(field: &'static str, value: &T) -> Result<(), ValidationError> {
    if value.is_blank() {
        Err(ValidationError::missing(field))
    } else {
        Ok(())
    }
}

/// At least one of `values` must be given. `fields` names all of them, e.g. `"projects|q"`.
pub fn required_any(fields: &'static str, values: &[&dyn Blank]) -> Result<(), ValidationError> {
    if values.iter().all(|v| v.is_blank()) {
        Err(ValidationError::missing(fields))
    } else {
        Ok(())
    }
}

pub fn min_length(field: &'static str, value: &str, min: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        Err(ValidationError::out_of_range(
            field,
            format!("must be at least {} characters, got {}", min, len),
        ))
    } else {
        Ok(())
    }
}

pub fn max_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        Err(ValidationError::out_of_range(
            field,
            format!("must be at most {} characters, got {}", max, len),
        ))
    } else {
        Ok(())
    }
}

/// [max_length] for a field which may be absent.
pub fn max_length_opt(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| max_length(field, v, max))
}

pub fn one_of(field: &'static str, value: &str, allowed: &AllowedSet) -> Result<(), ValidationError> {
    if allowed.contains(value) {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(
            field,
            format!(
                "{:?} is not one of [{}]",
                value,
                allowed.values().join(", ")
            ),
        ))
    }
}

/// [one_of] for a field which may be absent.
pub fn one_of_opt(
    field: &'static str,
    value: Option<&str>,
    allowed: &AllowedSet,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| one_of(field, v, allowed))
}

/// Every element of `values` must be in `allowed`. An empty list passes.
pub fn all_of<S: AsRef<str>>(
    field: &'static str,
    values: &[S],
    allowed: &AllowedSet,
) -> Result<(), ValidationError> {
    values
        .iter()
        .try_for_each(|v| one_of(field, v.as_ref(), allowed))
}
