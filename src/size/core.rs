use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Which side of the size union a pane lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Absolute,
    Relative,
}

impl SizeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeKind::Absolute => "absolute",
            SizeKind::Relative => "relative",
        }
    }
}

/// Pane size: an absolute pixel length or a relative `fr` weight.
///
/// Parsed once from `"<n>px"` / `"<n>fr"` at the boundary and printed back in
/// the same grammar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SizeSpec {
    Absolute(f64),
    Relative(f64),
}

impl SizeSpec {
    pub const fn px(value: f64) -> Self {
        Self::Absolute(value)
    }

    pub const fn fr(value: f64) -> Self {
        Self::Relative(value)
    }

    pub fn kind(&self) -> SizeKind {
        match self {
            SizeSpec::Absolute(_) => SizeKind::Absolute,
            SizeSpec::Relative(_) => SizeKind::Relative,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, SizeSpec::Absolute(_))
    }

    /// Numeric magnitude regardless of unit.
    pub fn magnitude(&self) -> f64 {
        match *self {
            SizeSpec::Absolute(value) | SizeSpec::Relative(value) => value,
        }
    }

    pub fn px_value(&self) -> Option<f64> {
        match *self {
            SizeSpec::Absolute(value) => Some(value),
            SizeSpec::Relative(_) => None,
        }
    }

    pub fn fr_value(&self) -> Option<f64> {
        match *self {
            SizeSpec::Relative(value) => Some(value),
            SizeSpec::Absolute(_) => None,
        }
    }

    /// Same unit, new magnitude.
    pub fn with_magnitude(&self, value: f64) -> Self {
        match self {
            SizeSpec::Absolute(_) => SizeSpec::Absolute(value),
            SizeSpec::Relative(_) => SizeSpec::Relative(value),
        }
    }

    pub fn halved(&self) -> Self {
        self.with_magnitude(self.magnitude() / 2.0)
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SizeSpec::Absolute(value) => write!(f, "{}px", format_number(value)),
            SizeSpec::Relative(value) => write!(f, "{}fr", format_number(value)),
        }
    }
}

/// Parses `<number>px` or `<number>fr`. Surrounding whitespace is ignored;
/// whitespace between the number and its unit is not.
impl FromStr for SizeSpec {
    type Err = LayoutError;

    fn from_str(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let (number, build): (&str, fn(f64) -> SizeSpec) =
            if let Some(number) = trimmed.strip_suffix("px") {
                (number, SizeSpec::Absolute)
            } else if let Some(number) = trimmed.strip_suffix("fr") {
                (number, SizeSpec::Relative)
            } else {
                return Err(LayoutError::MalformedSize(text.to_string()));
            };

        match number.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(build(value)),
            _ => Err(LayoutError::MalformedSize(text.to_string())),
        }
    }
}

impl TryFrom<String> for SizeSpec {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SizeSpec> for String {
    fn from(value: SizeSpec) -> Self {
        value.to_string()
    }
}

/// Shortest round-trip decimal form, with negative zero printed as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// CSS value for a pane of the given size.
///
/// Absolute panes yield their literal pixel size. Relative panes yield a
/// `calc()` that subtracts their share of the group's fixed-size budget, read
/// live from the `fixed_sizes_sum_var` custom property, and adds any
/// `fixed_offset` correction.
pub fn relative_size_expression(
    size: SizeSpec,
    fixed_offset: Option<f64>,
    fixed_sizes_sum_var: &str,
) -> String {
    let fr = match size {
        SizeSpec::Absolute(_) => return size.to_string(),
        SizeSpec::Relative(fr) => fr,
    };

    let mut expression = format!(
        "calc({}% - {} * var({fixed_sizes_sum_var})",
        format_number(fr * 100.0),
        format_number(fr)
    );

    match fixed_offset {
        Some(offset) if offset > 0.0 => {
            expression.push_str(&format!(" + {}px", format_number(offset)));
        }
        Some(offset) if offset < 0.0 => {
            expression.push_str(&format!(" - {}px", format_number(-offset)));
        }
        _ => {}
    }

    expression.push(')');
    expression
}
