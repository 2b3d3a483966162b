//! Column-name conventions applied at load time
//!
//! Survey exports use free-text headers such as `"Heart Disease Status"`.
//! A [`ColumnNaming`] is chosen once per load; every later lookup uses names
//! written in that convention.

/// How CSV header names are turned into field names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ColumnNaming {
    /// Keep headers as written, trimmed of surrounding whitespace.
    #[default]
    Verbatim,
    /// Trim, lowercase, join whitespace runs with `_`, and drop everything
    /// outside `[a-z0-9_]`.
    Snake,
}

impl ColumnNaming {
    /// Applies the convention to a single name.
    ///
    /// # Examples
    ///
    /// ```
    /// use cardiostat_analysis::naming::ColumnNaming;
    ///
    /// assert_eq!(ColumnNaming::Snake.apply(" Heart Disease Status "), "heart_disease_status");
    /// assert_eq!(ColumnNaming::Snake.apply("BMI (kg/m²)"), "bmi_kgm");
    /// assert_eq!(ColumnNaming::Verbatim.apply(" Cholesterol Level "), "Cholesterol Level");
    /// ```
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Verbatim => name.trim().to_owned(),
            Self::Snake => to_snake_case(name),
        }
    }
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            out.push(ch);
        }
    }
    out
}
