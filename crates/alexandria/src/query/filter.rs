//! Filter clauses and their `filter=` wire encoding
//!
//! Clauses are stored as given and only rendered (and validated) when the
//! query is executed, so building a filter never fails.

use std::fmt;

use chrono::{Days, NaiveDate};

use crate::error::{Error, Result};

/// A scalar filter operand
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for FilterValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Comparison applied by a single-value clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
enum Clause {
    Compare {
        key: String,
        op: Operator,
        value: FilterValue,
    },
    AnyOf {
        key: String,
        values: Vec<FilterValue>,
    },
    AllOf {
        key: String,
        values: Vec<FilterValue>,
    },
}

impl Clause {
    fn key_mut(&mut self) -> &mut String {
        match self {
            Self::Compare { key, .. } | Self::AnyOf { key, .. } | Self::AllOf { key, .. } => key,
        }
    }

    fn render(&self) -> Result<String> {
        match self {
            Self::Compare { key, op, value } => {
                check_key(key)?;
                Ok(format!("{key}:{}", render_compare(key, *op, value)?))
            }
            Self::AnyOf { key, values } => render_list(key, values, "|"),
            Self::AllOf { key, values } => render_list(key, values, "+"),
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains([',', ':']) {
        return Err(Error::invalid(format!("invalid filter key: {key:?}")));
    }
    Ok(())
}

/// Render one operand; commas separate clauses on the wire.
fn render_value(key: &str, value: &FilterValue) -> Result<String> {
    let text = value.to_string();
    if text.contains(',') {
        return Err(Error::invalid(format!(
            "filter value for {key} contains a comma: {text:?}"
        )));
    }
    Ok(text)
}

/// `>=` and `<=` do not exist on the wire; they shift a strict bound by one
/// unit, which only works for integers and dates.
fn render_compare(key: &str, op: Operator, value: &FilterValue) -> Result<String> {
    let shifted = |delta: i64| -> Result<String> {
        match value {
            FilterValue::Int(n) => n
                .checked_add(delta)
                .map(|n| n.to_string())
                .ok_or_else(|| Error::invalid(format!("integer out of range for {key}: {n}"))),
            FilterValue::Date(d) => {
                let days = Days::new(1);
                let shifted = if delta < 0 {
                    d.checked_sub_days(days)
                } else {
                    d.checked_add_days(days)
                };
                shifted
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .ok_or_else(|| Error::invalid(format!("date out of range for {key}: {d}")))
            }
            other => Err(Error::invalid(format!(
                "{key}: inclusive bounds need an integer or date, got {other:?}"
            ))),
        }
    };

    Ok(match op {
        Operator::Eq => render_value(key, value)?,
        Operator::Not => format!("!{}", render_value(key, value)?),
        Operator::Gt => format!(">{}", render_value(key, value)?),
        Operator::Lt => format!("<{}", render_value(key, value)?),
        Operator::Gte => format!(">{}", shifted(-1)?),
        Operator::Lte => format!("<{}", shifted(1)?),
    })
}

fn render_list(key: &str, values: &[FilterValue], sep: &str) -> Result<String> {
    check_key(key)?;
    if values.is_empty() {
        return Err(Error::invalid(format!("{key}: empty value list")));
    }
    let rendered = values
        .iter()
        .map(|v| render_value(key, v))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("{key}:{}", rendered.join(sep)))
}

/// An ordered, AND-combined set of filter clauses.
///
/// Used directly by [`crate::Query`] and standalone to build nested
/// sub-filters such as `authorships.institutions.*`:
///
/// ```
/// use alexandria::FilterSet;
///
/// let inst = FilterSet::new().filter("country_code", "NL").filter("type", "education");
/// assert_eq!(
///     inst.prefixed("authorships.institutions").render().unwrap().as_deref(),
///     Some("authorships.institutions.country_code:NL,authorships.institutions.type:education")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    clauses: Vec<Clause>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    fn compare(mut self, key: impl Into<String>, op: Operator, value: impl Into<FilterValue>) -> Self {
        self.clauses.push(Clause::Compare {
            key: key.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// `key:value`
    pub fn filter(self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.compare(key, Operator::Eq, value)
    }

    /// `key:>value`
    pub fn gt(self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.compare(key, Operator::Gt, value)
    }

    /// `key:<value`
    pub fn lt(self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.compare(key, Operator::Lt, value)
    }

    /// Inclusive lower bound, integers and dates only
    pub fn gte(self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.compare(key, Operator::Gte, value)
    }

    /// Inclusive upper bound, integers and dates only
    pub fn lte(self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.compare(key, Operator::Lte, value)
    }

    /// `key:!value`
    pub fn not(self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.compare(key, Operator::Not, value)
    }

    /// `key:v1|v2|...`
    pub fn any_of<V: Into<FilterValue>>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.clauses.push(Clause::AnyOf {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// `key:v1+v2+...`
    pub fn all_of<V: Into<FilterValue>>(
        mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.clauses.push(Clause::AllOf {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// `field.search:term`. Commas in the term become spaces.
    pub fn search(self, field: impl AsRef<str>, term: impl AsRef<str>) -> Self {
        let key = format!("{}.search", field.as_ref());
        let term = term.as_ref().replace(',', " ");
        self.compare(key, Operator::Eq, FilterValue::Text(term))
    }

    /// Append `other`'s clauses under `prefix.`
    pub fn nested(mut self, prefix: &str, other: FilterSet) -> Self {
        self.clauses.extend(other.prefixed(prefix).clauses);
        self
    }

    /// Every clause key rewritten as `prefix.key`
    pub fn prefixed(mut self, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('.');
        for clause in &mut self.clauses {
            let key = clause.key_mut();
            *key = format!("{prefix}.{key}");
        }
        self
    }

    /// Comma-joined `filter=` value, `None` when there are no clauses
    pub fn render(&self) -> Result<Option<String>> {
        if self.clauses.is_empty() {
            return Ok(None);
        }
        let parts = self
            .clauses
            .iter()
            .map(Clause::render)
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(parts.join(",")))
    }
}
