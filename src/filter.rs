//! PostgREST filter predicates
//!
//! A [`Filter`] is either a single column predicate or an explicit `and` / `or`
//! group of other filters. Filters render to the `column.operator.value`
//! syntax PostgREST understands, e.g. `status.eq.active`,
//! `id.in.(1,2,3)` or `or(age.lt.18,age.gt.65)`.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone};
use std::fmt;
use uuid::Uuid;

/// Column comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,    // equals
    Neq,   // not equals
    Gt,    // greater than
    Lt,    // less than
    Gte,   // greater than or equal
    Lte,   // less than or equal
    Like,  // LIKE
    Ilike, // ILIKE (case-insensitive)
    In,    // IN
}

impl FilterOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::In => "in",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical combinator for filter groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupOperator {
    And,
    Or,
}

impl GroupOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a column predicate
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Single(String),
    List(Vec<FilterValue>),
}

impl FilterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Wire form: `null`, the scalar text, or `(v1,v2,...)`
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Single(v) => v.clone(),
            Self::List(values) => {
                let items: Vec<String> = values.iter().map(FilterValue::render).collect();
                format!("({})", items.join(","))
            }
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Single(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Single(v)
    }
}

impl From<&String> for FilterValue {
    fn from(v: &String) -> Self {
        Self::Single(v.clone())
    }
}

macro_rules! display_filter_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for FilterValue {
                fn from(v: $t) -> Self {
                    Self::Single(v.to_string())
                }
            }
        )*
    };
}

display_filter_value!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, Uuid, NaiveDate);

impl<Tz: TimeZone> From<DateTime<Tz>> for FilterValue
where
    Tz::Offset: fmt::Display,
{
    fn from(v: DateTime<Tz>) -> Self {
        Self::Single(v.to_rfc3339_opts(SecondsFormat::Nanos, true))
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for FilterValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::String(s) => Self::Single(s),
            serde_json::Value::Array(values) => values.into(),
            other => Self::Single(other.to_string()),
        }
    }
}

/// Filter condition
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Predicate over one column
    Simple {
        column: String,
        operator: FilterOperator,
        value: FilterValue,
    },
    /// Explicit `and(...)` / `or(...)` grouping, children kept in order
    Group {
        operator: GroupOperator,
        filters: Vec<Filter>,
    },
}

impl Filter {
    fn simple(column: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self::Simple {
            column: column.into(),
            operator,
            value,
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::simple(column, FilterOperator::Eq, value.into())
    }

    pub fn neq(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::simple(column, FilterOperator::Neq, value.into())
    }

    pub fn gt(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::simple(column, FilterOperator::Gt, value.into())
    }

    pub fn lt(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::simple(column, FilterOperator::Lt, value.into())
    }

    pub fn gte(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::simple(column, FilterOperator::Gte, value.into())
    }

    pub fn lte(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::simple(column, FilterOperator::Lte, value.into())
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::simple(column, FilterOperator::Like, FilterValue::Single(pattern.into()))
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::simple(column, FilterOperator::Ilike, FilterValue::Single(pattern.into()))
    }

    /// `column.in.(v1,v2,...)`; `None` elements render as the `null` token
    pub fn is_in<I, V>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::simple(column, FilterOperator::In, FilterValue::List(values))
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::Group {
            operator: GroupOperator::And,
            filters: filters.into_iter().collect(),
        }
    }

    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::Group {
            operator: GroupOperator::Or,
            filters: filters.into_iter().collect(),
        }
    }

    /// Nested form used inside groups, e.g. `age.gt.18` or `or(a.eq.1,b.is.null)`
    pub fn render(&self) -> String {
        match self {
            Self::Simple { column, .. } => format!("{}.{}", column, self.predicate()),
            Self::Group { operator, .. } => format!("{}{}", operator, self.predicate()),
        }
    }

    /// Query parameter for the top-level URL: `(column, "op.value")` or `("or", "(...)")`
    pub fn to_query_pair(&self) -> (String, String) {
        match self {
            Self::Simple { column, .. } => (column.clone(), self.predicate()),
            Self::Group { operator, .. } => (operator.as_str().to_string(), self.predicate()),
        }
    }

    /// Rendering without the leading column / group keyword
    fn predicate(&self) -> String {
        match self {
            Self::Simple { value, .. } if value.is_null() => "is.null".to_string(),
            Self::Simple {
                operator, value, ..
            } => format!("{}.{}", operator, value.render()),
            Self::Group { filters, .. } => {
                let parts: Vec<String> = filters.iter().map(Filter::render).collect();
                format!("({})", parts.join(","))
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_simple_filter_render() {
        assert_eq!(Filter::eq("status", "active").render(), "status.eq.active");
        assert_eq!(Filter::neq("plan", "free").render(), "plan.neq.free");
        assert_eq!(Filter::gt("age", 18).render(), "age.gt.18");
        assert_eq!(Filter::lte("score", 9.5).render(), "score.lte.9.5");
        assert_eq!(Filter::ilike("name", "%acme%").render(), "name.ilike.%acme%");
        assert_eq!(Filter::eq("active", true).render(), "active.eq.true");
    }

    #[test]
    fn test_null_value_renders_is_null() {
        assert_eq!(Filter::eq("deleted_at", None::<String>).render(), "deleted_at.is.null");
        assert_eq!(Filter::neq("deleted_at", FilterValue::Null).render(), "deleted_at.is.null");
        assert_eq!(
            Filter::gt("n", serde_json::Value::Null).to_query_pair(),
            ("n".to_string(), "is.null".to_string())
        );
    }

    #[test]
    fn test_in_filter_keeps_order_and_null_token() {
        let filter = Filter::is_in("id", vec![Some("a"), None, Some("b")]);
        assert_eq!(filter.render(), "id.in.(a,null,b)");

        let filter = Filter::is_in("n", [3, 1, 2]);
        assert_eq!(
            filter.to_query_pair(),
            ("n".to_string(), "in.(3,1,2)".to_string())
        );
    }

    #[test]
    fn test_in_filter_timestamp_uses_nanoseconds() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let filter = Filter::is_in("created_at", [Some(ts), None]);
        assert_eq!(
            filter.render(),
            "created_at.in.(2024-05-01T12:30:00.000000000Z,null)"
        );
    }

    #[test]
    fn test_group_filter_render() {
        let filter = Filter::and([Filter::eq("f1", "v1"), Filter::gt("f2", "v2")]);
        assert_eq!(filter.render(), "and(f1.eq.v1,f2.gt.v2)");
        assert_eq!(
            filter.to_query_pair(),
            ("and".to_string(), "(f1.eq.v1,f2.gt.v2)".to_string())
        );
    }

    #[test]
    fn test_nested_groups_are_balanced() {
        let filter = Filter::or([
            Filter::and([Filter::eq("a", 1), Filter::eq("b", None::<i32>)]),
            Filter::eq("c", 3),
        ]);
        assert_eq!(filter.render(), "or(and(a.eq.1,b.is.null),c.eq.3)");
        assert_eq!(filter.to_string(), filter.render());
    }

    #[test]
    fn test_json_values() {
        let value: FilterValue = serde_json::json!(["x", null, 2]).into();
        assert_eq!(value.render(), "(x,null,2)");
        let value: FilterValue = serde_json::json!("plain").into();
        assert_eq!(value, FilterValue::Single("plain".to_string()));
    }

    #[test]
    fn test_uuid_value() {
        let id = Uuid::nil();
        assert_eq!(
            Filter::eq("id", id).render(),
            "id.eq.00000000-0000-0000-0000-000000000000"
        );
    }
}
