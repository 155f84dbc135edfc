//! Query string rendering for PostgREST requests

use std::fmt;

use crate::filter::Filter;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// Case-insensitive; anything other than `asc` / `desc` falls back to `Asc`
    pub fn parse_lenient(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    pub column: String,
    pub direction: OrderDirection,
}

impl OrderClause {
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

impl fmt::Display for OrderClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.column, self.direction)
    }
}

/// Ordered query parameters; rendering preserves insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// One parameter per filter, in the order the filters were added
    pub fn push_filters(&mut self, filters: &[Filter]) -> &mut Self {
        self.pairs.extend(filters.iter().map(Filter::to_query_pair));
        self
    }

    /// `order=col.asc,col2.desc`; nothing when there are no clauses
    pub fn push_order(&mut self, orders: &[OrderClause]) -> &mut Self {
        if !orders.is_empty() {
            let rendered: Vec<String> = orders.iter().map(ToString::to_string).collect();
            self.push("order", rendered.join(","));
        }
        self
    }

    pub fn push_limit(&mut self, limit: Option<usize>) -> &mut Self {
        if let Some(limit) = limit {
            self.push("limit", limit.to_string());
        }
        self
    }

    pub fn push_offset(&mut self, offset: Option<usize>) -> &mut Self {
        if let Some(offset) = offset {
            self.push("offset", offset.to_string());
        }
        self
    }

    /// `select=col1,col2`, or `select=*` when no columns are projected
    pub fn push_select(&mut self, columns: &[String]) -> &mut Self {
        if columns.is_empty() {
            self.push("select", "*")
        } else {
            self.push("select", columns.join(","))
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Value of the first parameter named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded` query string
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish()
    }

    /// `endpoint?query`, or the bare endpoint when there are no parameters
    pub fn append_to(&self, endpoint: &str) -> String {
        if self.is_empty() {
            endpoint.to_string()
        } else {
            format!("{}?{}", endpoint, self.encode())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction_normalization() {
        assert_eq!(OrderDirection::parse_lenient("DESC"), OrderDirection::Desc);
        assert_eq!(OrderDirection::parse_lenient("asc"), OrderDirection::Asc);
        assert_eq!(OrderDirection::parse_lenient("sideways"), OrderDirection::Asc);
        assert_eq!(OrderDirection::parse_lenient(""), OrderDirection::Asc);
        assert_eq!(OrderDirection::parse_lenient(" desc"), OrderDirection::Asc);
    }

    #[test]
    fn test_order_param() {
        let mut params = QueryParams::new();
        params.push_order(&[
            OrderClause::new("created_at", OrderDirection::Desc),
            OrderClause::new("name", OrderDirection::Asc),
        ]);
        assert_eq!(params.get("order"), Some("created_at.desc,name.asc"));
    }

    #[test]
    fn test_encode_keeps_insertion_order() {
        let mut params = QueryParams::new();
        params
            .push_filters(&[Filter::eq("user_id", "u1")])
            .push_limit(Some(10))
            .push_offset(None)
            .push_select(&[]);
        assert_eq!(params.encode(), "user_id=eq.u1&limit=10&select=*");
    }

    #[test]
    fn test_encode_escapes_reserved_characters() {
        let mut params = QueryParams::new();
        params.push_filters(&[Filter::is_in("id", [1, 2])]);
        assert_eq!(params.encode(), "id=in.%281%2C2%29");
    }

    #[test]
    fn test_append_to_without_params() {
        let params = QueryParams::new();
        assert_eq!(params.append_to("http://x/rest/v1/t"), "http://x/rest/v1/t");
    }
}
