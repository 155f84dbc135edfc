//! Query builder and CRUD operations for a single table
//!
//! Chain methods take the builder by value and hand it back, so a query reads
//! left to right. Terminal operations consume the builder; clone a configured
//! [`Table`] to run several queries from the same base.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::Client;
use crate::error::{Result, SupabaseError};
use crate::filter::{Filter, FilterValue};
use crate::query::{OrderClause, OrderDirection, QueryParams};

/// Filter, order, pagination and projection state for one table
#[derive(Debug, Clone)]
pub struct Table<'a> {
    client: &'a Client,
    name: String,
    filters: Vec<Filter>,
    orders: Vec<OrderClause>,
    limit: Option<usize>,
    offset: Option<usize>,
    columns: Vec<String>,
}

impl<'a> Table<'a> {
    pub(crate) fn new(client: &'a Client, name: String) -> Self {
        Self {
            client,
            name,
            filters: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
            columns: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn orders(&self) -> &[OrderClause] {
        &self.orders
    }

    /// Append any filter, including pre-built groups
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn eq(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::eq(column, value))
    }

    #[must_use]
    pub fn neq(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::neq(column, value))
    }

    #[must_use]
    pub fn gt(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::gt(column, value))
    }

    #[must_use]
    pub fn lt(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::lt(column, value))
    }

    #[must_use]
    pub fn gte(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::gte(column, value))
    }

    #[must_use]
    pub fn lte(self, column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::lte(column, value))
    }

    #[must_use]
    pub fn like(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(Filter::like(column, pattern))
    }

    #[must_use]
    pub fn ilike(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filter(Filter::ilike(column, pattern))
    }

    #[must_use]
    pub fn is_in<I, V>(self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        self.filter(Filter::is_in(column, values))
    }

    #[must_use]
    pub fn and(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filter(Filter::and(filters))
    }

    #[must_use]
    pub fn or(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filter(Filter::or(filters))
    }

    /// Maximum number of rows to return; the last call wins.
    /// `limit(0)` is sent as `limit=0` and matches no rows; leave it unset for all rows.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of rows to skip; the last call wins
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add an order clause. `direction` is case-insensitive and falls back to `asc`
    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: &str) -> Self {
        self.orders
            .push(OrderClause::new(column, OrderDirection::parse_lenient(direction)));
        self
    }

    /// Columns to return; replaces any earlier projection
    #[must_use]
    pub fn select_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Parameters sent by [`Table::fetch`]
    pub fn read_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_filters(&self.filters)
            .push_order(&self.orders)
            .push_limit(self.limit)
            .push_offset(self.offset)
            .push_select(&self.columns);
        params
    }

    /// Parameters sent by [`Table::update`] and [`Table::delete`]
    pub fn filter_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_filters(&self.filters);
        params
    }

    fn endpoint(&self) -> String {
        self.client.rest_url(&self.name)
    }

    /// GET matching rows
    pub async fn fetch<T: DeserializeOwned>(self, token: &str) -> Result<Vec<T>> {
        let url = self.read_params().append_to(&self.endpoint());
        let body = self
            .client
            .send("select", self.client.read_request(&url, token))
            .await?;

        serde_json::from_str(&body).map_err(SupabaseError::Decoding)
    }

    /// POST one record (or a `Vec` of records). The server's representation is
    /// decoded back into `record`, picking up generated columns such as ids.
    pub async fn insert<T>(self, record: &mut T, token: &str) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let payload = serde_json::to_value(&*record).map_err(SupabaseError::Encoding)?;
        let sent_many = payload.is_array();
        let bytes = serde_json::to_vec(&payload).map_err(SupabaseError::Encoding)?;

        let request = self
            .client
            .write_request(Method::POST, &self.endpoint(), token, Some(bytes));
        let body = self.client.send("insert", request).await?;
        if body.trim().is_empty() {
            return Ok(());
        }

        let returned: serde_json::Value =
            serde_json::from_str(&body).map_err(SupabaseError::Decoding)?;
        let returned = match returned {
            serde_json::Value::Array(mut rows) if !sent_many && rows.len() == 1 => rows.remove(0),
            other => other,
        };
        *record = serde_json::from_value(returned).map_err(SupabaseError::Decoding)?;

        Ok(())
    }

    /// PATCH rows matching the filters and return them as updated
    pub async fn update<T, V>(self, values: &V, token: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
        V: Serialize + ?Sized,
    {
        let bytes = serde_json::to_vec(values).map_err(SupabaseError::Encoding)?;
        let url = self.filter_params().append_to(&self.endpoint());

        let request = self
            .client
            .write_request(Method::PATCH, &url, token, Some(bytes));
        let body = self.client.send("update", request).await?;

        decode_rows(&body)
    }

    /// DELETE rows matching the filters and return them
    pub async fn delete<T: DeserializeOwned>(self, token: &str) -> Result<Vec<T>> {
        let url = self.filter_params().append_to(&self.endpoint());

        let request = self
            .client
            .write_request(Method::DELETE, &url, token, None);
        let body = self.client.send("delete", request).await?;

        decode_rows(&body)
    }
}

/// Rows from a representation body; servers ignoring `Prefer` send nothing
fn decode_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(SupabaseError::Decoding)
}
