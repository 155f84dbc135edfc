//! Client holding connection settings and the shared HTTP transport

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use tracing::debug;

use crate::config::ClientConfig;
use crate::endpoints::{APIKEY_HEADER, PREFER_HEADER, REST_PATH, RETURN_REPRESENTATION};
use crate::error::{Result, SupabaseError};
use crate::table::Table;

/// Supabase REST client
#[derive(Debug, Clone)]
pub struct Client {
    /// Project URL without trailing slash
    base_url: String,
    /// Anon or service key
    api_key: String,
    /// HTTP client
    http: reqwest::Client,
}

impl Client {
    /// Build a client. No network I/O happens here
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.effective_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self::with_http_client(config, http))
    }

    /// Build a client around an existing transport
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Query builder bound to `name`. The name is not validated here
    pub fn table(&self, name: impl Into<String>) -> Table<'_> {
        Table::new(self, name.into())
    }

    /// `<base>/rest/v1/<table>`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}{}/{}", self.base_url, REST_PATH, table)
    }

    /// Send a prepared request on the shared transport
    pub async fn execute(&self, request: reqwest::Request) -> Result<Response> {
        Ok(self.http.execute(request).await?)
    }

    /// Request with `apikey` and, for a non-empty token, `Authorization: Bearer`
    pub(crate) fn request(&self, method: Method, url: &str, token: &str) -> RequestBuilder {
        debug!("REST request: {} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header(APIKEY_HEADER, &self.api_key);
        if !token.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        request
    }

    pub(crate) fn read_request(&self, url: &str, token: &str) -> RequestBuilder {
        self.request(Method::GET, url, token)
            .header(ACCEPT, "application/json")
    }

    /// Request asking the server to echo affected rows, with an optional JSON body
    pub(crate) fn write_request(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<Vec<u8>>,
    ) -> RequestBuilder {
        let request = self
            .request(method, url, token)
            .header(PREFER_HEADER, RETURN_REPRESENTATION);
        match body {
            Some(body) => request.header(CONTENT_TYPE, "application/json").body(body),
            None => request,
        }
    }

    /// Send and read the full body; status >= 400 becomes [`SupabaseError::Server`]
    pub(crate) async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        debug!("REST {} response: {}", operation, status);

        let body = response.text().await?;
        if status.as_u16() >= 400 {
            return Err(SupabaseError::Server {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
