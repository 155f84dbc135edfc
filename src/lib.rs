//! Supabase REST SDK
//!
//! Client for PostgREST-compatible REST APIs providing:
//! - Chainable filters (eq, neq, gt, gte, lt, lte, like, ilike, in)
//! - Nested `and` / `or` filter groups
//! - Ordering, pagination and column projection
//! - Table CRUD (`fetch`, `insert`, `update`, `delete`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use supabase_rest_sdk::{Client, ClientConfig, Filter};
//!
//! let client = Client::new(ClientConfig::new("https://project.supabase.co", "anon-key"))?;
//!
//! let tenants: Vec<Tenant> = client
//!     .table("tenants")
//!     .eq("user_id", "u1")
//!     .or([Filter::eq("plan", "pro"), Filter::gt("max_users", 10)])
//!     .order_by("created_at", "desc")
//!     .limit(20)
//!     .fetch(&access_token)
//!     .await?;
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod filter;
pub mod query;
pub mod table;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Result, SupabaseError};
pub use filter::{Filter, FilterOperator, FilterValue, GroupOperator};
pub use query::{OrderClause, OrderDirection, QueryParams};
pub use table::Table;
