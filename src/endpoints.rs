//! Service path prefixes and protocol header names

/// Table operations (PostgREST)
pub const REST_PATH: &str = "/rest/v1";
/// Object storage
pub const STORAGE_PATH: &str = "/storage/v1";
/// Authentication (GoTrue)
pub const AUTH_PATH: &str = "/auth/v1";
/// Edge functions
pub const FUNCTIONS_PATH: &str = "/functions/v1";

pub const APIKEY_HEADER: &str = "apikey";
pub const PREFER_HEADER: &str = "Prefer";

/// Asks the server to echo the affected rows
pub const RETURN_REPRESENTATION: &str = "return=representation";
