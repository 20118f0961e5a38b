//! Configuration constants for the Vibent backend

/// Test constants for use across all backend tests
#[cfg(test)]
pub mod test;

/// Default server configuration
pub mod server {
    /// Default HTTP listening host
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default HTTP server port
    pub const DEFAULT_PORT: u16 = 8080;

    /// Service name reported by logs and the health endpoint
    pub const SERVICE_NAME: &str = "vibent-backend";
}

/// Wallet authentication configuration
pub mod auth {
    /// Default name of the session cookie
    pub const DEFAULT_COOKIE_NAME: &str = "vibent_session";

    /// Default session lifetime (7 days)
    pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

    /// Default nonce challenge lifetime (5 minutes)
    pub const DEFAULT_NONCE_TTL_SECS: u64 = 5 * 60;

    /// Number of random bytes in a nonce (hex-encoded in the challenge)
    pub const NONCE_BYTE_LENGTH: usize = 16;

    /// Chain label embedded in the challenge message
    pub const CHAIN_LABEL: &str = "BNB Smart Chain";

    /// Human-readable validity window shown in the challenge message
    pub const NONCE_VALIDITY_LABEL: &str = "5m";

    /// Role granted to every session
    pub const SESSION_ROLE: &str = "user";

    /// Role granted to the creator of an organization
    pub const ORG_OWNER_ROLE: &str = "owner";
}

/// API endpoint paths, shared between the router and tests
pub mod api {
    pub const HEALTH_ENDPOINT: &str = "/health";
    pub const NONCE_ENDPOINT: &str = "/nonce";
    pub const VERIFY_ENDPOINT: &str = "/verify";
    pub const PROFILE_ENDPOINT: &str = "/profile";
    pub const LOGOUT_ENDPOINT: &str = "/logout";
    pub const ORG_CHECK_ENDPOINT: &str = "/org/check";
    pub const ORG_REGISTER_ENDPOINT: &str = "/org/register";
}
