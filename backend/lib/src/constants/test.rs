//! Test constants for use across all backend tests
//!
//! This module provides centralized test data constants to ensure consistency
//! and clarity in tests. Using these constants prevents accidental mismatches
//! and makes it clear where test data originates from.

/// JWT secret used by test services
pub const TEST_JWT_SECRET: &str = "test-only-secret-not-for-production";

/// Test organization data
pub mod orgs {
    /// Default organization name
    pub const DEFAULT_ORG_NAME: &str = "Test Organization";

    /// Default organization domain
    pub const DEFAULT_ORG_DOMAIN: &str = "test-org.example";
}
