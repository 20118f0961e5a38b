pub mod auth;
pub mod orgs;

pub use auth::*;
pub use orgs::*;
