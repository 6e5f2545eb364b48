// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REGISTERED: &str = "auth.registered";
pub const AUTH_CONNECT_OK: &str = "auth.connect.ok";
pub const AUTH_CONNECT_REJECTED: &str = "auth.connect.rejected";
pub const AUTH_DISCONNECT: &str = "auth.disconnect";
pub const AUTH_IDENTIFY_REJECTED: &str = "auth.identify.rejected";
