//! Error codes for failures detected before a request is sent.

/// No API user, API key, user name or client IP configured.
pub const MISSING_CREDENTIALS: u32 = 1010101;
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Authentication information must be provided.";

/// A required command or contact parameter is absent or empty.
pub const MISSING_PARAMETERS: u32 = 1010102;

/// A parameter is present but cannot be used, e.g. a domain without a TLD.
pub const INVALID_PARAMETER: u32 = 1010103;

/// The command has no client support.
pub const NOT_IMPLEMENTED: u32 = 1010104;
