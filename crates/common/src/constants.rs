use http::header::HeaderName;

pub const HEADER_X_IOPROOF_SIG: HeaderName = HeaderName::from_static("x-ioproof-sig");
pub const HEADER_X_IOPROOF_SIG_TS: HeaderName = HeaderName::from_static("x-ioproof-sig-ts");
pub const HEADER_X_IOPROOF_KEY_ID: HeaderName = HeaderName::from_static("x-ioproof-key-id");

/// Prefix of every signable message. Changing it breaks every other SDK.
pub const MESSAGE_PREFIX: &str = "ioproof:v1:";
pub const MESSAGE_SEPARATOR: char = '|';

pub const WELL_KNOWN_PATH: &str = "/.well-known/ioproof.json";
pub const DIRECTORY_VERSION: &str = "1.0";
pub const SIGNATURE_ALGORITHM: &str = "ed25519";
pub const DEFAULT_CACHE_MAX_AGE_SECONDS: u32 = 3600;

pub const ED25519_KEY_LENGTH: usize = 32;
pub const SHA256_HEX_LENGTH: usize = 64;
