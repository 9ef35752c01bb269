/// Binary and package display name.
pub const APP_NAME: &str = "assetkit";

/// Pipeline file looked up in the project root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "assetkit.toml";

/// Output directory used when the configuration does not name one.
pub const DEFAULT_DESTINATION: &str = "assets";

/// Number of hex characters of a content hash used as a `?v=` revision token.
pub const REV_HASH_LEN: usize = 12;
