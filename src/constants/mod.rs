pub mod urls;

/// User agent sent with every outbound request.
pub const USER_AGENT: &str = "cpm-cli";

/// Branch the raw-content URLs resolve against.
pub const DEFAULT_BRANCH: &str = "master";

/// Default destination for fetched source files.
pub const DEFAULT_SRC_DIR: &str = "./src";

/// Timeout applied to every HTTP request.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Timeout applied to unpack/build commands.
pub const COMMAND_TIMEOUT_SECS: u64 = 600;
