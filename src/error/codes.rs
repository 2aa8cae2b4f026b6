/// Error code registry
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 4000-4999: Execution errors
/// - 7000-7999: Validation errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1007;
    pub const CONFIG_UNSUPPORTED_FORMAT: u16 = 1010;
    pub const CONFIG_PATH_ERROR: u16 = 1006;

    // Execution errors (4000-4999)
    pub const EXEC_GENERIC: u16 = 4000;
    pub const EXEC_COMMAND_NOT_FOUND: u16 = 4001;
    pub const EXEC_SUBPROCESS_FAILED: u16 = 4003;
    pub const EXEC_SIGNAL_RECEIVED: u16 = 4005;
    pub const EXEC_SPAWN_FAILED: u16 = 4007;
    pub const EXEC_OUTPUT_ERROR: u16 = 4008;
    pub const EXEC_PLATFORM_UNSUPPORTED: u16 = 4011;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;
    pub const VALIDATION_REQUIRED_FIELD: u16 = 7001;
    pub const VALIDATION_INVALID_TYPE: u16 = 7002;
    pub const VALIDATION_UNKNOWN_FIELD: u16 = 7010;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1006 => "Configuration path error",
        1007 => "Failed to parse configuration",
        1010 => "Unsupported configuration file format",

        4000 => "Generic execution error",
        4001 => "Command not found",
        4003 => "Subprocess failed",
        4005 => "Subprocess terminated by signal",
        4007 => "Failed to spawn subprocess",
        4008 => "Failed to relay subprocess output",
        4011 => "Platform not supported",

        7000 => "Generic validation error",
        7001 => "Required field is missing",
        7002 => "Invalid value type",
        7010 => "Unknown configuration field",

        _ => "Unknown error code",
    }
}
