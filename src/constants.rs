pub const API_NAME: &str = "[carm-api-rust]";

/// Service name reported to the trace collector.
pub const SERVICE_NAME: &str = "carm";

pub const OTLP_TRACES_ENDPOINT: &str = "http://jaeger:4318/v1/traces";

/// The single account accepted by `/login`.
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

pub const DEFAULT_JWT_SECRET: &str = "some_valeu";
pub const TOKEN_TTL_HOURS: i64 = 24;
