use std::env;

use crate::constants::DEFAULT_JWT_SECRET;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub request_timeout_secs: u64,
    pub otel_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| database_url_from_parts()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            server_port: parse_or("PORT", 8080),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30),
            otel_enabled: parse_or("OTEL_ENABLED", true),
        })
    }
}

fn database_url_from_parts() -> String {
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("DB_PASSWORD").unwrap_or_else(|_| "password".to_string());
    let name = env::var("DB_NAME").unwrap_or_else(|_| "carm".to_string());

    format!("postgresql://{}:{}@{}:{}/{}?sslmode=disable", user, password, host, port, name)
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or("CARM_TEST_UNSET_VARIABLE", 8080u16), 8080);

        env::set_var("CARM_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(parse_or("CARM_TEST_GARBAGE_PORT", 8080u16), 8080);

        env::set_var("CARM_TEST_GOOD_PORT", "9090");
        assert_eq!(parse_or("CARM_TEST_GOOD_PORT", 8080u16), 9090);
    }
}
