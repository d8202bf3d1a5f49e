use std::env;

use anyhow::Context;

pub const MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_filter: String,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    /// `DATABASE_URL=memory` 이면 DB 없이 메모리 저장소로 뜬다.
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} 값이 올바르지 않습니다: {}", key, raw)),
        _ => Ok(default),
    }
}

/// 환경 변수(.env 포함)에서 설정을 읽는다. `DB_URI` 는 `DATABASE_URL` 의 예전 이름이다.
pub fn get_configuration() -> anyhow::Result<Settings> {
    let database_url = env::var("DATABASE_URL")
        .or_else(|_| env::var("DB_URI"))
        .context("DATABASE_URL 환경 변수가 설정되어야 합니다")?;

    Ok(Settings {
        database_url,
        host: var_or("APP_HOST", "127.0.0.1"),
        port: parse_var("APP_PORT", 8080)?,
        log_filter: var_or("RUST_LOG", "info,sqlx=warn"),
        db_max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
    })
}
