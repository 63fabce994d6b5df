//! 데이터베이스, 서버, 실행 환경 관련 설정
//!
//! 모든 값은 환경 변수에서 읽으며, 누락되거나 파싱할 수 없는 값은 기본값을 사용합니다.
//!
//! | 환경 변수 | 기본값 | 설명 |
//! |-----------|--------|------|
//! | `ENVIRONMENT` | `production` | development / test / staging / production |
//! | `HOST` | `0.0.0.0` | 바인드 주소 |
//! | `PORT` | `8080` | 바인드 포트 |
//! | `DATABASE_URL` | `sqlite://reborn.db?mode=rwc` | SQLite 연결 URL |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | 커넥션 풀 최대 크기 |
//! | `DATABASE_ACQUIRE_TIMEOUT_SECS` | `5` | 커넥션 획득 대기 시간 |
//! | `BCRYPT_COST` | 환경별 | 4-15 범위만 허용 |
//! | `RATE_LIMIT_PER_SECOND` | `100` | 초당 허용 요청 수 |
//! | `RATE_LIMIT_BURST_SIZE` | `200` | 버스트 허용량 |

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 환경 변수를 읽어 파싱하고, 실패하면 기본값을 반환합니다.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost) = env::var("BCRYPT_COST").unwrap_or_default().parse::<u32>() {
            if (4..=15).contains(&cost) {
                return cost;
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env_or("PORT", 8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn workers() -> usize {
        env_or("SERVER_WORKERS", 4)
    }
}

pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://reborn.db?mode=rwc".to_string())
    }

    pub fn max_connections() -> u32 {
        env_or("DATABASE_MAX_CONNECTIONS", 5)
    }

    pub fn acquire_timeout() -> Duration {
        Duration::from_secs(env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 5))
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            per_second: env_or("RATE_LIMIT_PER_SECOND", 100),
            burst_size: env_or("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}
