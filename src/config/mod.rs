//! # Configuration Module
//!
//! Redis 접속 설정을 관리하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! - [`app_env`] - 설정 파일 경로 등 프로세스 전역 환경 값
//! - [`redis_config`] - JSON 설정 파일의 `redis` 섹션 로딩 및 검증
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use redis_executor::config::{AppEnv, ConnectionConfig};
//!
//! AppEnv::load();
//! let config = ConnectionConfig::from_file(AppEnv::database_config_file())?;
//! println!("Redis will connect to {}:{}", config.host(), config.port());
//! ```
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 설정 파일 경로 (기본값: config/database.json)
//! export REDIS_EXECUTOR_CONFIG="/etc/myapp/database.json"
//!
//! # .env 파일 선택 (dev → .env.dev, prod → .env.prod)
//! export PROFILE="dev"
//! ```

pub mod app_env;
pub mod redis_config;

pub use app_env::AppEnv;
pub use redis_config::ConnectionConfig;
