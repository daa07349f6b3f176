//! Redis 실행기
//!
//! JSON 설정 파일에서 접속 정보를 읽어 인증된 Redis 세션을 열고,
//! 네 가지 연산(`select`, `set`, `get`, `keys`)을 통일된 에러 기록과 함께 제공합니다.
//!
//! # Features
//!
//! - **설정 검증**: `host` → `port` → `password` 순서의 즉시 실패 검증
//! - **세션 관리**: 연결, 인증, 네임스페이스 선택, drop 시 종료
//! - **에러 기록**: 통신 에러는 한 번 기록 후 실패값으로 변환
//! - **3상태 조회**: 값 / 없음 / 실패 구분
//! - **커서 순회**: `SCAN` 기반 배치 이터레이터
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  RedisExecutor  │ ← 파사드, 에러 기록
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ KeyValueSession │ ← RedisSession / MemorySession
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Redis 서버     │
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use redis_executor::config::AppEnv;
//! use redis_executor::caching::RedisExecutor;
//!
//! AppEnv::load();
//! let mut executor = RedisExecutor::from_env(0)?;
//! executor.set("greeting", "hello", None);
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod utils;

pub use caching::{KeyValueSession, Lookup, MemorySession, RedisExecutor, RedisSession};
pub use config::{AppEnv, ConnectionConfig};
pub use crate::core::errors::{ConfigError, ExecutorError, TransportError, TransportKind};
