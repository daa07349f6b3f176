//! 캐싱 계층 모듈
//!
//! Redis 세션을 감싸는 실행기와 세션 구현들을 제공합니다.
//!
//! # 주요 기능
//!
//! - 설정 파일 기반 연결, 인증, 네임스페이스 선택
//! - `select` / `set` / `get` / `keys` 전달 및 통합 에러 기록
//! - `SCAN` 기반 커서 순회
//! - 서버 없이 동작하는 인메모리 세션
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use redis_executor::caching::RedisExecutor;
//!
//! let mut cache = RedisExecutor::open("config/database.json", 0)?;
//! cache.set("user:123", "{\"name\":\"John\"}", None);
//! let user = cache.get("user:123");
//! let user_keys = cache.keys("user:*");
//! ```

pub mod executor;
pub mod memory;
pub mod redis;
pub mod scan;
pub mod session;

pub use executor::{Lookup, RedisExecutor};
pub use memory::MemorySession;
pub use self::redis::RedisSession;
pub use scan::KeyScan;
pub use session::{KeyValueSession, ScanStep};
