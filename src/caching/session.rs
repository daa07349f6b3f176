//! # 키-값 세션 인터페이스
//!
//! [`RedisExecutor`](crate::caching::executor::RedisExecutor) 가 저장소와 대화하는 경계입니다.
//! 실제 Redis 연결([`RedisSession`](crate::caching::redis::RedisSession))과
//! 프로세스 내부 저장소([`MemorySession`](crate::caching::memory::MemorySession))가
//! 같은 인터페이스를 구현합니다.
//!
//! 모든 메서드는 블로킹 호출이며, 한 번의 시도 결과를 그대로 반환합니다 (재시도 없음).

use std::time::Duration;

use crate::core::errors::TransportResult;

/// `SCAN` 한 단계의 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStep {
    /// 다음 호출에 넘길 커서. `0` 이면 순회가 끝났음을 의미합니다.
    pub cursor: u64,
    /// 이번 단계에서 반환된 키 (비어 있을 수 있음)
    pub keys: Vec<String>,
}

impl ScanStep {
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// 단일 연결 위에서 동작하는 키-값 세션
///
/// 구현체는 스레드 간 공유를 보장하지 않습니다. 모든 연산은 `&mut self` 를 요구합니다.
pub trait KeyValueSession {
    /// 활성 네임스페이스(DB 인덱스)를 변경합니다.
    fn select(&mut self, namespace: i64) -> TransportResult<()>;

    /// 값을 저장합니다. `expiry` 가 `Some` 이면 해당 시간 후 만료됩니다.
    fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> TransportResult<()>;

    /// 값을 조회합니다. 키가 없으면 `Ok(None)`.
    fn get(&mut self, key: &str) -> TransportResult<Option<String>>;

    /// 패턴과 일치하는 모든 키를 한 번에 반환합니다.
    fn keys(&mut self, pattern: &str) -> TransportResult<Vec<String>>;

    /// 커서 기반으로 패턴과 일치하는 키를 일부 반환합니다.
    ///
    /// `count` 는 서버에 전달하는 힌트이며 정확한 배치 크기를 보장하지 않습니다.
    fn scan(&mut self, pattern: &str, cursor: u64, count: usize) -> TransportResult<ScanStep>;
}
