//! # 인메모리 세션
//!
//! Redis 서버 없이 [`KeyValueSession`] 을 제공하는 프로세스 내부 저장소입니다.
//! 로컬 개발과 테스트에서 `RedisExecutor` 를 그대로 사용할 수 있게 해 줍니다.
//!
//! Redis 와 같은 규칙을 따릅니다.
//!
//! - 기본 16개 네임스페이스 (`0..16`), 범위를 벗어난 `SELECT` 는 응답 에러
//! - 만료된 키는 접근 시점에 제거 (lazy expiry)
//! - `KEYS` / `SCAN MATCH` 는 Redis glob 규칙
//! - `SCAN` 의 `COUNT` 는 패턴 필터 이전의 검사 개수

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::caching::session::{KeyValueSession, ScanStep};
use crate::core::errors::{TransportError, TransportKind, TransportResult};
use crate::utils::glob::glob_match;

/// Redis 기본 설정과 같은 네임스페이스 개수
pub const DEFAULT_NAMESPACES: usize = 16;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// 프로세스 내부 키-값 세션
#[derive(Debug, Clone)]
pub struct MemorySession {
    namespaces: Vec<HashMap<String, Entry>>,
    current: usize,
}

impl Default for MemorySession {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACES)
    }
}

impl MemorySession {
    /// 지정한 개수의 네임스페이스를 가진 빈 저장소를 만듭니다. 최소 1개입니다.
    pub fn new(namespaces: usize) -> Self {
        Self {
            namespaces: vec![HashMap::new(); namespaces.max(1)],
            current: 0,
        }
    }

    /// 현재 네임스페이스에 살아 있는 키 개수
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.namespaces[self.current]
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(&mut self) {
        let now = Instant::now();
        self.namespaces[self.current].retain(|_, entry| !entry.is_expired(now));
    }

    fn sorted_keys(&mut self) -> Vec<String> {
        self.purge_expired();
        let mut keys: Vec<String> = self.namespaces[self.current].keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueSession for MemorySession {
    fn select(&mut self, namespace: i64) -> TransportResult<()> {
        match usize::try_from(namespace) {
            Ok(index) if index < self.namespaces.len() => {
                self.current = index;
                Ok(())
            }
            _ => Err(TransportError::new(
                TransportKind::Response,
                "ERR DB index is out of range",
            )),
        }
    }

    fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> TransportResult<()> {
        let expires_at = expiry
            .filter(|duration| !duration.is_zero())
            .map(|duration| Instant::now() + duration);

        self.namespaces[self.current].insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    fn get(&mut self, key: &str) -> TransportResult<Option<String>> {
        let now = Instant::now();
        let namespace = &mut self.namespaces[self.current];

        let expired = match namespace.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };
        if expired {
            namespace.remove(key);
        }
        Ok(None)
    }

    fn keys(&mut self, pattern: &str) -> TransportResult<Vec<String>> {
        Ok(self
            .sorted_keys()
            .into_iter()
            .filter(|key| glob_match(pattern, key))
            .collect())
    }

    fn scan(&mut self, pattern: &str, cursor: u64, count: usize) -> TransportResult<ScanStep> {
        let keys = self.sorted_keys();
        let start = usize::try_from(cursor).unwrap_or(usize::MAX).min(keys.len());
        let end = start.saturating_add(count.max(1)).min(keys.len());

        let batch = keys[start..end]
            .iter()
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect();
        let next = if end >= keys.len() { 0 } else { end as u64 };

        Ok(ScanStep {
            cursor: next,
            keys: batch,
        })
    }
}
