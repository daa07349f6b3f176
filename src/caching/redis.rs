//! # Redis 세션 구현
//!
//! `redis` 크레이트의 블로킹 [`Connection`] 하나를 감싸
//! [`KeyValueSession`] 을 구현합니다.
//!
//! ## 연결 절차
//!
//! 1. `host:port` 로 TCP 연결 (연결 타임아웃 적용)
//! 2. 읽기/쓰기 타임아웃 설정
//! 3. `AUTH password` (비밀번호가 빈 문자열이면 생략)
//!
//! 네임스페이스 선택(`SELECT`)은 실행기가 담당합니다.
//!
//! ## 연결 관리
//!
//! 연결 풀이나 자동 재연결은 없습니다. 세션이 drop 되면 소켓이 닫힙니다.

use std::time::Duration;

use log::debug;
use redis::{Client, Connection};

use crate::caching::session::{KeyValueSession, ScanStep};
use crate::config::redis_config::ConnectionConfig;
use crate::core::errors::{TransportError, TransportKind, TransportResult};

/// 블로킹 Redis 연결 기반 세션
pub struct RedisSession {
    conn: Connection,
}

impl RedisSession {
    /// 설정에 따라 연결하고 인증까지 마친 세션을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `TransportKind::Connect` / `TransportKind::Timeout` - 연결 실패
    /// * `TransportKind::Auth` - 인증 거부
    pub fn open(config: &ConnectionConfig) -> TransportResult<Self> {
        let client = Client::open((config.host().to_string(), config.port()))
            .map_err(|e| TransportError::during(TransportKind::Connect, e))?;

        let conn = match config.connect_timeout() {
            Some(timeout) => client.get_connection_with_timeout(timeout),
            None => client.get_connection(),
        }
        .map_err(|e| TransportError::during(TransportKind::Connect, e))?;

        conn.set_read_timeout(config.operation_timeout())?;
        conn.set_write_timeout(config.operation_timeout())?;

        debug!("Redis 연결 수립: {}:{}", config.host(), config.port());

        let mut session = Self { conn };
        session.authenticate(config.password())?;
        Ok(session)
    }

    /// `AUTH` 명령으로 인증합니다. 빈 비밀번호는 인증 없는 서버로 간주합니다.
    pub fn authenticate(&mut self, password: &str) -> TransportResult<()> {
        if password.is_empty() {
            debug!("비밀번호가 비어 있어 AUTH 를 생략합니다");
            return Ok(());
        }

        redis::cmd("AUTH")
            .arg(password)
            .query::<()>(&mut self.conn)
            .map_err(|e| TransportError::during(TransportKind::Auth, e))
    }
}

impl KeyValueSession for RedisSession {
    fn select(&mut self, namespace: i64) -> TransportResult<()> {
        redis::cmd("SELECT")
            .arg(namespace)
            .query::<()>(&mut self.conn)
            .map_err(TransportError::from)
    }

    fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> TransportResult<()> {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some((unit, amount)) = expiry_args(expiry) {
            cmd.arg(unit).arg(amount);
        }
        cmd.query::<()>(&mut self.conn).map_err(TransportError::from)
    }

    fn get(&mut self, key: &str) -> TransportResult<Option<String>> {
        redis::cmd("GET")
            .arg(key)
            .query::<Option<String>>(&mut self.conn)
            .map_err(TransportError::from)
    }

    fn keys(&mut self, pattern: &str) -> TransportResult<Vec<String>> {
        redis::cmd("KEYS")
            .arg(pattern)
            .query::<Vec<String>>(&mut self.conn)
            .map_err(TransportError::from)
    }

    fn scan(&mut self, pattern: &str, cursor: u64, count: usize) -> TransportResult<ScanStep> {
        let (cursor, keys) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count.max(1))
            .query::<(u64, Vec<String>)>(&mut self.conn)?;

        Ok(ScanStep { cursor, keys })
    }
}

/// 만료 시간을 `SET` 옵션으로 변환합니다.
///
/// * `None` 또는 0 - 만료 없음
/// * 초 단위로 나누어 떨어짐 - `EX seconds`
/// * 그 외 - `PX milliseconds` (1ms 미만은 1ms 로 올림)
pub(crate) fn expiry_args(expiry: Option<Duration>) -> Option<(&'static str, u64)> {
    let expiry = expiry.filter(|duration| !duration.is_zero())?;

    if expiry.subsec_nanos() == 0 {
        Some(("EX", expiry.as_secs()))
    } else {
        let millis = u64::try_from(expiry.as_millis()).unwrap_or(u64::MAX);
        Some(("PX", millis.max(1)))
    }
}
