//! # Redis 실행기
//!
//! 설정 파일을 읽어 Redis 세션을 열고, 네 가지 연산(`select`, `set`, `get`, `keys`)을
//! 그대로 전달하는 파사드입니다.
//!
//! ## 에러 처리 정책
//!
//! | 단계 | 실패 시 동작 |
//! |------|--------------|
//! | 설정 로딩 | `ExecutorError::Config` 반환 (네트워크 I/O 없음) |
//! | 연결/인증/초기 SELECT | 한 번 기록 후 `ExecutorError::Transport` 반환 |
//! | 런타임 연산 | 한 번 기록 후 실패값 반환 (`false`, `Lookup::Failed`, `None`) |
//!
//! 재시도는 없습니다. 모든 통신 에러는 한 번의 시도, 한 번의 기록입니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use redis_executor::caching::executor::{Lookup, RedisExecutor};
//!
//! let mut executor = RedisExecutor::from_env(0)?;
//!
//! executor.set("session:abc", "user-1", Some(Duration::from_secs(1800)));
//! match executor.get("session:abc") {
//!     Lookup::Value(user) => println!("세션 사용자: {}", user),
//!     Lookup::Absent => println!("세션 만료"),
//!     Lookup::Failed(_) => println!("Redis 장애 (로그 참고)"),
//! }
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use crate::caching::redis::RedisSession;
use crate::caching::scan::KeyScan;
use crate::caching::session::{KeyValueSession, ScanStep};
use crate::config::app_env::AppEnv;
use crate::config::redis_config::ConnectionConfig;
use crate::core::errors::{ExecutorResult, TransportError};
use crate::utils::error_log::{ErrorRecord, ErrorReporter, LogReporter};

/// `get` 의 세 가지 결과
///
/// 키 없음과 통신 실패를 구분합니다. 빈 문자열이 저장된 경우는 `Value("")` 입니다.
#[derive(Debug)]
pub enum Lookup {
    /// 저장된 값
    Value(String),
    /// 키가 없음 (또는 만료됨)
    Absent,
    /// 통신 실패. 에러는 이미 기록되었습니다.
    Failed(TransportError),
}

impl Lookup {
    pub fn value(&self) -> Option<&str> {
        match self {
            Lookup::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }

    /// `Result<Option<String>, TransportError>` 로 변환합니다.
    pub fn into_result(self) -> Result<Option<String>, TransportError> {
        match self {
            Lookup::Value(value) => Ok(Some(value)),
            Lookup::Absent => Ok(None),
            Lookup::Failed(error) => Err(error),
        }
    }
}

/// Redis 세션 파사드
///
/// 인스턴스 하나가 세션 하나를 소유합니다. 런타임 연산은 `&mut self` 를 요구하므로
/// 여러 스레드에서 쓰려면 워커마다 인스턴스를 따로 만들거나 외부에서 동기화해야 합니다.
/// 세션은 인스턴스가 drop 될 때 닫힙니다.
pub struct RedisExecutor<S: KeyValueSession = RedisSession> {
    session: S,
    namespace: i64,
    config: Option<ConnectionConfig>,
    reporter: Arc<dyn ErrorReporter>,
}

impl RedisExecutor<RedisSession> {
    /// `AppEnv` 가 가리키는 설정 파일로 실행기를 생성합니다.
    ///
    /// # Errors
    ///
    /// * `ExecutorError::Config` - 설정 파일 없음, 파싱 실패, 필드 누락
    /// * `ExecutorError::Transport` - 연결, 인증, 네임스페이스 선택 실패
    pub fn from_env(namespace: i64) -> ExecutorResult<Self> {
        Self::open(AppEnv::database_config_file(), namespace)
    }

    /// 지정한 설정 파일로 실행기를 생성합니다.
    pub fn open(path: impl AsRef<Path>, namespace: i64) -> ExecutorResult<Self> {
        let config = ConnectionConfig::from_file(path)?;
        Self::connect(config, namespace)
    }

    /// 설정으로 연결하고, 에러는 `log` 로 기록합니다.
    pub fn connect(config: ConnectionConfig, namespace: i64) -> ExecutorResult<Self> {
        Self::connect_with_reporter(config, namespace, Arc::new(LogReporter))
    }

    /// 설정으로 연결하고, 에러는 지정한 수신자에게 기록합니다.
    pub fn connect_with_reporter(
        config: ConnectionConfig,
        namespace: i64,
        reporter: Arc<dyn ErrorReporter>,
    ) -> ExecutorResult<Self> {
        let session = match RedisSession::open(&config) {
            Ok(session) => session,
            Err(error) => {
                reporter.report(ErrorRecord::from_error("connect", &error));
                return Err(error.into());
            }
        };

        let mut executor = Self::with_session(session, namespace, reporter)?;
        info!(
            "✅ Redis 연결 성공: {}:{} (db {})",
            config.host(),
            config.port(),
            namespace
        );
        executor.config = Some(config);
        Ok(executor)
    }
}

impl<S: KeyValueSession> RedisExecutor<S> {
    /// 이미 열린 세션 위에 실행기를 만들고 `namespace` 를 선택합니다.
    ///
    /// # Errors
    ///
    /// * `ExecutorError::Transport` - 초기 `SELECT` 실패 (한 번 기록됨)
    pub fn with_session(
        mut session: S,
        namespace: i64,
        reporter: Arc<dyn ErrorReporter>,
    ) -> ExecutorResult<Self> {
        if let Err(error) = session.select(namespace) {
            reporter.report(ErrorRecord::from_error("select", &error));
            return Err(error.into());
        }

        Ok(Self {
            session,
            namespace,
            config: None,
            reporter,
        })
    }

    /// 활성 네임스페이스를 변경합니다. 실패 시 기록 후 `false`.
    pub fn select(&mut self, namespace: i64) -> bool {
        match self.session.select(namespace) {
            Ok(()) => {
                self.namespace = namespace;
                true
            }
            Err(error) => {
                self.report("select", &error);
                false
            }
        }
    }

    /// 값을 저장합니다. 실패 시 기록 후 `false`.
    ///
    /// `expiry` 가 `None` 이거나 0 이면 만료되지 않습니다.
    pub fn set(&mut self, key: &str, value: &str, expiry: Option<Duration>) -> bool {
        match self.session.set(key, value, expiry) {
            Ok(()) => true,
            Err(error) => {
                self.report("set", &error);
                false
            }
        }
    }

    /// 값을 조회합니다.
    pub fn get(&mut self, key: &str) -> Lookup {
        match self.session.get(key) {
            Ok(Some(value)) => Lookup::Value(value),
            Ok(None) => Lookup::Absent,
            Err(error) => {
                self.report("get", &error);
                Lookup::Failed(error)
            }
        }
    }

    /// 패턴과 일치하는 모든 키를 반환합니다. 실패 시 기록 후 `None`.
    ///
    /// ## ⚠️ 프로덕션 주의사항
    ///
    /// `KEYS` 는 전체 키 공간을 한 번에 훑는 블로킹 명령이며 결과 크기에 제한이 없습니다.
    /// 키가 많은 서버에서는 [`scan`](Self::scan) 을 사용하세요.
    pub fn keys(&mut self, pattern: &str) -> Option<Vec<String>> {
        match self.session.keys(pattern) {
            Ok(keys) => Some(keys),
            Err(error) => {
                self.report("keys", &error);
                None
            }
        }
    }

    /// `SCAN` 한 단계를 실행합니다. 실패 시 기록 후 `None`.
    ///
    /// 반환된 `ScanStep::cursor` 를 다음 호출에 넘기면 이어서 순회합니다.
    pub fn scan_step(&mut self, pattern: &str, cursor: u64, count: usize) -> Option<ScanStep> {
        match self.session.scan(pattern, cursor, count) {
            Ok(step) => Some(step),
            Err(error) => {
                self.report("scan", &error);
                None
            }
        }
    }

    /// 처음부터 키를 배치 단위로 순회합니다.
    pub fn scan(&mut self, pattern: &str, count: usize) -> KeyScan<'_, S> {
        KeyScan::new(self, pattern, 0, count)
    }

    /// 이전에 중단된 커서부터 순회를 재개합니다.
    pub fn scan_from(&mut self, pattern: &str, cursor: u64, count: usize) -> KeyScan<'_, S> {
        KeyScan::new(self, pattern, cursor, count)
    }

    /// 현재 선택된 네임스페이스
    pub fn namespace(&self) -> i64 {
        self.namespace
    }

    /// 설정 파일로 생성된 경우 사용된 접속 설정
    pub fn config(&self) -> Option<&ConnectionConfig> {
        self.config.as_ref()
    }

    /// 세션을 명시적으로 닫습니다.
    pub fn close(self) {
        drop(self);
    }

    fn report(&self, operation: &'static str, error: &TransportError) {
        self.reporter.report(ErrorRecord::from_error(operation, error));
    }
}

impl<S: KeyValueSession> Drop for RedisExecutor<S> {
    fn drop(&mut self) {
        debug!("Redis 세션 종료 (db {})", self.namespace);
    }
}
