//! # 에러 타입 정의
//!
//! 설정 로딩 단계와 Redis 통신 단계에서 발생하는 에러를 분리해서 정의합니다.
//!
//! ## 에러 분류
//!
//! | 타입 | 발생 시점 | 호출자에게 전달되는가 |
//! |------|-----------|------------------------|
//! | [`ConfigError`] | 설정 파일 로딩/검증 | 항상 `Err` 로 전달 |
//! | [`TransportError`] | 연결, 인증, 명령 실행 | 생성 시에만 `Err`, 런타임 연산에서는 기록 후 실패값으로 변환 |
//! | [`ExecutorError`] | `RedisExecutor` 생성 | 위 두 가지를 감싸서 전달 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use redis_executor::core::errors::{ConfigError, ExecutorError};
//!
//! match RedisExecutor::open("config/database.json", 0) {
//!     Ok(executor) => { /* ... */ }
//!     Err(ExecutorError::Config(ConfigError::FieldMissing { field, .. })) => {
//!         log::error!("설정 누락: {}", field);
//!     }
//!     Err(e) => log::error!("Redis 초기화 실패: {}", e),
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 설정 파일 로딩 에러
///
/// 네트워크 I/O 이전 단계에서 발생하며, 항상 호출자에게 그대로 전달됩니다.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 설정 파일이 없거나 읽을 수 없음
    #[error("Configuration file not found: \"{}\"", path.display())]
    FileNotFound { path: PathBuf },

    /// 설정 파일은 있지만 `redis` 섹션을 해석할 수 없음
    ///
    /// JSON 문법 오류, `redis` 키 누락, 필드 타입 불일치가 모두 여기에 해당합니다.
    #[error("Unable to parse configuration file \"{}\": {}", path.display(), reason)]
    Parse { path: PathBuf, reason: String },

    /// `redis` 섹션에 필수 필드가 없거나 `null`
    #[error("Configuration file \"{}\" is missing required field `redis.{}`", path.display(), field)]
    FieldMissing { path: PathBuf, field: &'static str },
}

impl ConfigError {
    /// 에러가 가리키는 설정 파일 경로
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::FileNotFound { path }
            | ConfigError::Parse { path, .. }
            | ConfigError::FieldMissing { path, .. } => path,
        }
    }
}

/// 통신 에러 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// TCP 연결 실패 또는 연결 거부
    Connect,
    /// AUTH 거부
    Auth,
    /// 연결 이후의 소켓 I/O 실패
    Io,
    /// 연결 또는 명령 타임아웃
    Timeout,
    /// 서버가 에러 응답을 반환함 (WRONGTYPE, 잘못된 DB 인덱스 등)
    Response,
    /// 응답을 기대한 타입으로 해석하지 못함
    Protocol,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportKind::Connect => "connect",
            TransportKind::Auth => "auth",
            TransportKind::Io => "io",
            TransportKind::Timeout => "timeout",
            TransportKind::Response => "response",
            TransportKind::Protocol => "protocol",
        };
        f.write_str(name)
    }
}

/// Redis 서버와의 통신 에러
///
/// 원본 `redis::RedisError` 가 있는 경우 `source()` 로 그대로 노출됩니다.
#[derive(Error, Debug)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    kind: TransportKind,
    message: String,
    #[source]
    source: Option<redis::RedisError>,
}

impl TransportError {
    /// 원본 에러 없이 통신 에러를 생성합니다.
    pub fn new(kind: TransportKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// 특정 단계(연결, 인증)에서 발생한 Redis 에러를 분류합니다.
    ///
    /// 타임아웃은 단계와 관계없이 `Timeout` 으로 유지됩니다.
    pub fn during(stage: TransportKind, err: redis::RedisError) -> Self {
        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else {
            stage
        };
        Self {
            kind,
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<redis::RedisError> for TransportError {
    fn from(err: redis::RedisError) -> Self {
        let kind = if err.is_timeout() {
            TransportKind::Timeout
        } else if err.is_connection_refusal() {
            TransportKind::Connect
        } else if err.is_io_error() || err.is_connection_dropped() {
            TransportKind::Io
        } else {
            match err.kind() {
                redis::ErrorKind::AuthenticationFailed => TransportKind::Auth,
                redis::ErrorKind::TypeError | redis::ErrorKind::ParseError => {
                    TransportKind::Protocol
                }
                _ => TransportKind::Response,
            }
        };
        Self {
            kind,
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// `RedisExecutor` 생성 에러
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Redis session could not be established: {0}")]
    Transport(#[from] TransportError),
}

/// 설정 로딩 결과 타입 별칭
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 세션 연산 결과 타입 별칭
pub type TransportResult<T> = Result<T, TransportError>;

/// 실행기 생성 결과 타입 별칭
pub type ExecutorResult<T> = Result<T, ExecutorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_field_missing_message_contains_path_and_field() {
        let error = ConfigError::FieldMissing {
            path: PathBuf::from("/etc/app/database.json"),
            field: "password",
        };
        let message = error.to_string();

        assert!(message.contains("/etc/app/database.json"));
        assert!(message.contains("redis.password"));
    }

    #[test]
    fn test_config_error_path_accessor() {
        let error = ConfigError::Parse {
            path: PathBuf::from("cfg.json"),
            reason: "missing `redis` section".to_string(),
        };
        assert_eq!(error.path(), &PathBuf::from("cfg.json"));
    }

    #[test]
    fn test_transport_error_without_source() {
        let error = TransportError::new(TransportKind::Io, "connection reset");

        assert_eq!(error.kind(), TransportKind::Io);
        assert_eq!(error.to_string(), "io error: connection reset");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_transport_error_from_redis_response_error() {
        let redis_error = redis::RedisError::from((
            redis::ErrorKind::ResponseError,
            "ERR DB index is out of range",
        ));
        let error = TransportError::from(redis_error);

        assert_eq!(error.kind(), TransportKind::Response);
        assert!(error.message().contains("DB index is out of range"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_transport_error_during_auth_stage() {
        let redis_error = redis::RedisError::from((
            redis::ErrorKind::ResponseError,
            "WRONGPASS invalid username-password pair",
        ));
        let error = TransportError::during(TransportKind::Auth, redis_error);

        assert_eq!(error.kind(), TransportKind::Auth);
    }

    #[test]
    fn test_executor_error_wraps_config_error_transparently() {
        let error: ExecutorError = ConfigError::FileNotFound {
            path: PathBuf::from("nope.json"),
        }
        .into();

        assert!(matches!(error, ExecutorError::Config(_)));
        assert!(error.to_string().starts_with("Configuration file not found"));
    }
}
