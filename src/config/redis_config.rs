//! Redis 접속 설정 로딩 모듈
//!
//! JSON 설정 파일의 `redis` 섹션을 읽어 [`ConnectionConfig`] 로 변환합니다.
//! 모든 검증은 네트워크 연결 이전에 끝나며, 실패 시 [`ConfigError`] 를 반환합니다.
//!
//! # 설정 파일 형식
//!
//! ```json
//! {
//!   "redis": {
//!     "host": "127.0.0.1",
//!     "port": 6379,
//!     "password": "secret",
//!     "connect_timeout_ms": 5000,
//!     "operation_timeout_ms": 3000
//!   }
//! }
//! ```
//!
//! `host`, `port`, `password` 는 필수이며 이 순서대로 검사합니다.
//! 타임아웃 필드는 선택이며 `0` 은 타임아웃 없음을 의미합니다.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::core::errors::{ConfigError, ConfigResult};

/// 설정 파일에서 Redis 설정을 담는 최상위 키
pub const REDIS_SECTION: &str = "redis";

/// 기본 연결 타임아웃 (밀리초)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// 기본 명령 타임아웃 (밀리초)
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 3_000;

/// 설정 파일 최상위 문서. `redis` 외의 키는 무시합니다.
#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(default)]
    redis: Option<Value>,
}

/// 타입 검사 전의 `redis` 섹션
///
/// 필드가 없거나 `null` 이면 `None` 이 되어 `FieldMissing` 으로 이어지고,
/// 타입 검사는 `host` → `port` → `password` 순서로 직접 수행합니다.
#[derive(Debug, Default, Deserialize)]
struct RedisSection {
    host: Option<Value>,
    port: Option<Value>,
    password: Option<Value>,
    connect_timeout_ms: Option<Value>,
    operation_timeout_ms: Option<Value>,
}

/// Redis 접속 설정
///
/// 생성 이후에는 변경되지 않습니다. `Debug` 출력 시 비밀번호는 가려집니다.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    host: String,
    port: u16,
    password: String,
    connect_timeout_ms: u64,
    operation_timeout_ms: u64,
}

impl ConnectionConfig {
    /// 기본 타임아웃으로 설정을 생성합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = ConnectionConfig::new("127.0.0.1", 6379, "secret");
    /// let executor = RedisExecutor::connect(config, 0)?;
    /// ```
    pub fn new(host: impl Into<String>, port: u16, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            password: password.into(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            operation_timeout_ms: DEFAULT_OPERATION_TIMEOUT_MS,
        }
    }

    /// 연결 타임아웃과 명령 타임아웃을 밀리초 단위로 지정합니다.
    pub fn with_timeouts(mut self, connect_timeout_ms: u64, operation_timeout_ms: u64) -> Self {
        self.connect_timeout_ms = connect_timeout_ms;
        self.operation_timeout_ms = operation_timeout_ms;
        self
    }

    /// 설정 파일을 읽어 `redis` 섹션을 검증합니다.
    ///
    /// # Errors
    ///
    /// * `ConfigError::FileNotFound` - 파일이 없거나 읽을 수 없음
    /// * `ConfigError::Parse` - JSON 오류, `redis` 섹션 누락, 필드 타입 불일치
    /// * `ConfigError::FieldMissing` - `host` → `port` → `password` 순으로 첫 번째 누락 필드
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;

        Self::from_json_str(path, &contents)
    }

    /// 이미 읽어 둔 JSON 문서에서 설정을 추출합니다.
    ///
    /// `path` 는 에러 메시지에만 사용됩니다.
    pub fn from_json_str(path: impl AsRef<Path>, contents: &str) -> ConfigResult<Self> {
        let path = path.as_ref();
        let parse_error = |reason: String| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        };
        let missing = |field: &'static str| ConfigError::FieldMissing {
            path: path.to_path_buf(),
            field,
        };

        let document: ConfigDocument =
            serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))?;

        let section: RedisSection = match document.redis {
            Some(section @ Value::Object(_)) => {
                serde_json::from_value(section).map_err(|e| parse_error(e.to_string()))?
            }
            None => {
                return Err(parse_error(format!("missing `{}` section", REDIS_SECTION)));
            }
            Some(_) => {
                return Err(parse_error(format!("`{}` section must be an object", REDIS_SECTION)));
            }
        };

        let host = match section.host {
            Some(Value::String(host)) => host,
            Some(_) => return Err(parse_error("`redis.host` must be a string".to_string())),
            None => return Err(missing("host")),
        };

        let port = section
            .port
            .ok_or_else(|| missing("port"))?
            .as_u64()
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| parse_error("`redis.port` must be an integer in 0..=65535".to_string()))?;

        let password = match section.password {
            Some(Value::String(password)) => password,
            Some(_) => return Err(parse_error("`redis.password` must be a string".to_string())),
            None => return Err(missing("password")),
        };

        let connect_timeout_ms = optional_millis(section.connect_timeout_ms, "connect_timeout_ms")
            .map_err(parse_error)?
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS);
        let operation_timeout_ms =
            optional_millis(section.operation_timeout_ms, "operation_timeout_ms")
                .map_err(parse_error)?
                .unwrap_or(DEFAULT_OPERATION_TIMEOUT_MS);

        Ok(Self {
            host,
            port,
            password,
            connect_timeout_ms,
            operation_timeout_ms,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// 연결 타임아웃. `0` 으로 설정된 경우 `None`
    pub fn connect_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.connect_timeout_ms)
    }

    /// 명령(읽기/쓰기) 타임아웃. `0` 으로 설정된 경우 `None`
    pub fn operation_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.operation_timeout_ms)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"***")
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("operation_timeout_ms", &self.operation_timeout_ms)
            .finish()
    }
}

fn optional_millis(value: Option<Value>, field: &str) -> Result<Option<u64>, String> {
    match value {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| format!("`redis.{}` must be a non-negative integer", field)),
    }
}

fn non_zero_millis(millis: u64) -> Option<Duration> {
    (millis > 0).then(|| Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("redis_executor_")
            .suffix(".json")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_temp_config(
            r#"{"redis": {"host": "10.0.0.5", "port": 6380, "password": "pw"}}"#,
        );

        let config = ConnectionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host(), "10.0.0.5");
        assert_eq!(config.port(), 6380);
        assert_eq!(config.password(), "pw");
        assert_eq!(
            config.connect_timeout(),
            Some(Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS))
        );
        assert_eq!(
            config.operation_timeout(),
            Some(Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS))
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");
        let error = ConnectionConfig::from_file(&path).unwrap_err();

        assert!(matches!(error, ConfigError::FileNotFound { .. }));
        assert_eq!(error.path(), &path);
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = ConnectionConfig::from_file(dir.path()).unwrap_err();
        assert!(matches!(error, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_redis_section() {
        let error = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"mysql": {"host": "localhost"}}"#,
        )
        .unwrap_err();

        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let error = ConnectionConfig::from_json_str("db.json", "{ not json").unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_redis_section_must_be_object() {
        let error =
            ConnectionConfig::from_json_str("db.json", r#"{"redis": "localhost:6379"}"#)
                .unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));

        let error = ConnectionConfig::from_json_str("db.json", r#"{"redis": null}"#).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_password_names_the_file() {
        let file = write_temp_config(r#"{"redis": {"host": "localhost", "port": 6379}}"#);

        let error = ConnectionConfig::from_file(file.path()).unwrap_err();
        match &error {
            ConfigError::FieldMissing { field, .. } => assert_eq!(*field, "password"),
            other => panic!("Expected FieldMissing, got {:?}", other),
        }
        assert!(error.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_fields_are_checked_in_order() {
        // 모든 필드 누락 - host 가 먼저 보고됨
        let error = ConnectionConfig::from_json_str("db.json", r#"{"redis": {}}"#).unwrap_err();
        assert!(matches!(error, ConfigError::FieldMissing { field: "host", .. }));

        // host 만 존재 - port 가 보고됨
        let error =
            ConnectionConfig::from_json_str("db.json", r#"{"redis": {"host": "h"}}"#).unwrap_err();
        assert!(matches!(error, ConfigError::FieldMissing { field: "port", .. }));
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let error = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"redis": {"host": "h", "port": null, "password": "pw"}}"#,
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::FieldMissing { field: "port", .. }));
    }

    #[test]
    fn test_wrong_port_type_is_parse_error() {
        let error = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"redis": {"host": "h", "port": "6379", "password": "pw"}}"#,
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));

        let error = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"redis": {"host": "h", "port": 70000, "password": "pw"}}"#,
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_wrong_string_field_types_are_parse_errors() {
        let error = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"redis": {"host": "h", "port": 6379, "password": 1234}}"#,
        )
        .unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));

        // host 타입 오류가 뒤쪽 port 누락보다 먼저 보고됨
        let error =
            ConnectionConfig::from_json_str("db.json", r#"{"redis": {"host": 10}}"#).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_document_must_be_an_object() {
        let error = ConnectionConfig::from_json_str("db.json", r#""redis""#).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let config = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"mysql": {"host": "db"},
                "redis": {"host": "h", "port": 6379, "password": "pw", "db": 3}}"#,
        )
        .unwrap();
        assert_eq!(config.host(), "h");
    }

    #[test]
    fn test_empty_password_is_present() {
        let config = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"redis": {"host": "h", "port": 6379, "password": ""}}"#,
        )
        .unwrap();
        assert_eq!(config.password(), "");
    }

    #[test]
    fn test_custom_and_disabled_timeouts() {
        let config = ConnectionConfig::from_json_str(
            "db.json",
            r#"{"redis": {"host": "h", "port": 6379, "password": "pw",
                          "connect_timeout_ms": 250, "operation_timeout_ms": 0}}"#,
        )
        .unwrap();

        assert_eq!(config.connect_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.operation_timeout(), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ConnectionConfig::new("h", 6379, "super-secret");
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }
}
