//! # 에러 기록 유틸리티
//!
//! Redis 통신 중 잡힌 에러를 구조화된 기록([`ErrorRecord`])으로 만들어
//! [`ErrorReporter`] 에게 전달합니다. 기본 구현인 [`LogReporter`] 는 `log` 크레이트로
//! ERROR 레벨 기록을 남깁니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use redis_executor::utils::error_log::{CollectingReporter, ErrorReporter};
//!
//! let reporter = Arc::new(CollectingReporter::default());
//! let executor = RedisExecutor::with_session(session, 0, reporter.clone())?;
//!
//! executor.get("user:1");
//! for record in reporter.records() {
//!     println!("{}: {}", record.operation, record.message);
//! }
//! ```

use std::error::Error;
use std::sync::{Arc, Mutex};

use log::error;

use crate::utils::trace_format::capture_trace;

/// 잡힌 에러 하나에 대한 기록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// 실패한 연산 이름 (`connect`, `select`, `set`, `get`, `keys`, `scan`)
    pub operation: &'static str,
    /// 에러 메시지
    pub message: String,
    /// 포맷팅된 트레이스 줄 목록 (`#0 ...`, `#1 ...`)
    pub trace: Vec<String>,
}

impl ErrorRecord {
    /// 에러에서 기록을 생성합니다. 트레이스는 이 시점에 수집됩니다.
    pub fn from_error(operation: &'static str, error: &(dyn Error + 'static)) -> Self {
        Self {
            operation,
            message: error.to_string(),
            trace: capture_trace(error),
        }
    }

    /// 메시지와 트레이스를 여러 줄 문자열로 합칩니다.
    pub fn render(&self) -> String {
        let mut rendered = format!("[redis:{}] {}", self.operation, self.message);
        for line in &self.trace {
            rendered.push('\n');
            rendered.push_str(line);
        }
        rendered
    }
}

/// 에러 기록 수신자
///
/// 기록 실패는 별도로 처리하지 않습니다.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, record: ErrorRecord);
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for Arc<R> {
    fn report(&self, record: ErrorRecord) {
        (**self).report(record);
    }
}

/// `log::error!` 로 기록하는 기본 수신자
///
/// 기록 하나당 로그 엔트리 하나를 남기며, 트레이스는 메시지 아래에 여러 줄로 붙습니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, record: ErrorRecord) {
        error!("{}", record.render());
    }
}

/// 받은 기록을 메모리에 보관하는 수신자
///
/// 테스트나 호출자가 실패 원인을 직접 확인해야 하는 경우에 사용합니다.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    records: Mutex<Vec<ErrorRecord>>,
}

impl CollectingReporter {
    /// 지금까지 받은 기록의 복사본
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, record: ErrorRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{TransportError, TransportKind};

    #[test]
    fn test_record_from_transport_error() {
        let error = TransportError::new(TransportKind::Connect, "Connection refused");
        let record = ErrorRecord::from_error("connect", &error);

        assert_eq!(record.operation, "connect");
        assert_eq!(record.message, "connect error: Connection refused");
    }

    #[test]
    fn test_render_appends_trace_lines() {
        let record = ErrorRecord {
            operation: "get",
            message: "io error: broken pipe".to_string(),
            trace: vec!["#0 caused by: broken pipe".to_string(), "#1 app::main".to_string()],
        };

        assert_eq!(
            record.render(),
            "[redis:get] io error: broken pipe\n#0 caused by: broken pipe\n#1 app::main"
        );
    }

    #[test]
    fn test_collecting_reporter_through_arc() {
        let reporter = Arc::new(CollectingReporter::default());
        let shared: Arc<dyn ErrorReporter> = reporter.clone();

        assert!(reporter.is_empty());
        shared.report(ErrorRecord {
            operation: "keys",
            message: "timeout error: read timed out".to_string(),
            trace: Vec::new(),
        });

        assert_eq!(reporter.len(), 1);
        assert_eq!(reporter.records()[0].operation, "keys");
    }
}
