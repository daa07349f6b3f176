//! # 트레이스 포맷팅 유틸리티
//!
//! 에러 기록에 첨부할 호출 트레이스를 수집하고 한 줄씩 포맷팅합니다.
//!
//! 트레이스는 두 부분으로 구성됩니다.
//!
//! 1. 에러의 `source()` 체인 (`caused by: ...`)
//! 2. `std::backtrace::Backtrace` 프레임 (`RUST_BACKTRACE=1` 또는 `RUST_LIB_BACKTRACE=1` 인 경우에만)
//!
//! Output:
//! ```text
//! #0 caused by: Connection refused (os error 111)
//! #1 redis_executor::caching::executor::RedisExecutor::get (at ./src/caching/executor.rs:212:17)
//! #2 app::main (at ./src/main.rs:10:5)
//! ```

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;

/// 트레이스 한 줄을 포맷팅합니다.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(trace_line(3, "  app::main "), "#3 app::main");
/// ```
pub fn trace_line(index: usize, frame: &str) -> String {
    format!("#{} {}", index, frame.trim())
}

/// 에러의 원인 체인과 현재 백트레이스를 포맷팅된 줄 목록으로 수집합니다.
///
/// 백트레이스가 비활성화된 경우 원인 체인만 포함됩니다.
pub fn capture_trace(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut frames: Vec<String> = source_chain(error)
        .into_iter()
        .map(|cause| format!("caused by: {}", cause))
        .collect();

    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        frames.extend(backtrace_frames(&backtrace.to_string()));
    }

    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| trace_line(index, frame))
        .collect()
}

/// `source()` 체인을 바깥쪽부터 순서대로 나열합니다. 에러 자신은 제외합니다.
pub fn source_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = error.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    causes
}

/// `Backtrace` 의 Display 출력을 프레임 단위로 분리합니다.
///
/// `N: symbol` 줄을 프레임 시작으로 보고, 뒤따르는 `at file:line` 줄은
/// 같은 프레임에 괄호로 붙입니다.
pub fn backtrace_frames(rendered: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();

    for line in rendered.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                last.push_str(&format!(" (at {})", location));
                continue;
            }
        }

        let symbol = match line.split_once(": ") {
            Some((index, symbol)) if index.chars().all(|c| c.is_ascii_digit()) => symbol,
            _ => line,
        };
        frames.push(symbol.to_string());
    }

    frames
}
