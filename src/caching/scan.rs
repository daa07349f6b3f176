//! # 커서 기반 키 순회
//!
//! `KEYS` 는 전체 키 공간을 한 번에 훑는 블로킹 명령입니다. [`KeyScan`] 은 `SCAN` 을
//! 반복 호출해 서버 왕복 한 번당 한 배치씩 키를 돌려줍니다.
//!
//! ```rust,ignore
//! let mut scan = executor.scan("session:*", 100);
//! for batch in &mut scan {
//!     for key in batch {
//!         println!("{}", key);
//!     }
//! }
//! if scan.failed() {
//!     // 중간에 통신 에러가 발생했고 이미 기록되었습니다.
//!     // scan.cursor() 부터 다시 시작할 수 있습니다.
//! }
//! ```
//!
//! `SCAN` 은 순회 도중 추가/삭제된 키에 대해 중복 또는 누락이 있을 수 있습니다.

use crate::caching::executor::RedisExecutor;
use crate::caching::session::KeyValueSession;

/// `SCAN` 기반 배치 이터레이터
///
/// 빈 중간 배치는 건너뜁니다. 커서 0 을 받거나 통신 에러가 발생하면 끝납니다.
pub struct KeyScan<'a, S: KeyValueSession> {
    executor: &'a mut RedisExecutor<S>,
    pattern: String,
    count: usize,
    cursor: u64,
    finished: bool,
    failed: bool,
}

impl<'a, S: KeyValueSession> KeyScan<'a, S> {
    pub(crate) fn new(
        executor: &'a mut RedisExecutor<S>,
        pattern: &str,
        cursor: u64,
        count: usize,
    ) -> Self {
        Self {
            executor,
            pattern: pattern.to_string(),
            count: count.max(1),
            cursor,
            finished: false,
            failed: false,
        }
    }

    /// 다음 `SCAN` 호출에 사용할 커서. 실패 후 재개 지점으로 사용할 수 있습니다.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// 통신 에러로 순회가 중단되었는지 여부
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// 순회가 끝났는지 여부 (정상 종료 또는 실패)
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<S: KeyValueSession> Iterator for KeyScan<'_, S> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let Some(step) = self.executor.scan_step(&self.pattern, self.cursor, self.count) else {
                self.failed = true;
                self.finished = true;
                return None;
            };

            self.cursor = step.cursor;
            if step.is_last() {
                self.finished = true;
            }
            if !step.keys.is_empty() {
                return Some(step.keys);
            }
        }
        None
    }
}
