//! # Core Module
//!
//! 크레이트 전역에서 공유하는 에러 타입을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **ConfigError**: 설정 파일 로딩/검증 실패 (I/O 이전에 즉시 실패)
//! - **TransportError**: Redis 연결, 인증, 명령 실행 실패
//! - **ExecutorError**: 실행기 생성 시 위 두 에러를 감싸는 타입

pub mod errors;

pub use errors::*;
