//! 공통 유틸리티 함수 모듈
//!
//! 크레이트 전체에서 사용되는 공통 유틸리티를 제공합니다.
//!
//! # Modules
//!
//! - [`error_log`] - 잡힌 통신 에러의 구조화된 기록과 수신자
//! - [`trace_format`] - 원인 체인/백트레이스 수집 및 줄 단위 포맷팅
//! - [`glob`] - Redis 규칙의 glob 패턴 매칭

pub mod error_log;
pub mod glob;
pub mod trace_format;
