//! 애플리케이션 환경 설정 모듈
//!
//! 설정 파일 경로처럼 프로세스 전역에서 공유되는 값을 환경 변수에서 읽어옵니다.

use std::env;
use std::path::PathBuf;

use log::{error, info};

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_FILE_VAR: &str = "REDIS_EXECUTOR_CONFIG";

/// 환경 변수가 없을 때 사용하는 설정 파일 경로
pub const DEFAULT_CONFIG_FILE: &str = "config/database.json";

/// 프로세스 전역 설정 경로 제공자
pub struct AppEnv;

impl AppEnv {
    /// PROFILE 환경변수에 따라 `.env` 파일을 로드합니다.
    ///
    /// * `PROFILE=dev` - `.env.dev`
    /// * `PROFILE=prod` - `.env.prod`
    /// * 기타 - `.env`
    ///
    /// 파일이 없어도 실패하지 않습니다. 이미 설정된 환경 변수는 덮어쓰지 않습니다.
    pub fn load() {
        let profile = env::var("PROFILE").unwrap_or_default();

        match Self::env_file_for_profile(&profile) {
            Some(file) => match dotenv::from_filename(file) {
                Ok(_) => info!("{} 파일 로드 됨", file),
                Err(e) => error!("{} 파일 로드 실패: {}", file, e),
            },
            None => {
                dotenv::dotenv().ok();
            }
        }
    }

    /// 프로필 이름에 대응하는 `.env` 파일 이름
    ///
    /// 알 수 없는 프로필은 `None` 이며 기본 `.env` 탐색을 사용합니다.
    pub fn env_file_for_profile(profile: &str) -> Option<&'static str> {
        match profile {
            "prod" => Some(".env.prod"),
            "dev" => Some(".env.dev"),
            _ => None,
        }
    }

    /// 데이터베이스 설정 파일 경로를 반환합니다.
    ///
    /// # Environment Variables
    ///
    /// - `REDIS_EXECUTOR_CONFIG`: 설정 파일 경로 (기본값: `config/database.json`)
    pub fn database_config_file() -> PathBuf {
        Self::config_file_from(env::var(CONFIG_FILE_VAR).ok())
    }

    /// 환경 변수 값에서 설정 파일 경로를 결정합니다. 비어 있거나 공백뿐이면 기본값입니다.
    pub fn config_file_from(value: Option<String>) -> PathBuf {
        value
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }
}
