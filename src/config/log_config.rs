//! 로그 설정
//!
//! `level`은 `trace|debug|info|warn|error|off` 중 하나이며, 알 수 없는 값은 `info`로
//! 처리합니다. `RUST_LOG` 환경 변수가 있으면 모듈별 필터가 추가로 적용됩니다.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// 로그 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// 탭으로 구분된 사람이 읽기 쉬운 형식
    Console,
    /// 한 줄에 JSON 객체 하나
    Json,
}

/// 로그 출력 대상
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    Stderr,
}

/// 로거 초기화 옵션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    pub level: String,
    pub format: LogFormat,
    /// `true`이면 로그에 `file:line` 호출 위치를 남기지 않습니다.
    pub disable_caller: bool,
    pub output: LogOutput,
}

impl LogOptions {
    /// 설정된 레벨 문자열을 해석합니다. 잘못된 값이면 `Info`입니다.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Console,
            disable_caller: false,
            output: LogOutput::Stderr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_falls_back_to_info() {
        let mut options = LogOptions::default();
        assert_eq!(options.level_filter(), LevelFilter::Info);

        options.level = "DEBUG".to_string();
        assert_eq!(options.level_filter(), LevelFilter::Debug);

        options.level = "verbose".to_string();
        assert_eq!(options.level_filter(), LevelFilter::Info);
    }
}
