//! 애플리케이션 설정
//!
//! 설정은 다음 순서로 결정됩니다. 뒤에 오는 값이 앞의 값을 덮어씁니다.
//!
//! 1. 구조체 기본값
//! 2. YAML 설정 파일 (`--config` 로 지정, 없으면 `$HOME/.miniblog/miniblog.yaml`,
//!    `./miniblog.yaml` 순으로 탐색)
//! 3. `MINIBLOG__<SECTION>__<KEY>` 환경 변수 (`.env` 파일 포함).
//!    예: `MINIBLOG__SERVER__SHUTDOWN_TIMEOUT_SECS=5`
//!
//! ```yaml
//! server:
//!   addr: 127.0.0.1:8080
//!   shutdown_timeout_secs: 10
//! log:
//!   level: debug
//!   format: json
//! storage:
//!   backend: mongodb
//!   mongodb_uri: mongodb://localhost:27017
//! password:
//!   bcrypt_cost: 10
//! ```

pub mod data_config;
pub mod log_config;

pub use data_config::*;
pub use log_config::*;

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 설정 파일을 찾을 기본 디렉터리 (`$HOME` 기준)
const RECOMMENDED_HOME_DIR: &str = ".miniblog";

/// 기본 설정 파일 이름
const DEFAULT_CONFIG_NAME: &str = "miniblog.yaml";

/// 환경 변수 접두사. 섹션과 키는 `__`로 구분한다.
const ENV_PREFIX: &str = "MINIBLOG__";
const ENV_SEPARATOR: &str = "__";

/// 설정 로딩 에러
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load configuration: {0}")]
    Extract(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// 전체 애플리케이션 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogOptions,
    pub storage: StorageConfig,
    pub password: PasswordConfig,
}

impl AppConfig {
    /// 설정 파일과 프로세스 환경 변수로부터 설정을 읽습니다.
    ///
    /// `path`를 명시했는데 파일이 없으면 에러입니다. 명시하지 않았고 기본 위치에도
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let file = match path {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => search_config_file(),
        };

        let config: Self = Self::figment(file.as_deref()).extract()?;
        config.validate()?;

        Ok((config, file))
    }

    /// 기본값 → YAML 파일 → 환경 변수 순으로 병합한 figment
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Yaml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
    }

    /// 값의 범위를 검사합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            return Err(ConfigError::Invalid("server.workers must be at least 1".to_string()));
        }
        if self.server.shutdown_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.shutdown_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(4..=31).contains(&self.password.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "password.bcrypt_cost must be between 4 and 31, got {}",
                self.password.bcrypt_cost
            )));
        }
        if self.storage.mongodb_max_pool_size == 0 {
            return Err(ConfigError::Invalid(
                "storage.mongodb_max_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `$HOME/.miniblog/miniblog.yaml`, `./miniblog.yaml` 순으로 존재하는 파일을 찾습니다.
fn search_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(RECOMMENDED_HOME_DIR).join(DEFAULT_CONFIG_NAME));
    }
    candidates.push(PathBuf::from(DEFAULT_CONFIG_NAME));

    candidates.into_iter().find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.yaml",
                "server:\n  addr: 0.0.0.0:9090\nlog:\n  format: json\n",
            )?;

            let (config, file) = AppConfig::load(Some(Path::new("custom.yaml"))).unwrap();

            assert_eq!(file, Some(PathBuf::from("custom.yaml")));
            assert_eq!(config.server.addr, "0.0.0.0:9090");
            assert_eq!(config.server.shutdown_timeout_secs, 10);
            assert_eq!(config.log.format, LogFormat::Json);
            assert_eq!(config.storage.backend, StorageBackend::Memory);
            assert_eq!(config.password.bcrypt_cost, DEFAULT_BCRYPT_COST);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "custom.yaml",
                "server:\n  addr: 0.0.0.0:9090\n  cors_allowed_origins:\n    - http://a.test\n",
            )?;
            jail.set_env("MINIBLOG__SERVER__ADDR", "0.0.0.0:8443");
            jail.set_env("MINIBLOG__SERVER__SHUTDOWN_TIMEOUT_SECS", "5");
            jail.set_env("MINIBLOG__LOG__LEVEL", "debug");
            jail.set_env("MINIBLOG__LOG__OUTPUT", "stdout");
            jail.set_env("MINIBLOG__STORAGE__BACKEND", "mongodb");
            jail.set_env("MINIBLOG__PASSWORD__BCRYPT_COST", "4");

            let (config, _) = AppConfig::load(Some(Path::new("custom.yaml"))).unwrap();

            assert_eq!(config.server.addr, "0.0.0.0:8443");
            assert_eq!(config.server.shutdown_timeout_secs, 5);
            assert_eq!(config.server.cors_allowed_origins, vec!["http://a.test".to_string()]);
            assert_eq!(config.log.level, "debug");
            assert_eq!(config.log.output, LogOutput::Stdout);
            assert_eq!(config.storage.backend, StorageBackend::MongoDb);
            assert_eq!(config.password.bcrypt_cost, 4);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value_is_reported() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", "server:\n  workers: 2\n")?;
            jail.set_env("MINIBLOG__SERVER__WORKERS", "many");

            match AppConfig::load(Some(Path::new("custom.yaml"))) {
                Err(ConfigError::Extract(err)) => assert_eq!(err.path, vec!["server", "workers"]),
                other => panic!("unexpected result: {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn test_env_out_of_range_fails_validation() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.yaml", "password:\n  bcrypt_cost: 10\n")?;
            jail.set_env("MINIBLOG__PASSWORD__BCRYPT_COST", "3");

            let result = AppConfig::load(Some(Path::new("custom.yaml")));
            assert!(matches!(result, Err(ConfigError::Invalid(_))));
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut config = AppConfig::default();
        config.password.bcrypt_cost = 3;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.server.shutdown_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let missing = AppConfig::load(Some(Path::new("/nonexistent/miniblog.yaml")));
        assert!(matches!(missing, Err(ConfigError::NotFound(_))));
    }
}
