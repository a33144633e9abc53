//! 서버, 저장소, 비밀번호 해싱 설정
//!
//! 모든 구조체는 `#[serde(default)]`이므로 YAML에 일부 키만 적어도 됩니다.

use serde::{Deserialize, Serialize};

/// 기본 bcrypt cost
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// HTTP 서버 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 리스닝 주소 (`host:port`). 포트 0이면 OS가 할당합니다.
    pub addr: String,
    /// 워커 스레드 수
    pub workers: usize,
    /// 종료 신호 수신 후 처리 중인 요청을 기다리는 최대 시간(초)
    pub shutdown_timeout_secs: u64,
    /// CORS 허용 Origin 목록. 비어 있으면 모든 Origin 허용
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            workers: 4,
            shutdown_timeout_secs: 10,
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// 저장소 구현 선택
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// 프로세스 메모리 (재시작 시 초기화)
    Memory,
    /// MongoDB
    #[serde(alias = "mongo")]
    MongoDb,
}

/// 저장소 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub mongodb_uri: String,
    pub database: String,
    /// MongoDB 커넥션 풀 최대 크기
    pub mongodb_max_pool_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database: "miniblog".to_string(),
            mongodb_max_pool_size: 10,
        }
    }
}

/// 패스워드 해싱 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// bcrypt cost (4-31)
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}
