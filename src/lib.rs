//! miniblog 백엔드
//!
//! actix-web 기반의 계층형 블로그 서버입니다. 현재는 사용자 생성 API와
//! 헬스 체크, 그리고 이를 감싸는 미들웨어 체인과 graceful shutdown을 제공합니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Middlewares   │ ← Recovery, RequestId, NoCache, CORS, Secure
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 바인딩, 검증, 응답 작성
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (비밀번호 해싱, 에러 분류)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← Store / UserStore (메모리 또는 MongoDB)
//! └─────────────────┘
//! ```
//!
//! 의존성은 [`routes::AppState::new`]에서 생성자로 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use miniblog::config::AppConfig;
//! use miniblog::repositories::DataStore;
//! use miniblog::server::{wait_for_shutdown, MiniBlogServer};
//!
//! let (config, _) = AppConfig::load(None)?;
//! let store = Arc::new(DataStore::connect(&config.storage).await?);
//! MiniBlogServer::new(&config, store).run(wait_for_shutdown()).await?;
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod logging;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod server;
pub mod services;
pub mod version;
