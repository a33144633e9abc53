//! # HTTP 서버 수명 주기
//!
//! ```text
//! Created ──bind──▶ Listening ──종료 신호──▶ Draining ──▶ Stopped
//!    │                  │                       │
//!    └─ Bind 에러       └─ Listener 에러         └─ ShutdownTimeout
//! ```
//!
//! 종료 신호를 받으면 새 연결 수락을 멈추고, 처리 중인 요청이 끝나기를
//! `server.shutdown_timeout_secs` 동안 기다립니다.
//!
//! ```rust,ignore
//! let server = MiniBlogServer::new(&config, store);
//! server.run(wait_for_shutdown()).await?;
//! ```

pub mod shutdown;

use std::fmt;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::HttpServer;
use log::{error, info, warn};
use thiserror::Error;

use crate::config::{AppConfig, ServerConfig};
use crate::repositories::Store;
use crate::routes::{build_app, AppState};

pub use shutdown::wait_for_shutdown;

/// 서버 수명 주기 에러
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("listener stopped unexpectedly: {0}")]
    Listener(#[source] io::Error),

    #[error("in-flight requests did not finish within {0:?}")]
    ShutdownTimeout(Duration),

    #[error("failed to wait for shutdown signal: {0}")]
    Signal(#[source] io::Error),
}

/// 서버 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Created,
    Listening,
    Draining,
    Stopped,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerState::Created => "created",
            ServerState::Listening => "listening",
            ServerState::Draining => "draining",
            ServerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

fn enter(state: ServerState) {
    info!(state = state.to_string().as_str(); "Server {}", state);
}

/// 아직 바인딩하지 않은 서버
pub struct MiniBlogServer {
    config: ServerConfig,
    state: AppState,
}

impl MiniBlogServer {
    pub fn new(config: &AppConfig, store: Arc<dyn Store>) -> Self {
        enter(ServerState::Created);

        Self {
            config: config.server.clone(),
            state: AppState::new(store, config),
        }
    }

    /// 바인딩 후 `shutdown`이 완료될 때까지 요청을 처리합니다.
    pub async fn run<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = io::Result<()>>,
    {
        self.bind()?.run_until(shutdown).await
    }

    /// 리스닝 소켓을 엽니다. 포트 0이면 OS가 포트를 고릅니다.
    pub fn bind(self) -> Result<RunningServer, ServerError> {
        let drain_timeout = Duration::from_secs(self.config.shutdown_timeout_secs);
        let state = self.state;

        let http_server = HttpServer::new(move || build_app(state.clone()))
            .workers(self.config.workers)
            .disable_signals()
            // 강제 종료는 drain 기한 이후에만 일어나게 한다
            .shutdown_timeout(self.config.shutdown_timeout_secs + 1)
            .bind(self.config.addr.as_str())
            .map_err(|source| ServerError::Bind {
                addr: self.config.addr.clone(),
                source,
            })?;

        let local_addrs = http_server.addrs();
        let server = http_server.run();

        for addr in &local_addrs {
            info!("Listening on http://{}", addr);
        }
        enter(ServerState::Listening);

        Ok(RunningServer {
            server,
            local_addrs,
            drain_timeout,
        })
    }
}

/// 요청을 받고 있는 서버
pub struct RunningServer {
    server: Server,
    local_addrs: Vec<SocketAddr>,
    drain_timeout: Duration,
}

impl RunningServer {
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.local_addrs
    }

    /// `shutdown`이 끝나면 graceful shutdown을 시작하고, drain 기한 안에
    /// 처리 중인 요청이 모두 끝나면 `Ok(())`를 반환합니다.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = io::Result<()>>,
    {
        let handle = self.server.handle();
        let mut listener = actix_web::rt::spawn(self.server);

        let signal = tokio::select! {
            finished = &mut listener => {
                return match finished {
                    Ok(Ok(())) => {
                        enter(ServerState::Stopped);
                        Ok(())
                    }
                    Ok(Err(e)) => {
                        error!("Listener failed: {}", e);
                        Err(ServerError::Listener(e))
                    }
                    Err(e) => Err(ServerError::Listener(io::Error::other(e.to_string()))),
                };
            }
            signal = shutdown => signal,
        };

        enter(ServerState::Draining);
        info!("Shutting down server, waiting up to {:?} for in-flight requests", self.drain_timeout);

        let drained = tokio::time::timeout(self.drain_timeout, handle.stop(true)).await;

        if drained.is_err() {
            warn!("Server forced to shutdown: drain deadline of {:?} exceeded", self.drain_timeout);
            return Err(ServerError::ShutdownTimeout(self.drain_timeout));
        }

        enter(ServerState::Stopped);
        info!("Server exiting");

        signal.map_err(ServerError::Signal)
    }
}
