//! 종료 신호 대기

use std::io;

/// SIGINT 또는 SIGTERM(Windows에서는 Ctrl+C)을 받을 때까지 기다립니다.
pub async fn wait_for_shutdown() -> io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::select! {
            _ = sigterm.recv() => log::info!("SIGTERM received"),
            _ = sigint.recv() => log::info!("SIGINT received"),
        }
        Ok(())
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        log::info!("Ctrl+C received");
        Ok(())
    }
}
