//! miniblog 서버 진입점
//!
//! 설정 로드 → 로거 초기화 → 저장소 연결 → HTTP 서버 실행 순서로 동작하며,
//! SIGINT/SIGTERM을 받으면 처리 중인 요청을 마무리한 뒤 종료합니다.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use log::{error, info};
use miniblog::config::AppConfig;
use miniblog::repositories::{DataStore, Store};
use miniblog::server::{wait_for_shutdown, MiniBlogServer};
use miniblog::{logging, version};

/// miniblog 서버
#[derive(Parser, Debug)]
#[command(name = "miniblog", about = "A minimal blog backend", disable_version_flag = true)]
struct Cli {
    /// 설정 파일 경로. 생략하면 `$HOME/.miniblog/miniblog.yaml`, `./miniblog.yaml` 순으로 찾습니다.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 버전 정보를 출력하고 종료합니다. `--version=raw`는 구조체 전체를 출력합니다.
    #[arg(
        short = 'V',
        long,
        value_enum,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true"
    )]
    version: VersionFlag,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum VersionFlag {
    False,
    True,
    Raw,
}

#[actix_web::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.version {
        VersionFlag::False => {}
        VersionFlag::True => {
            println!("{}", version::get());
            return ExitCode::SUCCESS;
        }
        VersionFlag::Raw => {
            println!("{:#?}", version::get());
            return ExitCode::SUCCESS;
        }
    }

    let env_file = load_env_file();

    let (config, config_file) = match AppConfig::load(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("로거 초기화 실패: {}", e);
        return ExitCode::FAILURE;
    }

    if let Some(env_file) = env_file {
        info!("{} 파일 로드 됨", env_file);
    }
    match &config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let store: Arc<dyn Store> = match DataStore::connect(&config.storage).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("저장소 연결 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(git_version = version::get().git_version; "Starting miniblog");
    let server = MiniBlogServer::new(&config, store);
    match server.run(wait_for_shutdown()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// `PROFILE`에 맞는 `.env` 파일을 로드하고 로드한 파일 이름을 반환합니다.
///
/// * `PROFILE=dev` - `.env.dev`
/// * `PROFILE=prod` - `.env.prod`
/// * 그 외 또는 미설정 - `.env`
///
/// 로거가 아직 없으므로 결과는 호출자가 나중에 기록합니다.
fn load_env_file() -> Option<String> {
    let profile = std::env::var("PROFILE").unwrap_or_default();

    let filename = match profile.as_str() {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => ".env",
    };

    dotenv::from_filename(filename).ok().map(|_| filename.to_string())
}
