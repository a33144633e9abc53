//! MongoDB 연결 관리
//!
//! 저장소 설정의 `mongodb` 백엔드를 선택했을 때만 사용됩니다.
//!
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::connect(&config.storage).await?;
//! let users = database.get_database().collection::<UserM>("users");
//! ```

use mongodb::bson::doc;
use mongodb::{options::ClientOptions, Client};
use log::info;

use crate::config::StorageConfig;

/// MongoDB 클라이언트와 대상 데이터베이스 이름
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 클라이언트를 만들고 `ping`으로 연결을 확인합니다.
    pub async fn connect(config: &StorageConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
        client_options.app_name = Some("miniblog".to_string());
        client_options.max_pool_size = Some(config.mongodb_max_pool_size);

        let client = Client::with_options(client_options)?;

        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!(database = config.database.as_str(); "MongoDB connected");

        Ok(Self {
            client,
            database_name: config.database.clone(),
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}
