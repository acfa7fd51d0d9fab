#![allow(dead_code)]

use async_trait::async_trait;
use link_keeper::application::services::AuthService;
use link_keeper::domain::entities::{LinkFields, ShortLink};
use link_keeper::domain::repositories::{LinkRepository, SchemaRepository};
use link_keeper::error::AppError;
use link_keeper::routes;
use link_keeper::state::AppState;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// `Authorization` value for the `test:test` credentials of [`create_test_state`].
pub const AUTH_TEST: &str = "Basic dGVzdDp0ZXN0";
/// `test:wrong`
pub const AUTH_WRONG_PASSWORD: &str = "Basic dGVzdDp3cm9uZw==";

fn unavailable() -> AppError {
    AppError::connection("Database unavailable", json!({}))
}

/// Link store kept in memory; ids are generated like the database function does.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<ShortLink>>,
    down: AtomicBool,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link with a known id, bypassing validation.
    pub fn seed(&self, id: &str, url: &str, new_window: bool) {
        self.links.lock().unwrap().push(ShortLink::new(
            id.to_string(),
            url.to_string(),
            new_window,
        ));
    }

    pub fn snapshot(&self) -> Vec<ShortLink> {
        self.links.lock().unwrap().clone()
    }

    /// Makes every following call fail as if the database were unreachable.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.down.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        self.check()?;
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShortLink>, AppError> {
        self.check()?;
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|link| link.id == id)
            .cloned())
    }

    async fn create(&self, fields: LinkFields) -> Result<(), AppError> {
        self.check()?;
        let id = hex::encode(rand::random::<[u8; 16]>());
        self.links
            .lock()
            .unwrap()
            .push(ShortLink::new(id, fields.url, fields.new_window));
        Ok(())
    }

    async fn update(&self, id: &str, fields: LinkFields) -> Result<u64, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        let mut affected = 0;
        for link in links.iter_mut().filter(|link| link.id == id) {
            link.url = fields.url.clone();
            link.new_window = fields.new_window;
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|link| link.id != id);
        Ok((before - links.len()) as u64)
    }
}

/// Schema catalog kept in memory.
pub struct InMemorySchemaRepository {
    reachable: AtomicBool,
    table: AtomicBool,
    function: AtomicBool,
}

impl InMemorySchemaRepository {
    pub fn new(reachable: bool, table: bool, function: bool) -> Self {
        Self {
            reachable: AtomicBool::new(reachable),
            table: AtomicBool::new(table),
            function: AtomicBool::new(function),
        }
    }

    pub fn provisioned() -> Self {
        Self::new(true, true, true)
    }

    pub fn is_provisioned(&self) -> bool {
        self.table.load(Ordering::SeqCst) && self.function.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(unavailable())
        }
    }
}

#[async_trait]
impl SchemaRepository for InMemorySchemaRepository {
    async fn is_reachable(&self) -> bool {
        self.reachable.load(Ordering::SeqCst)
    }

    async fn table_exists(&self) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.table.load(Ordering::SeqCst))
    }

    async fn function_exists(&self) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.function.load(Ordering::SeqCst))
    }

    async fn create_table(&self) -> Result<(), AppError> {
        self.check()?;
        self.table.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn create_function(&self) -> Result<(), AppError> {
        self.check()?;
        self.function.store(true, Ordering::SeqCst);
        Ok(())
    }
}

pub fn create_test_state(
    links: Arc<InMemoryLinkRepository>,
    schema: Arc<InMemorySchemaRepository>,
) -> AppState {
    let auth_service = AuthService::new("test", "test").unwrap();
    AppState::new(links, schema, auth_service)
}

/// Full router over in-memory repositories, with static files from `httpdocs/`.
pub fn create_test_app(
    links: Arc<InMemoryLinkRepository>,
    schema: Arc<InMemorySchemaRepository>,
) -> axum::Router {
    routes::router(create_test_state(links, schema), "httpdocs")
}

/// MariaDB-backed context with a table and function name unique to the caller.
///
/// Needs `DATABASE_URL` to point at a server where the user may create tables
/// and functions.
pub struct MariaDbFixture {
    pub config: link_keeper::config::Config,
    pub database: link_keeper::infrastructure::database::DatabaseContext,
}

impl MariaDbFixture {
    pub fn new() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for MariaDB tests");
        let suffix = hex::encode(rand::random::<[u8; 4]>());

        let config = link_keeper::config::Config {
            database_url: Some(database_url),
            db_host: String::new(),
            db_port: 3306,
            db_user: String::new(),
            db_password: String::new(),
            db_name: String::new(),
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            http_user: "test".to_string(),
            http_password: "test".to_string(),
            link_table: format!("links_{suffix}"),
            id_function: format!("link_id_{suffix}"),
            static_dir: "httpdocs".to_string(),
            db_max_connections: 2,
            db_connect_timeout: 5,
            db_query_timeout: 5,
            db_idle_timeout: 60,
        };
        let database =
            link_keeper::infrastructure::database::DatabaseContext::from_config(&config).unwrap();

        Self { config, database }
    }

    /// Drops the schema objects created by the test and closes the pool.
    pub async fn teardown(self) {
        let pool = sqlx::MySqlPool::connect_with(self.config.connect_options().unwrap())
            .await
            .unwrap();
        sqlx::raw_sql(&format!(
            "DROP TABLE IF EXISTS `{}`; DROP FUNCTION IF EXISTS `{}`;",
            self.config.link_table, self.config.id_function
        ))
        .execute(&pool)
        .await
        .unwrap();
        pool.close().await;

        self.database.connection.disconnect().await;
    }
}
