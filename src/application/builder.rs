use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

const CONNECT_ATTEMPTS: u32 = 4;

use crate::api::handlers::ImageLinks;
use crate::api::router::AppState;
use crate::application::ports::{
    AdvertRepository, Clock, IdGenerator, ImageRepository, ImageStore, PasswordHasher,
    SystemClock, TokenService, UserRepository, UuidGenerator,
};
use crate::application::use_cases::{
    CreateAdvertUseCase, DeleteAdvertUseCase, GetAdvertUseCase, GetImageUseCase, SignInUseCase,
    SignUpUseCase,
};
use crate::config::Config;
use crate::infrastructure::{
    persistence::{PostgresAdvertRepository, PostgresImageRepository, PostgresUserRepository},
    security::{Argon2PasswordHasher, JwtTokenService},
    storage::LocalImageStore,
};

/// Wires configuration, infrastructure and use cases into [`AppState`]
pub struct ApplicationBuilder {
    config: Config,
    pool: Option<sqlx::PgPool>,
    advert_repo: Option<Arc<dyn AdvertRepository>>,
    image_repo: Option<Arc<dyn ImageRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    image_store: Option<Arc<dyn ImageStore>>,
    hasher: Option<Arc<dyn PasswordHasher>>,
    tokens: Option<Arc<dyn TokenService>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            pool: None,
            advert_repo: None,
            image_repo: None,
            user_repo: None,
            image_store: None,
            hasher: None,
            tokens: None,
        }
    }

    /// Connect the pool, retrying a few times with doubling delay.
    pub async fn with_database(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let cfg = &self.config;
        let options = PgPoolOptions::new()
            .max_connections(cfg.db_max_connections)
            .min_connections(cfg.db_min_connections)
            .acquire_timeout(Duration::from_secs(cfg.db_acquire_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(cfg.db_idle_timeout_secs)))
            .max_lifetime(Some(Duration::from_secs(cfg.db_max_lifetime_secs)));

        let mut delay = Duration::from_secs(1);
        let mut attempt = 1;
        let pool = loop {
            match options.clone().connect(&cfg.database_url).await {
                Ok(pool) => break pool,
                Err(e) if attempt < CONNECT_ATTEMPTS => {
                    warn!(attempt, retry_in = ?delay, error = %e, "Database connection failed");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(e) => {
                    error!(attempts = attempt, error = %e, "Giving up on database connection");
                    return Err(Box::new(e));
                }
            }
        };

        info!(
            max = cfg.db_max_connections,
            min = cfg.db_min_connections,
            acquire_timeout_secs = cfg.db_acquire_timeout_secs,
            "Database pool ready"
        );

        // Bundled migrations only describe the default table names
        if self.config.tables.is_default() {
            info!("Running database migrations");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .inspect_err(|e| error!(error = %e, "Migrations failed"))?;
        } else {
            info!(tables = ?self.config.tables, "Custom table names, skipping migrations");
        }

        self.pool = Some(pool);
        Ok(self)
    }

    /// Initialize infrastructure layer (repositories and image storage)
    pub async fn with_infrastructure(mut self) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = self.pool.as_ref().ok_or("Database pool not initialized")?;
        let tables = self.config.tables.clone();

        let advert_repo: Arc<dyn AdvertRepository> = Arc::new(PostgresAdvertRepository::new(
            pool.clone(),
            tables.clone(),
        ));
        let image_repo: Arc<dyn ImageRepository> = Arc::new(PostgresImageRepository::new(
            pool.clone(),
            tables.clone(),
        ));
        let user_repo: Arc<dyn UserRepository> =
            Arc::new(PostgresUserRepository::new(pool.clone(), tables));

        let image_store = Arc::new(LocalImageStore::with_durability(
            self.config.images_root.clone(),
            self.config.durable_writes,
        ));
        image_store.init().await?;
        let image_store: Arc<dyn ImageStore> = image_store;

        self.advert_repo = Some(advert_repo);
        self.image_repo = Some(image_repo);
        self.user_repo = Some(user_repo);
        self.image_store = Some(image_store);

        info!(images_root = ?self.config.images_root, "Infrastructure layer initialized");
        Ok(self)
    }

    /// Set up password hashing and token issuance
    pub fn with_security(mut self) -> Self {
        self.hasher = Some(Arc::new(Argon2PasswordHasher::new()));
        self.tokens = Some(Arc::new(JwtTokenService::new(
            self.config.jwt_secret.as_bytes(),
            self.config.jwt_ttl_secs,
        )));
        info!("Credential services initialized");
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> Result<AppState, Box<dyn std::error::Error>> {
        let pool = self.pool.ok_or("Database pool not initialized")?;
        let advert_repo = self
            .advert_repo
            .ok_or("Advert repository not initialized")?;
        let image_repo = self.image_repo.ok_or("Image repository not initialized")?;
        let user_repo = self.user_repo.ok_or("User repository not initialized")?;
        let image_store = self.image_store.ok_or("Image store not initialized")?;
        let hasher = self.hasher.ok_or("Password hasher not initialized")?;
        let tokens = self.tokens.ok_or("Token service not initialized")?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ids: Arc<dyn IdGenerator> = Arc::new(UuidGenerator);

        // Initialize use cases (application layer)
        let create_advert_use_case = Arc::new(CreateAdvertUseCase::new(
            Arc::clone(&advert_repo),
            Arc::clone(&image_store),
            Arc::clone(&clock),
            Arc::clone(&ids),
        ));

        let delete_advert_use_case = Arc::new(DeleteAdvertUseCase::new(
            Arc::clone(&advert_repo),
            Arc::clone(&image_store),
        ));

        let get_advert_use_case = Arc::new(GetAdvertUseCase::new(Arc::clone(&advert_repo)));

        let get_image_use_case = Arc::new(GetImageUseCase::new(
            Arc::clone(&image_repo),
            Arc::clone(&image_store),
        ));

        let sign_up_use_case = Arc::new(SignUpUseCase::new(
            Arc::clone(&user_repo),
            Arc::clone(&hasher),
            Arc::clone(&clock),
            Arc::clone(&ids),
        ));

        let sign_in_use_case = Arc::new(SignInUseCase::new(
            Arc::clone(&user_repo),
            Arc::clone(&hasher),
            Arc::clone(&tokens),
        ));

        info!("Application layer initialized");

        Ok(AppState {
            pool: Arc::new(pool),
            create_advert_use_case,
            delete_advert_use_case,
            get_advert_use_case,
            get_image_use_case,
            sign_up_use_case,
            sign_in_use_case,
            tokens,
            image_links: ImageLinks::new(&self.config.public_base_url),
            max_upload_bytes: self.config.max_upload_bytes,
            allowed_origins: self.config.allowed_origins.clone(),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
