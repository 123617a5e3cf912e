//! Integration tests against a real PostgreSQL container
//!
//! These need a Docker daemon and are ignored by default:
//! `cargo test --test testcontainers_integration -- --ignored`

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use rust_decimal_macros::dec;
use sqlx::PgPool;
use testcontainers_modules::{postgres::Postgres, testcontainers::runners::AsyncRunner};
use uuid::Uuid;

use advertisement::application::dto::CreateAdvertRequest;
use advertisement::application::errors::{AdvertError, AuthError};
use advertisement::application::ports::{
    AdvertRepository, ImageRepository, ImageStore, RepositoryError, SystemClock, UserRepository,
    UuidGenerator,
};
use advertisement::application::use_cases::{
    CreateAdvertUseCase, DeleteAdvertUseCase, GetAdvertUseCase, GetImageUseCase, SignInUseCase,
    SignUpUseCase,
};
use advertisement::domain::entities::User;
use advertisement::domain::value_objects::{AdvertId, Email, UserId};
use advertisement::infrastructure::persistence::{
    PostgresAdvertRepository, PostgresImageRepository, PostgresUserRepository, TableNames,
};
use advertisement::infrastructure::security::{Argon2PasswordHasher, JwtTokenService};
use advertisement::infrastructure::storage::LocalImageStore;

const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

/// Test environment using TestContainers
struct TestEnvironment {
    pool: PgPool,
    advert_repo: Arc<dyn AdvertRepository>,
    image_repo: Arc<dyn ImageRepository>,
    user_repo: Arc<dyn UserRepository>,
    image_store: Arc<dyn ImageStore>,
    _container: testcontainers::ContainerAsync<Postgres>,
    _temp_dir: tempfile::TempDir,
}

impl TestEnvironment {
    async fn new() -> Self {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let host = container.get_host().await.expect("Failed to get container host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");
        let database_url = format!("postgres://postgres:postgres@{host}:{port}/postgres");

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let tables = TableNames::default();
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let store = LocalImageStore::with_durability(temp_dir.path().to_path_buf(), false);
        store.init().await.expect("Failed to init image store");

        Self {
            advert_repo: Arc::new(PostgresAdvertRepository::new(pool.clone(), tables.clone())),
            image_repo: Arc::new(PostgresImageRepository::new(pool.clone(), tables.clone())),
            user_repo: Arc::new(PostgresUserRepository::new(pool.clone(), tables)),
            image_store: Arc::new(store),
            pool,
            _container: container,
            _temp_dir: temp_dir,
        }
    }

    fn create_use_case(&self) -> CreateAdvertUseCase {
        CreateAdvertUseCase::new(
            Arc::clone(&self.advert_repo),
            Arc::clone(&self.image_store),
            Arc::new(SystemClock),
            Arc::new(UuidGenerator),
        )
    }

    async fn insert_user(&self, email: &str) -> UserId {
        let user = User::new(
            UserId::from_uuid(Uuid::new_v4()),
            Email::parse(email).unwrap(),
            "hash".to_string(),
            Utc::now(),
        );
        self.user_repo.create_user(&user).await.unwrap()
    }

    async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

fn request(images: usize) -> CreateAdvertRequest {
    CreateAdvertRequest {
        title: "Chair".to_string(),
        description: "Oak".to_string(),
        price: dec!(10.00),
        images: vec![Bytes::from_static(JPEG); images],
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_read_delete_roundtrip() {
    let env = TestEnvironment::new().await;
    let owner = env.insert_user("owner@example.com").await;

    let id = env.create_use_case().execute(request(3), &owner).await.unwrap();

    let advert = GetAdvertUseCase::new(Arc::clone(&env.advert_repo))
        .execute(&id)
        .await
        .unwrap();
    assert_eq!(advert.title, "Chair");
    assert_eq!(advert.price, dec!(10.00));
    assert_eq!(advert.owner_id, owner);
    assert_eq!(advert.image_ids.len(), 3);

    let get_image = GetImageUseCase::new(Arc::clone(&env.image_repo), Arc::clone(&env.image_store));
    let (_, bytes) = get_image.execute(&advert.image_ids[0]).await.unwrap();
    assert_eq!(&bytes[..], JPEG);

    let report = DeleteAdvertUseCase::new(Arc::clone(&env.advert_repo), Arc::clone(&env.image_store))
        .execute(&id, &owner)
        .await
        .unwrap();
    assert_eq!(report.image_ids.len(), 3);
    assert!(report.leaked_image_ids.is_empty());

    for image_id in &advert.image_ids {
        assert!(!env.image_store.exists(image_id).await.unwrap());
        assert!(matches!(
            get_image.execute(image_id).await,
            Err(AdvertError::NotFound(_))
        ));
    }
    assert!(matches!(
        env.advert_repo.get_advert_by_id(&id).await,
        Err(RepositoryError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_images_keep_upload_order() {
    let env = TestEnvironment::new().await;
    let owner = env.insert_user("owner@example.com").await;
    let id = env.create_use_case().execute(request(7), &owner).await.unwrap();

    let advert = env.advert_repo.get_advert_by_id(&id).await.unwrap();

    let positions: Vec<i16> = advert.images().iter().map(|i| i.position()).collect();
    assert_eq!(positions, (0..7).collect::<Vec<i16>>());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_price_is_stored_without_rounding() {
    let env = TestEnvironment::new().await;
    let owner = env.insert_user("owner@example.com").await;

    for price in [dec!(10.005), dec!(1000000000000), dec!(0), dec!(0.0001)] {
        let mut req = request(1);
        req.price = price;
        let id = env.create_use_case().execute(req, &owner).await.unwrap();

        let advert = env.advert_repo.get_advert_by_id(&id).await.unwrap();
        assert_eq!(advert.price(), price);
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_checks_owner() {
    let env = TestEnvironment::new().await;
    let owner = env.insert_user("owner@example.com").await;
    let stranger = env.insert_user("stranger@example.com").await;
    let id = env.create_use_case().execute(request(1), &owner).await.unwrap();

    let err = env.advert_repo.delete_advert(&id, &stranger).await.unwrap_err();

    assert!(err.is_not_found());
    assert!(env.advert_repo.get_advert_by_id(&id).await.is_ok());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_advert_with_all_images_deleted_reads_as_missing() {
    let env = TestEnvironment::new().await;
    let owner = env.insert_user("owner@example.com").await;
    let id = env.create_use_case().execute(request(2), &owner).await.unwrap();

    sqlx::query("UPDATE images SET deleted = true WHERE advert_id = $1")
        .bind(id.as_uuid())
        .execute(&env.pool)
        .await
        .unwrap();

    assert!(env.advert_repo.get_advert_by_id(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_failed_transaction_leaves_no_rows_or_files() {
    let env = TestEnvironment::new().await;
    // No such user: the foreign key aborts the transaction
    let ghost = UserId::from_uuid(Uuid::new_v4());

    let err = env.create_use_case().execute(request(3), &ghost).await.unwrap_err();

    assert!(matches!(err, AdvertError::Repository(_)));
    assert_eq!(env.count("adverts").await, 0);
    assert_eq!(env.count("images").await, 0);
    let leftovers = walkdir_count(env._temp_dir.path().join("images"));
    assert_eq!(leftovers, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unknown_advert_is_not_found() {
    let env = TestEnvironment::new().await;
    let id = AdvertId::from_uuid(Uuid::new_v4());

    assert!(env.advert_repo.get_advert_by_id(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_sign_up_and_sign_in() {
    let env = TestEnvironment::new().await;
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let tokens = Arc::new(JwtTokenService::new(b"integration-secret-integration-secret", 3600));
    let sign_up = SignUpUseCase::new(
        Arc::clone(&env.user_repo),
        hasher.clone(),
        Arc::new(SystemClock),
        Arc::new(UuidGenerator),
    );
    let sign_in = SignInUseCase::new(Arc::clone(&env.user_repo), hasher, tokens);

    sign_up.execute("Anna@Example.com", "Secret12").await.unwrap();
    assert!(matches!(
        sign_up.execute("Anna@Example.com", "Secret12").await,
        Err(AuthError::EmailTaken)
    ));

    assert!(sign_in.execute("Anna@Example.com", "Secret12").await.is_ok());
    assert!(matches!(
        sign_in.execute("Anna@Example.com", "Secret13").await,
        Err(AuthError::InvalidCredentials)
    ));
}

fn walkdir_count(dir: std::path::PathBuf) -> usize {
    std::fs::read_dir(&dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| {
                    if e.path().is_dir() {
                        walkdir_count(e.path())
                    } else {
                        1
                    }
                })
                .sum()
        })
        .unwrap_or(0)
}
