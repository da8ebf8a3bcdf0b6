//! Tests for db::factory and repository.toml handling.

mod support;

use std::io::Write;
use std::str::FromStr;

use monty::config::AppConfig;
use monty::db::factory::{RepositoryFactory, RepositoryType};
use monty::db::repository::RepositoryError;
use monty::db::RepositoryConfig;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_repository_type_from_str() {
    assert_eq!(
        RepositoryType::from_str("POSTGRES").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("memory").unwrap(),
        RepositoryType::Local
    );
    let err = RepositoryType::from_str("sqlite").unwrap_err();
    assert!(err.contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_repository_type_from_env_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://monty@localhost/monty")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres),
    );
}

#[test]
fn test_repository_type_explicit_wins() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://monty@localhost/monty")),
        ],
        || assert_eq!(RepositoryType::from_env(), RepositoryType::Local),
    );
}

#[test]
fn test_app_config_from_env() {
    support::with_scoped_env(
        &[
            ("PORT", Some("8123")),
            ("CORS_ORIGINS", Some("https://class.example")),
            ("SEED_DEMO_DATA", Some("no")),
            ("JWT_SECRET_KEY", None),
        ],
        || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.port, 8123);
            assert_eq!(config.cors_origins, vec!["https://class.example".to_string()]);
            assert!(!config.seed_demo_data);
            assert_eq!(config.jwt_secret, monty::config::DEFAULT_SECRET);
        },
    );
}

#[tokio::test]
async fn test_create_local() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
    assert_eq!(repo.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_from_config_file_local() {
    let file = write_config("[repository]\ntype = \"local\"\n");
    let repo = RepositoryFactory::from_config_file(file.path()).await.unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[test]
fn test_config_file_postgres_defaults() {
    let file = write_config(
        "[repository]\ntype = \"postgres\"\n\n[postgres]\ndatabase_url = \"postgres://x/y\"\n",
    );
    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Postgres);
    assert_eq!(config.postgres.database_url, "postgres://x/y");
    assert_eq!(config.postgres.max_connections, 10);
    assert_eq!(config.postgres.retry_delay_ms, 100);
}

#[tokio::test]
async fn test_config_file_errors() {
    let missing = RepositoryConfig::from_file("/definitely/not/here/repository.toml");
    assert!(matches!(
        missing,
        Err(RepositoryError::ConfigurationError { .. })
    ));

    let garbage = write_config("this is = = not toml");
    assert!(RepositoryConfig::from_file(garbage.path()).is_err());

    let unknown = write_config("[repository]\ntype = \"sqlite\"\n");
    let err = RepositoryFactory::from_config_file(unknown.path())
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("Invalid repository type"));
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_postgres_requires_feature() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[cfg(feature = "postgres-repo")]
#[tokio::test]
async fn test_postgres_requires_config() {
    let result = RepositoryFactory::create(RepositoryType::Postgres, None).await;
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}
