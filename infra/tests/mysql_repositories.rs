//! Integration tests for the MySQL repositories
//!
//! These need a disposable MySQL database:
//! `DATABASE_URL=mysql://... cargo test -p sb_infra -- --ignored`

use chrono::{Duration, Utc};
use uuid::Uuid;

use sb_core::domain::entities::{FavoriteTeam, User, VerificationCode};
use sb_core::errors::DomainError;
use sb_core::repositories::{FavoriteTeamRepository, UserRepository, VerificationCodeRepository};
use sb_infra::{
    DatabasePool, MySqlFavoriteTeamRepository, MySqlUserRepository, MySqlVerificationCodeRepository,
};
use sb_shared::config::DatabaseConfig;

async fn setup_pool() -> DatabasePool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let pool = DatabasePool::new(&DatabaseConfig::new(url).with_max_connections(4))
        .await
        .expect("connect");
    pool.run_migrations().await.expect("migrate");
    pool
}

/// A phone number no other test run will collide with
fn unique_phone() -> String {
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(10)
        .collect();
    format!("+1{}", digits)
}

#[tokio::test]
#[ignore]
async fn test_code_lifecycle() {
    let pool = setup_pool().await;
    let repo = MySqlVerificationCodeRepository::new(pool.get_pool().clone());
    let phone = unique_phone();
    let now = Utc::now();

    let code = VerificationCode::new(&phone, "123456", now, Duration::minutes(5), 3, Some("203.0.113.9".to_string()));
    repo.create(code.clone()).await.unwrap();

    let duplicate = VerificationCode::new(&phone, "123456", now, Duration::minutes(5), 3, None);
    assert!(matches!(repo.create(duplicate).await, Err(DomainError::Conflict { .. })));

    let found = repo
        .find_unexpired_match(&phone, "123456", now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, code.id);
    assert_eq!(found.ip_address.as_deref(), Some("203.0.113.9"));

    assert!(repo.latest_created_at(&phone).await.unwrap().is_some());
    assert!(repo.consume(code.id, Utc::now()).await.unwrap());
    assert!(!repo.consume(code.id, Utc::now()).await.unwrap());

    let stored = repo.find_by_id(code.id).await.unwrap().unwrap();
    assert_eq!(stored.attempts, 1);
    assert!(stored.verified_at.is_some());
    assert!(repo.find_latest_pending(&phone, Utc::now()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_failed_attempts_stop_at_cap() {
    let pool = setup_pool().await;
    let repo = MySqlVerificationCodeRepository::new(pool.get_pool().clone());
    let phone = unique_phone();

    let code = VerificationCode::new(&phone, "222222", Utc::now(), Duration::minutes(5), 3, None);
    repo.create(code.clone()).await.unwrap();

    for _ in 0..3 {
        assert!(repo.record_failed_attempt(code.id).await.unwrap());
    }
    assert!(!repo.record_failed_attempt(code.id).await.unwrap());
    assert!(!repo.consume(code.id, Utc::now()).await.unwrap());

    let pending = repo.find_latest_pending(&phone, Utc::now()).await.unwrap().unwrap();
    assert_eq!(pending.id, code.id);
    assert!(pending.is_exhausted());
}

#[tokio::test]
#[ignore]
async fn test_purge_expired_removes_only_old_records() {
    let pool = setup_pool().await;
    let repo = MySqlVerificationCodeRepository::new(pool.get_pool().clone());
    let phone = unique_phone();
    let now = Utc::now();

    let stale = VerificationCode::new(&phone, "333333", now - Duration::hours(2), Duration::minutes(5), 3, None);
    let fresh = VerificationCode::new(&phone, "444444", now, Duration::minutes(5), 3, None);
    repo.create(stale.clone()).await.unwrap();
    repo.create(fresh.clone()).await.unwrap();

    repo.purge_expired(now - Duration::hours(1)).await.unwrap();

    assert!(repo.find_by_id(stale.id).await.unwrap().is_none());
    assert!(repo.find_by_id(fresh.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore]
async fn test_user_create_sign_in_and_onboarding() {
    let pool = setup_pool().await;
    let repo = MySqlUserRepository::new(pool.get_pool().clone());
    let phone = unique_phone();

    let user = repo.create(User::new_verified(&phone, Utc::now())).await.unwrap();
    assert!(matches!(
        repo.create(User::new_verified(&phone, Utc::now())).await,
        Err(DomainError::Conflict { .. })
    ));

    let found = repo.find_by_phone(&phone).await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(found.phone_verified);
    assert!(!found.onboarding_completed);

    let signed_in = repo.record_sign_in(user.id, Utc::now()).await.unwrap();
    assert!(signed_in.last_sign_in.is_some());

    let onboarded = repo.complete_onboarding(user.id, "Riley", Utc::now()).await.unwrap();
    assert!(onboarded.onboarding_completed);
    assert_eq!(onboarded.first_name.as_deref(), Some("Riley"));
    assert_eq!(onboarded.display_name.as_deref(), Some("Riley"));

    let missing = repo.record_sign_in(Uuid::new_v4(), Utc::now()).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
#[ignore]
async fn test_favorite_teams_are_replaced_atomically() {
    let pool = setup_pool().await;
    let users = MySqlUserRepository::new(pool.get_pool().clone());
    let teams = MySqlFavoriteTeamRepository::new(pool.get_pool().clone());

    let user = users.create(User::new_verified(&unique_phone(), Utc::now())).await.unwrap();
    let now = Utc::now();

    let first = vec![
        FavoriteTeam::new(user.id, 1, "nfl", now),
        FavoriteTeam::new(user.id, 2, "nfl", now),
    ];
    assert_eq!(teams.replace_for_user(user.id, first).await.unwrap(), 2);

    let second = vec![FavoriteTeam::new(user.id, 30, "nfl", now)];
    assert_eq!(teams.replace_for_user(user.id, second).await.unwrap(), 1);

    let stored = teams.list_for_user(user.id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].team_id, 30);
    assert_eq!(stored[0].sport, "nfl");

    // A duplicate team in one batch rolls back the whole replacement
    let duplicate = vec![
        FavoriteTeam::new(user.id, 4, "nfl", now),
        FavoriteTeam::new(user.id, 4, "nfl", now),
    ];
    assert!(matches!(
        teams.replace_for_user(user.id, duplicate).await,
        Err(DomainError::Conflict { .. })
    ));
    assert_eq!(teams.list_for_user(user.id).await.unwrap()[0].team_id, 30);
}

#[tokio::test]
#[ignore]
async fn test_long_raw_phone_fits_the_column() {
    let pool = setup_pool().await;
    let repo = MySqlVerificationCodeRepository::new(pool.get_pool().clone());
    let phone = format!("{} x1", unique_phone());

    let code = VerificationCode::new(&phone, "515151", Utc::now(), Duration::minutes(5), 3, None);
    repo.create(code.clone()).await.unwrap();
    assert_eq!(repo.find_by_id(code.id).await.unwrap().unwrap().phone_number, phone);
}
