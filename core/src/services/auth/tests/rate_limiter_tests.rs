//! Unit tests for the store-backed send-code rate limiter

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::verification_code::VerificationCode;
use crate::repositories::{InMemoryVerificationCodeRepository, VerificationCodeRepository};
use crate::services::auth::{CooldownRateLimiter, RateLimitDecision, RateLimiterTrait};

const PHONE: &str = "+15551234567";

async fn store_code_sent_ago(repository: &InMemoryVerificationCodeRepository, seconds_ago: i64, code: &str) {
    let record = VerificationCode::new(
        PHONE,
        code,
        Utc::now() - Duration::seconds(seconds_ago),
        Duration::minutes(5),
        3,
        None,
    );
    repository.create(record).await.unwrap();
}

#[tokio::test]
async fn test_allows_first_request() {
    let repository = Arc::new(InMemoryVerificationCodeRepository::new());
    let limiter = CooldownRateLimiter::new(repository, 60);

    assert_eq!(
        limiter.check_send_allowed(PHONE).await.unwrap(),
        RateLimitDecision::Allow
    );
}

#[tokio::test]
async fn test_denies_within_cooldown() {
    let repository = Arc::new(InMemoryVerificationCodeRepository::new());
    store_code_sent_ago(&repository, 15, "123456").await;
    let limiter = CooldownRateLimiter::new(repository, 60);

    match limiter.check_send_allowed(PHONE).await.unwrap() {
        RateLimitDecision::Deny { retry_after_secs } => {
            assert!((44..=46).contains(&retry_after_secs), "got {}", retry_after_secs);
        }
        RateLimitDecision::Allow => panic!("expected deny"),
    }
}

#[tokio::test]
async fn test_allows_after_cooldown() {
    let repository = Arc::new(InMemoryVerificationCodeRepository::new());
    store_code_sent_ago(&repository, 61, "123456").await;
    let limiter = CooldownRateLimiter::new(repository, 60);

    assert_eq!(
        limiter.check_send_allowed(PHONE).await.unwrap(),
        RateLimitDecision::Allow
    );
}

#[tokio::test]
async fn test_cooldown_applies_regardless_of_record_state() {
    let repository = Arc::new(InMemoryVerificationCodeRepository::new());
    store_code_sent_ago(&repository, 5, "123456").await;
    let code = repository.all().await.remove(0);
    repository.consume(code.id, Utc::now()).await.unwrap();
    let limiter = CooldownRateLimiter::new(repository, 60);

    assert!(matches!(
        limiter.check_send_allowed(PHONE).await.unwrap(),
        RateLimitDecision::Deny { .. }
    ));
}

#[tokio::test]
async fn test_cooldown_is_per_phone() {
    let repository = Arc::new(InMemoryVerificationCodeRepository::new());
    store_code_sent_ago(&repository, 5, "123456").await;
    let limiter = CooldownRateLimiter::new(repository, 60);

    assert_eq!(
        limiter.check_send_allowed("+15559876543").await.unwrap(),
        RateLimitDecision::Allow
    );
}
