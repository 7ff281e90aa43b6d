use chrono::Duration;
use std::env;
use std::sync::Arc;

use crate::domain::repositories::{
    RateLimitRepository, rate_limit_repository::RateLimitRepositoryError,
};
use crate::domain::value_objects::QuotaDecision;

#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Requests allowed per window, per user.
    pub limit: i32,
    pub window_secs: i64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        let limit = env::var("RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);
        let window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        Self { limit, window_secs }
    }
}

/// Per-user request quota, checked before any billable work. The counter
/// lives in the database so every server instance shares it; the repository
/// guarantees check-and-increment is atomic.
pub struct RateLimiter {
    repository: Arc<dyn RateLimitRepository>,
    config: RateLimiterConfig,
}

impl RateLimiter {
    pub fn new(repository: Arc<dyn RateLimitRepository>, config: RateLimiterConfig) -> Self {
        Self { repository, config }
    }

    pub async fn check(&self, user_id: &str) -> Result<QuotaDecision, RateLimitRepositoryError> {
        let decision = self
            .repository
            .check_and_increment(
                user_id,
                self.config.limit,
                Duration::seconds(self.config.window_secs),
            )
            .await?;

        if decision.is_exceeded() {
            tracing::warn!(user_id, limit = self.config.limit, "rate limit reached");
        }

        Ok(decision)
    }

    pub fn limit(&self) -> i32 {
        self.config.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mirrors the transactional Postgres implementation on a HashMap.
    struct InMemoryRateLimitRepository {
        counters: Mutex<HashMap<String, (i32, DateTime<Utc>)>>,
        now: Mutex<DateTime<Utc>>,
    }

    impl InMemoryRateLimitRepository {
        fn new() -> Self {
            Self {
                counters: Mutex::new(HashMap::new()),
                now: Mutex::new(Utc::now()),
            }
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + by;
        }

        fn count_for(&self, user_id: &str) -> Option<i32> {
            self.counters
                .lock()
                .unwrap()
                .get(user_id)
                .map(|(count, _)| *count)
        }
    }

    #[async_trait]
    impl RateLimitRepository for InMemoryRateLimitRepository {
        async fn check_and_increment(
            &self,
            user_id: &str,
            limit: i32,
            window: Duration,
        ) -> Result<QuotaDecision, RateLimitRepositoryError> {
            let now = *self.now.lock().unwrap();
            let mut counters = self.counters.lock().unwrap();

            match counters.get(user_id).copied() {
                None => {
                    counters.insert(user_id.to_string(), (1, now));
                    Ok(QuotaDecision::Allowed { remaining: limit - 1 })
                }
                Some((_, started)) if now - started >= window => {
                    counters.insert(user_id.to_string(), (1, now));
                    Ok(QuotaDecision::Allowed { remaining: limit - 1 })
                }
                Some((count, _)) if count >= limit => Ok(QuotaDecision::Exceeded),
                Some((count, started)) => {
                    counters.insert(user_id.to_string(), (count + 1, started));
                    Ok(QuotaDecision::Allowed {
                        remaining: limit - (count + 1),
                    })
                }
            }
        }
    }

    fn limiter_with(limit: i32, window_secs: i64) -> (RateLimiter, Arc<InMemoryRateLimitRepository>) {
        let repository = Arc::new(InMemoryRateLimitRepository::new());
        let limiter = RateLimiter::new(
            repository.clone(),
            RateLimiterConfig { limit, window_secs },
        );
        (limiter, repository)
    }

    #[tokio::test]
    async fn test_each_accepted_request_increments_by_one() {
        let (limiter, repository) = limiter_with(5, 60);

        for i in 1..=3 {
            let decision = limiter.check("u1").await.unwrap();
            assert!(decision.is_allowed());
            assert_eq!(repository.count_for("u1"), Some(i));
        }
    }

    #[tokio::test]
    async fn test_at_limit_rejects_without_incrementing() {
        let (limiter, repository) = limiter_with(2, 60);

        assert!(limiter.check("u1").await.unwrap().is_allowed());
        assert!(limiter.check("u1").await.unwrap().is_allowed());

        let decision = limiter.check("u1").await.unwrap();
        assert!(decision.is_exceeded());
        assert_eq!(repository.count_for("u1"), Some(2));

        // Still rejected on the next attempt, counter still flat.
        assert!(limiter.check("u1").await.unwrap().is_exceeded());
        assert_eq!(repository.count_for("u1"), Some(2));
    }

    #[tokio::test]
    async fn test_window_expiry_resets_counter() {
        let (limiter, repository) = limiter_with(2, 60);

        assert!(limiter.check("u1").await.unwrap().is_allowed());
        assert!(limiter.check("u1").await.unwrap().is_allowed());
        assert!(limiter.check("u1").await.unwrap().is_exceeded());

        repository.advance(Duration::seconds(61));

        let decision = limiter.check("u1").await.unwrap();
        assert_eq!(decision, QuotaDecision::Allowed { remaining: 1 });
        assert_eq!(repository.count_for("u1"), Some(1));
    }

    #[tokio::test]
    async fn test_users_are_counted_independently() {
        let (limiter, _) = limiter_with(1, 60);

        assert!(limiter.check("u1").await.unwrap().is_allowed());
        assert!(limiter.check("u2").await.unwrap().is_allowed());
        assert!(limiter.check("u1").await.unwrap().is_exceeded());
    }
}
