use async_trait::async_trait;
use chrono::{Duration, Utc};
use diesel::prelude::*;

use crate::domain::repositories::{
    RateLimitRepository, rate_limit_repository::RateLimitRepositoryError,
};
use crate::domain::value_objects::QuotaDecision;
use crate::infrastructure::database::models::{NewRateLimitRow, RateLimitRow};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresRateLimitRepository {
    pool: DbPool,
}

impl PostgresRateLimitRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateLimitRepository for PostgresRateLimitRepository {
    async fn check_and_increment(
        &self,
        caller: &str,
        limit: i32,
        window: Duration,
    ) -> Result<QuotaDecision, RateLimitRepositoryError> {
        use crate::infrastructure::database::schema::rate_limit::dsl;

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| RateLimitRepositoryError::DatabaseError(e.to_string()))?;

        let caller = caller.to_string();

        // The row lock makes the check-compare-increment sequence atomic
        // across concurrent requests from the same user.
        conn.transaction::<QuotaDecision, diesel::result::Error, _>(|conn| {
            let existing = dsl::rate_limit
                .find(caller.as_str())
                .for_update()
                .first::<RateLimitRow>(conn)
                .optional()?;

            let now = Utc::now();

            match existing {
                None => {
                    diesel::insert_into(dsl::rate_limit)
                        .values(&NewRateLimitRow {
                            user_id: caller.clone(),
                            count: 1,
                            window_started_at: now,
                        })
                        .execute(conn)?;
                    Ok(QuotaDecision::Allowed {
                        remaining: limit - 1,
                    })
                }
                Some(row) if now - row.window_started_at >= window => {
                    diesel::update(dsl::rate_limit.find(caller.as_str()))
                        .set((dsl::count.eq(1), dsl::window_started_at.eq(now)))
                        .execute(conn)?;
                    Ok(QuotaDecision::Allowed {
                        remaining: limit - 1,
                    })
                }
                Some(row) if row.count >= limit => Ok(QuotaDecision::Exceeded),
                Some(row) => {
                    diesel::update(dsl::rate_limit.find(caller.as_str()))
                        .set(dsl::count.eq(row.count + 1))
                        .execute(conn)?;
                    Ok(QuotaDecision::Allowed {
                        remaining: limit - (row.count + 1),
                    })
                }
            }
        })
        .map_err(|e| RateLimitRepositoryError::DatabaseError(e.to_string()))
    }
}
