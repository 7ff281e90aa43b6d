use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::infrastructure::database::schema::rate_limit;

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = rate_limit)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RateLimitRow {
    pub user_id: String,
    pub count: i32,
    pub window_started_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = rate_limit)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewRateLimitRow {
    pub user_id: String,
    pub count: i32,
    pub window_started_at: DateTime<Utc>,
}
