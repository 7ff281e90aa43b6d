use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ChatModel;
use crate::infrastructure::database::schema::models;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = models)]
#[diesel(primary_key(model_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChatModelRow {
    pub model_id: Uuid,
    pub user_id: String,
    pub model_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = models)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChatModelRow {
    pub model_id: Uuid,
    pub user_id: String,
    pub model_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&ChatModel> for NewChatModelRow {
    fn from(model: &ChatModel) -> Self {
        Self {
            model_id: model.model_id(),
            user_id: model.user_id().to_string(),
            model_name: model.model_name().to_string(),
            created_at: model.created_at(),
        }
    }
}

impl From<ChatModelRow> for ChatModel {
    fn from(row: ChatModelRow) -> Self {
        ChatModel::from_parts(row.model_id, row.user_id, row.model_name, row.created_at)
    }
}
