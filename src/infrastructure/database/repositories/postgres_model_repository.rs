use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::domain::entities::ChatModel;
use crate::domain::repositories::{ModelRepository, model_repository::ModelRepositoryError};
use crate::infrastructure::database::models::{ChatModelRow, NewChatModelRow};
use crate::infrastructure::database::schema::models::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresModelRepository {
    pool: DbPool,
}

impl PostgresModelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(error: DieselError) -> ModelRepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ModelRepositoryError::Duplicate
        }
        other => ModelRepositoryError::DatabaseError(other.to_string()),
    }
}

#[async_trait]
impl ModelRepository for PostgresModelRepository {
    async fn insert(&self, model: &ChatModel) -> Result<(), ModelRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ModelRepositoryError::DatabaseError(e.to_string()))?;

        let new_row = NewChatModelRow::from(model);

        diesel::insert_into(models)
            .values(&new_row)
            .execute(&mut conn)
            .map_err(map_insert_error)?;

        Ok(())
    }

    async fn list_for_user(&self, owner: &str) -> Result<Vec<ChatModel>, ModelRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ModelRepositoryError::DatabaseError(e.to_string()))?;

        let rows = models
            .filter(user_id.eq(owner))
            .order(created_at.asc())
            .load::<ChatModelRow>(&mut conn)
            .map_err(|e| ModelRepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(ChatModel::from).collect())
    }

    async fn delete(&self, owner: &str, id: Uuid) -> Result<bool, ModelRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ModelRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(models.filter(user_id.eq(owner)).filter(model_id.eq(id)))
            .execute(&mut conn)
            .map_err(|e| ModelRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ModelRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ModelRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(models.find(id))
            .execute(&mut conn)
            .map_err(|e| ModelRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
