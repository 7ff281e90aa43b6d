use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{GetChatDataUseCase, get_chat_data::GetChatDataRequest};
use crate::presentation::http::dto::ModelQueryDto;
use crate::presentation::http::errors::ApiError;

pub struct DataHandler {
    get_chat_data_use_case: Arc<GetChatDataUseCase>,
}

impl DataHandler {
    pub fn new(get_chat_data_use_case: Arc<GetChatDataUseCase>) -> Self {
        Self {
            get_chat_data_use_case,
        }
    }

    pub async fn get_data(
        State(handler): State<Arc<DataHandler>>,
        Query(params): Query<ModelQueryDto>,
    ) -> Result<impl IntoResponse, ApiError> {
        let (Some(user_id), Some(model_id)) = (params.user_id, params.model_id) else {
            return Err(ApiError::MissingFields);
        };

        let data = handler
            .get_chat_data_use_case
            .execute(GetChatDataRequest { user_id, model_id })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "fetching chat data failed");
                ApiError::from(e)
            })?;

        Ok((StatusCode::OK, Json(data)))
    }
}
