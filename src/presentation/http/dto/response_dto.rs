use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}
