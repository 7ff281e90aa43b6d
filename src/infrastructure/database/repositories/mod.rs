pub mod postgres_model_repository;
pub mod postgres_rate_limit_repository;

pub use postgres_model_repository::PostgresModelRepository;
pub use postgres_rate_limit_repository::PostgresRateLimitRepository;
