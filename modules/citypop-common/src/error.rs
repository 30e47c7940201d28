use thiserror::Error;

#[derive(Error, Debug)]
pub enum CityPopError {
    #[error("No data found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report generation error: {0}")]
    Generation(String),
}
