use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid location: latitude {latitude} must be in [-90, 90] and longitude {longitude} in [-180, 180]")]
    InvalidLocation { latitude: f64, longitude: f64 },

    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("unknown language: {0} (expected english, arabic or japanese)")]
    UnknownLanguage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
