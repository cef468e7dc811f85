use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("Parse float error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Price feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Cannot {action} while session is {phase}")]
    InvalidTransition { phase: String, action: &'static str },

    #[error("A swap submission is already in flight")]
    SubmissionInFlight,

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Invalid balance for {symbol}: {amount}")]
    InvalidBalance { symbol: String, amount: f64 },

    #[error("Slippage {0}% is outside the allowed range")]
    InvalidSlippage(f64),

    #[error("Swap failed: {0}")]
    SwapFailed(String),

    #[error("Other: {0}")]
    Other(String),
}
