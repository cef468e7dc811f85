pub mod calc;
pub mod executor;
pub mod types;
pub mod validator;

pub use calc::{exchange_rate, format_rate, quote};
pub use executor::{SimulatedExecutor, SwapExecutor};
pub use types::{ValidationOutcome, Violation};
pub use validator::validate;
