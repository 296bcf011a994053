pub mod auth;
pub mod error;
pub mod exchange;
pub mod models;
pub mod password;
pub mod token;
pub mod traits;


pub use auth::AuthService;
pub use error::AppError;
pub use exchange::{ConversionRequest, ExchangeService, REFERENCE_AMOUNT, parse_date};
pub use models::{Claims, Conversion, CredentialRecord, CurrencyCode};
pub use password::PasswordHasher;
pub use token::TokenIssuer;
pub use traits::{CredentialStore, RateProvider};
