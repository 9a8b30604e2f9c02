pub mod claims;
pub mod errors;
pub mod handler;
pub mod token;

pub use claims::Claims;
pub use errors::InvalidToken;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use token::TokenService;
pub use token::DEFAULT_TOKEN_TTL_MINUTES;
