pub mod jwt;
pub mod password;

pub use jwt::{create_token, verify_token, JwtConfig, TokenClaims, TokenType};
pub use password::{hash_password, hash_password_with_cost, verify_password};
