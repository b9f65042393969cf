pub mod errors;
pub mod jwt;
pub mod middleware;

pub use errors::{AuthError, AuthResult};
pub use jwt::{Claims, JwtManager};
pub use middleware::require_bearer_token;

use crate::constants::{ADMIN_PASSWORD, ADMIN_USERNAME};
use crate::models::Credentials;

/// The service knows a single fixed account.
pub fn verify_credentials(credentials: &Credentials) -> AuthResult<()> {
    if credentials.username == ADMIN_USERNAME && credentials.password == ADMIN_PASSWORD {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn only_admin_admin_is_accepted() {
        assert_eq!(verify_credentials(&credentials("admin", "admin")), Ok(()));
        assert_eq!(
            verify_credentials(&credentials("admin", "wrong")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            verify_credentials(&credentials("", "")),
            Err(AuthError::InvalidCredentials)
        );
    }
}
