use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::validate_not_blank;

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    #[validate(custom = "validate_not_blank")]
    pub username: String,
    #[validate(custom = "validate_not_blank")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Body of `POST /api/auth/vendor/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VendorSignup {
    #[validate(custom = "validate_not_blank")]
    pub username: String,
    #[validate(custom = "validate_not_blank")]
    pub email: String,
    #[validate(custom = "validate_not_blank")]
    pub password: String,
    #[validate(custom = "validate_not_blank")]
    pub phone: String,
}
