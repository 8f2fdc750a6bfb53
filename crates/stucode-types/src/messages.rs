//! Client-facing error messages and symbolic error codes.

// 400 BAD_REQUEST
pub const EMAIL_FORMAT_NOT_VALID: &str = "The email format is not valid";
pub const PASSWORD_NOT_VALID: &str = "The password is not valid";

// 401 UNAUTHORIZED
pub const UNAUTHORIZED: &str = "Authentication values are null or undefined";

// 404 NOT_FOUND
pub const ACCOUNT_NOT_FOUND: &str = "The account does not exist";
pub const USER_NOT_FOUND: &str = "The user does not exist";
pub const ARTICLE_NOT_FOUND: &str = "The article does not exist";

// 409 CONFLICT
pub const EMAIL_ALREADY_EXISTS: &str = "The email already exists";
pub const LIKE_ALREADY_EXISTS: &str = "The like already exists";

pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}
