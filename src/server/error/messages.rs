
//! Common error and status messages, as constants to be reused by
//! endpoints.

pub const NOT_FOUND: &'static str = "Not Found";
pub const UNKNOWN_DB_ERROR: &'static str = "An unexpected database error occurred";
pub const BAD_REQUEST: &'static str = "Bad Request";
pub const UNAUTHORIZED: &'static str = "Unauthorized";
pub const INVALID_CREDENTIALS: &'static str = "Invalid credentials";

pub const USER_NOT_FOUND: &'static str = "User not found";
pub const GAME_NOT_FOUND: &'static str = "Game not found";
pub const RATING_NOT_FOUND: &'static str = "Rating not found";
pub const FEEDBACK_NOT_FOUND: &'static str = "Feedback not found";

pub const USER_DELETED: &'static str = "User deleted";
pub const GAME_DELETED: &'static str = "Game deleted";
pub const RATING_DELETED: &'static str = "Rating deleted";
pub const FEEDBACK_DELETED: &'static str = "Feedback deleted";
