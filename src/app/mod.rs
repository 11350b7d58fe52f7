pub mod auth;
pub mod comments;
pub mod posts;
pub mod stats;
pub mod tokens;
pub mod users;
