pub mod user_response;
pub mod oauth_token_response;

pub use user_response::*;
pub use oauth_token_response::*;
