pub mod auth;
pub mod credentials;
pub mod user;

pub use auth::*;
pub use credentials::*;
pub use user::*;
