pub mod auth;
pub mod env;
pub mod error;
pub mod utils;

pub use utils::test_utils;
