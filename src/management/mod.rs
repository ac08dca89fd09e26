mod auth;
mod selection;

pub use auth::TokenError;
pub use auth::TokenManager;
pub use selection::SelectionError;
pub use selection::SelectionManager;
