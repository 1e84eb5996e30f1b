mod auth;

pub use auth::TokenProvider;
