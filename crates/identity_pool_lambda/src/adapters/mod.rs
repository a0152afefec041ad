pub mod cognito;
pub mod identity_pool;
pub mod response;
