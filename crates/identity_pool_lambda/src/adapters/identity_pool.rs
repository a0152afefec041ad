use identity_pool_core::properties::IdentityPoolSpec;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityPoolApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Service(String),
}

impl IdentityPoolApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub trait IdentityPoolApi {
    /// Returns the id of the new pool.
    fn create_identity_pool(&self, spec: &IdentityPoolSpec) -> Result<String, IdentityPoolApiError>;

    fn update_identity_pool(
        &self,
        identity_pool_id: &str,
        spec: &IdentityPoolSpec,
    ) -> Result<(), IdentityPoolApiError>;

    fn delete_identity_pool(&self, identity_pool_id: &str) -> Result<(), IdentityPoolApiError>;
}
