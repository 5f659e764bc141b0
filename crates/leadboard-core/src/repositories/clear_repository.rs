//! Clear repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::commands::ClearRequest;
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClearRepository: Send + Sync {
    /// Deactivates every named entity in one unit: all of them or none.
    async fn deactivate_all(&self, targets: &ClearRequest) -> Result<(), DomainError>;
}
