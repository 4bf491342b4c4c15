//! Active tab accessor.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::Tab;

#[async_trait]
pub trait TabAccessor: Send + Sync {
    /// The page open in the active tab.
    async fn current_tab(&self) -> Result<Tab, StoreError>;
}
