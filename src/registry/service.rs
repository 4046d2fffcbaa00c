//! Title registry service - mint, approval and custody transfer logic

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::Address;
use crate::registry::Title;

/// Registry errors
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("account {caller} is not authorized to act on title {token_id}")]
    Unauthorized { caller: Address, token_id: u64 },

    #[error("title {0} does not exist")]
    NotFound(u64),

    #[error("title {token_id} is owned by {actual}, not {expected}")]
    OwnerMismatch {
        token_id: u64,
        expected: Address,
        actual: Address,
    },
}

/// In-memory title table plus the mint counter. Kept behind a single lock so
/// id allocation and insertion commit together.
struct RegistryStore {
    titles: HashMap<u64, Title>,
    next_token_id: u64,
}

/// Registry of tokenized property titles.
///
/// All mutation goes through the public operations; each call either fully
/// commits or leaves the store untouched.
pub struct TitleRegistry {
    address: Address,
    store: RwLock<RegistryStore>,
}

impl TitleRegistry {
    /// Create an empty registry with a fresh component address
    pub fn new() -> Self {
        Self {
            address: Address::new(),
            store: RwLock::new(RegistryStore {
                titles: HashMap::new(),
                next_token_id: 1,
            }),
        }
    }

    /// The registry's own address in the shared identifier space
    pub fn address(&self) -> Address {
        self.address
    }

    /// Mint a new title owned by `caller`. Token ids are sequential starting
    /// at 1 and never reused.
    pub async fn mint(&self, caller: Address, metadata_uri: &str) -> Result<Title, RegistryError> {
        if metadata_uri.is_empty() {
            return Err(RegistryError::InvalidInput(
                "metadata URI must not be empty".to_string(),
            ));
        }

        let mut store = self.store.write().await;
        let token_id = store.next_token_id;
        let title = Title {
            token_id,
            owner: caller,
            metadata_uri: metadata_uri.to_string(),
            approved_operator: None,
            minted_at: Utc::now(),
        };
        store.titles.insert(token_id, title.clone());
        store.next_token_id += 1;

        tracing::info!(token_id, owner = %caller, "Title minted");
        Ok(title)
    }

    /// Grant `operator` the right to transfer `token_id` once. Only the
    /// current owner may approve.
    pub async fn approve(
        &self,
        caller: Address,
        operator: Address,
        token_id: u64,
    ) -> Result<(), RegistryError> {
        let mut store = self.store.write().await;
        let title = store
            .titles
            .get_mut(&token_id)
            .ok_or(RegistryError::NotFound(token_id))?;

        if title.owner != caller {
            return Err(RegistryError::Unauthorized { caller, token_id });
        }

        title.approved_operator = Some(operator);
        tracing::debug!(token_id, operator = %operator, "Transfer operator approved");
        Ok(())
    }

    /// Current owner of `token_id`
    pub async fn owner_of(&self, token_id: u64) -> Result<Address, RegistryError> {
        let store = self.store.read().await;
        store
            .titles
            .get(&token_id)
            .map(|title| title.owner)
            .ok_or(RegistryError::NotFound(token_id))
    }

    /// Full title record for `token_id`
    pub async fn title(&self, token_id: u64) -> Result<Title, RegistryError> {
        let store = self.store.read().await;
        store
            .titles
            .get(&token_id)
            .cloned()
            .ok_or(RegistryError::NotFound(token_id))
    }

    /// Transfer `token_id` from `from` to `to`. The caller must be `from` or
    /// the approved operator; a successful transfer consumes the approval.
    pub async fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), RegistryError> {
        let mut store = self.store.write().await;
        let title = store
            .titles
            .get_mut(&token_id)
            .ok_or(RegistryError::NotFound(token_id))?;

        if title.owner != from {
            return Err(RegistryError::OwnerMismatch {
                token_id,
                expected: from,
                actual: title.owner,
            });
        }

        let authorized = caller == from || title.approved_operator == Some(caller);
        if !authorized {
            return Err(RegistryError::Unauthorized { caller, token_id });
        }

        title.owner = to;
        title.approved_operator = None;

        tracing::info!(token_id, from = %from, to = %to, "Title transferred");
        Ok(())
    }
}

impl Default for TitleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mint_assigns_sequential_ids() {
        let registry = TitleRegistry::new();
        let owner = Address::new();

        let first = registry.mint(owner, "ipfs://deed/1.json").await.unwrap();
        let second = registry.mint(owner, "ipfs://deed/2.json").await.unwrap();

        assert_eq!(first.token_id, 1);
        assert_eq!(second.token_id, 2);
        assert_eq!(registry.owner_of(1).await.unwrap(), owner);
        assert_eq!(registry.owner_of(2).await.unwrap(), owner);
    }

    #[tokio::test]
    async fn test_mint_rejects_empty_metadata_uri() {
        let registry = TitleRegistry::new();

        let result = registry.mint(Address::new(), "").await;

        assert!(matches!(result, Err(RegistryError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_approve_requires_ownership() {
        let registry = TitleRegistry::new();
        let owner = Address::new();
        let stranger = Address::new();
        registry.mint(owner, "ipfs://deed/1.json").await.unwrap();

        let result = registry.approve(stranger, Address::new(), 1).await;

        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_approve_unknown_title_not_found() {
        let registry = TitleRegistry::new();

        let result = registry.approve(Address::new(), Address::new(), 42).await;

        assert!(matches!(result, Err(RegistryError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_owner_of_unknown_title_not_found() {
        let registry = TitleRegistry::new();

        assert!(matches!(
            registry.owner_of(7).await,
            Err(RegistryError::NotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_transfer_by_approved_operator() {
        let registry = TitleRegistry::new();
        let owner = Address::new();
        let operator = Address::new();
        registry.mint(owner, "ipfs://deed/1.json").await.unwrap();
        registry.approve(owner, operator, 1).await.unwrap();

        registry
            .transfer_from(operator, owner, operator, 1)
            .await
            .unwrap();

        assert_eq!(registry.owner_of(1).await.unwrap(), operator);
        assert_eq!(registry.title(1).await.unwrap().approved_operator, None);
    }

    #[tokio::test]
    async fn test_approval_is_consumed_by_transfer() {
        let registry = TitleRegistry::new();
        let owner = Address::new();
        let operator = Address::new();
        let vault = Address::new();
        registry.mint(owner, "ipfs://deed/1.json").await.unwrap();
        registry.approve(owner, operator, 1).await.unwrap();

        registry
            .transfer_from(operator, owner, vault, 1)
            .await
            .unwrap();

        // The approval was spent on the first transfer
        let result = registry.transfer_from(operator, vault, operator, 1).await;
        assert!(matches!(result, Err(RegistryError::Unauthorized { .. })));
        assert_eq!(registry.owner_of(1).await.unwrap(), vault);
    }

    #[tokio::test]
    async fn test_transfer_with_stale_from_is_owner_mismatch() {
        let registry = TitleRegistry::new();
        let owner = Address::new();
        let stranger = Address::new();
        registry.mint(owner, "ipfs://deed/1.json").await.unwrap();

        let result = registry
            .transfer_from(stranger, stranger, Address::new(), 1)
            .await;

        assert!(matches!(result, Err(RegistryError::OwnerMismatch { .. })));
        assert_eq!(registry.owner_of(1).await.unwrap(), owner);
    }

    #[tokio::test]
    async fn test_owner_can_transfer_without_approval() {
        let registry = TitleRegistry::new();
        let owner = Address::new();
        let recipient = Address::new();
        registry.mint(owner, "ipfs://deed/1.json").await.unwrap();

        registry
            .transfer_from(owner, owner, recipient, 1)
            .await
            .unwrap();

        assert_eq!(registry.owner_of(1).await.unwrap(), recipient);
    }
}
