//! In-Memory Ledger Store
//!
//! Keeps the whole ledger behind one `tokio::sync::Mutex`. Every operation
//! takes the lock once, checks all of its preconditions and only then
//! mutates, so each call is atomic and calls never interleave.
//!
//! Used for local development (`memory` feature) and the crate's tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, ItemId};
use tokio::sync::Mutex;

use crate::domain::entity::{
    AccountCredentials, AccountSnapshot, CatalogItem, Purchase, Transfer, TransferRecord,
};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_object::{
    coin_amount::CoinAmount, inventory::Inventory, user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{ShopError, ShopResult};

/// Coins granted to every new account
pub const DEFAULT_STARTING_BALANCE: i64 = 1000;

/// Merchandise catalog seeded into a fresh store (ids 1..=10 in this order)
pub const DEFAULT_CATALOG: &[(&str, i64)] = &[
    ("t-shirt", 80),
    ("cup", 20),
    ("book", 50),
    ("pen", 10),
    ("powerbank", 200),
    ("hoody", 300),
    ("umbrella", 200),
    ("socks", 10),
    ("wallet", 50),
    ("pink-hoody", 500),
];

#[derive(Debug)]
struct StoredAccount {
    user_name: UserName,
    password_hash: UserPassword,
    balance: i64,
    inventory: Inventory,
}

#[derive(Debug)]
struct StoredTransfer {
    from: i64,
    to: i64,
    amount: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Ledger {
    accounts: BTreeMap<i64, StoredAccount>,
    by_name: HashMap<String, i64>,
    items: BTreeMap<i64, CatalogItem>,
    transfers: Vec<StoredTransfer>,
    next_account_id: i64,
    starting_balance: i64,
}

impl Ledger {
    fn user_name_of(&self, id: i64) -> String {
        self.accounts
            .get(&id)
            .map(|a| a.user_name.as_str().to_string())
            .unwrap_or_default()
    }
}

/// Mutex-guarded, process-local ledger repository
#[derive(Debug, Clone)]
pub struct InMemoryLedgerRepository {
    ledger: Arc<Mutex<Ledger>>,
}

impl Default for InMemoryLedgerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedgerRepository {
    /// Empty ledger with the default catalog and starting balance
    pub fn new() -> Self {
        Self::with_catalog(DEFAULT_CATALOG, DEFAULT_STARTING_BALANCE)
    }

    pub fn with_catalog(catalog: &[(&str, i64)], starting_balance: i64) -> Self {
        let items = catalog
            .iter()
            .zip(1..)
            .map(|(&(item_type, price), id)| {
                (
                    id,
                    CatalogItem {
                        item_id: ItemId::from_i64(id),
                        item_type: item_type.to_string(),
                        price,
                    },
                )
            })
            .collect();

        Self {
            ledger: Arc::new(Mutex::new(Ledger {
                accounts: BTreeMap::new(),
                by_name: HashMap::new(),
                items,
                transfers: Vec::new(),
                next_account_id: 1,
                starting_balance,
            })),
        }
    }

    /// Sum of all balances
    pub async fn total_balance(&self) -> i64 {
        let ledger = self.ledger.lock().await;
        ledger.accounts.values().map(|a| a.balance).sum()
    }

    /// Number of accounts
    pub async fn account_count(&self) -> usize {
        self.ledger.lock().await.accounts.len()
    }
}

impl LedgerRepository for InMemoryLedgerRepository {
    async fn find_credentials(
        &self,
        user_name: &UserName,
    ) -> ShopResult<Option<AccountCredentials>> {
        let ledger = self.ledger.lock().await;

        Ok(ledger.by_name.get(user_name.as_str()).and_then(|&id| {
            ledger.accounts.get(&id).map(|account| AccountCredentials {
                account_id: AccountId::from_i64(id),
                user_name: account.user_name.clone(),
                password_hash: account.password_hash.clone(),
            })
        }))
    }

    async fn create_account(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> ShopResult<Option<AccountId>> {
        let mut ledger = self.ledger.lock().await;

        if ledger.by_name.contains_key(user_name.as_str()) {
            return Ok(None);
        }

        let id = ledger.next_account_id;
        ledger.next_account_id += 1;
        let starting_balance = ledger.starting_balance;

        ledger.accounts.insert(
            id,
            StoredAccount {
                user_name: user_name.clone(),
                password_hash: password_hash.clone(),
                balance: starting_balance,
                inventory: Inventory::default(),
            },
        );
        ledger.by_name.insert(user_name.as_str().to_string(), id);

        Ok(Some(AccountId::from_i64(id)))
    }

    async fn send_coin(
        &self,
        from: AccountId,
        to: &UserName,
        amount: CoinAmount,
    ) -> ShopResult<Transfer> {
        let mut ledger = self.ledger.lock().await;
        let from_id = from.as_i64();
        let amount_value = amount.value();

        let source = ledger.accounts.get(&from_id).ok_or(ShopError::Unauthorized)?;
        let source_after = source
            .balance
            .checked_sub(amount_value)
            .filter(|balance| *balance >= 0)
            .ok_or(ShopError::InsufficientFunds)?;

        let to_id = *ledger
            .by_name
            .get(to.as_str())
            .ok_or(ShopError::NoSuchAccount)?;

        if to_id != from_id {
            let destination = ledger.accounts.get(&to_id).ok_or(ShopError::NoSuchAccount)?;
            let destination_after = destination
                .balance
                .checked_add(amount_value)
                .ok_or_else(|| ShopError::Internal("balance overflow".to_string()))?;

            if let Some(source) = ledger.accounts.get_mut(&from_id) {
                source.balance = source_after;
            }
            if let Some(destination) = ledger.accounts.get_mut(&to_id) {
                destination.balance = destination_after;
            }
        }

        let created_at = Utc::now();
        ledger.transfers.push(StoredTransfer {
            from: from_id,
            to: to_id,
            amount: amount_value,
            created_at,
        });

        Ok(Transfer {
            from,
            to: AccountId::from_i64(to_id),
            amount,
            created_at,
        })
    }

    async fn buy_item(&self, buyer: AccountId, item_id: ItemId) -> ShopResult<Purchase> {
        let mut ledger = self.ledger.lock().await;

        let item = ledger
            .items
            .get(&item_id.as_i64())
            .cloned()
            .ok_or(ShopError::NoSuchItem)?;

        let account = ledger
            .accounts
            .get_mut(&buyer.as_i64())
            .ok_or(ShopError::Unauthorized)?;

        let balance_after = account
            .balance
            .checked_sub(item.price)
            .filter(|balance| *balance >= 0)
            .ok_or(ShopError::InsufficientFunds)?;

        account.balance = balance_after;
        account.inventory.add_one(&item.item_type);

        Ok(Purchase {
            buyer,
            item_type: item.item_type,
            price: item.price,
            balance_after,
        })
    }

    async fn account_snapshot(&self, account_id: AccountId) -> ShopResult<AccountSnapshot> {
        let ledger = self.ledger.lock().await;
        let id = account_id.as_i64();

        let account = ledger.accounts.get(&id).ok_or(ShopError::Unauthorized)?;

        let record = |counterpart: i64, t: &StoredTransfer| TransferRecord {
            counterpart: ledger.user_name_of(counterpart),
            amount: t.amount,
            created_at: t.created_at,
        };

        let received = ledger
            .transfers
            .iter()
            .filter(|t| t.to == id)
            .map(|t| record(t.from, t))
            .collect();

        let sent = ledger
            .transfers
            .iter()
            .filter(|t| t.from == id)
            .map(|t| record(t.to, t))
            .collect();

        Ok(AccountSnapshot {
            balance: account.balance,
            inventory_raw: account.inventory.to_json()?,
            received,
            sent,
        })
    }

    async fn find_item(&self, item_id: ItemId) -> ShopResult<Option<CatalogItem>> {
        let ledger = self.ledger.lock().await;
        Ok(ledger.items.get(&item_id.as_i64()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn hash() -> UserPassword {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        UserPassword::from_raw(&raw, None).unwrap()
    }

    fn name(s: &str) -> UserName {
        UserName::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_account_is_unique() {
        let repo = InMemoryLedgerRepository::new();
        let password = hash();

        let first = repo.create_account(&name("alice"), &password).await.unwrap();
        let second = repo.create_account(&name("alice"), &password).await.unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(repo.account_count().await, 1);
    }

    #[tokio::test]
    async fn test_send_coin_moves_balance_and_records() {
        let repo = InMemoryLedgerRepository::new();
        let password = hash();
        let alice = repo.create_account(&name("alice"), &password).await.unwrap().unwrap();
        let bob = repo.create_account(&name("bob"), &password).await.unwrap().unwrap();

        let transfer = repo
            .send_coin(alice, &name("bob"), CoinAmount::new(300).unwrap())
            .await
            .unwrap();
        assert_eq!(transfer.to, bob);

        let alice_view = repo.account_snapshot(alice).await.unwrap();
        let bob_view = repo.account_snapshot(bob).await.unwrap();
        assert_eq!(alice_view.balance, 700);
        assert_eq!(bob_view.balance, 1300);
        assert_eq!(alice_view.sent[0].counterpart, "bob");
        assert_eq!(bob_view.received[0].counterpart, "alice");
        assert_eq!(repo.total_balance().await, 2000);
    }

    #[tokio::test]
    async fn test_insufficient_funds_checked_before_recipient() {
        let repo = InMemoryLedgerRepository::new();
        let alice = repo.create_account(&name("alice"), &hash()).await.unwrap().unwrap();

        let result = repo
            .send_coin(alice, &name("ghost"), CoinAmount::new(5000).unwrap())
            .await;
        assert!(matches!(result, Err(ShopError::InsufficientFunds)));

        let result = repo
            .send_coin(alice, &name("ghost"), CoinAmount::new(5).unwrap())
            .await;
        assert!(matches!(result, Err(ShopError::NoSuchAccount)));

        assert_eq!(repo.account_snapshot(alice).await.unwrap().balance, 1000);
    }

    #[tokio::test]
    async fn test_self_transfer_is_neutral() {
        let repo = InMemoryLedgerRepository::new();
        let alice = repo.create_account(&name("alice"), &hash()).await.unwrap().unwrap();

        repo.send_coin(alice, &name("alice"), CoinAmount::new(1000).unwrap())
            .await
            .unwrap();

        let snapshot = repo.account_snapshot(alice).await.unwrap();
        assert_eq!(snapshot.balance, 1000);
        assert_eq!(snapshot.sent.len(), 1);
        assert_eq!(snapshot.received.len(), 1);
    }

    #[tokio::test]
    async fn test_buy_item_charges_and_adds_one() {
        let repo = InMemoryLedgerRepository::new();
        let alice = repo.create_account(&name("alice"), &hash()).await.unwrap().unwrap();

        // id 2 is "cup" at 20 coins
        let purchase = repo.buy_item(alice, ItemId::from_i64(2)).await.unwrap();
        assert_eq!(purchase.item_type, "cup");
        assert_eq!(purchase.balance_after, 980);

        repo.buy_item(alice, ItemId::from_i64(2)).await.unwrap();

        let snapshot = repo.account_snapshot(alice).await.unwrap();
        let inventory = Inventory::decode(&snapshot.inventory_raw).unwrap();
        assert_eq!(inventory.quantity("cup"), 2);
        assert_eq!(snapshot.balance, 960);
    }

    #[tokio::test]
    async fn test_buy_item_rejections_leave_state() {
        let repo = InMemoryLedgerRepository::with_catalog(&[("yacht", 5000)], 100);
        let alice = repo.create_account(&name("alice"), &hash()).await.unwrap().unwrap();

        assert!(matches!(
            repo.buy_item(alice, ItemId::from_i64(1)).await,
            Err(ShopError::InsufficientFunds)
        ));
        assert!(matches!(
            repo.buy_item(alice, ItemId::from_i64(99)).await,
            Err(ShopError::NoSuchItem)
        ));

        let snapshot = repo.account_snapshot(alice).await.unwrap();
        assert_eq!(snapshot.balance, 100);
        assert!(Inventory::decode(&snapshot.inventory_raw).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_account_snapshot() {
        let repo = InMemoryLedgerRepository::new();
        assert!(matches!(
            repo.account_snapshot(AccountId::from_i64(7)).await,
            Err(ShopError::Unauthorized)
        ));
    }
}
