//! PostgreSQL Ledger Store
//!
//! Every mutation runs in one transaction. Non-negative balances are enforced
//! by the `accounts_balance_non_negative` CHECK constraint, never by reading
//! the balance first. Row locks serialize concurrent operations on the same
//! account; transfers lock both rows in ascending id order so that opposite
//! transfers cannot deadlock.
//!
//! Failed transactions are rolled back explicitly. A transaction whose future
//! is dropped mid-flight (deadline, client cancellation) is rolled back by the
//! `sqlx::Transaction` guard.

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, ItemId};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::domain::entity::{
    AccountCredentials, AccountSnapshot, CatalogItem, Purchase, Transfer, TransferRecord,
};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_object::{
    coin_amount::CoinAmount, user_name::UserName, user_password::UserPassword,
};
use crate::error::{ShopError, ShopResult};

/// Name of the CHECK constraint guarding `accounts.balance >= 0`
pub const BALANCE_CONSTRAINT: &str = "accounts_balance_non_negative";

/// PostgreSQL-backed ledger repository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn send_coin_in(
        conn: &mut PgConnection,
        from: AccountId,
        to: &UserName,
        amount: CoinAmount,
    ) -> ShopResult<Transfer> {
        let to_id: Option<i64> = sqlx::query_scalar("SELECT id FROM accounts WHERE username = $1")
            .bind(to.as_str())
            .fetch_optional(&mut *conn)
            .await?;

        // Lock source and destination rows in id order
        let mut lock_ids = vec![from.as_i64()];
        lock_ids.extend(to_id);
        sqlx::query("SELECT id FROM accounts WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(&lock_ids)
            .fetch_all(&mut *conn)
            .await?;

        let debited: Option<i64> = sqlx::query_scalar(
            "UPDATE accounts SET balance = balance - $2 WHERE id = $1 RETURNING balance",
        )
        .bind(from.as_i64())
        .bind(amount.value())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_balance_violation)?;

        if debited.is_none() {
            return Err(ShopError::Unauthorized);
        }

        let to_id = to_id.ok_or(ShopError::NoSuchAccount)?;

        sqlx::query("UPDATE accounts SET balance = balance + $2 WHERE id = $1")
            .bind(to_id)
            .bind(amount.value())
            .execute(&mut *conn)
            .await?;

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO coin_transfers (from_account_id, to_account_id, amount)
            VALUES ($1, $2, $3)
            RETURNING created_at
            "#,
        )
        .bind(from.as_i64())
        .bind(to_id)
        .bind(amount.value())
        .fetch_one(&mut *conn)
        .await?;

        Ok(Transfer {
            from,
            to: AccountId::from_i64(to_id),
            amount,
            created_at,
        })
    }

    async fn buy_item_in(
        conn: &mut PgConnection,
        buyer: AccountId,
        item_id: ItemId,
    ) -> ShopResult<Purchase> {
        let item = sqlx::query_as::<_, CatalogItemRow>(
            "SELECT id, item_type, price FROM catalog_items WHERE id = $1",
        )
        .bind(item_id.as_i64())
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(ShopError::NoSuchItem)?;

        // One statement: debit and inventory increment on the same locked row.
        // The item type is a bound parameter, never spliced into SQL.
        let balance_after: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance = balance - $2,
                inventory = jsonb_set(
                    inventory,
                    ARRAY[$3::text],
                    to_jsonb(COALESCE((inventory ->> $3::text)::bigint, 0) + 1)
                )
            WHERE id = $1
            RETURNING balance
            "#,
        )
        .bind(buyer.as_i64())
        .bind(item.price)
        .bind(&item.item_type)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_balance_violation)?;

        let balance_after = balance_after.ok_or(ShopError::Unauthorized)?;

        Ok(Purchase {
            buyer,
            item_type: item.item_type,
            price: item.price,
            balance_after,
        })
    }

    async fn snapshot_in(
        conn: &mut PgConnection,
        account_id: AccountId,
    ) -> ShopResult<AccountSnapshot> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *conn)
            .await?;

        let (balance, inventory): (i64, String) =
            sqlx::query_as("SELECT balance, inventory::text FROM accounts WHERE id = $1")
                .bind(account_id.as_i64())
                .fetch_optional(&mut *conn)
                .await?
                .ok_or(ShopError::Unauthorized)?;

        let received = sqlx::query_as::<_, TransferRow>(
            r#"
            SELECT a.username AS counterpart, t.amount, t.created_at
            FROM coin_transfers t
            JOIN accounts a ON a.id = t.from_account_id
            WHERE t.to_account_id = $1
            ORDER BY t.created_at, t.id
            "#,
        )
        .bind(account_id.as_i64())
        .fetch_all(&mut *conn)
        .await?;

        let sent = sqlx::query_as::<_, TransferRow>(
            r#"
            SELECT a.username AS counterpart, t.amount, t.created_at
            FROM coin_transfers t
            JOIN accounts a ON a.id = t.to_account_id
            WHERE t.from_account_id = $1
            ORDER BY t.created_at, t.id
            "#,
        )
        .bind(account_id.as_i64())
        .fetch_all(&mut *conn)
        .await?;

        Ok(AccountSnapshot {
            balance,
            inventory_raw: inventory.into_bytes(),
            received: received.into_iter().map(TransferRow::into_record).collect(),
            sent: sent.into_iter().map(TransferRow::into_record).collect(),
        })
    }
}

/// Commit on success; otherwise roll back explicitly and return the original error
async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: ShopResult<T>,
    operation: &'static str,
) -> ShopResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(operation, error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}

fn map_balance_violation(err: sqlx::Error) -> ShopError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.is_check_violation() && db_err.constraint() == Some(BALANCE_CONSTRAINT) =>
        {
            ShopError::InsufficientFunds
        }
        _ => ShopError::Database(err),
    }
}

// ============================================================================
// Ledger Repository Implementation
// ============================================================================

impl LedgerRepository for PgLedgerRepository {
    async fn find_credentials(
        &self,
        user_name: &UserName,
    ) -> ShopResult<Option<AccountCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            "SELECT id, username, password_hash FROM accounts WHERE username = $1",
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialsRow::into_credentials).transpose()
    }

    async fn create_account(
        &self,
        user_name: &UserName,
        password_hash: &UserPassword,
    ) -> ShopResult<Option<AccountId>> {
        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO accounts (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_name.as_str())
        .bind(password_hash.as_phc_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map(AccountId::from_i64))
    }

    async fn send_coin(
        &self,
        from: AccountId,
        to: &UserName,
        amount: CoinAmount,
    ) -> ShopResult<Transfer> {
        let mut tx = self.pool.begin().await?;
        let result = Self::send_coin_in(&mut tx, from, to, amount).await;
        finish(tx, result, "send_coin").await
    }

    async fn buy_item(&self, buyer: AccountId, item_id: ItemId) -> ShopResult<Purchase> {
        let mut tx = self.pool.begin().await?;
        let result = Self::buy_item_in(&mut tx, buyer, item_id).await;
        finish(tx, result, "buy_item").await
    }

    async fn account_snapshot(&self, account_id: AccountId) -> ShopResult<AccountSnapshot> {
        let mut tx = self.pool.begin().await?;
        let result = Self::snapshot_in(&mut tx, account_id).await;
        finish(tx, result, "account_snapshot").await
    }

    async fn find_item(&self, item_id: ItemId) -> ShopResult<Option<CatalogItem>> {
        let row = sqlx::query_as::<_, CatalogItemRow>(
            "SELECT id, item_type, price FROM catalog_items WHERE id = $1",
        )
        .bind(item_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CatalogItemRow::into_item))
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl CredentialsRow {
    fn into_credentials(self) -> ShopResult<AccountCredentials> {
        let password_hash = UserPassword::from_phc_string(self.password_hash).map_err(|e| {
            ShopError::Internal(format!("Invalid password hash for account {}: {}", self.id, e))
        })?;

        Ok(AccountCredentials {
            account_id: AccountId::from_i64(self.id),
            user_name: UserName::from_db(self.username),
            password_hash,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CatalogItemRow {
    id: i64,
    item_type: String,
    price: i64,
}

impl CatalogItemRow {
    fn into_item(self) -> CatalogItem {
        CatalogItem {
            item_id: ItemId::from_i64(self.id),
            item_type: self.item_type,
            price: self.price,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TransferRow {
    counterpart: String,
    amount: i64,
    created_at: DateTime<Utc>,
}

impl TransferRow {
    fn into_record(self) -> TransferRecord {
        TransferRecord {
            counterpart: self.counterpart,
            amount: self.amount,
            created_at: self.created_at,
        }
    }
}
