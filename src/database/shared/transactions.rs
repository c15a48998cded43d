// ABOUTME: Write transaction wrapper for store operations spanning several statements
// ABOUTME: Uncommitted work is rolled back when the guard goes out of scope

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::warn;

use crate::errors::{DatabaseError, DatabaseResult};

/// Open `SQLite` write transaction tagged with the operation it serves
///
/// Dropping the guard before `commit` rolls the transaction back.
pub struct TransactionGuard {
    operation: &'static str,
    transaction: Option<Transaction<'static, Sqlite>>,
}

impl TransactionGuard {
    /// Begin a transaction on `pool` for `operation`
    ///
    /// # Errors
    ///
    /// Returns an error if no connection could be acquired
    pub async fn begin(pool: &SqlitePool, operation: &'static str) -> DatabaseResult<Self> {
        let transaction = pool.begin().await.map_err(|e| DatabaseError::TransactionError {
            context: format!("{operation}: begin failed: {e}"),
        })?;
        Ok(Self {
            operation,
            transaction: Some(transaction),
        })
    }

    /// Connection to run the transaction's statements on
    ///
    /// # Errors
    ///
    /// Returns an error once the transaction has been finished
    pub fn conn(&mut self) -> DatabaseResult<&mut SqliteConnection> {
        let operation = self.operation;
        self.transaction
            .as_deref_mut()
            .ok_or_else(|| DatabaseError::TransactionError {
                context: format!("{operation}: transaction already finished"),
            })
    }

    /// Commit the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails
    pub async fn commit(mut self) -> DatabaseResult<()> {
        self.finish(true).await
    }

    /// Roll the transaction back now rather than on drop
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails
    pub async fn rollback(mut self) -> DatabaseResult<()> {
        self.finish(false).await
    }

    async fn finish(&mut self, commit: bool) -> DatabaseResult<()> {
        let operation = self.operation;
        let Some(transaction) = self.transaction.take() else {
            return Ok(());
        };
        let (stage, result) = if commit {
            ("commit", transaction.commit().await)
        } else {
            ("rollback", transaction.rollback().await)
        };
        result.map_err(|e| DatabaseError::TransactionError {
            context: format!("{operation}: {stage} failed: {e}"),
        })
    }
}

impl Drop for TransactionGuard {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            warn!(operation = self.operation, "write abandoned, rolling back");
        }
    }
}
