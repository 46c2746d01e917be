//! The client-side mirror of the signed-in user's data.
//!
//! Mutations are confirm-then-apply: the server call runs first and the
//! snapshot is patched only with the record the server returned. A failed
//! call leaves the snapshot exactly as it was.

use engine::{
    Category, CategoryDraft, GoalDraft, SavingsGoal, Snapshot, Transaction, TransactionDraft,
};

use crate::{
    error::{ClientError, Result},
    identity::Identity,
    remote::{EntityKind, RemoteDataClient},
};

/// Replaces the record with the same id, or appends it if none matches.
fn replace_by_id<T, K: PartialEq>(items: &mut Vec<T>, record: T, key: impl Fn(&T) -> K) {
    let id = key(&record);
    match items.iter().position(|item| key(item) == id) {
        Some(index) => items[index] = record,
        None => items.push(record),
    }
}

/// Holds the store's loading flag up until dropped, even when the load
/// future is cancelled.
struct LoadingFlag<'a>(&'a mut bool);

impl<'a> LoadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug)]
pub struct EntityStore {
    client: RemoteDataClient,
    identity: Option<Identity>,
    snapshot: Snapshot,
    loading: bool,
    error: Option<String>,
}

impl EntityStore {
    pub fn new(client: RemoteDataClient) -> Self {
        Self {
            client,
            identity: None,
            snapshot: Snapshot::default(),
            loading: false,
            error: None,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The current snapshot. Derived views must be recomputed from it after
    /// every mutation.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed [`load`](Self::load), if any.
    pub fn load_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn require_identity(&self) -> Result<Identity> {
        self.identity.clone().ok_or(ClientError::MissingIdentity)
    }

    /// A new user signed in: drop the previous user's data and fetch theirs.
    pub async fn sign_in(&mut self, identity: Identity) -> Result<()> {
        tracing::info!("signed in as {}", identity.username);
        self.identity = Some(identity);
        self.snapshot = Snapshot::default();
        self.error = None;
        self.load().await
    }

    /// The user signed out: forget the identity and every record.
    pub fn sign_out(&mut self) {
        if let Some(identity) = self.identity.take() {
            tracing::info!("signed out {}", identity.username);
        }
        self.snapshot = Snapshot::default();
        self.loading = false;
        self.error = None;
    }

    /// Fetches everything and replaces the snapshot wholesale.
    ///
    /// A server or network failure does not make this return `Err`: the
    /// previous snapshot stays visible and the failure is recorded in
    /// [`load_error`](Self::load_error). Only a missing identity is an error.
    ///
    /// Dropping the returned future mid-fetch leaves the snapshot and the
    /// previous error as they were, and the store no longer loading.
    pub async fn load(&mut self) -> Result<()> {
        let identity = self.require_identity()?;

        let res = {
            let _loading = LoadingFlag::raise(&mut self.loading);
            self.client.fetch_all(&identity).await
        };

        match res {
            Ok(snapshot) => {
                tracing::info!(
                    "loaded {} transactions, {} categories, {} goals",
                    snapshot.transactions.len(),
                    snapshot.categories.len(),
                    snapshot.goals.len()
                );
                let dangling = snapshot.dangling_transactions().count();
                if dangling > 0 {
                    tracing::warn!("{dangling} transactions reference a missing category");
                }
                self.snapshot = snapshot;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("failed to load data: {err}");
                self.error = Some(err.to_string());
            }
        }
        Ok(())
    }

    pub async fn create_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction> {
        draft.validate()?;
        let identity = self.require_identity()?;
        let tx = self.client.create_transaction(&identity, draft).await?;
        self.snapshot.transactions.push(tx.clone());
        Ok(tx)
    }

    pub async fn update_transaction(
        &mut self,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        draft.validate()?;
        let identity = self.require_identity()?;
        let tx = self.client.update_transaction(&identity, id, draft).await?;
        replace_by_id(&mut self.snapshot.transactions, tx.clone(), |t| t.id);
        Ok(tx)
    }

    pub async fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let identity = self.require_identity()?;
        self.client
            .delete(&identity, EntityKind::Transaction, &id.to_string())
            .await?;
        self.snapshot.transactions.retain(|tx| tx.id != id);
        Ok(())
    }

    pub async fn create_category(&mut self, draft: &CategoryDraft) -> Result<Category> {
        draft.validate()?;
        let identity = self.require_identity()?;
        let category = self.client.create_category(&identity, draft).await?;
        self.snapshot.categories.push(category.clone());
        Ok(category)
    }

    pub async fn update_category(&mut self, id: &str, draft: &CategoryDraft) -> Result<Category> {
        draft.validate()?;
        let identity = self.require_identity()?;
        let category = self.client.update_category(&identity, id, draft).await?;
        replace_by_id(&mut self.snapshot.categories, category.clone(), |c| {
            c.id.clone()
        });
        Ok(category)
    }

    /// Deletes a category. Transactions referencing it are kept and will
    /// report the `unknown` category from then on.
    pub async fn delete_category(&mut self, id: &str) -> Result<()> {
        let identity = self.require_identity()?;
        self.client
            .delete(&identity, EntityKind::Category, id)
            .await?;
        self.snapshot.categories.retain(|category| category.id != id);
        Ok(())
    }

    pub async fn create_goal(&mut self, draft: &GoalDraft) -> Result<SavingsGoal> {
        draft.validate()?;
        let identity = self.require_identity()?;
        let goal = self.client.create_goal(&identity, draft).await?;
        self.snapshot.goals.push(goal.clone());
        Ok(goal)
    }

    pub async fn update_goal(&mut self, id: i64, draft: &GoalDraft) -> Result<SavingsGoal> {
        draft.validate()?;
        let identity = self.require_identity()?;
        let goal = self.client.update_goal(&identity, id, draft).await?;
        replace_by_id(&mut self.snapshot.goals, goal.clone(), |g| g.id);
        Ok(goal)
    }

    pub async fn delete_goal(&mut self, id: i64) -> Result<()> {
        let identity = self.require_identity()?;
        self.client
            .delete(&identity, EntityKind::Goal, &id.to_string())
            .await?;
        self.snapshot.goals.retain(|goal| goal.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_by_id_swaps_in_place() {
        let mut items = vec![(1, "a"), (2, "b"), (3, "c")];
        replace_by_id(&mut items, (2, "B"), |item| item.0);
        assert_eq!(items, vec![(1, "a"), (2, "B"), (3, "c")]);
    }

    #[test]
    fn replace_by_id_appends_unknown_ids() {
        let mut items = vec![(1, "a")];
        replace_by_id(&mut items, (9, "z"), |item| item.0);
        assert_eq!(items, vec![(1, "a"), (9, "z")]);
    }

    #[test]
    fn loading_flag_drops_back() {
        let mut loading = false;
        let flag = LoadingFlag::raise(&mut loading);
        assert!(*flag.0);
        drop(flag);
        assert!(!loading);
    }

    #[tokio::test]
    async fn calls_without_identity_fail_fast() {
        let client = RemoteDataClient::new("http://127.0.0.1:9").unwrap();
        let mut store = EntityStore::new(client);

        assert!(matches!(store.load().await, Err(ClientError::MissingIdentity)));
        assert!(matches!(
            store.delete_goal(1).await,
            Err(ClientError::MissingIdentity)
        ));
        assert!(!store.is_loading());
        assert!(store.snapshot().is_empty());
    }
}
