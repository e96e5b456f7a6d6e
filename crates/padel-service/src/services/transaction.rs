//! Transaction combinator
//!
//! Services express each mutation as one closure over an open
//! [`MatchTransaction`]. The closure's writes are committed when it returns
//! `Ok` and rolled back otherwise.

use futures::future::BoxFuture;
use padel_core::traits::{MatchStore, MatchTransaction};
use tracing::{debug, warn};

use super::error::ServiceResult;

/// Run `f` inside a store transaction.
///
/// The closure must own what it captures; the returned future borrows only
/// the transaction handle.
pub async fn with_transaction<R, F>(store: &dyn MatchStore, f: F) -> ServiceResult<R>
where
    R: Send,
    F: for<'t> FnOnce(&'t mut dyn MatchTransaction) -> BoxFuture<'t, ServiceResult<R>> + Send,
{
    let mut tx = store.begin().await?;

    match f(tx.as_mut()).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            debug!(error = %err, "Rolling back transaction");
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use padel_core::entities::User;
    use padel_core::value_objects::UserId;
    use padel_core::DomainError;
    use padel_db::MemoryMatchStore;

    use super::*;
    use crate::services::ServiceError;

    fn user(id: &str) -> User {
        User::new(UserId::new(id), id.to_string(), None, Utc::now())
    }

    #[tokio::test]
    async fn test_commits_on_success() {
        let store = MemoryMatchStore::new();

        let id = with_transaction(&store, |tx| {
            Box::pin(async move {
                let u = user("ana");
                tx.create_user(&u).await?;
                Ok(u.id)
            })
        })
        .await
        .unwrap();

        assert!(store.find_user(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rolls_back_on_error() {
        let store = MemoryMatchStore::new();

        let result: ServiceResult<()> = with_transaction(&store, |tx| {
            Box::pin(async move {
                tx.create_user(&user("ana")).await?;
                Err(DomainError::MissingScore.into())
            })
        })
        .await;

        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::MissingScore))
        ));
        assert!(store.find_user(&UserId::new("ana")).await.unwrap().is_none());
    }
}
