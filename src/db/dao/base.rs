use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    FromQueryResult, IntoActiveModel, PrimaryKeyTrait, TransactionTrait,
};

use super::base_traits::{HasIdModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

/// Projection for queries that select only the primary key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromQueryResult)]
pub struct RowId {
    pub id: i32,
}

/// Common plumbing for DAOs over integer-keyed entities.
///
/// Every read and write runs inside its own transaction. A transaction that is
/// dropped without `commit` is rolled back and its connection goes back to the
/// pool, so early returns through `?` never leak a session.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model: FromQueryResult
        + HasIdModel
        + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel>
        + Send
        + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + TimestampedActiveModel
        + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<i32> + Send + Sync,
{
    type Entity: EntityTrait + Send + Sync;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    async fn begin(&self) -> DaoResult<DatabaseTransaction> {
        self.db().begin().await.map_err(DaoLayerError::Db)
    }

    /// Inserts `active` on an open transaction, stamping `created_at`.
    /// The caller owns the commit.
    async fn insert_in(
        &self,
        txn: &DatabaseTransaction,
        active: <Self::Entity as EntityTrait>::ActiveModel,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let mut active = active;
        active.set_created_at(Utc::now().fixed_offset());
        active.insert(txn).await.map_err(DaoLayerError::Db)
    }

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let txn = self.begin().await?;
        let model = self.insert_in(&txn, data.into_active_model()).await?;
        txn.commit().await?;
        tracing::debug!(
            entity = std::any::type_name::<Self::Entity>(),
            id = model.row_id(),
            "row created"
        );
        Ok(model)
    }

    async fn find_optional_by_id(
        &self,
        id: i32,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        let txn = self.begin().await?;
        let model = Self::Entity::find_by_id(id).one(&txn).await?;
        txn.commit().await?;
        Ok(model)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        self.find_optional_by_id(id)
            .await?
            .ok_or(DaoLayerError::NotFound {
                entity: std::any::type_name::<Self::Entity>(),
                id,
            })
    }
}
