use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, NotSet, Order, QueryFilter, QueryOrder, QuerySelect, Select,
    Set, TransactionTrait,
};
use serde_json::Value as JsonValue;

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::AppResult;
use crate::models::{IdentifierField, NewUser, User, UserChanges, UserSummary, VideoCandidate};
use crate::repositories::UserStore;

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    db: DatabaseConnection,
}

impl PgUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, input: NewUser) -> AppResult<i32> {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            id: NotSet,
            username: Set(input.username),
            email: Set(input.email),
            phone_number: Set(input.phone_number),
            address: Set(input.address),
            password: Set(input.password_hash),
            profile_picture: Set(input.profile_picture),
            bio: Set(input.bio),
            social_links: Set(input.social_links),
            instruments: Set(input.instruments),
            rating: Set(input.rating),
            user_type: Set(input.user_type),
            genres: Set(input.genres),
            videos: Set(input.videos),
            full_name: Set(input.full_name),
            gender: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let txn = self.db.begin().await?;
        match model.insert(&txn).await {
            Ok(created) => {
                txn.commit().await?;
                Ok(created.id)
            }
            Err(err) => {
                rollback(txn).await;
                Err(err.into())
            }
        }
    }

    async fn find_by(&self, field: IdentifierField, value: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(column(field).eq(value))
            .one(&self.db)
            .await?;

        Ok(model.map(User::from))
    }

    async fn exists_by(&self, field: IdentifierField, value: &str) -> AppResult<bool> {
        let id = UserEntity::find()
            .select_only()
            .column(Column::Id)
            .filter(column(field).eq(value))
            .limit(1)
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;

        Ok(id.is_some())
    }

    async fn update_by(
        &self,
        field: IdentifierField,
        value: &str,
        changes: &UserChanges,
    ) -> AppResult<Option<User>> {
        let txn = self.db.begin().await?;
        let result = UserEntity::update_many()
            .set(active_changes(changes))
            .filter(column(field).eq(value))
            .exec_with_returning(&txn)
            .await;

        match result {
            Ok(models) => {
                txn.commit().await?;
                Ok(models.into_iter().next().map(User::from))
            }
            Err(err) => {
                rollback(txn).await;
                Err(err.into())
            }
        }
    }

    async fn list_summaries(&self) -> AppResult<Vec<UserSummary>> {
        let rows = UserEntity::find()
            .select_only()
            .columns([
                Column::Id,
                Column::Username,
                Column::Email,
                Column::Instruments,
                Column::Genres,
                Column::Rating,
                Column::UserType,
            ])
            .order_by_asc(Column::Id)
            .into_model::<UserSummary>()
            .all(&self.db)
            .await?;

        Ok(rows)
    }

    async fn random_with_videos(
        &self,
        exclude_username: Option<&str>,
        limit: u64,
    ) -> AppResult<Vec<VideoCandidate>> {
        let rows = candidates_query(exclude_username, limit)
            .into_tuple::<(i32, String, Option<Vec<String>>, Option<JsonValue>)>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(user_id, username, videos, instruments)| {
                let videos = videos.filter(|v| !v.is_empty())?;
                Some(VideoCandidate {
                    user_id,
                    username,
                    videos,
                    instruments,
                })
            })
            .collect())
    }
}

fn column(field: IdentifierField) -> Column {
    match field {
        IdentifierField::Username => Column::Username,
        IdentifierField::Email => Column::Email,
    }
}

/// Only the allow-listed columns present in the change-set are `Set`
fn active_changes(changes: &UserChanges) -> ActiveModel {
    let mut active = ActiveModel::new();

    if let Some(phone_number) = &changes.phone_number {
        active.phone_number = Set(phone_number.clone());
    }
    if let Some(address) = &changes.address {
        active.address = Set(address.clone());
    }
    if let Some(profile_picture) = &changes.profile_picture {
        active.profile_picture = Set(profile_picture.clone());
    }
    if let Some(bio) = &changes.bio {
        active.bio = Set(bio.clone());
    }
    if let Some(social_links) = &changes.social_links {
        active.social_links = Set(social_links.clone());
    }
    if let Some(instruments) = &changes.instruments {
        active.instruments = Set(instruments.clone());
    }
    if let Some(rating) = changes.rating {
        active.rating = Set(rating);
    }
    if let Some(genres) = &changes.genres {
        active.genres = Set(genres.clone());
    }
    if let Some(videos) = &changes.videos {
        active.videos = Set(videos.clone());
    }
    if let Some(full_name) = &changes.full_name {
        active.full_name = Set(full_name.clone());
    }
    if let Some(gender) = &changes.gender {
        active.gender = Set(gender.clone());
    }

    active
}

fn candidates_query(exclude_username: Option<&str>, limit: u64) -> Select<UserEntity> {
    let mut query = UserEntity::find()
        .select_only()
        .columns([
            Column::Id,
            Column::Username,
            Column::Videos,
            Column::Instruments,
        ])
        .filter(Column::Videos.is_not_null())
        .filter(Expr::cust("array_length(\"videos\", 1) > 0"));

    if let Some(username) = exclude_username {
        query = query.filter(Column::Username.ne(username));
    }

    query.order_by(Expr::cust("RANDOM()"), Order::Asc).limit(limit)
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(err) = txn.rollback().await {
        tracing::warn!(error = %err, "Failed to roll back transaction");
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            phone_number: m.phone_number,
            address: m.address,
            password: m.password,
            profile_picture: m.profile_picture,
            bio: m.bio,
            social_links: m.social_links,
            instruments: m.instruments,
            rating: m.rating,
            user_type: m.user_type,
            genres: m.genres,
            videos: m.videos,
            full_name: m.full_name,
            gender: m.gender,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
