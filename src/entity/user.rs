use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    /// Argon2 PHC string
    pub password: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub instruments: Option<Json>,
    #[sea_orm(column_type = "Double", nullable)]
    pub rating: Option<f64>,
    pub user_type: String,
    pub genres: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub full_name: String,
    pub gender: Option<String>,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
