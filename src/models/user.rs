use sea_orm::FromQueryResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Columns that can address a single user row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierField {
    Username,
    Email,
}

impl IdentifierField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    #[serde(skip_serializing)] // Never expose password hash
    pub password: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<String>,
    pub instruments: Option<JsonValue>,
    pub rating: Option<f64>,
    pub user_type: String,
    pub genres: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub full_name: String,
    pub gender: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Row to insert; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<String>,
    pub instruments: Option<JsonValue>,
    pub rating: Option<f64>,
    pub user_type: String,
    pub genres: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub full_name: String,
}

/// User creation DTO
#[derive(Deserialize, ToSchema)]
pub struct CreateUser {
    pub username: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub password: String,
    pub user_type: String,
    pub full_name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub social_links: Option<String>,
    /// Instrument name to skill level, e.g. `{"Cello": "Beginner"}`
    #[serde(default = "empty_instruments")]
    #[schema(value_type = Option<Object>)]
    pub instruments: Option<JsonValue>,
    #[serde(default)]
    pub rating: Option<f64>,
    /// A missing key stores `[]`, an explicit `null` stores NULL
    #[serde(default = "empty_list")]
    pub genres: Option<Vec<String>>,
    #[serde(default = "empty_list")]
    pub videos: Option<Vec<String>>,
}

fn empty_instruments() -> Option<JsonValue> {
    Some(JsonValue::Object(Default::default()))
}

fn empty_list() -> Option<Vec<String>> {
    Some(Vec::new())
}

impl CreateUser {
    /// Validate structured fields and pair the payload with its password hash
    pub fn into_new_user(self, password_hash: String) -> AppResult<NewUser> {
        if let Some(instruments) = &self.instruments {
            if !(instruments.is_object() || instruments.is_array()) {
                return Err(AppError::Validation(
                    "Invalid input: 'instruments' must be a mapping or a sequence".to_string(),
                ));
            }
        }

        Ok(NewUser {
            username: self.username,
            email: self.email,
            phone_number: self.phone_number,
            address: self.address,
            password_hash,
            profile_picture: self.profile_picture,
            bio: self.bio,
            social_links: self.social_links,
            instruments: self.instruments,
            rating: self.rating,
            user_type: self.user_type,
            genres: self.genres,
            videos: self.videos,
            full_name: self.full_name,
        })
    }
}

/// Lookup DTO shared by get and search
#[derive(Debug, Deserialize, ToSchema)]
pub struct LookupUser {
    /// Either `username` or `email`
    pub field: Option<String>,
    pub value: Option<String>,
}

impl LookupUser {
    pub fn validate(self) -> AppResult<(IdentifierField, String)> {
        let field = match self.field.as_deref() {
            Some(name) => IdentifierField::from_name(name)
                .ok_or_else(|| AppError::Validation(format!("Invalid field: {}", name)))?,
            None => return Err(AppError::Validation("Invalid field: null".to_string())),
        };

        match self.value {
            Some(value) if !value.is_empty() => Ok((field, value)),
            _ => Err(AppError::Validation("Value is required.".to_string())),
        }
    }
}

/// Allow-listed changes; `Some(None)` clears a nullable column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub social_links: Option<Option<String>>,
    pub instruments: Option<Option<JsonValue>>,
    pub rating: Option<Option<f64>>,
    pub genres: Option<Option<Vec<String>>>,
    pub videos: Option<Option<Vec<String>>>,
    pub full_name: Option<String>,
    pub gender: Option<Option<String>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the change-set to an in-memory row
    pub fn apply(&self, user: &mut User) {
        fn set<T: Clone>(target: &mut T, change: &Option<T>) {
            if let Some(value) = change {
                *target = value.clone();
            }
        }

        set(&mut user.phone_number, &self.phone_number);
        set(&mut user.address, &self.address);
        set(&mut user.profile_picture, &self.profile_picture);
        set(&mut user.bio, &self.bio);
        set(&mut user.social_links, &self.social_links);
        set(&mut user.instruments, &self.instruments);
        set(&mut user.rating, &self.rating);
        set(&mut user.genres, &self.genres);
        set(&mut user.videos, &self.videos);
        set(&mut user.full_name, &self.full_name);
        set(&mut user.gender, &self.gender);
    }
}

/// User update DTO
///
/// Keys outside the allow-list are ignored by serde.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub social_links: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Object>)]
    pub instruments: Option<Option<JsonValue>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub genres: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Vec<String>>)]
    pub videos: Option<Option<Vec<String>>>,
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub gender: Option<Option<String>>,
}

/// Distinguishes an explicit `null` from a missing key
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateUser {
    /// Split into the identifier (username wins over email) and the change-set
    ///
    /// The identifier key is chosen by presence; a `null` value matches no row.
    pub fn into_parts(self) -> AppResult<(IdentifierField, String, UserChanges)> {
        let (field, value) = match (self.username, self.email) {
            (Some(username), _) => (IdentifierField::Username, username),
            (None, Some(email)) => (IdentifierField::Email, email),
            (None, None) => {
                return Err(AppError::Validation(
                    "Must provide 'username' or 'email' to identify user.".to_string(),
                ))
            }
        };

        let changes = UserChanges {
            phone_number: self.phone_number,
            address: self.address,
            profile_picture: self.profile_picture,
            bio: self.bio,
            social_links: self.social_links,
            instruments: self.instruments,
            rating: self.rating,
            genres: self.genres,
            videos: self.videos,
            full_name: self.full_name,
            gender: self.gender,
        };

        if changes.is_empty() {
            return Err(AppError::Validation("No valid fields to update.".to_string()));
        }

        let value = value.ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok((field, value, changes))
    }
}

/// Public user response (safe to return via API)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub profile_picture: Option<String>,
    pub bio: Option<String>,
    pub social_links: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub instruments: Option<JsonValue>,
    pub rating: Option<f64>,
    pub user_type: String,
    pub genres: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub full_name: String,
    pub gender: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone_number: user.phone_number,
            address: user.address,
            profile_picture: user.profile_picture,
            bio: user.bio,
            social_links: user.social_links,
            instruments: user.instruments,
            rating: user.rating,
            user_type: user.user_type,
            genres: user.genres,
            videos: user.videos,
            full_name: user.full_name,
            gender: user.gender,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fixed projection returned by the user listing
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[schema(value_type = Option<Object>)]
    pub instruments: Option<JsonValue>,
    pub genres: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub user_type: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            instruments: user.instruments.clone(),
            genres: user.genres.clone(),
            rating: user.rating,
            user_type: user.user_type.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserResponse {
    pub message: String,
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserExistsResponse {
    pub found: bool,
}
