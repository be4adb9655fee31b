pub mod common;
pub mod user;
pub mod video;

pub use common::{parse_body, JsonBody};
pub use user::{create_user, get_user, list_users, search_user, update_user};
pub use video::random_videos;
