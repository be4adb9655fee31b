pub mod password;
pub mod user;
pub mod video;

pub use password::PasswordService;
pub use user::UserService;
pub use video::{VideoService, SAMPLE_SIZE};
