pub mod auth;
pub mod teachers;
pub mod users;

pub use self::users::model::User;
