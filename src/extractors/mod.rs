mod db_connection;
mod user_info;
pub use db_connection::DbConnection;
pub use user_info::{AuthenticatedUser, CurrentUser};
