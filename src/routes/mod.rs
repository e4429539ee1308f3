mod admin;
mod health_check;
mod sessions;
mod users;

pub use admin::reset;
pub use health_check::health_check;
pub use sessions::{login, refresh, revoke};
pub use users::{create_user, get_current_user, update_user};
