mod init;
mod serve;
mod user;

pub use init::cmd_init;
pub use serve::cmd_serve;
pub use user::{cmd_add_user, cmd_list_users};
