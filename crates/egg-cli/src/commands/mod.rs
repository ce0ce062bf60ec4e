pub mod dispatch;
pub mod info;
pub mod init;
pub mod list;
pub mod run;
pub mod schema;
