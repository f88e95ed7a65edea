pub mod add;
pub mod auth_cmd;
pub mod common;
pub mod completions;
pub mod config;
pub mod cover;
pub mod delete;
pub mod edit;
pub mod list;
pub mod share;
pub mod show;
pub mod starter;
