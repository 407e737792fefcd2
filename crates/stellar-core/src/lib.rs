pub mod config;
pub mod consts;
pub mod duration;
pub mod error;
pub mod filter;
pub mod group;
pub mod library;
pub mod rename;
pub mod stage;
pub mod state;
