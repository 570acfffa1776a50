pub mod alert;
pub mod config;
pub mod error;
pub mod outcome;
pub mod permission;
pub mod photo;
pub mod ratio;
pub mod state;
