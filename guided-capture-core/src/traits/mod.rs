pub mod camera;
pub mod media_store;
pub mod permission_provider;
pub mod session_delegate;
