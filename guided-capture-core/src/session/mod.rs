pub mod controller;
pub mod permission_gate;
