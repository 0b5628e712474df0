pub mod controller;
pub mod dto;
pub mod handler;

pub use controller::CadenceController;
