pub mod client;
pub mod dto;
pub mod engine;
pub mod handler;
pub mod instruction;
pub mod service;
pub mod template;
pub mod translate;

pub use client::{AiClient, AiClientTrait, ClaudeClient};
pub use engine::TargetEngine;
pub use service::PromptService;
