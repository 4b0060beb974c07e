// Application layer - use cases over the text generator
pub mod chat_service;
pub mod prompt;
pub mod response_interpreter;
pub mod text_generator;
pub mod trends_service;
