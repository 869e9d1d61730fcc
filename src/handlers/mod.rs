pub mod menu;
pub mod message_handler;
pub mod router;

pub use message_handler::MessageHandler;
