pub mod ask;
pub mod chat;
pub mod classify;
pub mod doctor;
pub mod links;
pub mod onboard;
pub mod prompt;

mod runtime;
