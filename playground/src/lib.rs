pub mod actions;
pub mod backend;
pub mod frame;
pub mod host;
pub mod protocol;
pub mod scheduler;
pub mod session;
pub mod settings;
