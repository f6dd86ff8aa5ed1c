pub mod board;
pub mod logic;
pub mod palette;
pub mod session;
pub mod settings;
pub mod shell;
