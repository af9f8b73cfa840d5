pub mod catalog;
pub mod context;
pub mod host;
pub mod paths;
pub mod prompt;
pub mod settings;
