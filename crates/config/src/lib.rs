// Configuration

pub mod settings;

pub use settings::{FileNames, Settings};
