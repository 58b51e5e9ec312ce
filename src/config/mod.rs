//! Project configuration loaded from `.avault.toml`.

pub mod settings;

pub use settings::Settings;
