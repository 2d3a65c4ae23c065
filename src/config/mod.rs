mod builder;
mod loader;
mod settings;

pub use builder::{CliOverrides, ConfigBuilder, ResolvedConfig};
pub use loader::{load_config, LoadedConfig, ScreechConfig, ViewportConfig, CONFIG_FILE_NAME};
pub use settings::*;
