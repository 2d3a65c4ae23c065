mod loader;

use std::collections::HashMap;

pub use loader::load_env_file;

pub type EnvMap = HashMap<String, String>;

/// Overrides `baseUrl` from screech.json when set in an env file.
pub const BASE_URL_VAR: &str = "SCREECH_BASE_URL";
