use crate::core::parser::normalize_name;
use crate::domain::ports::MenuConfigProvider;
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_SOURCES: [&str; 2] = [
    "https://snuco.snu.ac.kr/foodmenu/",
    "https://snudorm.snu.ac.kr/foodmenu/",
];

pub const MAX_PREFETCH_DAYS: u32 = 30;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Contents of the optional TOML settings file. Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub favorite: Vec<String>,
    pub excluded: Vec<String>,
    pub prefetch_days: u32,
    pub sources: Vec<String>,
    pub accept_invalid_certs: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            favorite: Vec::new(),
            excluded: Vec::new(),
            prefetch_days: 0,
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            accept_invalid_certs: false,
        }
    }
}

impl MenuConfig {
    /// Loads the settings file. A missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(MenuError::Io(e)),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        let mut config: MenuConfig = toml::from_str(&processed)?;
        config.normalize_lists();
        Ok(config)
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    // List entries are matched against normalized page titles.
    fn normalize_lists(&mut self) {
        for name in self.favorite.iter_mut().chain(self.excluded.iter_mut()) {
            *name = normalize_name(name);
        }
    }
}

impl MenuConfigProvider for MenuConfig {
    fn favorites(&self) -> &[String] {
        &self.favorite
    }

    fn excluded(&self) -> &[String] {
        &self.excluded
    }

    fn sources(&self) -> &[String] {
        &self.sources
    }

    fn prefetch_days(&self) -> u32 {
        self.prefetch_days
    }
}

impl Validate for MenuConfig {
    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(MenuError::InvalidConfigValue {
                field: "sources".to_string(),
                value: "[]".to_string(),
                reason: "At least one menu source is required".to_string(),
            });
        }
        for source in &self.sources {
            validate_url("sources", source)?;
        }
        for name in self.favorite.iter().chain(self.excluded.iter()) {
            validate_non_empty_string("favorite/excluded", name)?;
        }
        validate_range("prefetch_days", self.prefetch_days, 0, MAX_PREFETCH_DAYS)?;
        Ok(())
    }
}
