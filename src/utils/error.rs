use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed menu page: {message}")]
    Extraction { message: String },

    #[error("Invalid date: {message}")]
    InvalidDate { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to start async runtime: {message}")]
    Runtime { message: String },
}

impl MenuError {
    /// True for failures of a single request (network or HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(self, MenuError::Transport(_) | MenuError::HttpStatus { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MenuError::Transport(_) | MenuError::HttpStatus { .. } => {
                "메뉴 서버에 연결할 수 없습니다 (could not reach the menu server)".to_string()
            }
            MenuError::Extraction { .. } => {
                "메뉴 페이지 형식이 올바르지 않습니다 (menu page was malformed)".to_string()
            }
            MenuError::InvalidDate { message } => format!("Invalid date: {}", message),
            MenuError::ConfigParse(_) | MenuError::InvalidConfigValue { .. } => {
                format!("Configuration problem: {}", self)
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MenuError::Transport(_) | MenuError::HttpStatus { .. } => {
                "Check your network connection and try again later"
            }
            MenuError::Extraction { .. } => "The source site layout may have changed",
            MenuError::InvalidDate { .. } => "Use a date in YYYY-MM-DD format",
            MenuError::ConfigParse(_) | MenuError::InvalidConfigValue { .. } => {
                "Fix the configuration file and run again"
            }
            _ => "Run again with --verbose for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
