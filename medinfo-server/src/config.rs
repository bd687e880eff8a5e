use medinfo_core::upload::{DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_IMAGE_BYTES};
use medinfo_core::ImagePolicy;
use medinfo_store::MedicineAggregation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration loaded from YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub upload: UploadSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub database: String,
    /// Relative paths resolve against `data_dir`
    pub upload_dir: PathBuf,
    pub medicine_aggregation: MedicineAggregation,
    pub seed_body_parts: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub cookie_name: String,
    pub session_ttl_secs: u64,
    pub secure_cookie: bool,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Admin account created at startup if its email is not registered yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub max_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            body_limit_bytes: 6 * 1024 * 1024,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database: "medinfo.sqlite".to_string(),
            upload_dir: PathBuf::from("uploads"),
            medicine_aggregation: MedicineAggregation::default(),
            seed_body_parts: true,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            cookie_name: "medinfo_session".to_string(),
            session_ttl_secs: 24 * 60 * 60,
            secure_cookie: false,
            bootstrap_admin: None,
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };

        if let Ok(port) = std::env::var("MEDINFO_PORT")
            && let Ok(port_num) = port.parse()
        {
            config.server.port = port_num;
        }

        if let Ok(host) = std::env::var("MEDINFO_HOST") {
            config.server.host = host;
        }

        if let Ok(data_dir) = std::env::var("MEDINFO_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(upload_dir) = std::env::var("MEDINFO_UPLOAD_DIR") {
            config.storage.upload_dir = PathBuf::from(upload_dir);
        }

        Ok(config)
    }

    /// Get the full path to the SQLite database
    pub fn database_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.database)
    }

    /// Directory medicine images are written to and served from
    pub fn upload_dir(&self) -> PathBuf {
        if self.storage.upload_dir.is_absolute() {
            self.storage.upload_dir.clone()
        } else {
            self.storage.data_dir.join(&self.storage.upload_dir)
        }
    }

    pub fn image_policy(&self) -> ImagePolicy {
        ImagePolicy::new(
            self.upload.allowed_extensions.iter().cloned(),
            self.upload.max_bytes,
        )
    }
}
