use super::{NotifierConfig, SecretsLoader, ServerConfigFile, ServerEntry};
use crate::errors::ConfigError;
use crate::mail_servers::{MailServerRecord, ServerRole};
use anyhow::{anyhow, Result};
use glob::glob;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

pub struct ConfigManager {
    current_config: Arc<NotifierConfig>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<NotifierConfig> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<NotifierConfig> {
        let main_config_path = format!("{}/main.toml", config_dir);
        let main_config_content =
            fs::read_to_string(&main_config_path)
                .await
                .map_err(|e| ConfigError::LoadFailed {
                    path: main_config_path.clone(),
                    reason: e.to_string(),
                })?;

        let mut config: NotifierConfig =
            toml::from_str(&main_config_content).map_err(|e| ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })?;

        let secrets = SecretsLoader::load(Path::new(&format!("{}/secrets.toml", config_dir)))?;
        config.outlook.client_secret = secrets.outlook_client_secret().to_string();
        config.smtp.password = secrets.smtp_password().to_string();

        // Load mail-server declarations
        let pattern = format!("{}/servers/*.toml", config_dir);
        let mut outgoing = Vec::new();
        let mut incoming = Vec::new();

        for entry in glob(&pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
            let path = entry.map_err(|e| anyhow!("Glob entry error: {}", e))?;
            debug!("Loading server config: {}", path.display());

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;

            let server_file: ServerConfigFile = toml::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?;

            for server in server_file.outgoing {
                outgoing.push(Self::to_record(server, ServerRole::Outgoing, &secrets));
            }
            for server in server_file.incoming {
                incoming.push(Self::to_record(server, ServerRole::Incoming, &secrets));
            }
        }

        config.outgoing_servers = outgoing;
        config.incoming_servers = incoming;

        config.validate()?;

        info!(
            "Loaded {} outgoing servers, {} incoming servers, {} administrators",
            config.outgoing_servers.len(),
            config.incoming_servers.len(),
            config.administrators.len()
        );

        Ok(config)
    }

    fn to_record(entry: ServerEntry, role: ServerRole, secrets: &SecretsLoader) -> MailServerRecord {
        MailServerRecord {
            refresh_token: secrets.refresh_token(&entry.name).map(str::to_string),
            name: entry.name,
            auth_kind: entry.auth_kind,
            user: entry.user,
            role,
            state: entry.state,
        }
    }
}
