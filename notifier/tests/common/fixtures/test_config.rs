//! Test configuration builder writing a config directory into a temp dir

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_toml: String,
    server_files: Vec<(String, String)>,
    secrets_toml: Option<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            main_toml: Self::minimal_main_toml(),
            server_files: Vec::new(),
            secrets_toml: None,
        }
    }

    pub fn minimal_main_toml() -> String {
        r#"
[outlook]
client_id = "test-client-id"

[smtp]
server = "smtp.example.com"
"#
        .to_string()
    }

    pub fn with_main_toml(mut self, content: &str) -> Self {
        self.main_toml = content.to_string();
        self
    }

    pub fn with_server_file(mut self, file_name: &str, content: &str) -> Self {
        self.server_files
            .push((file_name.to_string(), content.to_string()));
        self
    }

    pub fn with_secrets(mut self, content: &str) -> Self {
        self.secrets_toml = Some(content.to_string());
        self
    }

    /// Writes the files and returns the config directory path
    pub fn build(self) -> (TempDir, PathBuf) {
        let config_dir = self.temp_dir.path().join("config");
        let servers_dir = config_dir.join("servers");
        fs::create_dir_all(&servers_dir).expect("Failed to create config dir");

        fs::write(config_dir.join("main.toml"), &self.main_toml).expect("Failed to write main.toml");
        for (name, content) in &self.server_files {
            fs::write(servers_dir.join(name), content).expect("Failed to write server file");
        }
        if let Some(secrets) = &self.secrets_toml {
            fs::write(config_dir.join("secrets.toml"), secrets).expect("Failed to write secrets");
        }

        (self.temp_dir, config_dir)
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
