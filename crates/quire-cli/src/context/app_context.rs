use anyhow::Context;
use quire_config::QuireConfig;
use quire_db::service::QuireService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: QuireService,
    pub config: QuireConfig,
}

impl AppContext {
    /// Open the configured database, creating its parent directory when needed.
    pub async fn init(config: QuireConfig) -> anyhow::Result<Self> {
        let path = &config.database.path;

        if !config.database.is_in_memory() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let service = QuireService::new_local(&path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open database {}", path.display()))?;

        Ok(Self { service, config })
    }
}
