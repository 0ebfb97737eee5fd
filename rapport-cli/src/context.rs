use rapport::Rapport;
use rapport::config::{self, ConfigBuilder};
use std::path::PathBuf;

pub struct RapportCliContext {
    pub rapport: Rapport,
}

impl RapportCliContext {
    /// Open a session using the layered configuration, with an explicit data
    /// directory taking precedence over everything else.
    pub async fn new(
        data_dir: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> rapport::Result<Self> {
        let mut config = config::load_config(config_file.as_deref())?;

        // The CLI installs its own subscriber
        config.logging.stdout = false;
        config.logging.file = None;

        let mut builder = ConfigBuilder::from_config(config);
        if let Some(dir) = data_dir {
            builder = builder.with_data_dir(dir).with_file_storage();
        }

        let rapport = rapport::init(builder.build()?).await?;
        Ok(Self { rapport })
    }
}
