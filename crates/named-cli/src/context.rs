//! A configuration file opened for one command

use std::path::{Path, PathBuf};

use named_config::{Config, DecodeReport};
use named_cst::File;

use crate::error::Result;
use crate::settings::Settings;

pub struct Session {
    pub path: PathBuf,
    /// File content as read
    pub text: String,
    pub config: Config,
    pub report: DecodeReport,
    pub settings: Settings,
}

impl Session {
    pub fn open(path: &Path, settings: Settings) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| named_cst::Error::io(path, e))?;
        Self::from_text(path, text, settings)
    }

    pub fn from_text(path: &Path, text: String, settings: Settings) -> Result<Self> {
        let file = File::parse(&text)?;
        let (config, report) = Config::decode_with(&file, &settings.decode_options());
        for fragment in &report.dropped {
            tracing::debug!(
                scope = %fragment.scope,
                keyword = %fragment.keyword,
                "Statement not kept by the model"
            );
        }
        Ok(Self {
            path: path.to_path_buf(),
            text,
            config,
            report,
            settings,
        })
    }

    /// The syntax tree as parsed.
    pub fn file(&self) -> Option<&File> {
        self.config.source()
    }

    /// Text after rebuilding every modeled block.
    pub fn render(&self) -> Result<String> {
        let file = self.config.to_file_with(&self.settings.sync_options())?;
        Ok(file.render_with(&self.settings.render_style()))
    }

    /// Rebuild and write back atomically.
    pub fn save(&mut self) -> Result<()> {
        let options = self.settings.sync_options();
        let style = self.settings.render_style();
        self.config.save_with(&self.path, &options, &style)?;
        tracing::debug!(path = %self.path.display(), "Saved configuration");
        Ok(())
    }
}
