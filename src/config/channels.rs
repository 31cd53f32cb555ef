//! Channel selection file
//!
//! The file written by `--configure` holds one `channel=<id>` line per
//! selected channel. Other lines are ignored when reading it back.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::defaults::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE_NAME};
use crate::errors::{AppError, AppResult};

static CHANNEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*channel\s*=\s*(.+?)\s*$").expect("channel line pattern is valid")
});

/// Channels selected by the user, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSelection {
    channel_ids: Vec<String>,
}

impl ChannelSelection {
    pub fn new(channel_ids: Vec<String>) -> Self {
        Self { channel_ids }
    }

    /// Extract channel ids from the content of a configuration file
    pub fn parse(content: &str) -> Self {
        let channel_ids = content
            .lines()
            .filter_map(|line| CHANNEL_LINE.captures(line))
            .filter_map(|captures| captures.get(1))
            .map(|id| id.as_str().to_string())
            .collect();

        Self { channel_ids }
    }

    /// Read a configuration file
    ///
    /// A missing file means the grabber was never configured.
    pub fn read(path: &Path) -> AppResult<Self> {
        debug!("Reading configuration file {}", path.display());
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AppError::configuration(
                    "You need to configure the grabber by running it with --configure",
                ));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::parse(&content))
    }

    /// Write the selection, creating the parent directory if needed
    pub fn write(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_file_content())?;
        info!(
            "Wrote {} channels to configuration file {}",
            self.channel_ids.len(),
            path.display()
        );
        Ok(())
    }

    pub fn to_file_content(&self) -> String {
        self.channel_ids
            .iter()
            .map(|id| format!("channel={id}\n"))
            .collect()
    }

    pub fn channel_ids(&self) -> &[String] {
        &self.channel_ids
    }

    pub fn is_empty(&self) -> bool {
        self.channel_ids.is_empty()
    }

    pub fn into_channel_ids(self) -> Vec<String> {
        self.channel_ids
    }
}

/// `$HOME/.xmltv/tv_grab_fr_tvclub.conf`, relative to the current directory
/// when `HOME` is unset
pub fn default_config_file() -> PathBuf {
    let base = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default();
    base.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_lines() {
        let selection = ChannelSelection::parse(
            "channel=TF1.fr\n  channel = France2.fr  \n# comment\nchannel=\nfoo=bar\nchannel=M6.fr",
        );

        assert_eq!(selection.channel_ids(), ["TF1.fr", "France2.fr", "M6.fr"]);
    }

    #[test]
    fn test_parse_empty_content() {
        let selection = ChannelSelection::parse("\n\n# nothing selected\n");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tvclub.conf");
        let selection = ChannelSelection::new(vec!["TF1.fr".into(), "Arte.fr".into()]);

        selection.write(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "channel=TF1.fr\nchannel=Arte.fr\n");
        assert_eq!(ChannelSelection::read(&path).unwrap(), selection);
    }

    #[test]
    fn test_missing_file_asks_for_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let error = ChannelSelection::read(&dir.path().join("absent.conf")).unwrap_err();

        assert!(matches!(error, AppError::Configuration { .. }));
        assert!(error.to_string().contains("--configure"));
    }

    #[test]
    fn test_default_config_file_name() {
        let path = default_config_file();
        assert!(path.ends_with(".xmltv/tv_grab_fr_tvclub.conf"));
    }
}
