//! 設定ファイルの読み込み関数

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    LocalizerSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".view-localizer.json";

/// 設定ファイルの場所
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConfigSource {
    /// プロジェクトルートの `.view-localizer.json`（なければデフォルト設定）
    Project(PathBuf),
    /// 明示的に指定されたファイル（存在しなければエラー）
    Explicit(PathBuf),
}

impl ConfigSource {
    /// 設定ファイルの場所を決める
    ///
    /// 相対パスで指定されたファイルはプロジェクトルートから解決する
    pub(super) fn resolve(project_root: &Path, config_file: Option<&Path>) -> Self {
        match config_file {
            Some(file) if file.is_relative() => Self::Explicit(project_root.join(file)),
            Some(file) => Self::Explicit(file.to_path_buf()),
            None => Self::Project(project_root.join(CONFIG_FILE_NAME)),
        }
    }

    /// 設定ファイルのパス
    pub(super) fn path(&self) -> &Path {
        match self {
            Self::Project(path) | Self::Explicit(path) => path,
        }
    }
}

/// 設定ファイルを読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: プロジェクトの設定ファイルが見つからない
///
/// # Errors
/// - 明示的に指定されたファイルが存在しない
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn read_settings(source: &ConfigSource) -> Result<Option<LocalizerSettings>, ConfigError> {
    let path = source.path();
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == ErrorKind::NotFound && matches!(source, ConfigSource::Project(_)) => {
            tracing::debug!("Configuration file not found: {:?}", path);
            return Ok(None);
        }
        Err(error) => return Err(error.into()),
    };

    tracing::debug!("Loading configuration from: {:?}", path);
    Ok(Some(serde_json::from_str(&content)?))
}
