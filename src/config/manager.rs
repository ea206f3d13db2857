//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::loader::{
    self,
    ConfigSource,
};
use super::{
    ConfigError,
    LocalizerSettings,
    SettingsOverrides,
};

/// 設定管理を行う
///
/// 設定ファイル、コマンドラインの上書きの順に適用し、どちらもバリデーションを通ったものだけを保持する。
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: LocalizerSettings,

    /// プロジェクトのルートパス
    project_root: Option<PathBuf>,

    /// 読み込んだ設定ファイル（デフォルト設定の場合は `None`）
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `project_root` - プロジェクトのルートパス
    /// * `config_file` - 明示的に指定された設定ファイル（`None` なら `.view-localizer.json`）
    ///
    /// # Errors
    /// - 指定された設定ファイルが存在しない
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(
        &mut self,
        project_root: Option<PathBuf>,
        config_file: Option<&Path>,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let (settings, config_path) = match &project_root {
            Some(root) => {
                let source = ConfigSource::resolve(root, config_file);
                match loader::read_settings(&source)? {
                    Some(loaded) => (loaded, Some(source.path().to_path_buf())),
                    None => (LocalizerSettings::default(), None),
                }
            }
            None => (LocalizerSettings::default(), None),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        self.config_path = config_path;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// コマンドラインで指定された値で設定を上書きする
    ///
    /// 上書き後の設定が無効な場合は現在の設定を変更しない。
    ///
    /// # Errors
    /// バリデーションエラー
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) -> Result<(), ConfigError> {
        if overrides.is_empty() {
            return Ok(());
        }
        tracing::debug!("Applying overrides: {:?}", overrides);

        let settings = overrides.apply_to(&self.current_settings);
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.current_settings = settings;

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &LocalizerSettings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub const fn project_root(&self) -> Option<&PathBuf> {
        self.project_root.as_ref()
    }

    /// 読み込んだ設定ファイルのパスを取得
    #[must_use]
    pub const fn config_path(&self) -> Option<&PathBuf> {
        self.config_path.as_ref()
    }

    /// ファイルストアのディレクトリを取得
    ///
    /// 相対パスはプロジェクトルートからの相対パスとして解決する
    #[must_use]
    pub fn store_directory(&self) -> PathBuf {
        let directory = &self.current_settings.store.directory;
        match &self.project_root {
            Some(root) if directory.is_relative() => root.join(directory),
            _ => directory.clone(),
        }
    }
}

/// プロジェクトルートの `.view-localizer.json` から `ConfigManager` を作成する
///
/// # Errors
/// 設定の読み込みに失敗した場合
pub fn load_from(project_root: &Path) -> Result<ConfigManager, ConfigError> {
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(project_root.to_path_buf()), None)?;
    Ok(manager)
}

/// 指定された設定ファイルから `ConfigManager` を作成する
///
/// # Errors
/// 設定ファイルが存在しない、または読み込みに失敗した場合
pub fn load_from_file(project_root: &Path, config_file: &Path) -> Result<ConfigManager, ConfigError> {
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(project_root.to_path_buf()), Some(config_file))?;
    Ok(manager)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::culture::Culture;

    /// new: デフォルト値で作成される
    #[rstest]
    fn test_new_creates_default_settings() {
        let manager = ConfigManager::new();

        assert_eq!(manager.get_settings().default_culture, Culture::default());
        assert!(manager.project_root().is_none());
        assert!(manager.config_path().is_none());
    }

    /// load_settings: project_root が None の場合
    #[rstest]
    fn test_load_settings_without_project() {
        let mut manager = ConfigManager::new();

        let result = manager.load_settings(None, None);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().default_action_name, "Index");
        assert_eq!(manager.store_directory(), PathBuf::from("localization"));
    }

    /// load_settings: 設定ファイルがある場合
    #[rstest]
    fn test_load_settings_with_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"defaultActionName": "Show", "store": {"directory": "i18n"}}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let manager = load_from(temp_dir.path()).unwrap();

        assert_eq!(manager.get_settings().default_action_name, "Show");
        assert_eq!(manager.store_directory(), temp_dir.path().join("i18n"));
        assert_eq!(manager.config_path(), Some(&temp_dir.path().join(CONFIG_FILE_NAME)));
    }

    /// load_settings: 設定ファイルがない場合はデフォルト値
    #[rstest]
    fn test_load_settings_without_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let manager = load_from(temp_dir.path()).unwrap();

        assert_eq!(manager.get_settings().fallback_format, "{culture}:[{text}]");
        assert!(manager.config_path().is_none());
    }

    /// load_from_file: 指定されたファイルを読み込み、プロジェクトのファイルは無視する
    #[rstest]
    fn test_load_from_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"defaultActionName": "Show"}"#)
            .unwrap();
        fs::write(temp_dir.path().join("ci.json"), r#"{"defaultActionName": "List"}"#).unwrap();

        let manager = load_from_file(temp_dir.path(), Path::new("ci.json")).unwrap();

        assert_eq!(manager.get_settings().default_action_name, "List");
        assert_eq!(manager.config_path(), Some(&temp_dir.path().join("ci.json")));
    }

    /// load_from_file: 指定されたファイルがなければエラー
    #[rstest]
    fn test_load_from_missing_explicit_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_file(temp_dir.path(), Path::new("ci.json"));

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    /// load_settings: 無効な設定ファイルでエラー
    #[rstest]
    fn test_load_settings_with_invalid_config_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"fallbackFormat": "x"}"#).unwrap();

        let mut manager = ConfigManager::new();
        let result = manager.load_settings(Some(temp_dir.path().to_path_buf()), None);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert!(manager.project_root().is_none());
    }

    /// store_directory: 絶対パスはそのまま使う
    #[rstest]
    fn test_store_directory_absolute() {
        let temp_dir = TempDir::new().unwrap();
        let absolute = temp_dir.path().join("elsewhere");
        let config_content = format!(r#"{{"store": {{"directory": {absolute:?}}}}}"#);
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let manager = load_from(temp_dir.path()).unwrap();

        assert_eq!(manager.store_directory(), absolute);
    }

    /// apply_overrides: コマンドラインの値が設定ファイルより優先される
    #[rstest]
    fn test_apply_overrides_on_top_of_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"defaultCulture": "de-DE", "store": {"directory": "i18n"}}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();
        let mut manager = load_from(temp_dir.path()).unwrap();

        let overrides = SettingsOverrides {
            default_culture: Some(Culture::new("sv-SE").unwrap()),
            ..SettingsOverrides::default()
        };
        let result = manager.apply_overrides(overrides);

        assert!(result.is_ok());
        assert_eq!(manager.get_settings().default_culture.name(), "sv-SE");
        assert_eq!(manager.store_directory(), temp_dir.path().join("i18n"));
    }

    /// apply_overrides: 無効な値では設定を変更しない
    #[rstest]
    fn test_apply_overrides_invalid() {
        let mut manager = ConfigManager::new();
        let overrides = SettingsOverrides {
            fallback_format: Some("missing placeholders".to_string()),
            ..SettingsOverrides::default()
        };

        let result = manager.apply_overrides(overrides);

        assert!(matches!(result, Err(ConfigError::ValidationErrors(_))));
        assert_eq!(manager.get_settings().fallback_format, "{culture}:[{text}]");
    }
}
