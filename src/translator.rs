//! ビューのテキストプロンプトを翻訳するモジュール

use crate::config::{
    CULTURE_PLACEHOLDER,
    LocalizerSettings,
    TEXT_PLACEHOLDER,
};
use crate::context::RequestContext;
use crate::culture::Culture;
use crate::error::LocalizerError;
use crate::key::KeyBuilder;
use crate::prompt::TextPrompt;
use crate::store::PromptStore;

/// 翻訳の振る舞いを決める設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// デフォルトカルチャ（ソーステキストをそのまま表示し、新しい言語のシード元になる）
    pub default_culture: Culture,
    /// キー生成（デフォルトアクション名を含む）
    pub key_builder: KeyBuilder,
    /// 未翻訳時の表示フォーマット
    pub fallback_format: String,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self::from(&LocalizerSettings::default())
    }
}

impl From<&LocalizerSettings> for TranslatorOptions {
    fn from(settings: &LocalizerSettings) -> Self {
        Self {
            default_culture: settings.default_culture.clone(),
            key_builder: KeyBuilder::new(settings.default_action_name.clone()),
            fallback_format: settings.fallback_format.clone(),
        }
    }
}

/// テキストプロンプトの翻訳を行う
///
/// 未登録の言語・プロンプトは自動的に登録し、翻訳者が後から埋められるようにします。
#[derive(Debug)]
pub struct Translator<S> {
    /// プロンプトストア
    store: S,
    /// 翻訳設定
    options: TranslatorOptions,
}

impl<S: PromptStore> Translator<S> {
    /// 新しい `Translator` を作成
    #[must_use]
    pub const fn new(store: S, options: TranslatorOptions) -> Self {
        Self { store, options }
    }

    /// プロンプトストアを取得
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// 翻訳設定を取得
    #[must_use]
    pub const fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// テキストプロンプトを翻訳する
    ///
    /// 1. アクティブカルチャのドキュメントがなければデフォルトカルチャから作成
    /// 2. キーでプロンプトを検索し、なければ空の翻訳で登録
    /// 3. 翻訳があればそれを、なければフォールバックを返す
    ///
    /// 登録したばかりのプロンプトは再取得しない。表示テキストはテンプレート（空の翻訳）から決まる。
    ///
    /// # Arguments
    /// * `context` - リクエストのコンテキスト（アクティブカルチャとプリンシパル）
    /// * `controller_name` - コントローラー名（必須）
    /// * `action_name` - アクション名（`None` または空の場合はデフォルトアクション名）
    /// * `source_text` - ビューに書かれたテキスト（必須）
    ///
    /// # Returns
    /// - 翻訳済みの場合: 翻訳テキスト
    /// - 未翻訳でデフォルトカルチャの場合: `source_text`
    /// - 未翻訳でそれ以外の場合: `fallback_format` で装飾したテキスト（例: `sv-SE:[Hello]`）
    ///
    /// # Errors
    /// - `controller_name` または `source_text` が空の場合 `InvalidArgument`
    /// - プロンプトストアのエラーはそのまま返す
    pub async fn translate(
        &self,
        context: &RequestContext,
        controller_name: &str,
        action_name: Option<&str>,
        source_text: &str,
    ) -> Result<String, LocalizerError> {
        if controller_name.is_empty() {
            return Err(LocalizerError::empty_argument("controller_name"));
        }
        if source_text.is_empty() {
            return Err(LocalizerError::empty_argument("source_text"));
        }

        let culture = context.culture();
        let action_name = self.options.key_builder.resolve_action(action_name);

        // 未登録の言語はデフォルトカルチャからシードする
        if !self.store.exists(culture).await? {
            tracing::debug!(%culture, "Culture not found, creating from default culture");
            self.store
                .create_for_language(culture, &self.options.default_culture, context.principal())
                .await?;
        }

        let key = self.options.key_builder.build_key(controller_name, action_name, source_text);
        let translated_text = match self.store.get_prompt(culture, &key).await? {
            Some(prompt) => prompt.translated_text,
            None => {
                tracing::debug!(%culture, %key, controller_name, action_name, "Registering missing prompt");
                let template =
                    TextPrompt::template(key, controller_name, action_name, source_text);
                self.store.create_prompt(culture, template, "").await?;
                String::new()
            }
        };

        if !translated_text.is_empty() {
            return Ok(translated_text);
        }
        if culture == &self.options.default_culture {
            return Ok(source_text.to_string());
        }
        Ok(self.fallback_text(culture, source_text))
    }

    /// 未翻訳であることが分かる表示テキストを作成
    fn fallback_text(&self, culture: &Culture, source_text: &str) -> String {
        // カルチャを先に置換する（ソーステキスト中のプレースホルダーを展開しないため）
        self.options
            .fallback_format
            .replace(CULTURE_PLACEHOLDER, culture.name())
            .replace(TEXT_PLACEHOLDER, source_text)
    }
}
