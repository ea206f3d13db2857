//! view-localizer
//!
//! ビューのテキストプロンプトをカルチャごとの翻訳に解決するライブラリ。
//! 未登録のプロンプトと言語は自動的に登録され、翻訳者が後から翻訳を埋められます。

pub mod config;
pub mod context;
pub mod culture;
pub mod error;
pub mod key;
pub mod prompt;
pub mod seeder;
pub mod store;
pub mod translator;

pub use context::RequestContext;
pub use culture::Culture;
pub use error::LocalizerError;
pub use translator::{
    Translator,
    TranslatorOptions,
};
