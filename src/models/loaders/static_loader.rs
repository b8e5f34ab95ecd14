use std::borrow::Cow;

use crate::error::LoadError;
use crate::models::bank::QuestionBank;
use crate::models::loaders::{parse_bank, QuestionLoader, SourceFormat};

/// 内置题库：心理学中的统计检验（10 个案例）
pub const EMBEDDED_BANK_CSV: &str = include_str!("../../../data/preguntas_psicologia.csv");

/// 从内存中的文本加载题库
#[derive(Debug, Clone)]
pub struct StaticLoader {
    text: Cow<'static, str>,
    format: SourceFormat,
    label: &'static str,
}

impl StaticLoader {
    /// 使用程序内置的题库
    pub fn embedded() -> Self {
        Self {
            label: "内置题库",
            ..Self::new(EMBEDDED_BANK_CSV, SourceFormat::Csv)
        }
    }

    pub fn new(text: impl Into<Cow<'static, str>>, format: SourceFormat) -> Self {
        Self {
            text: text.into(),
            format,
            label: "内存数据",
        }
    }
}

impl QuestionLoader for StaticLoader {
    fn describe(&self) -> String {
        format!("{} ({:?})", self.label, self.format)
    }

    async fn load(&self) -> Result<QuestionBank, LoadError> {
        parse_bank(&self.text, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_bank_is_valid() {
        let bank = StaticLoader::embedded().load().await.unwrap();

        assert_eq!(bank.size(), 10);
        let first = bank.get(0).unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(
            first.correct_answer(),
            "t de Student para muestras relacionadas"
        );
        assert_eq!(bank.get(9).unwrap().correct_answer(), "Kruskal-Wallis");
    }

    #[test]
    fn test_describe() {
        assert_eq!(StaticLoader::embedded().describe(), "内置题库 (Csv)");
        assert_eq!(
            StaticLoader::new(String::from("x"), SourceFormat::Toml).describe(),
            "内存数据 (Toml)"
        );
    }
}
