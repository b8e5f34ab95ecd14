use serde::Deserialize;

use crate::error::LoadError;
use crate::models::question::RawQuestion;

/// TOML 题库文件结构
///
/// ```toml
/// [[preguntas]]
/// id = 1
/// caso = "..."
/// opciones = ["ANOVA", "Pearson"]
/// respuesta_correcta = "ANOVA"
/// justificacion_correcta = "..."
/// justificaciones_incorrectas = ["..."]
/// ```
#[derive(Debug, Deserialize)]
struct TomlBank {
    #[serde(default)]
    preguntas: Vec<RawQuestion>,
}

/// 从 TOML 文本解析题目（行号为题目在文件中的序号，从 1 开始）
pub fn parse_toml(text: &str) -> Result<Vec<(usize, RawQuestion)>, LoadError> {
    let bank: TomlBank = toml::from_str(text).map_err(|e| {
        // TOML 错误只带字节偏移，换算成行号方便定位
        let line = e
            .span()
            .and_then(|span| text.get(..span.start))
            .map(|before| before.lines().count().max(1))
            .unwrap_or(0);
        LoadError::malformed(line, format!("TOML 解析失败: {}", e.message()))
    })?;

    Ok(bank
        .preguntas
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw))
        .collect())
}
