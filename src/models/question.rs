use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// 一道题目（加载后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    id: u32,
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    correct_justification: String,
    incorrect_justifications: Vec<String>,
}

/// 尚未校验的题目数据
///
/// CSV 与 TOML 两种格式都先解析成这个结构，再统一通过 [`RawQuestion::validate`] 校验。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    pub id: i64,
    #[serde(rename = "caso")]
    pub prompt: String,
    #[serde(rename = "opciones")]
    pub options: Vec<String>,
    #[serde(rename = "respuesta_correcta")]
    pub correct_answer: String,
    #[serde(rename = "justificacion_correcta")]
    pub correct_justification: String,
    #[serde(rename = "justificaciones_incorrectas", default)]
    pub incorrect_justifications: Vec<String>,
}

impl RawQuestion {
    /// 校验并转换为 [`QuestionRecord`]
    ///
    /// # 参数
    /// - `row`: 数据行号（从 1 开始），仅用于错误信息
    pub fn validate(self, row: usize) -> Result<QuestionRecord, LoadError> {
        let id = u32::try_from(self.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| LoadError::malformed(row, format!("id 必须为正整数: {}", self.id)))?;

        let prompt = non_empty(row, "caso", &self.prompt)?;
        let correct_justification =
            non_empty(row, "justificacion_correcta", &self.correct_justification)?;

        let mut options: Vec<String> = Vec::with_capacity(self.options.len());
        for option in &self.options {
            let option = option.trim();
            if option.is_empty() {
                return Err(LoadError::malformed(row, "opciones 中存在空选项"));
            }
            if options.iter().any(|o| o == option) {
                return Err(LoadError::malformed(row, format!("选项重复: {}", option)));
            }
            options.push(option.to_string());
        }
        if options.len() < 2 {
            return Err(LoadError::malformed(row, "opciones 至少需要 2 个选项"));
        }

        let correct_answer = self.correct_answer.trim().to_string();
        if !options.contains(&correct_answer) {
            return Err(LoadError::CorrectAnswerNotInOptions {
                id,
                answer: correct_answer,
            });
        }

        let incorrect_justifications: Vec<String> = self
            .incorrect_justifications
            .iter()
            .map(|j| j.trim())
            .filter(|j| !j.is_empty())
            .map(str::to_string)
            .collect();
        if incorrect_justifications.is_empty() {
            return Err(LoadError::malformed(row, "缺少 justificacion_incorrecta1"));
        }

        Ok(QuestionRecord {
            id,
            prompt,
            options,
            correct_answer,
            correct_justification,
            incorrect_justifications,
        })
    }
}

fn non_empty(row: usize, column: &str, value: &str) -> Result<String, LoadError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LoadError::malformed(row, format!("{} 不能为空", column)));
    }
    Ok(value.to_string())
}

impl QuestionRecord {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn correct_justification(&self) -> &str {
        &self.correct_justification
    }

    pub fn incorrect_justifications(&self) -> &[String] {
        &self.incorrect_justifications
    }

    /// 查找选项位置（两侧空白不参与比较）
    pub fn option_index(&self, choice: &str) -> Option<usize> {
        let choice = choice.trim();
        self.options.iter().position(|o| o == choice)
    }

    /// 是否为正确答案
    pub fn is_correct(&self, choice: &str) -> bool {
        choice.trim() == self.correct_answer
    }

    /// 为错误选项找到对应的解析
    ///
    /// 按选项在 `options` 中的位置：第一个选项对应解析 #1，其余错误选项对应 #2；
    /// 只有一条解析时都使用它。正确答案或不存在的选项返回 `None`。
    pub fn incorrect_justification_for(&self, choice: &str) -> Option<&str> {
        if self.is_correct(choice) {
            return None;
        }

        let slot = match self.option_index(choice)? {
            0 => 0,
            _ => 1,
        };

        self.incorrect_justifications
            .get(slot)
            .or_else(|| self.incorrect_justifications.last())
            .map(String::as_str)
    }
}
