//! CSV 题库解析
//!
//! 列顺序：`id, caso, opciones, respuesta_correcta, justificacion_correcta,
//! justificacion_incorrecta1[, justificacion_incorrecta2, ...]`，
//! 选项之间用 `" | "` 分隔。

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::LoadError;
use crate::models::question::RawQuestion;

/// 选项分隔符
pub const OPTION_SEPARATOR: char = '|';

const INCORRECT_PREFIX: &str = "justificacion_incorrecta";

/// 各列在表头中的位置
#[derive(Debug)]
struct Columns {
    id: usize,
    prompt: usize,
    options: usize,
    correct_answer: usize,
    correct_justification: usize,
    /// 按编号排序的错误解析列，第一个一定是 `justificacion_incorrecta1`
    incorrect: Vec<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::malformed(0, format!("表头缺少列 {}", name)))
        };

        let mut incorrect: Vec<(u32, usize)> = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                let n = h.strip_prefix(INCORRECT_PREFIX)?.parse::<u32>().ok()?;
                Some((n, i))
            })
            .collect();
        incorrect.sort_unstable();

        if incorrect.first().map(|(n, _)| *n) != Some(1) {
            return Err(LoadError::malformed(
                0,
                format!("表头缺少列 {}1", INCORRECT_PREFIX),
            ));
        }

        Ok(Self {
            id: find("id")?,
            prompt: find("caso")?,
            options: find("opciones")?,
            correct_answer: find("respuesta_correcta")?,
            correct_justification: find("justificacion_correcta")?,
            incorrect: incorrect.into_iter().map(|(_, i)| i).collect(),
        })
    }

    fn raw_question(&self, row: usize, record: &StringRecord) -> Result<RawQuestion, LoadError> {
        let required = |index: usize, name: &str| {
            record
                .get(index)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| LoadError::malformed(row, format!("缺少列 {}", name)))
        };

        let id_text = required(self.id, "id")?;
        let id = id_text
            .parse::<i64>()
            .map_err(|_| LoadError::malformed(row, format!("id 不是整数: {}", id_text)))?;

        let prompt = required(self.prompt, "caso")?.to_string();
        let options = split_options(required(self.options, "opciones")?);
        let correct_answer = required(self.correct_answer, "respuesta_correcta")?.to_string();
        let correct_justification =
            required(self.correct_justification, "justificacion_correcta")?.to_string();

        // 第一条错误解析必填，其余可选
        let first = required(self.incorrect[0], &format!("{}1", INCORRECT_PREFIX))?;
        let mut incorrect_justifications = vec![first.to_string()];
        incorrect_justifications.extend(
            self.incorrect[1..]
                .iter()
                .filter_map(|&i| record.get(i))
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );

        Ok(RawQuestion {
            id,
            prompt,
            options,
            correct_answer,
            correct_justification,
            incorrect_justifications,
        })
    }
}

/// 拆分 `opciones` 字段
pub fn split_options(field: &str) -> Vec<String> {
    field
        .split(OPTION_SEPARATOR)
        .map(|o| o.trim().to_string())
        .collect()
}

/// 解析 CSV 文本，返回尚未校验的题目（行号从 1 开始）
pub fn parse_csv(text: &str) -> Result<Vec<(usize, RawQuestion)>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::malformed(0, format!("无法读取表头: {}", e)))?
        .clone();
    let columns = Columns::from_headers(&headers)?;
    debug!("CSV 表头: {:?}", columns);

    let mut questions = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result.map_err(|e| LoadError::malformed(row, format!("CSV 解析失败: {}", e)))?;

        // 跳过只有逗号的空行
        if record.iter().all(str::is_empty) {
            continue;
        }

        questions.push((row, columns.raw_question(row, &record)?));
    }

    Ok(questions)
}
