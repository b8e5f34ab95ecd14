//! 题库
//!
//! 加载一次，之后只读；多个会话可以通过 `Arc` 共享同一个题库。

use std::collections::HashSet;

use crate::error::{IndexOutOfRange, LoadError};
use crate::models::question::QuestionRecord;

/// 有序、不可变的题目集合（至少一题）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// 从已校验的题目创建题库
    ///
    /// # 返回
    /// 题目为空时返回 `EmptyBank`，id 重复时返回 `DuplicateId`
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::EmptyBank);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for q in &questions {
            if !seen.insert(q.id()) {
                return Err(LoadError::DuplicateId { id: q.id() });
            }
        }

        Ok(Self { questions })
    }

    /// 题目数量
    pub fn size(&self) -> usize {
        self.questions.len()
    }

    /// 按位置获取题目
    pub fn get(&self, index: usize) -> Result<&QuestionRecord, IndexOutOfRange> {
        self.questions.get(index).ok_or(IndexOutOfRange {
            index,
            size: self.questions.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::RawQuestion;

    fn record(id: i64) -> QuestionRecord {
        RawQuestion {
            id,
            prompt: format!("Caso {}", id),
            options: vec!["ANOVA".to_string(), "Pearson".to_string()],
            correct_answer: "ANOVA".to_string(),
            correct_justification: "Correcta.".to_string(),
            incorrect_justifications: vec!["Incorrecta.".to_string()],
        }
        .validate(1)
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_and_duplicates() {
        assert!(matches!(QuestionBank::new(vec![]), Err(LoadError::EmptyBank)));
        assert!(matches!(
            QuestionBank::new(vec![record(1), record(2), record(1)]),
            Err(LoadError::DuplicateId { id: 1 })
        ));
    }

    #[test]
    fn test_get_is_bounds_checked() {
        let bank = QuestionBank::new(vec![record(3), record(9)]).unwrap();

        assert_eq!(bank.size(), 2);
        assert_eq!(bank.get(1).unwrap().id(), 9);
        assert_eq!(
            bank.get(2).unwrap_err(),
            IndexOutOfRange { index: 2, size: 2 }
        );
    }
}
