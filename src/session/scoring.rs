use serde::Serialize;

/// "优秀" 档的最低百分比
pub const EXCELLENT_THRESHOLD: f64 = 80.0;
/// "良好" 档的最低百分比
pub const GOOD_THRESHOLD: f64 = 60.0;

/// 成绩档次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    /// ≥ 80%
    Excellent,
    /// 60% ~ 80%
    Good,
    /// < 60%
    NeedsReview,
}

impl Tier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            Tier::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            Tier::Good
        } else {
            Tier::NeedsReview
        }
    }

    /// 标识名（与序列化结果一致）
    pub fn label(self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::NeedsReview => "needsReview",
        }
    }

    /// 展示给用户的评语
    pub fn message(self) -> &'static str {
        match self {
            Tier::Excellent => "🥳 ¡Excelente dominio de las pruebas estadísticas!",
            Tier::Good => "💪 Buen desempeño, pero puedes reforzar algunos temas.",
            Tier::NeedsReview => {
                "📘 Te recomiendo repasar las diferencias entre pruebas paramétricas y no paramétricas."
            }
        }
    }
}

/// 最终成绩
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    /// 未取整，显示时再保留一位小数
    pub percentage: f64,
    pub tier: Tier,
}

impl QuizResult {
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0.0
        } else {
            100.0 * score as f64 / total as f64
        };

        Self {
            score,
            total,
            percentage,
            tier: Tier::from_percentage(percentage),
        }
    }

    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

impl std::fmt::Display for QuizResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.score, self.total, self.percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_percentage(100.0), Tier::Excellent);
        assert_eq!(Tier::from_percentage(80.0), Tier::Excellent);
        assert_eq!(Tier::from_percentage(79.9), Tier::Good);
        assert_eq!(Tier::from_percentage(60.0), Tier::Good);
        assert_eq!(Tier::from_percentage(59.9), Tier::NeedsReview);
        assert_eq!(Tier::from_percentage(0.0), Tier::NeedsReview);
    }

    #[test]
    fn test_percentage_is_not_rounded() {
        let result = QuizResult::new(2, 3);

        assert!((result.percentage - 200.0 / 3.0).abs() < f64::EPSILON * 100.0);
        assert_eq!(result.tier, Tier::Good);
        assert_eq!(result.to_string(), "2/3 (66.7%)");
    }

    #[test]
    fn test_result_serializes_tier_label() {
        let result = QuizResult::new(3, 10);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["tier"], Tier::NeedsReview.label());
        assert_eq!(json["percentage"], 30.0);
    }
}
