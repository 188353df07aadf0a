//! 单张图片的提取结果：计分表 + token 用量 + 费用

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::score_table::ScoreTable;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// token 用量（由推理服务上报）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

/// 每百万 token 的单价
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub input_cost_per_million: f64,
    pub output_cost_per_million: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_cost_per_million: 0.1,
            output_cost_per_million: 0.4,
        }
    }
}

/// 费用估算
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub input_cost_per_million: f64,
    pub output_cost_per_million: f64,
}

impl CostEstimate {
    /// 费用 = tokens / 1,000,000 × 单价，输入输出分别计算后相加
    pub fn compute(usage: &UsageStats, pricing: &Pricing) -> Self {
        let input_cost =
            (usage.input_tokens as f64 / TOKENS_PER_MILLION) * pricing.input_cost_per_million;
        let output_cost =
            (usage.output_tokens as f64 / TOKENS_PER_MILLION) * pricing.output_cost_per_million;

        Self {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            input_cost_per_million: pricing.input_cost_per_million,
            output_cost_per_million: pricing.output_cost_per_million,
        }
    }
}

/// 单张图片的完整结果，也是每个 JSON 结果文件的内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub data: ScoreTable,
    pub usage: UsageStats,
    pub cost: CostEstimate,
}

/// 文件名 → 提取结果
///
/// 只包含处理成功的图片
pub type AggregateResults = BTreeMap<String, ExtractionResult>;

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_cost_with_default_pricing() {
        let usage = UsageStats {
            input_tokens: 100,
            output_tokens: 50,
            total_tokens: 150,
        };
        let cost = CostEstimate::compute(&usage, &Pricing::default());

        assert!(approx_eq(cost.input_cost, 0.00001));
        assert!(approx_eq(cost.output_cost, 0.00002));
        assert!(approx_eq(cost.total_cost, 0.00003));
        assert_eq!(cost.input_cost_per_million, 0.1);
        assert_eq!(cost.output_cost_per_million, 0.4);
    }

    #[test]
    fn test_cost_is_linear() {
        let pricing = Pricing {
            input_cost_per_million: 0.3,
            output_cost_per_million: 2.5,
        };
        for (input, output) in [(0u64, 0u64), (1, 1), (1_290, 87), (2_000_000, 500_000)] {
            let usage = UsageStats {
                input_tokens: input,
                output_tokens: output,
                total_tokens: input + output,
            };
            let cost = CostEstimate::compute(&usage, &pricing);
            let expected = input as f64 / 1e6 * 0.3 + output as f64 / 1e6 * 2.5;
            assert!(approx_eq(cost.total_cost, expected), "{input}/{output}");
        }
    }

    #[test]
    fn test_zero_usage_costs_nothing() {
        let cost = CostEstimate::compute(&UsageStats::default(), &Pricing::default());
        assert_eq!(cost.total_cost, 0.0);
    }
}
