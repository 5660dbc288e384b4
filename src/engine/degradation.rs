// ==========================================
// 装备全寿命周期与采购规划引擎 - 退化模型
// ==========================================
// 红线: 剩余寿命不会为负,超额使用按 0 截断（显式策略,不报错）
// ==========================================
// 职责: 使用量 → 剩余寿命 / 健康等级 / 更换预测 / 维护成本
// 输入: DegradationState (只读), 使用量, 日期
// 输出: 新的 DegradationState 副本及派生值
// ==========================================

use crate::config::EngineConfig;
use crate::domain::equipment::{DegradationState, Usage};
use crate::domain::types::{DegradationType, HealthStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 维护成本基准比例（购置成本的 2%/月）
const MAINTENANCE_BASE_RATE: f64 = 0.02;

/// 最长维护间隔（天）
const MAX_MAINTENANCE_INTERVAL_DAYS: f64 = 90.0;

// ==========================================
// 输出结构
// ==========================================

/// 距离更换阈值的时间预测
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "horizon", rename_all = "snake_case")]
pub enum TimeToThreshold {
    /// 有限时间内到达阈值（已低于阈值时 days_remaining 为负）
    #[serde(rename_all = "camelCase")]
    Finite {
        days_remaining: i64,
        estimated_date: NaiveDate,
    },
    /// 日损耗为 0, 永远不会到达阈值
    Unbounded,
}

impl TimeToThreshold {
    /// 剩余天数 (Unbounded → None)
    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            TimeToThreshold::Finite { days_remaining, .. } => Some(*days_remaining),
            TimeToThreshold::Unbounded => None,
        }
    }

    pub fn estimated_date(&self) -> Option<NaiveDate> {
        match self {
            TimeToThreshold::Finite { estimated_date, .. } => Some(*estimated_date),
            TimeToThreshold::Unbounded => None,
        }
    }

    /// 是否在给定天数内到达阈值
    pub fn is_within(&self, days: i64) -> bool {
        self.days_remaining().map_or(false, |d| d < days)
    }
}

/// 健康评估
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub status: HealthStatus,
    pub needs_maintenance: bool,
}

/// 维护成本
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCost {
    pub monthly: f64,
    pub yearly: f64,
    pub next_maintenance_date: NaiveDate,
}

// ==========================================
// DegradationModel - 退化模型
// ==========================================
#[derive(Debug, Clone)]
pub struct DegradationModel {
    threshold_fraction: f64,
}

impl DegradationModel {
    /// 构造函数（默认阈值 25%）
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            threshold_fraction: config.maintenance_threshold_fraction,
        }
    }

    pub fn threshold_fraction(&self) -> f64 {
        self.threshold_fraction
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 应用使用量
    ///
    /// # 规则
    /// - 只取与 state.kind 匹配的使用量字段
    /// - current_value -= usage * degradation_rate, 最低为 0
    /// - last_updated 更新为 now
    ///
    /// # 返回
    /// 新的状态副本（调用方的 state 不变）
    pub fn apply_usage(
        &self,
        state: &DegradationState,
        usage: &Usage,
        now: DateTime<Utc>,
    ) -> DegradationState {
        let amount = usage.along(state.kind).max(0.0);
        let consumed = amount * state.degradation_rate;

        let mut next = state.clone();
        next.current_value = (state.current_value - consumed).max(0.0);
        next.last_updated = now;

        if next.current_value == 0.0 && state.current_value > 0.0 {
            tracing::debug!(
                kind = %state.kind,
                consumed,
                "剩余寿命已耗尽，截断为 0"
            );
        }

        next
    }

    /// 预测到达更换阈值的时间
    ///
    /// # 参数
    /// - `daily_usage_rate`: 每日使用次数 (cycles) / 小时数 (hours); time 轴忽略
    /// - `threshold`: 阈值, None 时取 threshold_fraction * max_value
    ///
    /// # 规则
    /// - cycles/hours: 日损耗 = degradation_rate * daily_usage_rate
    /// - time: 日损耗 = degradation_rate
    /// - days_remaining = floor((current_value - threshold) / 日损耗)
    /// - 日损耗为 0 → Unbounded
    /// - 日期超出可表示范围时截断为 NaiveDate::MAX / NaiveDate::MIN, days_remaining 保留原值
    pub fn predict_time_to_threshold(
        &self,
        state: &DegradationState,
        daily_usage_rate: f64,
        threshold: Option<f64>,
        today: NaiveDate,
    ) -> TimeToThreshold {
        let threshold = threshold.unwrap_or(self.threshold_fraction * state.max_value);

        let daily_rate = match state.kind {
            DegradationType::Cycles | DegradationType::Hours => {
                state.degradation_rate * daily_usage_rate
            }
            DegradationType::Time => state.degradation_rate,
        };

        if daily_rate <= 0.0 {
            return TimeToThreshold::Unbounded;
        }

        let days_remaining = ((state.current_value - threshold) / daily_rate).floor() as i64;

        TimeToThreshold::Finite {
            days_remaining,
            estimated_date: offset_date(today, days_remaining),
        }
    }

    /// 健康等级
    ///
    /// # 规则（严格大于: 恰好 75% / 50% / 25% 归入较差一档）
    /// - > 75% → good
    /// - > 50% → fair
    /// - > 25% → poor
    /// - 其他 → critical
    pub fn health_status(&self, state: &DegradationState) -> HealthAssessment {
        let fraction = state.health_fraction();

        let status = if fraction > 0.75 {
            HealthStatus::Good
        } else if fraction > 0.50 {
            HealthStatus::Fair
        } else if fraction > 0.25 {
            HealthStatus::Poor
        } else {
            HealthStatus::Critical
        };

        HealthAssessment {
            status,
            needs_maintenance: status.needs_maintenance(),
        }
    }

    /// 月维护成本: acquisition_cost * 2% * (2 - 健康度)
    ///
    /// 健康度满时为 2%, 归零时翻倍为 4%
    pub fn monthly_maintenance(&self, state: &DegradationState, acquisition_cost: f64) -> f64 {
        let fraction = state.health_fraction().clamp(0.0, 1.0);
        acquisition_cost * MAINTENANCE_BASE_RATE * (2.0 - fraction)
    }

    /// 维护成本与下次维护日期
    ///
    /// 下次维护 = today + floor(健康度 * 90) 天
    pub fn maintenance_cost(
        &self,
        state: &DegradationState,
        acquisition_cost: f64,
        today: NaiveDate,
    ) -> MaintenanceCost {
        let monthly = self.monthly_maintenance(state, acquisition_cost);
        let fraction = state.health_fraction().clamp(0.0, 1.0);
        let interval_days = (fraction * MAX_MAINTENANCE_INTERVAL_DAYS).floor() as i64;

        MaintenanceCost {
            monthly,
            yearly: monthly * 12.0,
            next_maintenance_date: offset_date(today, interval_days),
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DegradationModel {
    fn default() -> Self {
        Self::new()
    }
}

/// today + days, 越界时截断到可表示的最大/最小日期
fn offset_date(today: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .unwrap_or(if days >= 0 {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        })
}
