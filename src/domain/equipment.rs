// ==========================================
// 装备全寿命周期与采购规划引擎 - 装备领域模型
// ==========================================
// 红线: 0 ≤ in_use ≤ quantity, 只能通过交易改变
// 红线: 0 ≤ current_value ≤ max_value, 只能通过退化计算降低
// ==========================================

use crate::domain::types::{DegradationType, EquipmentCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// DegradationState - 退化状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradationState {
    #[serde(rename = "type")]
    pub kind: DegradationType,    // 退化轴
    pub max_value: f64,           // 满寿命值 (>0)
    pub current_value: f64,       // 剩余寿命值 (0..=max_value)
    pub degradation_rate: f64,    // 每单位使用量的损耗 (>0)
    pub replacement_cost: f64,    // 更换成本 (≥0)
    pub last_updated: DateTime<Utc>,
}

impl DegradationState {
    /// 创建满寿命状态
    pub fn new(
        kind: DegradationType,
        max_value: f64,
        degradation_rate: f64,
        replacement_cost: f64,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            max_value,
            current_value: max_value,
            degradation_rate,
            replacement_cost,
            last_updated,
        }
    }

    /// 健康度 = current_value / max_value
    ///
    /// max_value 非正时视为 0（校验层会拒绝这种记录）
    pub fn health_fraction(&self) -> f64 {
        if self.max_value <= 0.0 {
            return 0.0;
        }
        self.current_value / self.max_value
    }
}

// ==========================================
// ConsumableLink - 装备与耗材的关联
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableLink {
    pub consumable_id: String,
    pub units_per_use: f64,
}

// ==========================================
// Equipment - 装备 (Asset)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    // ===== 标识 =====
    pub id: String,
    pub name: String,
    pub category: EquipmentCategory,

    // ===== 描述字段 =====
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub description: Option<String>,

    // ===== 数量与成本 =====
    pub acquisition_cost: f64, // 单台购置成本
    pub quantity: u32,         // 拥有总数
    pub in_use: u32,           // 已部署数
    pub personnel_required: u32,

    // ===== 关联 =====
    #[serde(default)]
    pub consumable_links: Vec<ConsumableLink>,
    pub degradation: DegradationState,
}

impl Equipment {
    /// 健康度快捷方法
    pub fn health_fraction(&self) -> f64 {
        self.degradation.health_fraction()
    }
}

// ==========================================
// Usage - 使用量增量
// ==========================================
// 只有与退化轴匹配的字段生效
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub cycles: Option<f64>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub days: Option<f64>,
}

impl Usage {
    pub fn cycles(n: f64) -> Self {
        Self {
            cycles: Some(n),
            ..Self::default()
        }
    }

    pub fn hours(n: f64) -> Self {
        Self {
            hours: Some(n),
            ..Self::default()
        }
    }

    pub fn days(n: f64) -> Self {
        Self {
            days: Some(n),
            ..Self::default()
        }
    }

    /// 沿指定轴的一个单位使用量（归还时计一次使用）
    pub fn one_unit(kind: DegradationType) -> Self {
        match kind {
            DegradationType::Cycles => Self::cycles(1.0),
            DegradationType::Hours => Self::hours(1.0),
            DegradationType::Time => Self::days(1.0),
        }
    }

    /// 读取与退化轴匹配的使用量（缺失视为 0）
    pub fn along(&self, kind: DegradationType) -> f64 {
        let value = match kind {
            DegradationType::Cycles => self.cycles,
            DegradationType::Hours => self.hours,
            DegradationType::Time => self.days,
        };
        value.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_usage_along_ignores_other_axes() {
        let usage = Usage {
            cycles: Some(3.0),
            hours: Some(10.0),
            days: None,
        };
        assert_eq!(usage.along(DegradationType::Cycles), 3.0);
        assert_eq!(usage.along(DegradationType::Hours), 10.0);
        assert_eq!(usage.along(DegradationType::Time), 0.0);
    }

    #[test]
    fn test_degradation_state_json_shape() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let state = DegradationState::new(DegradationType::Cycles, 100.0, 1.0, 500.0, ts);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["type"], "cycles");
        assert_eq!(json["maxValue"], 100.0);
        assert_eq!(json["currentValue"], 100.0);
        assert_eq!(state.health_fraction(), 1.0);
    }
}
