// ==========================================
// 装备全寿命周期与采购规划引擎 - 领域类型定义
// ==========================================
// 职责: 枚举类型 (装备类别/退化轴/健康等级/优先级/状态)
// 序列化格式: snake_case (与上游录入数据一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 装备类别 (Equipment Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    Platform, // 平台
    Payload,  // 载荷
    Sensor,   // 传感器
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentCategory::Platform => write!(f, "platform"),
            EquipmentCategory::Payload => write!(f, "payload"),
            EquipmentCategory::Sensor => write!(f, "sensor"),
        }
    }
}

impl EquipmentCategory {
    /// 从字符串解析类别（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "platform" => Some(EquipmentCategory::Platform),
            "payload" => Some(EquipmentCategory::Payload),
            "sensor" => Some(EquipmentCategory::Sensor),
            _ => None,
        }
    }
}

// ==========================================
// 退化轴 (Degradation Type)
// ==========================================
// 每台装备只沿一个轴累计寿命损耗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationType {
    Cycles, // 按使用次数
    Hours,  // 按运行小时
    Time,   // 按自然日
}

impl fmt::Display for DegradationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradationType::Cycles => write!(f, "cycles"),
            DegradationType::Hours => write!(f, "hours"),
            DegradationType::Time => write!(f, "time"),
        }
    }
}

impl DegradationType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cycles" => Some(DegradationType::Cycles),
            "hours" => Some(DegradationType::Hours),
            "time" => Some(DegradationType::Time),
            _ => None,
        }
    }
}

// ==========================================
// 健康等级 (Health Status)
// ==========================================
// 顺序: Good < Fair < Poor < Critical (越大越差)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Good,     // > 75%
    Fair,     // > 50%
    Poor,     // > 25%
    Critical, // ≤ 25%
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Good => write!(f, "good"),
            HealthStatus::Fair => write!(f, "fair"),
            HealthStatus::Poor => write!(f, "poor"),
            HealthStatus::Critical => write!(f, "critical"),
        }
    }
}

impl HealthStatus {
    /// 运行成本倍率: 退化越严重,运行越贵
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            HealthStatus::Good => 1.0,
            HealthStatus::Fair => 1.2,
            HealthStatus::Poor => 1.5,
            HealthStatus::Critical => 2.0,
        }
    }

    /// poor / critical 需要维护
    pub fn needs_maintenance(&self) -> bool {
        matches!(self, HealthStatus::Poor | HealthStatus::Critical)
    }
}

// ==========================================
// 采购优先级 (Priority)
// ==========================================
// 顺序: High < Medium < Low (排序时 High 在前)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

// ==========================================
// 采购需求状态 (Need Status)
// ==========================================
// 只能单向推进: pending → approved → ordered → received
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedStatus {
    Pending,
    Approved,
    Ordered,
    Received,
}

impl fmt::Display for NeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeedStatus::Pending => write!(f, "pending"),
            NeedStatus::Approved => write!(f, "approved"),
            NeedStatus::Ordered => write!(f, "ordered"),
            NeedStatus::Received => write!(f, "received"),
        }
    }
}

impl NeedStatus {
    /// 下一状态（received 为终态）
    pub fn next(&self) -> Option<NeedStatus> {
        match self {
            NeedStatus::Pending => Some(NeedStatus::Approved),
            NeedStatus::Approved => Some(NeedStatus::Ordered),
            NeedStatus::Ordered => Some(NeedStatus::Received),
            NeedStatus::Received => None,
        }
    }
}

// ==========================================
// 采购对象类型 (Item Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Asset,
    Consumable,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Asset => write!(f, "asset"),
            ItemType::Consumable => write!(f, "consumable"),
        }
    }
}

// ==========================================
// 告警类型与级别 (Alert)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowStock,          // 可用数量/库存不足
    MaintenanceNeeded, // 健康度需要维护
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertType::LowStock => write!(f, "low_stock"),
            AlertType::MaintenanceNeeded => write!(f, "maintenance_needed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    High,
    Medium,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::High => write!(f, "high"),
            AlertSeverity::Medium => write!(f, "medium"),
        }
    }
}
