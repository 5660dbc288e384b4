// ==========================================
// 装备全寿命周期与采购规划引擎 - 引擎输出结构
// ==========================================
// 说明: 纯数据,不持有任何指向实时状态的引用
// 用途: CostModel / InventoryLedger / CombinationValidator 输出格式
// ==========================================

use crate::domain::types::{AlertSeverity, AlertType, HealthStatus, ItemType};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

// ==========================================
// CostBreakdown - 成本分解
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub acquisition: f64,
    pub operational: f64,
    pub maintenance: f64,
    pub personnel: f64,
    pub consumables: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// 由五个分项构造, total 为分项之和
    pub fn new(
        acquisition: f64,
        operational: f64,
        maintenance: f64,
        personnel: f64,
        consumables: f64,
    ) -> Self {
        Self {
            acquisition,
            operational,
            maintenance,
            personnel,
            consumables,
            total: acquisition + operational + maintenance + personnel + consumables,
        }
    }
}

impl Add for CostBreakdown {
    type Output = CostBreakdown;

    fn add(self, rhs: CostBreakdown) -> CostBreakdown {
        CostBreakdown::new(
            self.acquisition + rhs.acquisition,
            self.operational + rhs.operational,
            self.maintenance + rhs.maintenance,
            self.personnel + rhs.personnel,
            self.consumables + rhs.consumables,
        )
    }
}

impl AddAssign for CostBreakdown {
    fn add_assign(&mut self, rhs: CostBreakdown) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for CostBreakdown {
    type Output = CostBreakdown;

    fn mul(self, factor: f64) -> CostBreakdown {
        CostBreakdown::new(
            self.acquisition * factor,
            self.operational * factor,
            self.maintenance * factor,
            self.personnel * factor,
            self.consumables * factor,
        )
    }
}

impl Sum for CostBreakdown {
    fn sum<I: Iterator<Item = CostBreakdown>>(iter: I) -> CostBreakdown {
        iter.fold(CostBreakdown::default(), |acc, c| acc + c)
    }
}

impl<'a> Sum<&'a CostBreakdown> for CostBreakdown {
    fn sum<I: Iterator<Item = &'a CostBreakdown>>(iter: I) -> CostBreakdown {
        iter.fold(CostBreakdown::default(), |acc, c| acc + *c)
    }
}

// ==========================================
// CostProjection - 多期成本预测
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostProjection {
    pub per_period: Vec<CostBreakdown>,
    pub aggregate: CostBreakdown,
}

// ==========================================
// InventoryReport - 库存报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStatusLine {
    pub asset_id: String,
    pub available: u32,
    pub deployed: u32,
    pub maintenance_flag: bool,
    pub health_fraction: f64,
    pub health_status: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableStatusLine {
    pub consumable_id: String,
    pub current_stock: u32,
    pub projected_monthly_usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAlert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub item_type: ItemType,
    pub item_id: String,
    pub severity: AlertSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub assets: Vec<AssetStatusLine>,
    pub consumables: Vec<ConsumableStatusLine>,
    pub alerts: Vec<InventoryAlert>,
}

impl InventoryReport {
    /// 高级别告警数量
    pub fn high_alert_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::High)
            .count()
    }
}

// ==========================================
// 组合校验结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingItem {
    pub asset_id: String,
    pub requested: u32,
    pub available: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub missing: Vec<MissingItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsabilityResult {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}
