// ==========================================
// 装备全寿命周期与采购规划引擎 - 装备组合领域模型
// ==========================================
// 说明: 汇总值是创建/更新时的快照,不会自动重算
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// CombinationItem - 组合行项目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationItem {
    pub asset_id: String,
    pub quantity: u32,
}

impl CombinationItem {
    pub fn new(asset_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            asset_id: asset_id.into(),
            quantity,
        }
    }
}

// ==========================================
// CombinationTotals - 组合汇总快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationTotals {
    pub total_cost: f64,
    pub total_personnel: u32,
    /// 耗材 ID → 每次使用的总单位数
    pub consumables: BTreeMap<String, f64>,
}

// ==========================================
// Combination - 装备组合
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combination {
    pub id: String,
    pub name: String,
    pub items: Vec<CombinationItem>,
    #[serde(default)]
    pub totals: CombinationTotals,
    #[serde(default)]
    pub totals_computed_at: Option<DateTime<Utc>>,
}

impl Combination {
    /// 创建组合（汇总值为空,需调用方显式计算）
    pub fn new(name: impl Into<String>, items: Vec<CombinationItem>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            items,
            totals: CombinationTotals::default(),
            totals_computed_at: None,
        }
    }

    /// 写入汇总快照
    pub fn apply_totals(&mut self, totals: CombinationTotals, computed_at: DateTime<Utc>) {
        self.totals = totals;
        self.totals_computed_at = Some(computed_at);
    }
}
