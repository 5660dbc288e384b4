// ==========================================
// 装备全寿命周期与采购规划引擎 - 耗材领域模型
// ==========================================
// 红线: reorder_point ≥ minimum_stock (校验层拒绝违反记录)
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumable {
    pub id: String,
    pub name: String,
    pub unit: String,          // 计量单位 (件/升/块...)
    pub cost_per_unit: f64,    // 单价 (≥0)
    pub stock_level: u32,      // 当前库存
    pub minimum_stock: u32,    // 安全库存
    pub reorder_point: u32,    // 再订货点
}

impl Consumable {
    /// 是否已到再订货点
    pub fn at_or_below_reorder_point(&self) -> bool {
        self.stock_level <= self.reorder_point
    }

    /// 是否已跌破安全库存
    pub fn at_or_below_minimum(&self) -> bool {
        self.stock_level <= self.minimum_stock
    }
}
