// ==========================================
// 装备全寿命周期与采购规划引擎 - 记录校验器
// ==========================================
// 职责: 录入/导入记录的范围与不变量校验
// 规则: 收集全部违规后一次性返回（不 fail-fast）,便于界面一次展示
// ==========================================

use crate::domain::combination::Combination;
use crate::domain::consumable::Consumable;
use crate::domain::equipment::Equipment;
use crate::domain::transaction::Transaction;
use crate::error::{EngineError, EngineResult, FieldViolation};
use std::collections::HashSet;

// ==========================================
// RecordValidator - 记录校验器
// ==========================================
pub struct RecordValidator {
    // 无状态校验器
}

impl RecordValidator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 装备
    // ==========================================

    pub fn validate_equipment(&self, equipment: &Equipment) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        require_non_empty(&mut violations, "id", &equipment.id);
        require_non_empty(&mut violations, "name", &equipment.name);
        require_non_negative(&mut violations, "acquisitionCost", equipment.acquisition_cost);

        check_in_use(&mut violations, equipment.in_use, equipment.quantity);

        // ===== 退化状态 =====
        let d = &equipment.degradation;
        check_max_value(&mut violations, d.max_value);
        check_current_value(&mut violations, d.current_value, d.max_value);
        check_degradation_rate(&mut violations, d.degradation_rate);
        require_non_negative(&mut violations, "degradation.replacementCost", d.replacement_cost);

        // ===== 耗材关联 =====
        for (idx, link) in equipment.consumable_links.iter().enumerate() {
            require_non_empty(
                &mut violations,
                &format!("consumableLinks[{}].consumableId", idx),
                &link.consumable_id,
            );
            require_non_negative(
                &mut violations,
                &format!("consumableLinks[{}].unitsPerUse", idx),
                link.units_per_use,
            );
        }

        violations
    }

    // ==========================================
    // 耗材
    // ==========================================

    pub fn validate_consumable(&self, consumable: &Consumable) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        require_non_empty(&mut violations, "id", &consumable.id);
        require_non_empty(&mut violations, "name", &consumable.name);
        require_non_empty(&mut violations, "unit", &consumable.unit);
        require_non_negative(&mut violations, "costPerUnit", consumable.cost_per_unit);

        check_reorder_point(&mut violations, consumable.reorder_point, consumable.minimum_stock);

        violations
    }

    // ==========================================
    // 组合
    // ==========================================

    pub fn validate_combination(&self, combination: &Combination) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        require_non_empty(&mut violations, "name", &combination.name);
        if combination.items.is_empty() {
            violations.push(FieldViolation::new("items", "组合至少需要一个装备"));
        }

        let mut seen = HashSet::new();
        for (idx, item) in combination.items.iter().enumerate() {
            require_non_empty(&mut violations, &format!("items[{}].assetId", idx), &item.asset_id);
            if item.quantity == 0 {
                violations.push(FieldViolation::new(
                    format!("items[{}].quantity", idx),
                    "必须大于 0",
                ));
            }
            if !item.asset_id.is_empty() && !seen.insert(item.asset_id.as_str()) {
                violations.push(FieldViolation::new(
                    format!("items[{}].assetId", idx),
                    format!("装备 {} 重复出现", item.asset_id),
                ));
            }
        }

        violations
    }

    // ==========================================
    // 交易
    // ==========================================

    pub fn validate_transaction(&self, transaction: &Transaction) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        require_non_empty(&mut violations, "id", transaction.id());
        let entity_field = match transaction {
            Transaction::Asset(_) => "assetId",
            Transaction::Consumable(_) => "consumableId",
        };
        require_non_empty(&mut violations, entity_field, transaction.entity_id());
        if transaction.quantity() == 0 {
            violations.push(FieldViolation::new("quantity", "必须大于 0"));
        }

        violations
    }

    // ==========================================
    // ensure_* 包装: 非空违规列表 → EngineError::Validation
    // ==========================================

    pub fn ensure_equipment(&self, equipment: &Equipment) -> EngineResult<()> {
        into_result(self.validate_equipment(equipment))
    }

    pub fn ensure_consumable(&self, consumable: &Consumable) -> EngineResult<()> {
        into_result(self.validate_consumable(consumable))
    }

    pub fn ensure_combination(&self, combination: &Combination) -> EngineResult<()> {
        into_result(self.validate_combination(combination))
    }

    pub fn ensure_transaction(&self, transaction: &Transaction) -> EngineResult<()> {
        into_result(self.validate_transaction(transaction))
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn into_result(violations: Vec<FieldViolation>) -> EngineResult<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation(violations))
    }
}

fn require_non_empty(violations: &mut Vec<FieldViolation>, field: &str, value: &str) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, "不能为空"));
    }
}

pub(crate) fn require_non_negative(violations: &mut Vec<FieldViolation>, field: &str, value: f64) {
    if !(value >= 0.0) || !value.is_finite() {
        violations.push(FieldViolation::new(field, format!("不能为负数, 实际 {}", value)));
    }
}

// ==========================================
// 单字段规则（候选记录在必填字段缺失时也复用）
// ==========================================

pub(crate) fn check_in_use(violations: &mut Vec<FieldViolation>, in_use: u32, quantity: u32) {
    if in_use > quantity {
        violations.push(FieldViolation::new(
            "inUse",
            format!("已部署数 {} 超过总数 {}", in_use, quantity),
        ));
    }
}

pub(crate) fn check_max_value(violations: &mut Vec<FieldViolation>, max_value: f64) {
    if !(max_value > 0.0) || !max_value.is_finite() {
        violations.push(FieldViolation::new(
            "degradation.maxValue",
            format!("必须大于 0, 实际 {}", max_value),
        ));
    }
}

pub(crate) fn check_current_value(
    violations: &mut Vec<FieldViolation>,
    current_value: f64,
    max_value: f64,
) {
    if !(current_value >= 0.0 && current_value <= max_value) {
        violations.push(FieldViolation::new(
            "degradation.currentValue",
            format!("必须在 [0, {}] 区间内, 实际 {}", max_value, current_value),
        ));
    }
}

pub(crate) fn check_degradation_rate(violations: &mut Vec<FieldViolation>, rate: f64) {
    if !(rate > 0.0) || !rate.is_finite() {
        violations.push(FieldViolation::new(
            "degradation.degradationRate",
            format!("必须大于 0, 实际 {}", rate),
        ));
    }
}

pub(crate) fn check_reorder_point(
    violations: &mut Vec<FieldViolation>,
    reorder_point: u32,
    minimum_stock: u32,
) {
    if reorder_point < minimum_stock {
        violations.push(FieldViolation::new(
            "reorderPoint",
            format!("再订货点 {} 低于安全库存 {}", reorder_point, minimum_stock),
        ));
    }
}
