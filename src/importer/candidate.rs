// ==========================================
// 装备全寿命周期与采购规划引擎 - 候选记录
// ==========================================
// 职责: 文档/表格抽取出的不完整记录 → 经校验的领域记录
// 规则: 描述性字段填默认值; 必填字段缺失逐项报告; 再走与手工录入相同的校验
// ==========================================

use crate::domain::consumable::Consumable;
use crate::domain::equipment::{DegradationState, Equipment};
use crate::domain::types::{DegradationType, EquipmentCategory};
use crate::engine::validation::{
    check_current_value, check_degradation_rate, check_in_use, check_max_value,
    check_reorder_point, require_non_negative, RecordValidator,
};
use crate::error::{EngineError, EngineResult, FieldViolation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// EquipmentCandidate - 装备候选记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentCandidate {
    pub id: Option<String>,
    pub name: Option<String>,
    /// 类别原文（platform / payload / sensor）
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub description: Option<String>,
    pub acquisition_cost: Option<f64>,
    pub quantity: Option<u32>,
    pub in_use: Option<u32>,
    pub personnel_required: Option<u32>,
    /// 退化类型原文（cycles / hours / time）
    pub degradation_type: Option<String>,
    pub max_value: Option<f64>,
    pub current_value: Option<f64>,
    pub degradation_rate: Option<f64>,
    pub replacement_cost: Option<f64>,
}

impl EquipmentCandidate {
    /// 转换为装备记录
    ///
    /// # 默认值
    /// - in_use / personnel_required: 0
    /// - current_value: max_value（新装备）
    /// - replacement_cost: acquisition_cost
    /// - degradation.last_updated: now
    ///
    /// # 错误
    /// - 必填字段缺失或值非法 → Validation（一次性列出全部问题）
    pub fn into_equipment(self, now: DateTime<Utc>) -> EngineResult<Equipment> {
        let mut violations = Vec::new();

        let id = required(&mut violations, "id", non_blank(self.id));
        let name = required(&mut violations, "name", non_blank(self.name));
        let category = match non_blank(self.category) {
            None => {
                violations.push(FieldViolation::new("category", "缺少必填字段"));
                None
            }
            Some(raw) => {
                let parsed = EquipmentCategory::parse(&raw);
                if parsed.is_none() {
                    violations.push(FieldViolation::new(
                        "category",
                        format!("无法识别的类别: {}", raw),
                    ));
                }
                parsed
            }
        };
        let kind = match non_blank(self.degradation_type) {
            None => {
                violations.push(FieldViolation::new("degradation.type", "缺少必填字段"));
                None
            }
            Some(raw) => {
                let parsed = DegradationType::parse(&raw);
                if parsed.is_none() {
                    violations.push(FieldViolation::new(
                        "degradation.type",
                        format!("无法识别的退化类型: {}", raw),
                    ));
                }
                parsed
            }
        };
        let acquisition_cost = required(&mut violations, "acquisitionCost", self.acquisition_cost);
        let quantity = required(&mut violations, "quantity", self.quantity);
        let max_value = required(&mut violations, "degradation.maxValue", self.max_value);
        let degradation_rate =
            required(&mut violations, "degradation.degradationRate", self.degradation_rate);

        let (
            Some(id),
            Some(name),
            Some(category),
            Some(kind),
            Some(acquisition_cost),
            Some(quantity),
            Some(max_value),
            Some(degradation_rate),
        ) = (
            id,
            name,
            category,
            kind,
            acquisition_cost,
            quantity,
            max_value,
            degradation_rate,
        )
        else {
            // 已给出的字段同样做范围校验, 一次报告全部问题
            if let Some(cost) = acquisition_cost {
                require_non_negative(&mut violations, "acquisitionCost", cost);
            }
            if let Some(quantity) = quantity {
                check_in_use(&mut violations, self.in_use.unwrap_or(0), quantity);
            }
            if let Some(max_value) = max_value {
                check_max_value(&mut violations, max_value);
                if let Some(current) = self.current_value {
                    check_current_value(&mut violations, current, max_value);
                }
            }
            if let Some(rate) = degradation_rate {
                check_degradation_rate(&mut violations, rate);
            }
            if let Some(cost) = self.replacement_cost {
                require_non_negative(&mut violations, "degradation.replacementCost", cost);
            }
            return Err(EngineError::Validation(violations));
        };

        let mut degradation = DegradationState::new(
            kind,
            max_value,
            degradation_rate,
            self.replacement_cost.unwrap_or(acquisition_cost),
            now,
        );
        if let Some(current) = self.current_value {
            degradation.current_value = current;
        }

        let equipment = Equipment {
            id,
            name,
            category,
            manufacturer: non_blank(self.manufacturer),
            model: non_blank(self.model),
            description: non_blank(self.description),
            acquisition_cost,
            quantity,
            in_use: self.in_use.unwrap_or(0),
            personnel_required: self.personnel_required.unwrap_or(0),
            consumable_links: Vec::new(),
            degradation,
        };

        RecordValidator::new().ensure_equipment(&equipment)?;
        Ok(equipment)
    }
}

// ==========================================
// ConsumableCandidate - 耗材候选记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsumableCandidate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub cost_per_unit: Option<f64>,
    pub stock_level: Option<u32>,
    pub minimum_stock: Option<u32>,
    pub reorder_point: Option<u32>,
}

impl ConsumableCandidate {
    /// 转换为耗材记录
    ///
    /// # 默认值
    /// - stock_level / minimum_stock: 0
    /// - reorder_point: minimum_stock
    pub fn into_consumable(self) -> EngineResult<Consumable> {
        let mut violations = Vec::new();

        let id = required(&mut violations, "id", non_blank(self.id));
        let name = required(&mut violations, "name", non_blank(self.name));
        let unit = required(&mut violations, "unit", non_blank(self.unit));
        let cost_per_unit = required(&mut violations, "costPerUnit", self.cost_per_unit);

        let (Some(id), Some(name), Some(unit), Some(cost_per_unit)) =
            (id, name, unit, cost_per_unit)
        else {
            if let Some(cost) = cost_per_unit {
                require_non_negative(&mut violations, "costPerUnit", cost);
            }
            let minimum_stock = self.minimum_stock.unwrap_or(0);
            check_reorder_point(
                &mut violations,
                self.reorder_point.unwrap_or(minimum_stock),
                minimum_stock,
            );
            return Err(EngineError::Validation(violations));
        };

        let minimum_stock = self.minimum_stock.unwrap_or(0);
        let consumable = Consumable {
            id,
            name,
            unit,
            cost_per_unit,
            stock_level: self.stock_level.unwrap_or(0),
            minimum_stock,
            reorder_point: self.reorder_point.unwrap_or(minimum_stock),
        };

        RecordValidator::new().ensure_consumable(&consumable)?;
        Ok(consumable)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<T>(violations: &mut Vec<FieldViolation>, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        violations.push(FieldViolation::new(field, "缺少必填字段"));
    }
    value
}
