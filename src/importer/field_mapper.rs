// ==========================================
// 装备全寿命周期与采购规划引擎 - 字段映射器
// ==========================================
// 职责: 原始行 → 候选记录（列名别名 + 类型转换）
// 说明: 空单元格映射为 None, 缺失判定留给候选记录转换
// ==========================================

use crate::importer::candidate::{ConsumableCandidate, EquipmentCandidate};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use std::str::FromStr;

pub struct FieldMapper;

impl FieldMapper {
    pub fn map_equipment(
        &self,
        row: &RawRow,
        row_number: usize,
    ) -> ImportResult<EquipmentCandidate> {
        Ok(EquipmentCandidate {
            id: self.get_string(row, "id"),
            name: self.get_string(row, "name"),
            category: self.get_string(row, "category"),
            manufacturer: self.get_string(row, "manufacturer"),
            model: self.get_string(row, "model"),
            description: self.get_string(row, "description"),
            acquisition_cost: self.parse(row, "acquisitionCost", row_number)?,
            quantity: self.parse(row, "quantity", row_number)?,
            in_use: self.parse(row, "inUse", row_number)?,
            personnel_required: self.parse(row, "personnelRequired", row_number)?,
            degradation_type: self.get_string(row, "degradationType"),
            max_value: self.parse(row, "maxValue", row_number)?,
            current_value: self.parse(row, "currentValue", row_number)?,
            degradation_rate: self.parse(row, "degradationRate", row_number)?,
            replacement_cost: self.parse(row, "replacementCost", row_number)?,
        })
    }

    pub fn map_consumable(
        &self,
        row: &RawRow,
        row_number: usize,
    ) -> ImportResult<ConsumableCandidate> {
        Ok(ConsumableCandidate {
            id: self.get_string(row, "id"),
            name: self.get_string(row, "name"),
            unit: self.get_string(row, "unit"),
            cost_per_unit: self.parse(row, "costPerUnit", row_number)?,
            stock_level: self.parse(row, "stockLevel", row_number)?,
            minimum_stock: self.parse(row, "minimumStock", row_number)?,
            reorder_point: self.parse(row, "reorderPoint", row_number)?,
        })
    }

    /// 提取字符串字段, 支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            "id" => &["id", "编号"],
            "name" => &["name", "名称"],
            "category" => &["category", "类别"],
            "manufacturer" => &["manufacturer", "厂商"],
            "model" => &["model", "型号"],
            "description" => &["description", "描述"],
            "acquisitionCost" => &["acquisitionCost", "acquisition_cost", "采购价"],
            "quantity" => &["quantity", "数量"],
            "inUse" => &["inUse", "in_use", "在用数量"],
            "personnelRequired" => &["personnelRequired", "personnel_required", "所需人员"],
            "degradationType" => &["degradationType", "degradation_type", "退化类型"],
            "maxValue" => &["maxValue", "max_value", "寿命上限"],
            "currentValue" => &["currentValue", "current_value", "剩余寿命"],
            "degradationRate" => &["degradationRate", "degradation_rate", "退化速率"],
            "replacementCost" => &["replacementCost", "replacement_cost", "更换成本"],
            "unit" => &["unit", "单位"],
            "costPerUnit" => &["costPerUnit", "cost_per_unit", "单价"],
            "stockLevel" => &["stockLevel", "stock_level", "库存"],
            "minimumStock" => &["minimumStock", "minimum_stock", "安全库存"],
            "reorderPoint" => &["reorderPoint", "reorder_point", "再订货点"],
            _ => &[],
        };

        aliases
            .iter()
            .chain(std::iter::once(&key))
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 解析数值字段（空值为 None）
    fn parse<T: FromStr>(
        &self,
        row: &RawRow,
        key: &str,
        row_number: usize,
    ) -> ImportResult<Option<T>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .parse::<T>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析数值: {}", value),
                }),
        }
    }
}
