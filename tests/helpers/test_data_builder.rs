// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use super::now;
use equipment_lifecycle::domain::{
    Combination, CombinationItem, Consumable, ConsumableLink, DegradationState, Equipment,
};
use equipment_lifecycle::domain::types::{DegradationType, EquipmentCategory};

// ==========================================
// Equipment 构建器
// ==========================================

pub struct EquipmentBuilder {
    id: String,
    name: String,
    category: EquipmentCategory,
    acquisition_cost: f64,
    quantity: u32,
    in_use: u32,
    personnel_required: u32,
    consumable_links: Vec<ConsumableLink>,
    degradation: DegradationState,
}

impl EquipmentBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("装备 {}", id),
            category: EquipmentCategory::Platform,
            acquisition_cost: 1000.0,
            quantity: 5,
            in_use: 0,
            personnel_required: 0,
            consumable_links: Vec::new(),
            degradation: DegradationState::new(DegradationType::Cycles, 1000.0, 1.0, 800.0, now()),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn category(mut self, category: EquipmentCategory) -> Self {
        self.category = category;
        self
    }

    pub fn acquisition_cost(mut self, cost: f64) -> Self {
        self.acquisition_cost = cost;
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn in_use(mut self, in_use: u32) -> Self {
        self.in_use = in_use;
        self
    }

    pub fn personnel(mut self, personnel: u32) -> Self {
        self.personnel_required = personnel;
        self
    }

    pub fn link(mut self, consumable_id: &str, units_per_use: f64) -> Self {
        self.consumable_links.push(ConsumableLink {
            consumable_id: consumable_id.to_string(),
            units_per_use,
        });
        self
    }

    /// 设置退化轴: 满寿命 max_value, 每单位使用损耗 rate
    pub fn degradation(mut self, kind: DegradationType, max_value: f64, rate: f64) -> Self {
        let replacement_cost = self.degradation.replacement_cost;
        self.degradation = DegradationState::new(kind, max_value, rate, replacement_cost, now());
        self
    }

    pub fn current_value(mut self, value: f64) -> Self {
        self.degradation.current_value = value;
        self
    }

    pub fn build(self) -> Equipment {
        Equipment {
            id: self.id,
            name: self.name,
            category: self.category,
            manufacturer: None,
            model: None,
            description: None,
            acquisition_cost: self.acquisition_cost,
            quantity: self.quantity,
            in_use: self.in_use,
            personnel_required: self.personnel_required,
            consumable_links: self.consumable_links,
            degradation: self.degradation,
        }
    }
}

// ==========================================
// Consumable 构建器
// ==========================================

pub struct ConsumableBuilder {
    id: String,
    cost_per_unit: f64,
    stock_level: u32,
    minimum_stock: u32,
    reorder_point: u32,
}

impl ConsumableBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            cost_per_unit: 1.0,
            stock_level: 100,
            minimum_stock: 10,
            reorder_point: 20,
        }
    }

    pub fn cost_per_unit(mut self, cost: f64) -> Self {
        self.cost_per_unit = cost;
        self
    }

    pub fn stock(mut self, stock: u32) -> Self {
        self.stock_level = stock;
        self
    }

    pub fn minimum(mut self, minimum: u32) -> Self {
        self.minimum_stock = minimum;
        self
    }

    pub fn reorder_point(mut self, reorder_point: u32) -> Self {
        self.reorder_point = reorder_point;
        self
    }

    pub fn build(self) -> Consumable {
        Consumable {
            name: format!("耗材 {}", self.id),
            id: self.id,
            unit: "件".to_string(),
            cost_per_unit: self.cost_per_unit,
            stock_level: self.stock_level,
            minimum_stock: self.minimum_stock,
            reorder_point: self.reorder_point,
        }
    }
}

// ==========================================
// Combination 构建
// ==========================================

pub fn combination(name: &str, items: &[(&str, u32)]) -> Combination {
    Combination::new(
        name,
        items
            .iter()
            .map(|(asset_id, quantity)| CombinationItem::new(*asset_id, *quantity))
            .collect(),
    )
}
