// ==========================================
// 装备全寿命周期与采购规划引擎 - 引擎层
// ==========================================
// 职责: 退化/成本/库存/采购/组合规则
// 红线: 除台账交易外, 引擎均为显式输入上的纯计算
// ==========================================

pub mod combination;
pub mod cost;
pub mod degradation;
pub mod events;
pub mod ledger;
pub mod procurement;
pub mod store;
pub mod validation;

// 重导出核心引擎
pub use combination::CombinationValidator;
pub use cost::{CostModel, NoUnitCosts, UnitCostLookup};
pub use degradation::{DegradationModel, HealthAssessment, MaintenanceCost, TimeToThreshold};
pub use events::{
    InventoryEvent, InventoryEventPublisher, NoOpEventPublisher, RecordingEventPublisher,
};
pub use ledger::{available_units, InventoryLedger, TransactionLog, LOW_STOCK_ASSET_THRESHOLD};
pub use procurement::{BudgetedPlan, ProcurementPlanner};
pub use store::{InventorySnapshot, InventoryStore};
pub use validation::RecordValidator;
