// ==========================================
// 装备全寿命周期与采购规划引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、引擎输出结构
// 红线: 不含引擎逻辑,派生值(健康等级/可用数)不落字段
// ==========================================

pub mod combination;
pub mod consumable;
pub mod equipment;
pub mod procurement;
pub mod report;
pub mod transaction;
pub mod types;

// 重导出核心类型
pub use combination::{Combination, CombinationItem, CombinationTotals};
pub use consumable::Consumable;
pub use equipment::{ConsumableLink, DegradationState, Equipment, Usage};
pub use procurement::{PlanSummary, ProcurementNeed};
pub use report::{
    AssetStatusLine, ConsumableStatusLine, CostBreakdown, CostProjection, InventoryAlert,
    InventoryReport, MissingItem, UsabilityResult, ValidationResult,
};
pub use transaction::{
    AssetTransaction, AssetTransactionKind, ConsumableTransaction, ConsumableTransactionKind,
    QuantitySnapshot, Transaction, TransactionRecord,
};
pub use types::{
    AlertSeverity, AlertType, DegradationType, EquipmentCategory, HealthStatus, ItemType,
    NeedStatus, Priority,
};
