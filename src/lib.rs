// ==========================================
// 装备全寿命周期与采购规划引擎 - 核心库
// ==========================================
// 职责: 装备退化 / 成本推演 / 库存台账 / 采购规划 / 组合校验
// 技术栈: Rust + serde + tracing
// 系统定位: 决策支持（采购需求只是建议, 审批由人工完成）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 引擎参数
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AlertSeverity, AlertType, DegradationType, EquipmentCategory, HealthStatus, ItemType,
    NeedStatus, Priority,
};

// 领域实体
pub use domain::{
    Combination, CombinationItem, Consumable, CostBreakdown, CostProjection, DegradationState,
    Equipment, InventoryReport, ProcurementNeed, Transaction, Usage,
};

// 引擎
pub use engine::{
    CombinationValidator, CostModel, DegradationModel, InventoryLedger, InventoryStore,
    ProcurementPlanner, RecordValidator,
};

// 配置与错误
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, FieldViolation};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "装备全寿命周期与采购规划引擎";
