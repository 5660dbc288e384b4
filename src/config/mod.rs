// ==========================================
// 装备全寿命周期与采购规划引擎 - 配置层
// ==========================================
// 职责: 引擎参数,支持 JSON 文档与 key-value 覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置
pub use config_manager::{config_keys, EngineConfig};
