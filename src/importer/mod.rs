// ==========================================
// 装备全寿命周期与采购规划引擎 - 导入层
// ==========================================
// 职责: 外部数据（CSV / 文档抽取结果）→ 经校验的装备/耗材记录
// 支持: CSV
// ==========================================

pub mod candidate;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod intake;

// 重导出核心类型
pub use candidate::{ConsumableCandidate, EquipmentCandidate};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, FileParser, RawRow};
pub use intake::{IntakeReport, IntakeService, RejectedRow};
