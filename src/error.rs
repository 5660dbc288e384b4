// ==========================================
// 装备全寿命周期与采购规划引擎 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 规则: 校验错误整体收集后一次性返回; 交易不变量错误首个即中止
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// FieldViolation - 单个字段校验失败
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// 引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 输入校验 =====
    #[error("数据校验失败 ({} 项): {}", .0.len(), join_violations(.0))]
    Validation(Vec<FieldViolation>),

    // ===== 引用错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("引用无法解析: {context} 引用了不存在的 {id}")]
    Reference { context: String, id: String },

    // ===== 交易不变量 =====
    #[error("库存不足: {entity_id} 请求 {requested}, 可用 {available}")]
    InsufficientStock {
        entity_id: String,
        requested: u32,
        available: u32,
    },

    #[error("数量无效: {entity_id} 请求 {requested}, 上限 {limit}")]
    InvalidQuantity {
        entity_id: String,
        requested: u32,
        limit: u32,
    },

    // ===== 状态流转 =====
    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ===== 并发 =====
    #[error("锁获取失败: {0}")]
    LockError(String),
}

impl EngineError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        EngineError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn reference(context: &str, id: &str) -> Self {
        EngineError::Reference {
            context: context.to_string(),
            id: id.to_string(),
        }
    }

    /// 校验错误列表（非校验错误返回空）
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            EngineError::Validation(v) => v,
            _ => &[],
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_all_fields() {
        let err = EngineError::Validation(vec![
            FieldViolation::new("quantity", "必须大于 0"),
            FieldViolation::new("assetId", "不能为空"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 项"));
        assert!(msg.contains("quantity"));
        assert!(msg.contains("assetId"));
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = EngineError::InsufficientStock {
            entity_id: "UAV-01".to_string(),
            requested: 6,
            available: 5,
        };
        assert!(err.to_string().contains("UAV-01"));
        assert!(err.violations().is_empty());
    }
}
