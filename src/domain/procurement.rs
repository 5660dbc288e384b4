// ==========================================
// 装备全寿命周期与采购规划引擎 - 采购需求领域模型
// ==========================================
// 红线: 状态只能单向推进 pending → approved → ordered → received
// ==========================================

use crate::domain::types::{ItemType, NeedStatus, Priority};
use crate::error::{EngineError, EngineResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ProcurementNeed - 采购需求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementNeed {
    pub id: String,
    pub item_type: ItemType,
    pub item_id: String,
    pub quantity: u32,
    pub estimated_cost: f64,
    pub priority: Priority,
    pub reason: String,
    pub status: NeedStatus,
    /// 最晚下单日期（已扣除采购提前期）
    pub order_by: NaiveDate,
}

impl ProcurementNeed {
    pub fn new(
        item_type: ItemType,
        item_id: impl Into<String>,
        quantity: u32,
        estimated_cost: f64,
        priority: Priority,
        reason: impl Into<String>,
        order_by: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item_type,
            item_id: item_id.into(),
            quantity,
            estimated_cost,
            priority,
            reason: reason.into(),
            status: NeedStatus::Pending,
            order_by,
        }
    }

    /// 推进到下一状态
    ///
    /// # 规则
    /// - 只接受当前状态的直接后继
    /// - 回退/跳级/终态之后再推进 → InvalidStateTransition
    pub fn advance(&mut self, next: NeedStatus) -> EngineResult<()> {
        if self.status.next() != Some(next) {
            return Err(EngineError::InvalidStateTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }
}

// ==========================================
// PlanSummary - 预算计划摘要
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub total_estimated_cost: f64,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub skipped_count: usize,
    pub remaining_budget: Option<f64>,
}

impl PlanSummary {
    /// 从需求列表汇总
    pub fn from_needs(needs: &[ProcurementNeed]) -> Self {
        let mut summary = PlanSummary::default();
        for need in needs {
            summary.total_estimated_cost += need.estimated_cost;
            match need.priority {
                Priority::High => summary.high_count += 1,
                Priority::Medium => summary.medium_count += 1,
                Priority::Low => summary.low_count += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn need() -> ProcurementNeed {
        ProcurementNeed::new(
            ItemType::Consumable,
            "BAT-01",
            10,
            200.0,
            Priority::High,
            "test",
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        )
    }

    #[test]
    fn test_advance_forward_only() {
        let mut n = need();
        assert_eq!(n.status, NeedStatus::Pending);
        n.advance(NeedStatus::Approved).unwrap();
        n.advance(NeedStatus::Ordered).unwrap();
        n.advance(NeedStatus::Received).unwrap();
        assert_eq!(n.status, NeedStatus::Received);

        let err = n.advance(NeedStatus::Received).unwrap_err();
        assert!(matches!(err, EngineError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_advance_rejects_skip_and_rollback() {
        let mut n = need();
        assert!(n.advance(NeedStatus::Ordered).is_err());
        assert_eq!(n.status, NeedStatus::Pending);

        n.advance(NeedStatus::Approved).unwrap();
        assert!(n.advance(NeedStatus::Pending).is_err());
        assert_eq!(n.status, NeedStatus::Approved);
    }

    #[test]
    fn test_plan_summary_counts() {
        let mut medium = need();
        medium.priority = Priority::Medium;
        medium.estimated_cost = 50.0;
        let summary = PlanSummary::from_needs(&[need(), medium]);
        assert_eq!(summary.high_count, 1);
        assert_eq!(summary.medium_count, 1);
        assert_eq!(summary.total_estimated_cost, 250.0);
        assert_eq!(summary.remaining_budget, None);
    }
}
