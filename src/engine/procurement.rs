// ==========================================
// 装备全寿命周期与采购规划引擎 - 采购规划
// ==========================================
// 职责: 由库存状态与退化预测生成采购需求,可按预算裁剪
// 输入: 装备/耗材集合 (只读) + 日期 + 预算
// 输出: 按优先级排序的 ProcurementNeed 列表
// 红线: 同优先级保持输入顺序（稳定排序）,输出可复现
// ==========================================

use crate::config::EngineConfig;
use crate::domain::consumable::Consumable;
use crate::domain::equipment::Equipment;
use crate::domain::procurement::{PlanSummary, ProcurementNeed};
use crate::domain::types::{ItemType, Priority};
use crate::engine::degradation::{DegradationModel, TimeToThreshold};
use crate::engine::ledger::{available_units, LOW_STOCK_ASSET_THRESHOLD};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// BudgetedPlan - 预算内采购计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetedPlan {
    pub needs: Vec<ProcurementNeed>,
    pub summary: PlanSummary,
}

// ==========================================
// ProcurementPlanner - 采购规划引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ProcurementPlanner {
    config: EngineConfig,
    degradation: DegradationModel,
}

impl ProcurementPlanner {
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    pub fn from_config(config: EngineConfig) -> Self {
        let degradation = DegradationModel::from_config(&config);
        Self {
            config,
            degradation,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成采购需求
    ///
    /// # 规则
    /// 装备: 可用数 < 2 或 距更换 < 30 天
    /// - quantity = max(2 - 可用数, 0) + (距更换 < 30 天 ? 1 : 0)
    /// - priority = 可用数为 0 ? high : medium
    ///
    /// 耗材: stock_level ≤ reorder_point
    /// - quantity = 2 * reorder_point - stock_level
    /// - priority = stock_level ≤ minimum_stock ? high : medium
    ///
    /// 结果按优先级稳定排序
    #[instrument(
        skip(self, assets, consumables),
        fields(assets = assets.len(), consumables = consumables.len())
    )]
    pub fn generate_needs(
        &self,
        assets: &[Equipment],
        consumables: &[Consumable],
        today: NaiveDate,
    ) -> Vec<ProcurementNeed> {
        let mut needs: Vec<ProcurementNeed> = assets
            .iter()
            .filter_map(|asset| self.asset_need(asset, today))
            .chain(
                consumables
                    .iter()
                    .filter_map(|consumable| self.consumable_need(consumable, today)),
            )
            .collect();

        // Vec::sort_by_key 为稳定排序
        needs.sort_by_key(|need| need.priority);

        tracing::info!(count = needs.len(), "采购需求已生成");
        needs
    }

    /// 预算内采购计划（贪心,非全局最优）
    ///
    /// # 规则
    /// 1) 先处理 high 优先级的装备需求（输入顺序）
    /// 2) 再处理耗材需求, 按 stock_level / minimum_stock 升序（最缺的在前）
    /// 3) 估算成本 ≤ 剩余预算才接受, 否则整体跳过（不拆分）
    #[instrument(skip(self, assets, consumables))]
    pub fn generate_budgeted_plan(
        &self,
        assets: &[Equipment],
        consumables: &[Consumable],
        budget: f64,
        today: NaiveDate,
    ) -> BudgetedPlan {
        let asset_needs = assets
            .iter()
            .filter_map(|asset| self.asset_need(asset, today))
            .filter(|need| need.priority == Priority::High);

        let mut consumable_needs: Vec<(f64, ProcurementNeed)> = consumables
            .iter()
            .filter_map(|consumable| {
                self.consumable_need(consumable, today)
                    .map(|need| (depletion_ratio(consumable), need))
            })
            .collect();
        consumable_needs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut remaining = budget;
        let mut accepted = Vec::new();
        let mut skipped = 0;

        for need in asset_needs.chain(consumable_needs.into_iter().map(|(_, need)| need)) {
            if need.estimated_cost <= remaining {
                remaining -= need.estimated_cost;
                accepted.push(need);
            } else {
                skipped += 1;
                tracing::debug!(
                    item_id = %need.item_id,
                    estimated_cost = need.estimated_cost,
                    remaining,
                    "预算不足，跳过采购需求"
                );
            }
        }

        let mut summary = PlanSummary::from_needs(&accepted);
        summary.skipped_count = skipped;
        summary.remaining_budget = Some(remaining);

        tracing::info!(
            accepted = accepted.len(),
            skipped,
            remaining,
            "预算采购计划已生成"
        );

        BudgetedPlan {
            needs: accepted,
            summary,
        }
    }

    // ==========================================
    // 单项需求
    // ==========================================

    fn asset_need(&self, asset: &Equipment, today: NaiveDate) -> Option<ProcurementNeed> {
        let available = available_units(asset, &self.degradation);
        let forecast = self.degradation.predict_time_to_threshold(
            &asset.degradation,
            self.config.daily_usage_rate,
            None,
            today,
        );
        let replacement_soon = forecast.is_within(self.config.replacement_horizon_days);

        if available >= LOW_STOCK_ASSET_THRESHOLD && !replacement_soon {
            return None;
        }

        let shortfall = LOW_STOCK_ASSET_THRESHOLD.saturating_sub(available);
        let quantity = shortfall + u32::from(replacement_soon);
        let priority = if available == 0 {
            Priority::High
        } else {
            Priority::Medium
        };

        let mut reasons = Vec::new();
        if shortfall > 0 {
            reasons.push(format!("可用数量 {} 低于 {}", available, LOW_STOCK_ASSET_THRESHOLD));
        }
        if let TimeToThreshold::Finite {
            days_remaining,
            estimated_date,
        } = forecast
        {
            if replacement_soon {
                reasons.push(format!(
                    "预计 {} 天后 ({}) 到达更换阈值",
                    days_remaining, estimated_date
                ));
            }
        }

        Some(ProcurementNeed::new(
            ItemType::Asset,
            asset.id.clone(),
            quantity,
            quantity as f64 * asset.acquisition_cost,
            priority,
            reasons.join("; "),
            self.order_by(&forecast, today),
        ))
    }

    fn consumable_need(
        &self,
        consumable: &Consumable,
        today: NaiveDate,
    ) -> Option<ProcurementNeed> {
        if !consumable.at_or_below_reorder_point() {
            return None;
        }

        let quantity = consumable
            .reorder_point
            .saturating_mul(2)
            .saturating_sub(consumable.stock_level);
        if quantity == 0 {
            return None;
        }

        let priority = if consumable.at_or_below_minimum() {
            Priority::High
        } else {
            Priority::Medium
        };

        Some(ProcurementNeed::new(
            ItemType::Consumable,
            consumable.id.clone(),
            quantity,
            quantity as f64 * consumable.cost_per_unit,
            priority,
            format!(
                "库存 {}{} 不高于再订货点 {}",
                consumable.stock_level, consumable.unit, consumable.reorder_point
            ),
            today,
        ))
    }

    /// 最晚下单日期 = 预计更换日 - 采购提前期, 不早于今天
    fn order_by(&self, forecast: &TimeToThreshold, today: NaiveDate) -> NaiveDate {
        match forecast.estimated_date() {
            Some(date) => Duration::try_days(self.config.procurement_lead_time_days)
                .and_then(|lead| date.checked_sub_signed(lead))
                .map_or(today, |latest| latest.max(today)),
            None => today,
        }
    }
}

impl Default for ProcurementPlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// stock_level / minimum_stock; minimum 为 0 时库存为 0 视为最缺, 否则排在最后
fn depletion_ratio(consumable: &Consumable) -> f64 {
    if consumable.minimum_stock == 0 {
        if consumable.stock_level == 0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        consumable.stock_level as f64 / consumable.minimum_stock as f64
    }
}
