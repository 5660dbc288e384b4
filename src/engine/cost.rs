// ==========================================
// 装备全寿命周期与采购规划引擎 - 成本模型
// ==========================================
// 职责: 单装备 / 组合 / 多期成本分解
// 输入: Equipment (只读) + 耗材单价查询 + 引擎配置
// 输出: CostBreakdown / CostProjection / CombinationTotals
// 红线: 多期推演只在副本上退化,不修改调用方的装备状态
// ==========================================

use crate::config::EngineConfig;
use crate::domain::combination::{Combination, CombinationTotals};
use crate::domain::consumable::Consumable;
use crate::domain::equipment::{Equipment, Usage};
use crate::domain::report::{CostBreakdown, CostProjection};
use crate::engine::degradation::DegradationModel;
use crate::error::{EngineError, EngineResult};
use chrono::Duration;
use std::collections::HashMap;
use tracing::instrument;

/// 运行成本基准比例（购置成本的 10%）
const OPERATIONAL_BASE_RATE: f64 = 0.1;

/// 每期天数（按月）
const DAYS_PER_PERIOD: i64 = 30;

/// 购置成本摊销期数
const ACQUISITION_SPREAD_PERIODS: f64 = 12.0;

// ==========================================
// 耗材单价查询 Trait
// ==========================================

/// 耗材单价查询
///
/// 返回 None 时成本模型使用 consumable_base_rate
pub trait UnitCostLookup {
    fn unit_cost(&self, consumable_id: &str) -> Option<f64>;
}

impl UnitCostLookup for HashMap<String, f64> {
    fn unit_cost(&self, consumable_id: &str) -> Option<f64> {
        self.get(consumable_id).copied()
    }
}

impl UnitCostLookup for [Consumable] {
    fn unit_cost(&self, consumable_id: &str) -> Option<f64> {
        self.iter()
            .find(|c| c.id == consumable_id)
            .map(|c| c.cost_per_unit)
    }
}

impl UnitCostLookup for Vec<Consumable> {
    fn unit_cost(&self, consumable_id: &str) -> Option<f64> {
        self.as_slice().unit_cost(consumable_id)
    }
}

/// 不提供任何单价（全部按基准单价计）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUnitCosts;

impl UnitCostLookup for NoUnitCosts {
    fn unit_cost(&self, _consumable_id: &str) -> Option<f64> {
        None
    }
}

// ==========================================
// CostModel - 成本模型
// ==========================================
#[derive(Debug, Clone)]
pub struct CostModel {
    config: EngineConfig,
    degradation: DegradationModel,
}

impl CostModel {
    /// 构造函数（默认配置）
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
    // 单装备成本
    // ==========================================

    /// 单装备月度成本分解
    ///
    /// # 规则
    /// - acquisition = acquisition_cost
    /// - operational = acquisition_cost * 10% * 健康倍率 (1 / 1.2 / 1.5 / 2)
    /// - maintenance = 退化模型的月维护成本
    /// - personnel = personnel_required * personnel_monthly_rate
    /// - consumables = Σ units_per_use * 单价（无法解析时用基准单价）
    pub fn asset_costs<L>(&self, asset: &Equipment, unit_costs: &L) -> CostBreakdown
    where
        L: UnitCostLookup + ?Sized,
    {
        let acquisition = asset.acquisition_cost;
        let operational = self.operational_cost(asset);
        let maintenance = self
            .degradation
            .monthly_maintenance(&asset.degradation, asset.acquisition_cost);
        let personnel = asset.personnel_required as f64 * self.config.personnel_monthly_rate;
        let consumables = self.consumable_cost(asset, unit_costs);

        CostBreakdown::new(acquisition, operational, maintenance, personnel, consumables)
    }

    fn operational_cost(&self, asset: &Equipment) -> f64 {
        let health = self.degradation.health_status(&asset.degradation);
        asset.acquisition_cost * OPERATIONAL_BASE_RATE * health.status.cost_multiplier()
    }

    fn consumable_cost<L>(&self, asset: &Equipment, unit_costs: &L) -> f64
    where
        L: UnitCostLookup + ?Sized,
    {
        asset
            .consumable_links
            .iter()
            .map(|link| {
                let unit_cost = unit_costs.unit_cost(&link.consumable_id).unwrap_or_else(|| {
                    tracing::debug!(
                        asset_id = %asset.id,
                        consumable_id = %link.consumable_id,
                        base_rate = self.config.consumable_base_rate,
                        "耗材单价未解析，使用基准单价"
                    );
                    self.config.consumable_base_rate
                });
                link.units_per_use * unit_cost
            })
            .sum()
    }

    // ==========================================
    // 组合成本
    // ==========================================

    /// 组合成本 = Σ asset_costs(asset) * quantity
    ///
    /// # 错误
    /// - 任一 asset_id 无法解析 → Reference
    ///
    /// # 说明
    /// 不检查可用数量, 可用性由 CombinationValidator 负责
    pub fn combination_costs<L>(
        &self,
        combination: &Combination,
        assets: &[Equipment],
        unit_costs: &L,
    ) -> EngineResult<CostBreakdown>
    where
        L: UnitCostLookup + ?Sized,
    {
        let mut total = CostBreakdown::default();

        for item in &combination.items {
            let asset = assets
                .iter()
                .find(|a| a.id == item.asset_id)
                .ok_or_else(|| {
                    EngineError::reference(
                        &format!("combination {}", combination.id),
                        &item.asset_id,
                    )
                })?;
            total += self.asset_costs(asset, unit_costs) * item.quantity as f64;
        }

        Ok(total)
    }

    /// 计算组合汇总快照（成本/人员/耗材）
    pub fn combination_totals<L>(
        &self,
        combination: &Combination,
        assets: &[Equipment],
        unit_costs: &L,
    ) -> EngineResult<CombinationTotals>
    where
        L: UnitCostLookup + ?Sized,
    {
        let cost = self.combination_costs(combination, assets, unit_costs)?;

        let mut totals = CombinationTotals {
            total_cost: cost.total,
            ..CombinationTotals::default()
        };

        for item in &combination.items {
            // combination_costs 已保证全部可解析
            let Some(asset) = assets.iter().find(|a| a.id == item.asset_id) else {
                continue;
            };
            totals.total_personnel += asset.personnel_required * item.quantity;
            for link in &asset.consumable_links {
                *totals
                    .consumables
                    .entry(link.consumable_id.clone())
                    .or_insert(0.0) += link.units_per_use * item.quantity as f64;
            }
        }

        Ok(totals)
    }

    // ==========================================
    // 多期成本推演
    // ==========================================

    /// 按月推演成本
    ///
    /// # 规则
    /// - 第 i 期 (从 0 开始) 在装备退化状态的副本上模拟 30*i 天的使用
    ///   (cycles/hours 轴按 daily_usage_rate 折算)
    /// - acquisition 每期固定摊销 acquisition_cost / 12, 与期数无关
    /// - aggregate 为各期逐项之和
    #[instrument(skip(self, assets, unit_costs), fields(asset_count = assets.len()))]
    pub fn project_costs<L>(
        &self,
        assets: &[Equipment],
        periods: usize,
        unit_costs: &L,
    ) -> CostProjection
    where
        L: UnitCostLookup + ?Sized,
    {
        let mut per_period = Vec::with_capacity(periods);

        for i in 0..periods {
            let elapsed_days = DAYS_PER_PERIOD * i as i64;
            let usage = Usage {
                cycles: Some(elapsed_days as f64 * self.config.daily_usage_rate),
                hours: Some(elapsed_days as f64 * self.config.daily_usage_rate),
                days: Some(elapsed_days as f64),
            };

            let period_cost: CostBreakdown = assets
                .iter()
                .map(|asset| {
                    let mut simulated = asset.clone();
                    let at = asset.degradation.last_updated + Duration::days(elapsed_days);
                    simulated.degradation =
                        self.degradation.apply_usage(&asset.degradation, &usage, at);

                    let monthly = self.asset_costs(&simulated, unit_costs);
                    CostBreakdown::new(
                        asset.acquisition_cost / ACQUISITION_SPREAD_PERIODS,
                        monthly.operational,
                        monthly.maintenance,
                        monthly.personnel,
                        monthly.consumables,
                    )
                })
                .sum();

            per_period.push(period_cost);
        }

        let aggregate = per_period.iter().sum();
        tracing::debug!(periods, "成本推演完成");

        CostProjection {
            per_period,
            aggregate,
        }
    }

    /// 按窗口聚合月度成本（window=3 即季度）
    ///
    /// 末尾不足一个窗口的部分单独成组; window=0 返回空
    pub fn aggregate_windows(per_period: &[CostBreakdown], window: usize) -> Vec<CostBreakdown> {
        if window == 0 {
            return Vec::new();
        }
        per_period
            .chunks(window)
            .map(|chunk| chunk.iter().sum())
            .collect()
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for CostModel {
    fn default() -> Self {
        Self::new()
    }
}
