// ==========================================
// 装备全寿命周期与采购规划引擎 - 组合校验
// ==========================================
// 职责: 判断装备组合在当前库存与健康度下是否可用
// 输入: Combination + 装备集合 (只读)
// 输出: ValidationResult / UsabilityResult
// ==========================================

use crate::config::EngineConfig;
use crate::domain::combination::Combination;
use crate::domain::equipment::Equipment;
use crate::domain::report::{MissingItem, UsabilityResult, ValidationResult};
use crate::engine::degradation::DegradationModel;
use crate::engine::ledger::available_units;
use tracing::instrument;

// ==========================================
// CombinationValidator - 组合校验引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct CombinationValidator {
    degradation: DegradationModel,
}

impl CombinationValidator {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            degradation: DegradationModel::from_config(config),
        }
    }

    /// 可用性校验
    ///
    /// # 规则
    /// - 装备不存在: 记为缺口, available = 0
    /// - available = quantity - in_use - 维护占用, 不足请求数量即记为缺口
    /// - valid = 无缺口
    #[instrument(skip(self, combination, assets), fields(combination_id = %combination.id))]
    pub fn validate(&self, combination: &Combination, assets: &[Equipment]) -> ValidationResult {
        let missing: Vec<MissingItem> = combination
            .items
            .iter()
            .filter_map(|item| {
                let available = assets
                    .iter()
                    .find(|a| a.id == item.asset_id)
                    .map(|asset| available_units(asset, &self.degradation))
                    .unwrap_or(0);

                (available < item.quantity).then(|| MissingItem {
                    asset_id: item.asset_id.clone(),
                    requested: item.quantity,
                    available,
                })
            })
            .collect();

        if !missing.is_empty() {
            tracing::debug!(missing = missing.len(), "组合存在装备缺口");
        }

        ValidationResult {
            valid: missing.is_empty(),
            missing,
        }
    }

    /// 使用可行性检查（默认最低健康度为维护阈值）
    pub fn check_usability(
        &self,
        combination: &Combination,
        assets: &[Equipment],
    ) -> UsabilityResult {
        self.check_usability_with(combination, assets, self.degradation.threshold_fraction())
    }

    /// 使用可行性检查
    ///
    /// 先做可用性校验, 再按组合条目顺序检查健康度, 遇到第一个不达标的条目即返回
    pub fn check_usability_with(
        &self,
        combination: &Combination,
        assets: &[Equipment],
        min_health_fraction: f64,
    ) -> UsabilityResult {
        let availability = self.validate(combination, assets);
        if !availability.valid {
            let detail: Vec<String> = availability
                .missing
                .iter()
                .map(|m| format!("{} (需要 {}, 可用 {})", m.asset_id, m.requested, m.available))
                .collect();
            return UsabilityResult {
                valid: false,
                message: Some(format!("装备数量不足: {}", detail.join(", "))),
            };
        }

        for item in &combination.items {
            let Some(asset) = assets.iter().find(|a| a.id == item.asset_id) else {
                continue;
            };
            let health = asset.health_fraction();
            if health < min_health_fraction {
                return UsabilityResult {
                    valid: false,
                    message: Some(format!(
                        "{} 健康度 {:.1}% 低于要求的 {:.1}%",
                        asset.name,
                        health * 100.0,
                        min_health_fraction * 100.0
                    )),
                };
            }
        }

        UsabilityResult {
            valid: true,
            message: None,
        }
    }
}

impl Default for CombinationValidator {
    fn default() -> Self {
        Self::new()
    }
}
