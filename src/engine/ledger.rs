// ==========================================
// 装备全寿命周期与采购规划引擎 - 库存台账
// ==========================================
// 红线: 0 ≤ in_use ≤ quantity; stock_level ≥ 0
// 红线: 交易失败时状态不变（先校验,后整体写入）
// ==========================================
// 职责: 应用装备/耗材交易、维护交易日志、生成库存报告
// 输入: 交易 + 当前实体状态
// 输出: 新实体状态 / InventoryReport
// ==========================================

use crate::config::EngineConfig;
use crate::domain::consumable::Consumable;
use crate::domain::equipment::{Equipment, Usage};
use crate::domain::report::{
    AssetStatusLine, ConsumableStatusLine, InventoryAlert, InventoryReport,
};
use crate::domain::transaction::{
    AssetTransaction, AssetTransactionKind, ConsumableTransaction, ConsumableTransactionKind,
    QuantitySnapshot, Transaction, TransactionRecord,
};
use crate::domain::types::{AlertSeverity, AlertType, HealthStatus, ItemType};
use crate::engine::degradation::DegradationModel;
use crate::engine::events::{
    publish_or_warn, InventoryEvent, InventoryEventPublisher, NoOpEventPublisher,
};
use crate::engine::validation::RecordValidator;
use crate::error::{EngineError, EngineResult};
use std::sync::Arc;
use tracing::instrument;

/// 装备可用数低于该值时告警/生成需求
pub const LOW_STOCK_ASSET_THRESHOLD: u32 = 2;

/// 可部署数量 = quantity - in_use - (需要维护 ? 1 : 0), 最小为 0
pub fn available_units(asset: &Equipment, degradation: &DegradationModel) -> u32 {
    let maintenance_hold =
        u32::from(degradation.health_status(&asset.degradation).needs_maintenance);
    asset
        .quantity
        .saturating_sub(asset.in_use)
        .saturating_sub(maintenance_hold)
}

// ==========================================
// TransactionLog - 交易日志
// ==========================================
// 由调用方持有,只追加
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// 指定实体的全部交易（按应用顺序）
    pub fn for_entity<'a>(
        &'a self,
        entity_id: &'a str,
    ) -> impl Iterator<Item = &'a TransactionRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.transaction.entity_id() == entity_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<TransactionRecord> {
        self.records
    }
}

// ==========================================
// InventoryLedger - 库存台账引擎
// ==========================================
pub struct InventoryLedger {
    config: EngineConfig,
    degradation: DegradationModel,
    validator: RecordValidator,
    publisher: Arc<dyn InventoryEventPublisher>,
}

impl InventoryLedger {
    /// 构造函数（默认配置, 不发布事件）
    pub fn new() -> Self {
        Self::with_publisher(EngineConfig::default(), Arc::new(NoOpEventPublisher))
    }

    pub fn with_publisher(
        config: EngineConfig,
        publisher: Arc<dyn InventoryEventPublisher>,
    ) -> Self {
        let degradation = DegradationModel::from_config(&config);
        Self {
            config,
            degradation,
            validator: RecordValidator::new(),
            publisher,
        }
    }

    pub fn degradation(&self) -> &DegradationModel {
        &self.degradation
    }

    // ==========================================
    // 装备交易
    // ==========================================

    /// 应用装备交易
    ///
    /// # 规则
    /// - acquisition: quantity += q
    /// - deployment: 要求可用数 ≥ q (可用数扣除维护占用), 否则 InsufficientStock
    /// - return: 要求 in_use ≥ q, 否则 InvalidQuantity; 成功后计一次使用退化
    /// - disposal: 只能报废未部署的装备 (quantity - in_use ≥ q), 否则 InvalidQuantity
    ///
    /// # 返回
    /// 新的装备状态（传入的 asset 不变）
    pub fn apply_asset_transaction(
        &self,
        tx: &AssetTransaction,
        asset: &Equipment,
    ) -> EngineResult<Equipment> {
        self.validator
            .ensure_transaction(&Transaction::Asset(tx.clone()))?;
        if tx.asset_id != asset.id {
            return Err(EngineError::reference(
                &format!("transaction {}", tx.id),
                &tx.asset_id,
            ));
        }

        let mut next = asset.clone();

        match tx.kind {
            AssetTransactionKind::Acquisition => {
                next.quantity = asset.quantity.checked_add(tx.quantity).ok_or_else(|| {
                    EngineError::InvalidQuantity {
                        entity_id: asset.id.clone(),
                        requested: tx.quantity,
                        limit: u32::MAX - asset.quantity,
                    }
                })?;
            }
            AssetTransactionKind::Deployment => {
                let available = available_units(asset, &self.degradation);
                if available < tx.quantity {
                    return Err(EngineError::InsufficientStock {
                        entity_id: asset.id.clone(),
                        requested: tx.quantity,
                        available,
                    });
                }
                next.in_use = asset.in_use + tx.quantity;
            }
            AssetTransactionKind::Return => {
                if asset.in_use < tx.quantity {
                    return Err(EngineError::InvalidQuantity {
                        entity_id: asset.id.clone(),
                        requested: tx.quantity,
                        limit: asset.in_use,
                    });
                }
                next.in_use = asset.in_use - tx.quantity;
                next.degradation = self.degradation.apply_usage(
                    &asset.degradation,
                    &Usage::one_unit(asset.degradation.kind),
                    tx.timestamp,
                );

                let health = self.degradation.health_status(&next.degradation);
                if health.needs_maintenance {
                    publish_or_warn(
                        self.publisher.as_ref(),
                        InventoryEvent::MaintenanceRequired {
                            asset_id: next.id.clone(),
                            health_fraction: next.health_fraction(),
                            at: tx.timestamp,
                        },
                    );
                }
            }
            AssetTransactionKind::Disposal => {
                let idle = asset.quantity.saturating_sub(asset.in_use);
                if idle < tx.quantity {
                    return Err(EngineError::InvalidQuantity {
                        entity_id: asset.id.clone(),
                        requested: tx.quantity,
                        limit: idle,
                    });
                }
                next.quantity = asset.quantity - tx.quantity;
            }
        }

        tracing::debug!(
            asset_id = %asset.id,
            kind = %tx.kind,
            quantity = tx.quantity,
            in_use = next.in_use,
            total = next.quantity,
            "装备交易已应用"
        );
        Ok(next)
    }

    // ==========================================
    // 耗材交易
    // ==========================================

    /// 应用耗材交易
    ///
    /// # 规则
    /// - purchase: stock_level += q
    /// - use / disposal: 要求 stock_level ≥ q, 否则 InsufficientStock
    /// - 出库后 stock_level ≤ reorder_point 时发布再订货事件（不生成采购需求）
    pub fn apply_consumable_transaction(
        &self,
        tx: &ConsumableTransaction,
        consumable: &Consumable,
    ) -> EngineResult<Consumable> {
        self.validator
            .ensure_transaction(&Transaction::Consumable(tx.clone()))?;
        if tx.consumable_id != consumable.id {
            return Err(EngineError::reference(
                &format!("transaction {}", tx.id),
                &tx.consumable_id,
            ));
        }

        let mut next = consumable.clone();

        match tx.kind {
            ConsumableTransactionKind::Purchase => {
                next.stock_level = consumable.stock_level.checked_add(tx.quantity).ok_or_else(
                    || EngineError::InvalidQuantity {
                        entity_id: consumable.id.clone(),
                        requested: tx.quantity,
                        limit: u32::MAX - consumable.stock_level,
                    },
                )?;
            }
            ConsumableTransactionKind::Use | ConsumableTransactionKind::Disposal => {
                if consumable.stock_level < tx.quantity {
                    return Err(EngineError::InsufficientStock {
                        entity_id: consumable.id.clone(),
                        requested: tx.quantity,
                        available: consumable.stock_level,
                    });
                }
                next.stock_level = consumable.stock_level - tx.quantity;

                if next.at_or_below_reorder_point() {
                    tracing::info!(
                        consumable_id = %next.id,
                        stock_level = next.stock_level,
                        reorder_point = next.reorder_point,
                        "耗材库存已到再订货点"
                    );
                    publish_or_warn(
                        self.publisher.as_ref(),
                        InventoryEvent::ReorderPointReached {
                            consumable_id: next.id.clone(),
                            stock_level: next.stock_level,
                            reorder_point: next.reorder_point,
                            at: tx.timestamp,
                        },
                    );
                }
            }
        }

        Ok(next)
    }

    // ==========================================
    // 集合级交易应用
    // ==========================================

    /// 在调用方集合上应用一笔交易并记入日志
    ///
    /// # 错误
    /// - 实体不存在 → NotFound
    /// - 不变量违反 → 原集合与日志均不变
    #[instrument(
        skip(self, assets, consumables, log),
        fields(tx_id = %tx.id(), kind = %tx.kind_str())
    )]
    pub fn apply_transaction(
        &self,
        tx: &Transaction,
        assets: &mut [Equipment],
        consumables: &mut [Consumable],
        log: &mut TransactionLog,
    ) -> EngineResult<TransactionRecord> {
        let record = match tx {
            Transaction::Asset(asset_tx) => {
                let slot = assets
                    .iter_mut()
                    .find(|a| a.id == asset_tx.asset_id)
                    .ok_or_else(|| EngineError::not_found("Equipment", &asset_tx.asset_id))?;
                let next = self.apply_asset_transaction(asset_tx, slot)?;
                let record = asset_record(tx, slot, &next);
                *slot = next;
                record
            }
            Transaction::Consumable(consumable_tx) => {
                let slot = consumables
                    .iter_mut()
                    .find(|c| c.id == consumable_tx.consumable_id)
                    .ok_or_else(|| {
                        EngineError::not_found("Consumable", &consumable_tx.consumable_id)
                    })?;
                let next = self.apply_consumable_transaction(consumable_tx, slot)?;
                let record = consumable_record(tx, slot, &next);
                *slot = next;
                record
            }
        };

        log.record(record.clone());
        Ok(record)
    }

    // ==========================================
    // 库存报告
    // ==========================================

    /// 生成库存报告
    ///
    /// # 规则
    /// - 装备: available / deployed / 维护标记 / 健康度
    /// - 耗材月用量 = Σ(units_per_use * 周使用次数 * 引用装备的 in_use)
    /// - low_stock: 装备可用数 < 2, 耗材 stock_level ≤ minimum_stock
    /// - maintenance_needed: 健康等级 poor / critical
    /// - severity: 达到最差值 (可用 0 / 库存 0 / critical) 为 high, 否则 medium
    #[instrument(skip_all, fields(assets = assets.len(), consumables = consumables.len()))]
    pub fn report(&self, assets: &[Equipment], consumables: &[Consumable]) -> InventoryReport {
        let mut report = InventoryReport::default();

        for asset in assets {
            let health = self.degradation.health_status(&asset.degradation);
            let available = available_units(asset, &self.degradation);

            report.assets.push(AssetStatusLine {
                asset_id: asset.id.clone(),
                available,
                deployed: asset.in_use,
                maintenance_flag: health.needs_maintenance,
                health_fraction: asset.health_fraction(),
                health_status: health.status,
            });

            if available < LOW_STOCK_ASSET_THRESHOLD {
                report.alerts.push(InventoryAlert {
                    alert_type: AlertType::LowStock,
                    item_type: ItemType::Asset,
                    item_id: asset.id.clone(),
                    severity: if available == 0 {
                        AlertSeverity::High
                    } else {
                        AlertSeverity::Medium
                    },
                    message: format!("{} 可用数量仅剩 {}", asset.name, available),
                });
            }

            if health.needs_maintenance {
                report.alerts.push(InventoryAlert {
                    alert_type: AlertType::MaintenanceNeeded,
                    item_type: ItemType::Asset,
                    item_id: asset.id.clone(),
                    severity: if health.status == HealthStatus::Critical {
                        AlertSeverity::High
                    } else {
                        AlertSeverity::Medium
                    },
                    message: format!(
                        "{} 健康度 {:.1}% ({}), 需要维护",
                        asset.name,
                        asset.health_fraction() * 100.0,
                        health.status
                    ),
                });
            }
        }

        for consumable in consumables {
            let projected_monthly_usage = assets
                .iter()
                .flat_map(move |asset| {
                    asset
                        .consumable_links
                        .iter()
                        .filter(move |link| link.consumable_id == consumable.id)
                        .map(move |link| {
                            link.units_per_use
                                * self.config.assumed_weekly_cycles
                                * asset.in_use as f64
                        })
                })
                .sum();

            report.consumables.push(ConsumableStatusLine {
                consumable_id: consumable.id.clone(),
                current_stock: consumable.stock_level,
                projected_monthly_usage,
            });

            if consumable.at_or_below_minimum() {
                report.alerts.push(InventoryAlert {
                    alert_type: AlertType::LowStock,
                    item_type: ItemType::Consumable,
                    item_id: consumable.id.clone(),
                    severity: if consumable.stock_level == 0 {
                        AlertSeverity::High
                    } else {
                        AlertSeverity::Medium
                    },
                    message: format!(
                        "{} 库存 {}{} 不高于安全库存 {}",
                        consumable.name,
                        consumable.stock_level,
                        consumable.unit,
                        consumable.minimum_stock
                    ),
                });
            }
        }

        tracing::debug!(alerts = report.alerts.len(), "库存报告已生成");
        report
    }
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn asset_record(
    tx: &Transaction,
    before: &Equipment,
    after: &Equipment,
) -> TransactionRecord {
    TransactionRecord {
        transaction: tx.clone(),
        applied_at: tx.timestamp(),
        before: QuantitySnapshot::Asset {
            quantity: before.quantity,
            in_use: before.in_use,
        },
        after: QuantitySnapshot::Asset {
            quantity: after.quantity,
            in_use: after.in_use,
        },
    }
}

pub(crate) fn consumable_record(
    tx: &Transaction,
    before: &Consumable,
    after: &Consumable,
) -> TransactionRecord {
    TransactionRecord {
        transaction: tx.clone(),
        applied_at: tx.timestamp(),
        before: QuantitySnapshot::Consumable {
            stock_level: before.stock_level,
        },
        after: QuantitySnapshot::Consumable {
            stock_level: after.stock_level,
        },
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::equipment::{ConsumableLink, DegradationState};
    use crate::domain::types::{DegradationType, EquipmentCategory};
    use crate::engine::events::RecordingEventPublisher;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
    }

    fn create_asset(quantity: u32, in_use: u32, current: f64) -> Equipment {
        let mut degradation =
            DegradationState::new(DegradationType::Cycles, 100.0, 1.0, 800.0, ts());
        degradation.current_value = current;
        Equipment {
            id: "UAV-01".to_string(),
            name: "四旋翼".to_string(),
            category: EquipmentCategory::Platform,
            manufacturer: None,
            model: None,
            description: None,
            acquisition_cost: 1000.0,
            quantity,
            in_use,
            personnel_required: 2,
            consumable_links: Vec::new(),
            degradation,
        }
    }

    fn create_consumable(stock: u32, minimum: u32, reorder: u32) -> Consumable {
        Consumable {
            id: "BAT".to_string(),
            name: "电池".to_string(),
            unit: "块".to_string(),
            cost_per_unit: 2.0,
            stock_level: stock,
            minimum_stock: minimum,
            reorder_point: reorder,
        }
    }

    fn asset_tx(kind: AssetTransactionKind, quantity: u32) -> AssetTransaction {
        AssetTransaction::new(kind, "UAV-01", quantity, ts())
    }

    fn consumable_tx(kind: ConsumableTransactionKind, quantity: u32) -> ConsumableTransaction {
        ConsumableTransaction::new(kind, "BAT", quantity, ts())
    }

    #[test]
    fn test_available_units_subtracts_maintenance_hold() {
        let model = DegradationModel::new();
        assert_eq!(available_units(&create_asset(5, 1, 100.0), &model), 4);
        assert_eq!(available_units(&create_asset(5, 1, 20.0), &model), 3);
        assert_eq!(available_units(&create_asset(2, 2, 20.0), &model), 0);
    }

    #[test]
    fn test_acquisition_increases_quantity() {
        let ledger = InventoryLedger::new();
        let next = ledger
            .apply_asset_transaction(
                &asset_tx(AssetTransactionKind::Acquisition, 3),
                &create_asset(5, 0, 100.0),
            )
            .unwrap();
        assert_eq!(next.quantity, 8);
    }

    #[test]
    fn test_deployment_over_available_fails() {
        let ledger = InventoryLedger::new();
        let asset = create_asset(5, 0, 100.0);

        let err = ledger
            .apply_asset_transaction(&asset_tx(AssetTransactionKind::Deployment, 6), &asset)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientStock {
                entity_id: "UAV-01".to_string(),
                requested: 6,
                available: 5,
            }
        );
        assert_eq!(asset.in_use, 0);
    }

    #[test]
    fn test_deployment_blocked_by_maintenance_hold() {
        let ledger = InventoryLedger::new();
        let asset = create_asset(3, 0, 20.0);

        assert!(ledger
            .apply_asset_transaction(&asset_tx(AssetTransactionKind::Deployment, 3), &asset)
            .is_err());
        let next = ledger
            .apply_asset_transaction(&asset_tx(AssetTransactionKind::Deployment, 2), &asset)
            .unwrap();
        assert_eq!(next.in_use, 2);
    }

    #[test]
    fn test_deploy_then_return_restores_in_use() {
        let ledger = InventoryLedger::new();
        let asset = create_asset(5, 1, 100.0);

        let deployed = ledger
            .apply_asset_transaction(&asset_tx(AssetTransactionKind::Deployment, 3), &asset)
            .unwrap();
        assert_eq!(deployed.in_use, 4);

        let returned = ledger
            .apply_asset_transaction(&asset_tx(AssetTransactionKind::Return, 3), &deployed)
            .unwrap();
        assert_eq!(returned.in_use, 1);
        // 归还计一次使用
        assert_eq!(returned.degradation.current_value, 99.0);
        assert_eq!(returned.degradation.last_updated, ts());
    }

    #[test]
    fn test_return_more_than_in_use_fails() {
        let ledger = InventoryLedger::new();
        let err = ledger
            .apply_asset_transaction(
                &asset_tx(AssetTransactionKind::Return, 2),
                &create_asset(5, 1, 100.0),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity { limit: 1, .. }));
    }

    #[test]
    fn test_return_into_poor_health_publishes_maintenance_event() {
        let publisher = Arc::new(RecordingEventPublisher::new());
        let ledger = InventoryLedger::with_publisher(EngineConfig::default(), publisher.clone());

        ledger
            .apply_asset_transaction(
                &asset_tx(AssetTransactionKind::Return, 1),
                &create_asset(5, 1, 50.5),
            )
            .unwrap();

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_str(), "MaintenanceRequired");
    }

    #[test]
    fn test_disposal_only_of_idle_units() {
        let ledger = InventoryLedger::new();
        let asset = create_asset(5, 3, 100.0);

        let err = ledger
            .apply_asset_transaction(&asset_tx(AssetTransactionKind::Disposal, 3), &asset)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidQuantity { limit: 2, .. }));

        let next = ledger
            .apply_asset_transaction(&asset_tx(AssetTransactionKind::Disposal, 2), &asset)
            .unwrap();
        assert_eq!(next.quantity, 3);
        assert!(next.in_use <= next.quantity);
    }

    #[test]
    fn test_zero_quantity_transaction_rejected() {
        let ledger = InventoryLedger::new();
        let err = ledger
            .apply_asset_transaction(
                &asset_tx(AssetTransactionKind::Acquisition, 0),
                &create_asset(5, 0, 100.0),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_mismatched_asset_id_rejected() {
        let ledger = InventoryLedger::new();
        let tx = AssetTransaction::new(AssetTransactionKind::Acquisition, "OTHER", 1, ts());
        let err = ledger
            .apply_asset_transaction(&tx, &create_asset(5, 0, 100.0))
            .unwrap_err();
        assert!(matches!(err, EngineError::Reference { .. }));
    }

    #[test]
    fn test_consumable_use_and_reorder_signal() {
        let publisher = Arc::new(RecordingEventPublisher::new());
        let ledger = InventoryLedger::with_publisher(EngineConfig::default(), publisher.clone());
        let consumable = create_consumable(25, 10, 20);

        let next = ledger
            .apply_consumable_transaction(
                &consumable_tx(ConsumableTransactionKind::Use, 3),
                &consumable,
            )
            .unwrap();
        assert_eq!(next.stock_level, 22);
        assert!(publisher.events().is_empty());

        let next = ledger
            .apply_consumable_transaction(
                &consumable_tx(ConsumableTransactionKind::Disposal, 2),
                &next,
            )
            .unwrap();
        assert_eq!(next.stock_level, 20);
        assert_eq!(publisher.events().len(), 1);
    }

    #[test]
    fn test_consumable_insufficient_stock() {
        let ledger = InventoryLedger::new();
        let consumable = create_consumable(5, 10, 20);
        let err = ledger
            .apply_consumable_transaction(
                &consumable_tx(ConsumableTransactionKind::Use, 6),
                &consumable,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InsufficientStock { available: 5, .. }));
    }

    #[test]
    fn test_purchase_does_not_signal() {
        let publisher = Arc::new(RecordingEventPublisher::new());
        let ledger = InventoryLedger::with_publisher(EngineConfig::default(), publisher.clone());
        let next = ledger
            .apply_consumable_transaction(
                &consumable_tx(ConsumableTransactionKind::Purchase, 1),
                &create_consumable(0, 10, 20),
            )
            .unwrap();
        assert_eq!(next.stock_level, 1);
        assert!(publisher.events().is_empty());
    }

    #[test]
    fn test_apply_transaction_updates_collection_and_log() {
        let ledger = InventoryLedger::new();
        let mut assets = vec![create_asset(5, 0, 100.0)];
        let mut consumables = vec![create_consumable(30, 10, 20)];
        let mut log = TransactionLog::new();

        let tx: Transaction = asset_tx(AssetTransactionKind::Deployment, 2).into();
        let record = ledger
            .apply_transaction(&tx, &mut assets, &mut consumables, &mut log)
            .unwrap();
        assert_eq!(assets[0].in_use, 2);
        assert_eq!(record.before, QuantitySnapshot::Asset { quantity: 5, in_use: 0 });
        assert_eq!(record.after, QuantitySnapshot::Asset { quantity: 5, in_use: 2 });

        // 失败交易: 集合与日志不变
        let bad: Transaction = asset_tx(AssetTransactionKind::Deployment, 10).into();
        assert!(ledger
            .apply_transaction(&bad, &mut assets, &mut consumables, &mut log)
            .is_err());
        assert_eq!(assets[0].in_use, 2);
        assert_eq!(log.len(), 1);

        let missing: Transaction =
            ConsumableTransaction::new(ConsumableTransactionKind::Use, "NOPE", 1, ts()).into();
        let err = ledger
            .apply_transaction(&missing, &mut assets, &mut consumables, &mut log)
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
        assert_eq!(log.for_entity("UAV-01").count(), 1);
    }

    #[test]
    fn test_report_lines_and_alerts() {
        let ledger = InventoryLedger::new();
        let mut healthy = create_asset(5, 2, 100.0);
        healthy.consumable_links = vec![ConsumableLink {
            consumable_id: "BAT".to_string(),
            units_per_use: 1.5,
        }];
        let mut critical = create_asset(2, 2, 10.0);
        critical.id = "CAM-01".to_string();

        let report = ledger.report(
            &[healthy, critical],
            &[create_consumable(0, 10, 20)],
        );

        assert_eq!(report.assets.len(), 2);
        assert_eq!(report.assets[0].available, 3);
        assert_eq!(report.assets[0].deployed, 2);
        assert!(!report.assets[0].maintenance_flag);
        assert_eq!(report.assets[1].available, 0);
        assert!(report.assets[1].maintenance_flag);

        // 1.5 * 4 * 2
        assert_eq!(report.consumables[0].projected_monthly_usage, 12.0);

        let critical_alerts: Vec<_> = report
            .alerts
            .iter()
            .filter(|a| a.item_id == "CAM-01")
            .collect();
        assert_eq!(critical_alerts.len(), 2);
        assert!(critical_alerts.iter().all(|a| a.severity == AlertSeverity::High));

        let consumable_alert = report
            .alerts
            .iter()
            .find(|a| a.item_type == ItemType::Consumable)
            .unwrap();
        assert_eq!(consumable_alert.alert_type, AlertType::LowStock);
        assert_eq!(consumable_alert.severity, AlertSeverity::High);
        assert_eq!(report.high_alert_count(), 3);
    }

    #[test]
    fn test_report_medium_severity() {
        let ledger = InventoryLedger::new();
        let asset = create_asset(2, 1, 40.0);
        let report = ledger.report(&[asset], &[create_consumable(4, 10, 20)]);

        // available = 2 - 1 - 1 = 0 → high; poor → medium
        let low = report
            .alerts
            .iter()
            .find(|a| a.alert_type == AlertType::LowStock && a.item_type == ItemType::Asset)
            .unwrap();
        assert_eq!(low.severity, AlertSeverity::High);
        let maintenance = report
            .alerts
            .iter()
            .find(|a| a.alert_type == AlertType::MaintenanceNeeded)
            .unwrap();
        assert_eq!(maintenance.severity, AlertSeverity::Medium);
        let consumable = report
            .alerts
            .iter()
            .find(|a| a.item_type == ItemType::Consumable)
            .unwrap();
        assert_eq!(consumable.severity, AlertSeverity::Medium);
    }
}
