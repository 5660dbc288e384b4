// ==========================================
// 装备全寿命周期与采购规划引擎 - 并发库存存储
// ==========================================
// 职责: 为每个装备/耗材提供独立读写锁, 多线程安全地应用交易
// 红线: 同一实体的交易在写锁内完成校验与写入, 不会超额部署
// 红线: 日志追加与实体写入在同一把写锁内完成, 日志顺序即应用顺序
// ==========================================

use crate::domain::consumable::Consumable;
use crate::domain::equipment::Equipment;
use crate::domain::report::InventoryReport;
use crate::domain::transaction::{Transaction, TransactionRecord};
use crate::engine::ledger::{asset_record, consumable_record, InventoryLedger, TransactionLog};
use crate::engine::validation::RecordValidator;
use crate::error::{EngineError, EngineResult, FieldViolation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, RwLock};
use tracing::instrument;

/// 库存快照（按初始录入顺序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    pub assets: Vec<Equipment>,
    pub consumables: Vec<Consumable>,
}

// ==========================================
// InventoryStore - 并发库存存储
// ==========================================
pub struct InventoryStore {
    ledger: InventoryLedger,
    asset_order: Vec<String>,
    assets: HashMap<String, RwLock<Equipment>>,
    consumable_order: Vec<String>,
    consumables: HashMap<String, RwLock<Consumable>>,
    log: Mutex<TransactionLog>,
}

impl InventoryStore {
    /// 创建存储
    ///
    /// # 错误
    /// - 任一记录校验失败或 id 重复 → Validation（汇总全部违规）
    pub fn new(
        assets: Vec<Equipment>,
        consumables: Vec<Consumable>,
        ledger: InventoryLedger,
    ) -> EngineResult<Self> {
        let validator = RecordValidator::new();
        let mut violations = Vec::new();

        let mut asset_order = Vec::with_capacity(assets.len());
        let mut asset_map = HashMap::with_capacity(assets.len());
        for (idx, asset) in assets.into_iter().enumerate() {
            prefix_into(
                &mut violations,
                &format!("assets[{}]", idx),
                validator.validate_equipment(&asset),
            );
            if asset_map.contains_key(&asset.id) {
                violations.push(FieldViolation::new(
                    format!("assets[{}].id", idx),
                    format!("id {} 重复", asset.id),
                ));
                continue;
            }
            asset_order.push(asset.id.clone());
            asset_map.insert(asset.id.clone(), RwLock::new(asset));
        }

        let mut consumable_order = Vec::with_capacity(consumables.len());
        let mut consumable_map = HashMap::with_capacity(consumables.len());
        for (idx, consumable) in consumables.into_iter().enumerate() {
            prefix_into(
                &mut violations,
                &format!("consumables[{}]", idx),
                validator.validate_consumable(&consumable),
            );
            if consumable_map.contains_key(&consumable.id) {
                violations.push(FieldViolation::new(
                    format!("consumables[{}].id", idx),
                    format!("id {} 重复", consumable.id),
                ));
                continue;
            }
            consumable_order.push(consumable.id.clone());
            consumable_map.insert(consumable.id.clone(), RwLock::new(consumable));
        }

        if !violations.is_empty() {
            return Err(EngineError::Validation(violations));
        }

        tracing::info!(
            assets = asset_order.len(),
            consumables = consumable_order.len(),
            "库存存储已初始化"
        );

        Ok(Self {
            ledger,
            asset_order,
            assets: asset_map,
            consumable_order,
            consumables: consumable_map,
            log: Mutex::new(TransactionLog::new()),
        })
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    // ==========================================
    // 写操作
    // ==========================================

    /// 应用一笔交易
    ///
    /// 只锁定交易涉及的实体, 不同实体的交易可并行
    ///
    /// 加锁顺序固定为 实体 → 日志; 日志锁获取失败时实体保持不变
    #[instrument(skip(self, tx), fields(tx_id = %tx.id(), kind = %tx.kind_str()))]
    pub fn apply(&self, tx: &Transaction) -> EngineResult<TransactionRecord> {
        let record = match tx {
            Transaction::Asset(asset_tx) => {
                let lock = self
                    .assets
                    .get(&asset_tx.asset_id)
                    .ok_or_else(|| EngineError::not_found("Equipment", &asset_tx.asset_id))?;
                let mut guard = lock
                    .write()
                    .map_err(|e| EngineError::LockError(e.to_string()))?;
                let next = self.ledger.apply_asset_transaction(asset_tx, &guard)?;
                let mut log = self.lock_log()?;
                let record = asset_record(tx, &guard, &next);
                *guard = next;
                log.record(record.clone());
                record
            }
            Transaction::Consumable(consumable_tx) => {
                let lock = self
                    .consumables
                    .get(&consumable_tx.consumable_id)
                    .ok_or_else(|| {
                        EngineError::not_found("Consumable", &consumable_tx.consumable_id)
                    })?;
                let mut guard = lock
                    .write()
                    .map_err(|e| EngineError::LockError(e.to_string()))?;
                let next = self
                    .ledger
                    .apply_consumable_transaction(consumable_tx, &guard)?;
                let mut log = self.lock_log()?;
                let record = consumable_record(tx, &guard, &next);
                *guard = next;
                log.record(record.clone());
                record
            }
        };

        Ok(record)
    }

    // ==========================================
    // 读操作
    // ==========================================

    pub fn asset(&self, id: &str) -> EngineResult<Equipment> {
        let lock = self
            .assets
            .get(id)
            .ok_or_else(|| EngineError::not_found("Equipment", id))?;
        let guard = lock
            .read()
            .map_err(|e| EngineError::LockError(e.to_string()))?;
        Ok(guard.clone())
    }

    pub fn consumable(&self, id: &str) -> EngineResult<Consumable> {
        let lock = self
            .consumables
            .get(id)
            .ok_or_else(|| EngineError::not_found("Consumable", id))?;
        let guard = lock
            .read()
            .map_err(|e| EngineError::LockError(e.to_string()))?;
        Ok(guard.clone())
    }

    /// 当前全部实体的快照
    pub fn snapshot(&self) -> EngineResult<InventorySnapshot> {
        let assets = self
            .asset_order
            .iter()
            .map(|id| self.asset(id))
            .collect::<EngineResult<Vec<_>>>()?;
        let consumables = self
            .consumable_order
            .iter()
            .map(|id| self.consumable(id))
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(InventorySnapshot {
            assets,
            consumables,
        })
    }

    /// 基于当前快照生成库存报告
    pub fn report(&self) -> EngineResult<InventoryReport> {
        let snapshot = self.snapshot()?;
        Ok(self.ledger.report(&snapshot.assets, &snapshot.consumables))
    }

    /// 交易日志副本
    pub fn transactions(&self) -> EngineResult<Vec<TransactionRecord>> {
        Ok(self.lock_log()?.records().to_vec())
    }

    fn lock_log(&self) -> EngineResult<MutexGuard<'_, TransactionLog>> {
        self.log
            .lock()
            .map_err(|e| EngineError::LockError(e.to_string()))
    }
}

fn prefix_into(target: &mut Vec<FieldViolation>, prefix: &str, violations: Vec<FieldViolation>) {
    target.extend(
        violations
            .into_iter()
            .map(|v| FieldViolation::new(format!("{}.{}", prefix, v.field), v.reason)),
    );
}
