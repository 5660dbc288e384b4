// ==========================================
// 装备全寿命周期与采购规划引擎 - 库存事件发布
// ==========================================
// 职责: 定义库存事件发布 trait
// 说明: 事件只是通知,不会修改状态,也不会自动生成采购需求
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// 库存事件类型
// ==========================================

/// 库存事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InventoryEvent {
    /// 耗材出库后库存 ≤ 再订货点
    #[serde(rename_all = "camelCase")]
    ReorderPointReached {
        consumable_id: String,
        stock_level: u32,
        reorder_point: u32,
        at: DateTime<Utc>,
    },
    /// 装备归还后健康度需要维护
    #[serde(rename_all = "camelCase")]
    MaintenanceRequired {
        asset_id: String,
        health_fraction: f64,
        at: DateTime<Utc>,
    },
}

impl InventoryEvent {
    /// 事件类型标识
    pub fn as_str(&self) -> &str {
        match self {
            InventoryEvent::ReorderPointReached { .. } => "ReorderPointReached",
            InventoryEvent::MaintenanceRequired { .. } => "MaintenanceRequired",
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 库存事件发布者 Trait
///
/// # 实现说明
/// - 发布失败只记录日志,不影响交易结果
pub trait InventoryEventPublisher: Send + Sync {
    fn publish(&self, event: InventoryEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl InventoryEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: InventoryEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!("NoOpEventPublisher: 跳过事件发布 - event={}", event.as_str());
        Ok(())
    }
}

/// 记录型事件发布者（测试/CLI 汇总用）
#[derive(Debug, Clone, Default)]
pub struct RecordingEventPublisher {
    events: Arc<Mutex<Vec<InventoryEvent>>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已发布事件的快照
    pub fn events(&self) -> Vec<InventoryEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl InventoryEventPublisher for RecordingEventPublisher {
    fn publish(&self, event: InventoryEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut guard = self
            .events
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        guard.push(event);
        Ok(())
    }
}

/// 发布事件,失败时只记录警告
pub(crate) fn publish_or_warn(publisher: &dyn InventoryEventPublisher, event: InventoryEvent) {
    let kind = event.as_str().to_string();
    if let Err(e) = publisher.publish(event) {
        tracing::warn!(event = %kind, error = %e, "库存事件发布失败");
    }
}
