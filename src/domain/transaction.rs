// ==========================================
// 装备全寿命周期与采购规划引擎 - 交易领域模型
// ==========================================
// 红线: 交易是不可变的历史事实,只追加不修改
// 对齐: 装备交易与耗材交易共用一个带标签的枚举
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// AssetTransactionKind - 装备交易类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetTransactionKind {
    Acquisition, // 购入
    Deployment,  // 部署
    Return,      // 归还
    Disposal,    // 报废
}

impl fmt::Display for AssetTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetTransactionKind::Acquisition => write!(f, "acquisition"),
            AssetTransactionKind::Deployment => write!(f, "deployment"),
            AssetTransactionKind::Return => write!(f, "return"),
            AssetTransactionKind::Disposal => write!(f, "disposal"),
        }
    }
}

// ==========================================
// ConsumableTransactionKind - 耗材交易类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableTransactionKind {
    Purchase, // 采购入库
    Use,      // 领用
    Disposal, // 报废
}

impl fmt::Display for ConsumableTransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumableTransactionKind::Purchase => write!(f, "purchase"),
            ConsumableTransactionKind::Use => write!(f, "use"),
            ConsumableTransactionKind::Disposal => write!(f, "disposal"),
        }
    }
}

// ==========================================
// AssetTransaction / ConsumableTransaction
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AssetTransactionKind,
    pub asset_id: String,
    pub quantity: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AssetTransaction {
    pub fn new(
        kind: AssetTransactionKind,
        asset_id: impl Into<String>,
        quantity: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            asset_id: asset_id.into(),
            quantity,
            timestamp,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumableTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ConsumableTransactionKind,
    pub consumable_id: String,
    pub quantity: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ConsumableTransaction {
    pub fn new(
        kind: ConsumableTransactionKind,
        consumable_id: impl Into<String>,
        quantity: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            consumable_id: consumable_id.into(),
            quantity,
            timestamp,
            notes: None,
        }
    }
}

// ==========================================
// Transaction - 带标签的交易
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "itemType", rename_all = "snake_case")]
pub enum Transaction {
    Asset(AssetTransaction),
    Consumable(ConsumableTransaction),
}

impl Transaction {
    pub fn id(&self) -> &str {
        match self {
            Transaction::Asset(tx) => &tx.id,
            Transaction::Consumable(tx) => &tx.id,
        }
    }

    /// 被交易实体的 ID
    pub fn entity_id(&self) -> &str {
        match self {
            Transaction::Asset(tx) => &tx.asset_id,
            Transaction::Consumable(tx) => &tx.consumable_id,
        }
    }

    pub fn quantity(&self) -> u32 {
        match self {
            Transaction::Asset(tx) => tx.quantity,
            Transaction::Consumable(tx) => tx.quantity,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Transaction::Asset(tx) => tx.timestamp,
            Transaction::Consumable(tx) => tx.timestamp,
        }
    }

    /// 交易类型字符串（日志用）
    pub fn kind_str(&self) -> String {
        match self {
            Transaction::Asset(tx) => tx.kind.to_string(),
            Transaction::Consumable(tx) => tx.kind.to_string(),
        }
    }
}

impl From<AssetTransaction> for Transaction {
    fn from(tx: AssetTransaction) -> Self {
        Transaction::Asset(tx)
    }
}

impl From<ConsumableTransaction> for Transaction {
    fn from(tx: ConsumableTransaction) -> Self {
        Transaction::Consumable(tx)
    }
}

// ==========================================
// QuantitySnapshot - 交易前后数量快照
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "itemType", rename_all = "snake_case")]
pub enum QuantitySnapshot {
    #[serde(rename_all = "camelCase")]
    Asset { quantity: u32, in_use: u32 },
    #[serde(rename_all = "camelCase")]
    Consumable { stock_level: u32 },
}

// ==========================================
// TransactionRecord - 交易日志条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub transaction: Transaction,
    pub applied_at: DateTime<Utc>,
    pub before: QuantitySnapshot,
    pub after: QuantitySnapshot,
}
