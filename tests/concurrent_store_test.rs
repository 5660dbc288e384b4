// ==========================================
// 并发控制测试
// ==========================================
// 职责: 验证按实体加锁的库存存储在多线程下不会超额部署
// ==========================================

mod helpers;

use equipment_lifecycle::domain::{
    AssetTransaction, AssetTransactionKind, ConsumableTransaction, ConsumableTransactionKind,
    Transaction,
};
use equipment_lifecycle::engine::events::InventoryEvent;
use equipment_lifecycle::engine::{InventoryLedger, InventoryStore, RecordingEventPublisher};
use equipment_lifecycle::error::EngineError;
use equipment_lifecycle::EngineConfig;
use helpers::now;
use helpers::test_data_builder::{ConsumableBuilder, EquipmentBuilder};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_deployments_never_overcommit() {
    equipment_lifecycle::logging::init_test();

    let store = Arc::new(
        InventoryStore::new(
            vec![EquipmentBuilder::new("UAV").quantity(10).build()],
            Vec::new(),
            InventoryLedger::new(),
        )
        .unwrap(),
    );

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let tx: Transaction =
                    AssetTransaction::new(AssetTransactionKind::Deployment, "UAV", 1, now()).into();
                store.apply(&tx)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("线程 panic"))
        .collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(EngineError::InsufficientStock { .. })))
        .count();

    assert_eq!(succeeded, 10);
    assert_eq!(rejected, 6);

    let asset = store.asset("UAV").unwrap();
    assert_eq!(asset.in_use, 10);
    assert_eq!(store.transactions().unwrap().len(), 10);
}

#[test]
fn test_concurrent_consumable_use_and_unrelated_entities() {
    let publisher = RecordingEventPublisher::new();
    let ledger =
        InventoryLedger::with_publisher(EngineConfig::default(), Arc::new(publisher.clone()));
    let store = Arc::new(
        InventoryStore::new(
            vec![EquipmentBuilder::new("UAV").quantity(8).build()],
            vec![ConsumableBuilder::new("BAT")
                .stock(50)
                .minimum(5)
                .reorder_point(10)
                .build()],
            ledger,
        )
        .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..12 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            let tx: Transaction = if i % 2 == 0 {
                ConsumableTransaction::new(ConsumableTransactionKind::Use, "BAT", 5, now()).into()
            } else {
                AssetTransaction::new(AssetTransactionKind::Deployment, "UAV", 1, now()).into()
            };
            store.apply(&tx).is_ok()
        }));
    }
    let ok = handles
        .into_iter()
        .map(|h| h.join().expect("线程 panic"))
        .filter(|ok| *ok)
        .count();

    // 6 次出库共 30, 6 次部署共 6, 全部成功
    assert_eq!(ok, 12);

    let snapshot = store.snapshot().unwrap();
    assert_eq!(snapshot.consumables[0].stock_level, 20);
    assert_eq!(snapshot.assets[0].in_use, 6);

    // 库存 20 高于再订货点 10, 不应出现再订货事件
    assert!(publisher
        .events()
        .iter()
        .all(|e| !matches!(e, InventoryEvent::ReorderPointReached { .. })));

    let report = store.report().unwrap();
    assert_eq!(report.assets[0].available, 2);
    assert!(report.alerts.is_empty());
}

#[test]
fn test_same_entity_log_chains_in_apply_order() {
    let store = Arc::new(
        InventoryStore::new(
            vec![
                EquipmentBuilder::new("UAV").quantity(4).build(),
                EquipmentBuilder::new("CAM").quantity(4).build(),
            ],
            vec![ConsumableBuilder::new("BAT").stock(1000).build()],
            InventoryLedger::new(),
        )
        .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let asset_id = if i % 2 == 0 { "UAV" } else { "CAM" };
                for _ in 0..50 {
                    let deploy: Transaction =
                        AssetTransaction::new(AssetTransactionKind::Deployment, asset_id, 1, now())
                            .into();
                    if store.apply(&deploy).is_ok() {
                        let back: Transaction =
                            AssetTransaction::new(AssetTransactionKind::Return, asset_id, 1, now())
                                .into();
                        store.apply(&back).unwrap();
                    }
                    let used: Transaction =
                        ConsumableTransaction::new(ConsumableTransactionKind::Use, "BAT", 1, now())
                            .into();
                    let _ = store.apply(&used);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("线程 panic");
    }

    let records = store.transactions().unwrap();
    for entity in ["UAV", "CAM", "BAT"] {
        let history: Vec<_> = records
            .iter()
            .filter(|r| r.transaction.entity_id() == entity)
            .collect();
        assert!(!history.is_empty());
        // 上一条的 after 必须等于下一条的 before
        for pair in history.windows(2) {
            assert_eq!(pair[0].after, pair[1].before, "{} 日志未按应用顺序衔接", entity);
        }
    }

    assert_eq!(store.asset("UAV").unwrap().in_use, 0);
    assert_eq!(store.consumable("BAT").unwrap().stock_level, 600);
}
