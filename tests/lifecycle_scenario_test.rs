// ==========================================
// 装备全寿命周期 - 场景集成测试
// ==========================================
// 测试目标: 退化 → 成本 → 台账 → 采购 的端到端数值场景
// 覆盖范围: 成本分解 / 超额部署拒绝 / 耗材补货量 / 低健康度维护成本 / 交易序列不变量
// ==========================================

mod helpers;

use equipment_lifecycle::domain::types::{DegradationType, HealthStatus, ItemType, Priority};
use equipment_lifecycle::domain::{
    AssetTransaction, AssetTransactionKind, ConsumableTransaction, ConsumableTransactionKind,
    Transaction,
};
use equipment_lifecycle::engine::{
    CostModel, DegradationModel, InventoryLedger, NoUnitCosts, ProcurementPlanner, TransactionLog,
};
use equipment_lifecycle::error::EngineError;
use helpers::test_data_builder::{ConsumableBuilder, EquipmentBuilder};
use helpers::{now, today};

// ==========================================
// 测试辅助函数
// ==========================================

/// quantity 5 / 采购价 1000 / 2 名操作员 / cycles 轴满寿命 100
fn create_reference_asset() -> equipment_lifecycle::Equipment {
    EquipmentBuilder::new("UAV-REF")
        .quantity(5)
        .in_use(0)
        .acquisition_cost(1000.0)
        .personnel(2)
        .degradation(DegradationType::Cycles, 100.0, 1.0)
        .build()
}

// ==========================================
// 场景
// ==========================================

#[test]
fn test_reference_asset_cost_breakdown() {
    let model = CostModel::new();
    let costs = model.asset_costs(&create_reference_asset(), &NoUnitCosts);

    assert_eq!(costs.acquisition, 1000.0);
    assert_eq!(costs.operational, 100.0);
    assert_eq!(costs.personnel, 10000.0);
    assert!((costs.maintenance - 20.0).abs() < 1e-9);
    assert_eq!(costs.consumables, 0.0);
    assert!((costs.total - 11120.0).abs() < 1e-9);
}

#[test]
fn test_deployment_of_six_against_five_fails_unchanged() {
    let ledger = InventoryLedger::new();
    let mut assets = vec![create_reference_asset()];
    let mut consumables = Vec::new();
    let mut log = TransactionLog::new();

    let tx: Transaction =
        AssetTransaction::new(AssetTransactionKind::Deployment, "UAV-REF", 6, now()).into();
    let err = ledger
        .apply_transaction(&tx, &mut assets, &mut consumables, &mut log)
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InsufficientStock {
            entity_id: "UAV-REF".to_string(),
            requested: 6,
            available: 5,
        }
    );
    assert_eq!(assets[0], create_reference_asset());
    assert!(log.is_empty());
}

#[test]
fn test_depleted_consumable_generates_high_priority_need() {
    let consumable = ConsumableBuilder::new("BAT")
        .stock(5)
        .minimum(10)
        .reorder_point(20)
        .cost_per_unit(2.0)
        .build();

    let needs = ProcurementPlanner::new().generate_needs(&[], &[consumable], today());

    assert_eq!(needs.len(), 1);
    assert_eq!(needs[0].item_type, ItemType::Consumable);
    assert_eq!(needs[0].quantity, 35);
    assert_eq!(needs[0].priority, Priority::High);
    assert_eq!(needs[0].estimated_cost, 70.0);
}

#[test]
fn test_twenty_percent_health_is_critical() {
    let model = DegradationModel::new();
    let asset = EquipmentBuilder::new("CAM")
        .acquisition_cost(5000.0)
        .degradation(DegradationType::Hours, 100.0, 1.0)
        .current_value(20.0)
        .build();

    let health = model.health_status(&asset.degradation);
    assert_eq!(health.status, HealthStatus::Critical);
    assert!(health.needs_maintenance);

    let cost = model.maintenance_cost(&asset.degradation, asset.acquisition_cost, today());
    assert!((cost.monthly - 5000.0 * 0.02 * 1.8).abs() < 1e-9);
    assert!((cost.yearly - cost.monthly * 12.0).abs() < 1e-9);
    // floor(0.2 * 90) = 18 天
    assert_eq!(cost.next_maintenance_date, today() + chrono::Duration::days(18));
}

#[test]
fn test_invariants_hold_across_transaction_sequence() {
    equipment_lifecycle::logging::init_test();

    let ledger = InventoryLedger::new();
    let mut assets = vec![
        create_reference_asset(),
        EquipmentBuilder::new("RADAR")
            .quantity(2)
            .degradation(DegradationType::Cycles, 10.0, 3.0)
            .build(),
    ];
    let mut consumables = vec![ConsumableBuilder::new("BAT").stock(12).build()];
    let mut log = TransactionLog::new();

    let asset =
        |kind, id: &str, q| -> Transaction { AssetTransaction::new(kind, id, q, now()).into() };
    let consumable =
        |kind, q| -> Transaction { ConsumableTransaction::new(kind, "BAT", q, now()).into() };

    let sequence = vec![
        asset(AssetTransactionKind::Deployment, "UAV-REF", 3),
        asset(AssetTransactionKind::Deployment, "UAV-REF", 3), // 超额, 拒绝
        asset(AssetTransactionKind::Disposal, "UAV-REF", 3),   // 只有 2 台空闲, 拒绝
        asset(AssetTransactionKind::Return, "UAV-REF", 2),
        asset(AssetTransactionKind::Disposal, "UAV-REF", 4),
        asset(AssetTransactionKind::Acquisition, "UAV-REF", 1),
        asset(AssetTransactionKind::Deployment, "RADAR", 2),
        asset(AssetTransactionKind::Return, "RADAR", 1),
        asset(AssetTransactionKind::Return, "RADAR", 1),
        asset(AssetTransactionKind::Deployment, "RADAR", 1),
        asset(AssetTransactionKind::Return, "RADAR", 1),
        asset(AssetTransactionKind::Deployment, "RADAR", 1),
        asset(AssetTransactionKind::Return, "RADAR", 1),
        asset(AssetTransactionKind::Return, "RADAR", 1), // in_use 已为 0, 拒绝
        consumable(ConsumableTransactionKind::Use, 10),
        consumable(ConsumableTransactionKind::Disposal, 3), // 库存 2, 拒绝
        consumable(ConsumableTransactionKind::Purchase, 5),
    ];

    let mut accepted = 0;
    for tx in &sequence {
        if ledger
            .apply_transaction(tx, &mut assets, &mut consumables, &mut log)
            .is_ok()
        {
            accepted += 1;
        }

        for a in &assets {
            assert!(
                a.in_use <= a.quantity,
                "{} in_use {} > quantity {}",
                a.id,
                a.in_use,
                a.quantity
            );
            assert!(a.degradation.current_value >= 0.0);
            assert!(a.degradation.current_value <= a.degradation.max_value);
        }
    }

    assert_eq!(log.len(), accepted);
    assert_eq!(assets[0].quantity, 2);
    assert_eq!(assets[0].in_use, 1);
    // 4 次归还 * 3 = 12 > 10, 截断为 0
    assert_eq!(assets[1].degradation.current_value, 0.0);
    assert_eq!(consumables[0].stock_level, 7);
    assert_eq!(log.for_entity("RADAR").count(), 7);
}

#[test]
fn test_twelve_month_projection_and_quarters() {
    let model = CostModel::new();
    let assets = vec![
        create_reference_asset(),
        EquipmentBuilder::new("GEN")
            .acquisition_cost(1200.0)
            .degradation(DegradationType::Time, 365.0, 1.0)
            .build(),
    ];

    let projection = model.project_costs(&assets, 12, &NoUnitCosts);
    let quarters = CostModel::aggregate_windows(&projection.per_period, 3);

    assert_eq!(projection.per_period.len(), 12);
    assert_eq!(quarters.len(), 4);
    // 每期摊销 (1000 + 1200) / 12
    assert!((projection.per_period[0].acquisition - 2200.0 / 12.0).abs() < 1e-9);
    // 退化只作用于副本, 后期运营成本不低于首期
    assert!(projection.per_period[11].operational >= projection.per_period[0].operational);
    assert_eq!(assets[1].degradation.current_value, 365.0);

    let quarter_total: f64 = quarters.iter().map(|q| q.total).sum();
    assert!((quarter_total - projection.aggregate.total).abs() < 1e-6);
}
