// ==========================================
// 装备全寿命周期与采购规划引擎 - 命令行入口
// ==========================================
// 用法: equipment-lifecycle <snapshot.json> [config.json]
// 输出: 库存报告 / 采购需求 / 12 个月成本推演 / 组合校验结果 (JSON, stdout)
// 日志: stderr, 级别由 RUST_LOG 控制
// ==========================================

use anyhow::{anyhow, bail, Context};
use chrono::{NaiveDate, Utc};
use equipment_lifecycle::config::EngineConfig;
use equipment_lifecycle::domain::{Combination, Consumable, Equipment, Transaction};
use equipment_lifecycle::engine::{
    CombinationValidator, CostModel, InventoryLedger, InventoryStore, ProcurementPlanner,
    RecordValidator, RecordingEventPublisher,
};
use equipment_lifecycle::logging;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

/// 月度推演期数
const PROJECTION_MONTHS: usize = 12;
/// 季度窗口
const QUARTER_WINDOW: usize = 3;

/// 输入快照
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    /// 评估日期（缺省为当天）
    #[serde(default)]
    today: Option<NaiveDate>,
    /// 采购预算（给出时额外输出预算内计划）
    #[serde(default)]
    budget: Option<f64>,
    #[serde(default)]
    assets: Vec<Equipment>,
    #[serde(default)]
    consumables: Vec<Consumable>,
    #[serde(default)]
    combinations: Vec<Combination>,
    /// 依次应用的待处理交易
    #[serde(default)]
    transactions: Vec<Transaction>,
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let snapshot_path = args
        .next()
        .context("用法: equipment-lifecycle <snapshot.json> [config.json]")?;

    let config = match args.next() {
        Some(path) => EngineConfig::from_json_file(Path::new(&path))
            .map_err(|e| anyhow!("配置加载失败 ({}): {}", path, e))?,
        None => EngineConfig::default(),
    };
    let violations = config.validate();
    if !violations.is_empty() {
        let detail: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        bail!("配置无效: {}", detail.join("; "));
    }

    let raw = std::fs::read_to_string(&snapshot_path)
        .with_context(|| format!("无法读取快照文件: {}", snapshot_path))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("快照文件格式错误: {}", snapshot_path))?;
    let today = snapshot.today.unwrap_or_else(|| Utc::now().date_naive());

    tracing::info!("==================================================");
    tracing::info!("装备全寿命周期与采购规划引擎");
    tracing::info!("系统版本: {}", equipment_lifecycle::VERSION);
    tracing::info!("评估日期: {}", today);
    tracing::info!("==================================================");

    // ===== 台账: 应用待处理交易 =====
    let publisher = RecordingEventPublisher::new();
    let ledger = InventoryLedger::with_publisher(config.clone(), Arc::new(publisher.clone()));
    let store = InventoryStore::new(snapshot.assets, snapshot.consumables, ledger)?;

    let mut transaction_errors = Vec::new();
    for tx in &snapshot.transactions {
        if let Err(e) = store.apply(tx) {
            tracing::warn!(tx_id = %tx.id(), error = %e, "交易被拒绝");
            transaction_errors.push(json!({ "transactionId": tx.id(), "error": e.to_string() }));
        }
    }

    let state = store.snapshot()?;
    let report = store.report()?;

    // ===== 采购需求 =====
    let planner = ProcurementPlanner::from_config(config.clone());
    let needs = planner.generate_needs(&state.assets, &state.consumables, today);
    let budgeted_plan = snapshot.budget.map(|budget| {
        planner.generate_budgeted_plan(&state.assets, &state.consumables, budget, today)
    });

    // ===== 成本推演 =====
    let cost_model = CostModel::from_config(config.clone());
    let projection = cost_model.project_costs(&state.assets, PROJECTION_MONTHS, &state.consumables);
    let quarterly = CostModel::aggregate_windows(&projection.per_period, QUARTER_WINDOW);

    // ===== 组合校验 =====
    let validator = CombinationValidator::from_config(&config);
    let record_validator = RecordValidator::new();
    let now = Utc::now();
    let mut combinations = Vec::with_capacity(snapshot.combinations.len());
    for mut combination in snapshot.combinations {
        if let Err(e) = record_validator.ensure_combination(&combination) {
            tracing::warn!(combination_id = %combination.id, error = %e, "组合记录无效");
            combinations.push(json!({
                "combination": combination,
                "recordError": e.to_string(),
            }));
            continue;
        }
        let validation = validator.validate(&combination, &state.assets);
        let usability = validator.check_usability(&combination, &state.assets);
        let totals = cost_model.combination_totals(&combination, &state.assets, &state.consumables);
        let totals_error = match totals {
            Ok(totals) => {
                combination.apply_totals(totals, now);
                None
            }
            Err(e) => Some(e.to_string()),
        };
        combinations.push(json!({
            "combination": combination,
            "validation": validation,
            "usability": usability,
            "totalsError": totals_error,
        }));
    }

    let output = json!({
        "today": today,
        "transactions": store.transactions()?,
        "transactionErrors": transaction_errors,
        "events": publisher.events(),
        "inventoryReport": report,
        "procurementNeeds": needs,
        "budgetedPlan": budgeted_plan,
        "costProjection": {
            "perPeriod": projection.per_period,
            "aggregate": projection.aggregate,
            "quarterly": quarterly,
        },
        "combinations": combinations,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
