// ==========================================
// 装备全寿命周期与采购规划引擎 - 配置管理
// ==========================================
// 职责: 引擎参数加载、覆写、校验
// 来源: 默认值 → JSON 文档 / key-value 覆写
// ==========================================

use crate::error::FieldViolation;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const PERSONNEL_MONTHLY_RATE: &str = "personnel_monthly_rate";
    pub const CONSUMABLE_BASE_RATE: &str = "consumable_base_rate";
    pub const MAINTENANCE_THRESHOLD_FRACTION: &str = "maintenance_threshold_fraction";
    pub const PROCUREMENT_LEAD_TIME_DAYS: &str = "procurement_lead_time_days";
    pub const DAILY_USAGE_RATE: &str = "daily_usage_rate";
    pub const ASSUMED_WEEKLY_CYCLES: &str = "assumed_weekly_cycles";
    pub const REPLACEMENT_HORIZON_DAYS: &str = "replacement_horizon_days";
}

// ==========================================
// EngineConfig - 引擎参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 每名操作人员月成本
    pub personnel_monthly_rate: f64,
    /// 耗材单价无法解析时使用的基准单价
    pub consumable_base_rate: f64,
    /// 更换阈值（占满寿命的比例）
    pub maintenance_threshold_fraction: f64,
    /// 采购提前期（天）
    pub procurement_lead_time_days: i64,
    /// 预测/推演使用的日均使用量（次或小时）
    pub daily_usage_rate: f64,
    /// 耗材月用量估算使用的周使用次数
    pub assumed_weekly_cycles: f64,
    /// 距更换不足该天数时生成采购需求
    pub replacement_horizon_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            personnel_monthly_rate: 5000.0,
            consumable_base_rate: 10.0,
            maintenance_threshold_fraction: 0.25,
            procurement_lead_time_days: 7,
            daily_usage_rate: 1.0,
            assumed_weekly_cycles: 4.0,
            replacement_horizon_days: 30,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 字符串加载（缺失的键取默认值）
    pub fn from_json_str(raw: &str) -> Result<Self, Box<dyn Error>> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "已加载引擎配置");
        Ok(config)
    }

    /// 用 key-value 覆写默认值
    ///
    /// # 说明
    /// - 未知键忽略
    /// - 值无法解析时记录警告并保留默认值
    pub fn from_kv(values: &HashMap<String, String>) -> Self {
        let mut config = Self::default();

        overlay(values, config_keys::PERSONNEL_MONTHLY_RATE, &mut config.personnel_monthly_rate);
        overlay(values, config_keys::CONSUMABLE_BASE_RATE, &mut config.consumable_base_rate);
        overlay(
            values,
            config_keys::MAINTENANCE_THRESHOLD_FRACTION,
            &mut config.maintenance_threshold_fraction,
        );
        overlay(
            values,
            config_keys::PROCUREMENT_LEAD_TIME_DAYS,
            &mut config.procurement_lead_time_days,
        );
        overlay(values, config_keys::DAILY_USAGE_RATE, &mut config.daily_usage_rate);
        overlay(values, config_keys::ASSUMED_WEEKLY_CYCLES, &mut config.assumed_weekly_cycles);
        overlay(
            values,
            config_keys::REPLACEMENT_HORIZON_DAYS,
            &mut config.replacement_horizon_days,
        );

        config
    }

    /// 参数范围校验
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if !(self.personnel_monthly_rate >= 0.0) {
            violations.push(FieldViolation::new(
                config_keys::PERSONNEL_MONTHLY_RATE,
                "不能为负数",
            ));
        }
        if !(self.consumable_base_rate >= 0.0) {
            violations.push(FieldViolation::new(
                config_keys::CONSUMABLE_BASE_RATE,
                "不能为负数",
            ));
        }
        let fraction = self.maintenance_threshold_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            violations.push(FieldViolation::new(
                config_keys::MAINTENANCE_THRESHOLD_FRACTION,
                "必须在 (0, 1] 区间内",
            ));
        }
        if self.procurement_lead_time_days < 0 {
            violations.push(FieldViolation::new(
                config_keys::PROCUREMENT_LEAD_TIME_DAYS,
                "不能为负数",
            ));
        }
        if !(self.daily_usage_rate >= 0.0) {
            violations.push(FieldViolation::new(config_keys::DAILY_USAGE_RATE, "不能为负数"));
        }
        if !(self.assumed_weekly_cycles >= 0.0) {
            violations.push(FieldViolation::new(
                config_keys::ASSUMED_WEEKLY_CYCLES,
                "不能为负数",
            ));
        }
        if self.replacement_horizon_days < 0 {
            violations.push(FieldViolation::new(
                config_keys::REPLACEMENT_HORIZON_DAYS,
                "不能为负数",
            ));
        }

        violations
    }
}

fn overlay<T>(values: &HashMap<String, String>, key: &str, target: &mut T)
where
    T: std::str::FromStr + std::fmt::Display,
{
    let Some(raw) = values.get(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(parsed) => *target = parsed,
        Err(_) => {
            tracing::warn!(
                config_key = key,
                raw_value = %raw,
                default = %target,
                "配置值格式错误，使用默认值"
            );
        }
    }
}
