// ==========================================
// 装备全寿命周期与采购规划引擎 - 批量录入服务
// ==========================================
// 流程: 文件解析 → 字段映射 → 候选转换 + 校验 → 录入报告
// 规则: 坏行只拒收该行并给出原因; 文件级错误中止整次导入
// ==========================================

use crate::domain::consumable::Consumable;
use crate::domain::equipment::Equipment;
use crate::error::{EngineError, FieldViolation};
use crate::importer::candidate::{ConsumableCandidate, EquipmentCandidate};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, FileParser};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument, warn};

/// 被拒收的行（row_number 从 1 开始, 不含表头）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub row_number: usize,
    pub violations: Vec<FieldViolation>,
}

/// 录入报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReport<T> {
    pub accepted: Vec<T>,
    pub rejected: Vec<RejectedRow>,
}

impl<T> IntakeReport<T> {
    fn new() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }

    fn push(&mut self, row_number: usize, outcome: Result<T, Vec<FieldViolation>>) {
        match outcome {
            Ok(record) => self.accepted.push(record),
            Err(violations) => {
                warn!(row_number, violations = violations.len(), "记录被拒收");
                self.rejected.push(RejectedRow {
                    row_number,
                    violations,
                });
            }
        }
    }
}

// ==========================================
// IntakeService - 批量录入服务
// ==========================================
pub struct IntakeService {
    file_parser: Box<dyn FileParser>,
    field_mapper: FieldMapper,
}

impl IntakeService {
    pub fn new() -> Self {
        Self::with_parser(Box::new(CsvParser))
    }

    pub fn with_parser(file_parser: Box<dyn FileParser>) -> Self {
        Self {
            file_parser,
            field_mapper: FieldMapper,
        }
    }

    // ==========================================
    // 候选记录（文档抽取结果）
    // ==========================================

    pub fn intake_equipment(
        &self,
        candidates: Vec<EquipmentCandidate>,
        now: DateTime<Utc>,
    ) -> IntakeReport<Equipment> {
        let mut report = IntakeReport::new();
        for (idx, candidate) in candidates.into_iter().enumerate() {
            report.push(idx + 1, candidate.into_equipment(now).map_err(into_violations));
        }
        report
    }

    pub fn intake_consumables(
        &self,
        candidates: Vec<ConsumableCandidate>,
    ) -> IntakeReport<Consumable> {
        let mut report = IntakeReport::new();
        for (idx, candidate) in candidates.into_iter().enumerate() {
            report.push(idx + 1, candidate.into_consumable().map_err(into_violations));
        }
        report
    }

    // ==========================================
    // 文件
    // ==========================================

    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_equipment_file<P: AsRef<Path>>(
        &self,
        file_path: P,
        now: DateTime<Utc>,
    ) -> ImportResult<IntakeReport<Equipment>> {
        let raw_rows = self.file_parser.parse_to_raw_records(file_path.as_ref())?;

        let mut report = IntakeReport::new();
        for (idx, row) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;
            let outcome = self
                .field_mapper
                .map_equipment(row, row_number)
                .map_err(conversion_violations)
                .and_then(|c| c.into_equipment(now).map_err(into_violations));
            report.push(row_number, outcome);
        }

        info!(
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "装备导入完成"
        );
        Ok(report)
    }

    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_consumable_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<IntakeReport<Consumable>> {
        let raw_rows = self.file_parser.parse_to_raw_records(file_path.as_ref())?;

        let mut report = IntakeReport::new();
        for (idx, row) in raw_rows.iter().enumerate() {
            let row_number = idx + 1;
            let outcome = self
                .field_mapper
                .map_consumable(row, row_number)
                .map_err(conversion_violations)
                .and_then(|c| c.into_consumable().map_err(into_violations));
            report.push(row_number, outcome);
        }

        info!(
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "耗材导入完成"
        );
        Ok(report)
    }
}

impl Default for IntakeService {
    fn default() -> Self {
        Self::new()
    }
}

fn into_violations(err: EngineError) -> Vec<FieldViolation> {
    match err {
        EngineError::Validation(violations) => violations,
        other => vec![FieldViolation::new("record", other.to_string())],
    }
}

fn conversion_violations(err: ImportError) -> Vec<FieldViolation> {
    match err {
        ImportError::TypeConversionError { field, message, .. } => {
            vec![FieldViolation::new(field, message)]
        }
        other => vec![FieldViolation::new("record", other.to_string())],
    }
}
