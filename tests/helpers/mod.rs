// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod test_data_builder;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// 固定评估日期
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
}

/// 固定时间戳（today 零点）
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap()
}
