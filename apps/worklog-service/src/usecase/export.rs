//! # CSV エクスポートユースケース
//!
//! 全勤務時間エントリを名簿と突き合わせ、所定・実績・差分を含む CSV を生成する。
//!
//! ## 出力形式
//!
//! - ヘッダー: `Name,Datum,Arbeitsbeginn,Arbeitsende,Pause (Minuten),SollArbeitszeit,IstArbeitszeit,Differenz,Bemerkung`
//! - 行区切りは `\n`、末尾に改行を付けない
//! - `Datum` は `DD.MM.YYYY`、時間は小数 2 桁
//! - カンマ・ダブルクォート・改行を含むフィールドのみクォートする
//! - 行が 0 件なら空文字列（ヘッダーも出さない）

use std::sync::Arc;

use worklog_domain::report::{TimesheetRow, build_timesheet};
use worklog_infra::repository::{EmployeeRepository, WorkHoursRepository};
use worklog_shared::{event_log::event, log_business_event};

use crate::error::WorklogError;

/// CSV のヘッダー行
pub const CSV_HEADER: [&str; 9] = [
    "Name",
    "Datum",
    "Arbeitsbeginn",
    "Arbeitsende",
    "Pause (Minuten)",
    "SollArbeitszeit",
    "IstArbeitszeit",
    "Differenz",
    "Bemerkung",
];

/// 時間を小数 2 桁で整形する
///
/// 端数のちょうど半分は 0 から遠い方へ丸める（`7.125` → `7.13`）。
/// 丸めた結果が 0 なら符号を付けない。
fn format_hours(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.2}")
}

fn to_record(row: &TimesheetRow) -> [String; 9] {
    let entry = row.entry();
    [
        entry.name().as_str().to_string(),
        entry.date().format("%d.%m.%Y").to_string(),
        entry.start_time().map(|t| t.to_string()).unwrap_or_default(),
        entry.end_time().map(|t| t.to_string()).unwrap_or_default(),
        row.break_minutes().to_string(),
        format_hours(row.expected_hours()),
        format_hours(row.actual_hours()),
        format_hours(row.variance()),
        entry.comment().unwrap_or_default().to_string(),
    ]
}

/// 勤務表の行を CSV 文字列に変換する
pub fn render_csv(rows: &[TimesheetRow]) -> Result<String, WorklogError> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;
    for row in rows {
        writer.write_record(to_record(row)).map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| WorklogError::CsvExport(format!("CSV の書き出しに失敗: {e}")))?;
    let mut csv = String::from_utf8(bytes)
        .map_err(|e| WorklogError::CsvExport(format!("CSV が UTF-8 ではありません: {e}")))?;

    // 最終行の後ろの改行は付けない
    if csv.ends_with('\n') {
        csv.pop();
    }
    Ok(csv)
}

fn csv_error(e: csv::Error) -> WorklogError {
    WorklogError::CsvExport(format!("CSV の生成に失敗: {e}"))
}

/// CSV エクスポートユースケース
pub struct ExportUseCaseImpl {
    work_hours_repository: Arc<dyn WorkHoursRepository>,
    employee_repository:   Arc<dyn EmployeeRepository>,
}

impl ExportUseCaseImpl {
    pub fn new(
        work_hours_repository: Arc<dyn WorkHoursRepository>,
        employee_repository: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            work_hours_repository,
            employee_repository,
        }
    }

    /// 全エントリ（日付昇順）を名簿と突き合わせて CSV を生成する（管理者）
    ///
    /// 名簿は ID 順に読み込み、同じ氏名の従業員が複数いれば最初の 1 人を使う。
    #[tracing::instrument(skip_all)]
    pub async fn export_csv(&self) -> Result<String, WorklogError> {
        let entries = self.work_hours_repository.find_all().await?;
        let employees = self.employee_repository.find_all().await?;

        let rows = build_timesheet(entries, &employees);
        let csv = render_csv(&rows)?;

        log_business_event!(
            event.category = event::category::WORK_HOURS,
            event.action = event::action::WORK_HOURS_EXPORTED,
            event.entity_type = event::entity_type::WORK_HOURS_ENTRY,
            event.result = event::result::SUCCESS,
            row_count = rows.len(),
            "勤務時間を CSV でエクスポート"
        );

        Ok(csv)
    }
}
