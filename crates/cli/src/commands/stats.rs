use api_types::stats::{CategoryRank, MonthlyStatistics};
use clap::Args;
use serde::Serialize;

use super::Context;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12.
    #[arg(long)]
    pub month: Option<u32>,
    /// Number of expense categories to list.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}

#[derive(Serialize)]
struct MonthReport {
    year: i32,
    month: u32,
    totals: MonthlyStatistics,
    expenses: CategoryRank,
}

pub async fn run(ctx: &Context, args: &StatsArgs) -> Result<()> {
    let (year, month) = ctx.period(args.year, args.month)?;
    let book_id = ctx.book_id()?;
    let totals = ctx.client.monthly_statistics(&book_id, year, month).await?;
    let expenses = ctx
        .client
        .category_rank(&book_id, "EXPENSE", year, month)
        .await?;
    let report = MonthReport {
        year,
        month,
        totals,
        expenses,
    };
    if ctx.json {
        return ctx.print_json(&report);
    }
    print!("{}", render_report(&report, args.top));
    Ok(())
}

fn render_report(report: &MonthReport, top: usize) -> String {
    let mut out = String::new();
    let totals = &report.totals;
    out.push_str(&format!("{}-{:02}\n", report.year, report.month));
    out.push_str(&format!("  收入 {:>12.2}\n", totals.total_income));
    out.push_str(&format!("  支出 {:>12.2}\n", totals.total_expense));
    out.push_str(&format!("  结余 {:>12.2}\n", totals.balance));
    for item in report.expenses.categories.iter().take(top) {
        out.push_str(&format!(
            "  {:<12}{:>10.2}  {:>5.1}%\n",
            item.account_name, item.amount, item.percentage
        ));
    }
    out
}
