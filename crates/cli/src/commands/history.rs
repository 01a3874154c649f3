use api_types::transaction::{
    DailyGroup, TransType, TransactionDetailResult, TransactionQuery, WireDateTime,
};
use clap::Args;

use super::Context;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[arg(long)]
    pub year: Option<i32>,
    /// Month 1-12.
    #[arg(long)]
    pub month: Option<u32>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, default_value_t = 50)]
    pub page_size: u32,
}

pub async fn run(ctx: &Context, args: &HistoryArgs) -> Result<()> {
    let (year, month) = ctx.period(args.year, args.month)?;
    let (start, end) = ledger::month_range(year, month)?;
    let query = TransactionQuery {
        book_id: ctx.book_id()?.to_string(),
        start_date: Some(start.format("%Y-%m-%d").to_string()),
        end_date: Some(end.format("%Y-%m-%d").to_string()),
        page_num: Some(args.page),
        page_size: Some(args.page_size),
    };
    let details = ctx.client.transaction_details(&query).await?;
    if ctx.json {
        return ctx.print_json(&details);
    }
    print!("{}", render_details(&details));
    Ok(())
}

fn time_of(date: &WireDateTime) -> String {
    match date {
        WireDateTime::Parts(parts) => match parts.as_slice() {
            [_, _, _, hour, minute, ..] => format!("{hour:02}:{minute:02}"),
            _ => "--:--".to_string(),
        },
        WireDateTime::Text(text) => text
            .split(['T', ' '])
            .nth(1)
            .and_then(|time| time.get(..5))
            .unwrap_or("--:--")
            .to_string(),
    }
}

fn render_group(out: &mut String, group: &DailyGroup) {
    out.push_str(&format!(
        "{}  收 {:.2}  支 {:.2}\n",
        group.date, group.daily_income, group.daily_expense
    ));
    for item in &group.transactions {
        let sign = match item.trans_type {
            TransType::Income => '+',
            TransType::Expense => '-',
            TransType::Transfer | TransType::Other => ' ',
        };
        let amount = format!("{sign}{:.2}", item.display_amount.abs());
        let mut line = format!("  {}  {amount:>12}  {}", time_of(&item.trans_date), item.description);
        if !item.tags.is_empty() {
            let tags: Vec<_> = item.tags.iter().map(|tag| tag.tag_name.as_str()).collect();
            line.push_str(&format!("  [{}]", tags.join(", ")));
        }
        out.push_str(&line);
        out.push('\n');
    }
}

fn render_details(details: &TransactionDetailResult) -> String {
    let mut out = String::new();
    if details.daily_groups.is_empty() {
        out.push_str("no transactions\n");
        return out;
    }
    for group in &details.daily_groups {
        render_group(&mut out, group);
    }
    out.push_str(&format!(
        "page {} ({} per page, {} total)\n",
        details.page_num, details.page_size, details.total
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_come_from_either_date_form() {
        assert_eq!(time_of(&WireDateTime::Parts(vec![2024, 3, 9, 8, 5, 0])), "08:05");
        assert_eq!(time_of(&WireDateTime::Parts(vec![2024, 3, 9])), "--:--");
        assert_eq!(
            time_of(&WireDateTime::Text("2024-03-09T18:30:00".to_string())),
            "18:30"
        );
        assert_eq!(time_of(&WireDateTime::Text("2024-03-09".to_string())), "--:--");
    }

    #[test]
    fn daily_groups_render_with_subtotals() {
        let body = r#"{
            "dailyGroups": [{
                "date": "2024-03-09",
                "dailyIncome": 0,
                "dailyExpense": 12.5,
                "transactions": [{
                    "transId": 31,
                    "transDate": [2024, 3, 9, 18, 30, 0],
                    "transType": "EXPENSE",
                    "displayAmount": -12.5,
                    "description": "餐饮 - 现金",
                    "tags": [{"tagId": 3, "tagName": "午餐"}]
                }]
            }],
            "total": 1,
            "pageNum": 1,
            "pageSize": 50
        }"#;
        let details: TransactionDetailResult = serde_json::from_str(body).unwrap();
        let text = render_details(&details);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "2024-03-09  收 0.00  支 12.50");
        assert_eq!(lines[1], "  18:30        -12.50  餐饮 - 现金  [午餐]");
        assert_eq!(lines[2], "page 1 (50 per page, 1 total)");
    }
}
