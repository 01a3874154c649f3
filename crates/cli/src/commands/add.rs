use clap::{Args, Subcommand};
use ledger::{
    AccountCatalog, AccountId, AccountRole, BookSession, Direction, Mode, Submitter, TagId,
    Transaction, TransactionForm,
};

use super::Context;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct AddArgs {
    #[command(subcommand)]
    pub kind: AddKind,
}

#[derive(Subcommand, Debug)]
pub enum AddKind {
    /// Money spent: debit an expense account, credit the paying account.
    Expense(ExpenseArgs),
    /// Money received: debit the receiving account, credit an income account.
    Income(IncomeArgs),
    /// Money moved between two asset/liability accounts.
    Transfer(TransferArgs),
    /// Free-form entries; debits must equal credits.
    Advanced(AdvancedArgs),
}

#[derive(Args, Debug, Default)]
pub struct DraftArgs {
    /// Transaction date (`YYYY-MM-DD HH:MM`); defaults to now.
    #[arg(long)]
    pub date: Option<String>,
    /// Description; generated from the accounts when omitted.
    #[arg(long, short = 'd')]
    pub description: Option<String>,
    /// Tag id (repeatable).
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<String>,
    /// Print the entries without submitting.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct ExpenseArgs {
    #[arg(long)]
    pub amount: String,
    /// Expense account id.
    #[arg(long)]
    pub expense: String,
    /// Asset or liability account paid from.
    #[arg(long)]
    pub pay: String,
    #[command(flatten)]
    pub draft: DraftArgs,
}

#[derive(Args, Debug)]
pub struct IncomeArgs {
    #[arg(long)]
    pub amount: String,
    /// Income account id.
    #[arg(long)]
    pub income: String,
    /// Asset or liability account credited with the money.
    #[arg(long)]
    pub deposit: String,
    #[command(flatten)]
    pub draft: DraftArgs,
}

#[derive(Args, Debug)]
pub struct TransferArgs {
    #[arg(long)]
    pub amount: String,
    #[arg(long)]
    pub from: String,
    #[arg(long)]
    pub to: String,
    #[command(flatten)]
    pub draft: DraftArgs,
}

#[derive(Args, Debug)]
pub struct AdvancedArgs {
    /// Entry as `D|C:ACCOUNT:AMOUNT[:MEMO]` (repeatable, at least two).
    #[arg(long = "entry", value_name = "ENTRY", value_parser = parse_entry)]
    pub entries: Vec<EntrySpec>,
    #[command(flatten)]
    pub draft: DraftArgs,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntrySpec {
    pub direction: Direction,
    pub account: AccountId,
    pub amount: String,
    pub memo: Option<String>,
}

fn parse_direction(raw: &str) -> std::result::Result<Direction, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "d" | "dr" | "debit" | "借" => Ok(Direction::Debit),
        "c" | "cr" | "credit" | "贷" => Ok(Direction::Credit),
        other => Err(format!("unknown direction {other:?}, expected D or C")),
    }
}

pub fn parse_entry(raw: &str) -> std::result::Result<EntrySpec, String> {
    let mut parts = raw.splitn(4, ':');
    let direction = parse_direction(parts.next().unwrap_or_default())?;
    let account = parts
        .next()
        .and_then(AccountId::parse)
        .ok_or_else(|| format!("missing account in {raw:?}"))?;
    let amount = parts
        .next()
        .map(str::trim)
        .filter(|amount| !amount.is_empty())
        .ok_or_else(|| format!("missing amount in {raw:?}"))?
        .to_string();
    let memo = parts
        .next()
        .map(str::trim)
        .filter(|memo| !memo.is_empty())
        .map(str::to_string);
    Ok(EntrySpec {
        direction,
        account,
        amount,
        memo,
    })
}

impl AddKind {
    fn draft(&self) -> &DraftArgs {
        match self {
            Self::Expense(args) => &args.draft,
            Self::Income(args) => &args.draft,
            Self::Transfer(args) => &args.draft,
            Self::Advanced(args) => &args.draft,
        }
    }
}

/// Fills `form` from the command line the way the entry screen would.
pub fn fill_form(
    form: &mut TransactionForm,
    kind: &AddKind,
    catalog: &AccountCatalog,
) -> Result<()> {
    let draft = kind.draft();
    if let Some(date) = &draft.date {
        form.set_date(date)?;
    }
    if let Some(description) = &draft.description {
        form.description = description.clone();
    }
    for tag in draft.tags.iter().filter_map(|tag| TagId::parse(tag)) {
        if !form.tags.contains(&tag) {
            form.tags.toggle(tag);
        }
    }

    let picks = match kind {
        AddKind::Expense(args) => {
            form.set_mode(Mode::Expense);
            form.amount = args.amount.clone();
            [(AccountRole::Expense, &args.expense), (AccountRole::Pay, &args.pay)]
        }
        AddKind::Income(args) => {
            form.set_mode(Mode::Income);
            form.amount = args.amount.clone();
            [(AccountRole::Income, &args.income), (AccountRole::Deposit, &args.deposit)]
        }
        AddKind::Transfer(args) => {
            form.set_mode(Mode::Transfer);
            form.amount = args.amount.clone();
            [(AccountRole::From, &args.from), (AccountRole::To, &args.to)]
        }
        AddKind::Advanced(args) => return fill_advanced(form, &args.entries, catalog),
    };
    for (role, raw) in picks {
        if let Some(id) = AccountId::parse(raw) {
            form.select_account(role, &id, catalog)?;
        }
    }
    Ok(())
}

fn fill_advanced(
    form: &mut TransactionForm,
    entries: &[EntrySpec],
    catalog: &AccountCatalog,
) -> Result<()> {
    form.set_mode(Mode::Advanced);
    while form.advanced().len() < entries.len() {
        form.advanced_mut().add_row();
    }
    for (index, spec) in entries.iter().enumerate() {
        if let Some(row) = form.advanced_mut().row_mut(index) {
            row.direction = spec.direction;
            row.amount = spec.amount.clone();
            row.memo = spec.memo.clone().unwrap_or_default();
        }
        form.select_account(AccountRole::Entry(index), &spec.account, catalog)?;
    }
    let balance = form.advanced().balance();
    tracing::debug!(
        "advanced draft: debit {} credit {} balanced={}",
        balance.debit,
        balance.credit,
        balance.balanced
    );
    Ok(())
}

pub async fn run(ctx: &Context, args: &AddArgs) -> Result<()> {
    let book_id = ctx.book_id()?;
    let session = BookSession::load(&ctx.client, book_id.clone()).await?;
    let mut form = TransactionForm::new(ctx.config.now()?).with_book(book_id);
    fill_form(&mut form, &args.kind, session.catalog())?;

    if args.kind.draft().dry_run {
        let transaction = form.build(session.catalog())?;
        print!("{}", render_preview(&transaction, session.catalog()));
        return Ok(());
    }

    let mut submitter = Submitter::default();
    let created = submitter
        .submit(&mut form, session.catalog(), &ctx.client)
        .await?;
    println!("recorded #{}: {}", created.id, created.description);
    Ok(())
}

fn render_preview(transaction: &Transaction, catalog: &AccountCatalog) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}\n",
        ledger::format_transaction_date(&transaction.date),
        transaction.description
    ));
    for entry in &transaction.entries {
        let name = catalog
            .full_name_of(&entry.account_id)
            .unwrap_or_else(|| entry.account_id.to_string());
        out.push_str(&format!(
            "  {} {:<20}{:>12}\n",
            entry.direction.label(),
            name,
            entry.amount.to_string()
        ));
    }
    out
}
