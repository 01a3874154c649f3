use api_types::{book::Book, stats::AccountBalances, tag::Tag};
use clap::Args;
use ledger::{AccountCatalog, AccountGroup, AccountType, BookSession};

use super::Context;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct AccountsArgs {
    /// Only list accounts of this type (repeatable): asset, liability,
    /// equity, income, expense.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<AccountType>,
}

pub async fn books(ctx: &Context) -> Result<()> {
    let books = ctx.client.books().await?;
    if ctx.json {
        return ctx.print_json(&books);
    }
    print!("{}", render_books(&books, ctx.config.book_id.as_deref()));
    Ok(())
}

pub async fn accounts(ctx: &Context, args: &AccountsArgs) -> Result<()> {
    let session = BookSession::load(&ctx.client, ctx.book_id()?).await?;
    let groups = session.catalog().grouped_leaves(&args.types);
    if ctx.json {
        let leaves: Vec<_> = groups.iter().flat_map(|group| &group.accounts).collect();
        return ctx.print_json(&leaves);
    }
    print!("{}", render_groups(&groups, session.catalog()));
    Ok(())
}

pub async fn tags(ctx: &Context) -> Result<()> {
    let tags = ctx.client.tags(&ctx.book_id()?).await?;
    if ctx.json {
        return ctx.print_json(&tags);
    }
    print!("{}", render_tags(&tags));
    Ok(())
}

pub async fn balances(ctx: &Context) -> Result<()> {
    let book_id = ctx.book_id()?;
    let mut sections = Vec::new();
    for account_type in [AccountType::Asset, AccountType::Liability] {
        sections.push(
            ctx.client
                .account_balances(&book_id, account_type.as_str())
                .await?,
        );
    }
    if ctx.json {
        return ctx.print_json(&sections);
    }
    for section in &sections {
        print!("{}", render_balances(section));
    }
    Ok(())
}

fn render_books(books: &[Book], current: Option<&str>) -> String {
    let mut out = String::new();
    for book in books {
        let id = book.id.to_string();
        let marker = if current == Some(id.as_str()) { "*" } else { " " };
        out.push_str(&format!("{marker} {id:>6}  {}\n", book.name));
    }
    out
}

fn render_groups(groups: &[AccountGroup], catalog: &AccountCatalog) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "{} ({})\n",
            group.account_type.label(),
            group.account_type
        ));
        for account in &group.accounts {
            let name = catalog
                .full_name_of(&account.id)
                .unwrap_or_else(|| account.name.clone());
            out.push_str(&format!("  {:>6}  {name}\n", account.id.to_string()));
        }
    }
    out
}

fn render_tags(tags: &[Tag]) -> String {
    let mut out = String::new();
    for tag in tags {
        out.push_str(&format!("{:>6}  {}\n", tag.id.to_string(), tag.tag_name));
    }
    out
}

fn render_balances(section: &AccountBalances) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}  {:.2}\n", section.account_type, section.total));
    for account in &section.accounts {
        out.push_str(&format!("  {:<16}{:>12.2}\n", account.account_name, account.balance));
    }
    out
}
