use chrono::{NaiveDate, NaiveDateTime};

use ledger::{
    Account, AccountCatalog, AccountId, AccountRole, AccountType, BookId, Direction, Draft,
    EntryRow, ErrorKind, LedgerError, Mode, Money, QuickSelection, TagId, TransactionForm,
    build_advanced, build_entries, resolve_leaf_accounts,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(18, 30, 0)
        .unwrap()
}

fn book_catalog() -> AccountCatalog {
    AccountCatalog::new(vec![
        Account::new(1_i64, "支出", AccountType::Expense),
        Account::new(2_i64, "餐饮", AccountType::Expense).with_parent(1_i64),
        Account::new(3_i64, "房租", AccountType::Expense).with_parent(1_i64),
        Account::new(4_i64, "银行", AccountType::Asset),
        Account::new(5_i64, "储蓄卡", AccountType::Asset).with_parent(4_i64),
        Account::new(6_i64, "现金", AccountType::Asset),
        Account::new(7_i64, "信用卡", AccountType::Liability),
        Account::new(8_i64, "工资", AccountType::Income),
        Account::new(9_i64, "期初", AccountType::Equity),
    ])
    .unwrap()
}

fn advanced_row(account: Option<i64>, direction: Direction, amount: &str) -> EntryRow {
    let mut row = EntryRow::new(direction);
    row.account_id = account.map(AccountId::from);
    row.amount = amount.to_string();
    row
}

#[test]
fn leaf_resolution_excludes_parents_of_the_input() {
    let accounts = vec![
        Account::new(1_i64, "a", AccountType::Expense),
        Account::new(2_i64, "b", AccountType::Expense).with_parent(1_i64),
    ];
    let leaves = resolve_leaf_accounts(&accounts, &[AccountType::Expense]);
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].id, AccountId::from(2_i64));
}

#[test]
fn leaf_resolution_never_returns_a_parent_or_a_duplicate() {
    let catalog = book_catalog();
    let mut accounts = catalog.accounts().to_vec();
    accounts.extend(catalog.accounts().iter().cloned());

    for filter in [
        &[][..],
        &[AccountType::Expense][..],
        &[AccountType::Asset, AccountType::Liability][..],
    ] {
        let leaves = resolve_leaf_accounts(&accounts, filter);
        for leaf in &leaves {
            assert!(accounts.iter().all(|a| a.parent_id.as_ref() != Some(&leaf.id)));
            assert_eq!(leaves.iter().filter(|other| other.id == leaf.id).count(), 1);
        }
        assert_eq!(leaves, resolve_leaf_accounts(&accounts, filter));
    }
}

#[test]
fn grouped_picker_sections() {
    let groups = book_catalog().grouped_leaves(&[AccountType::Asset, AccountType::Liability]);
    let sections: Vec<_> = groups
        .iter()
        .map(|group| {
            (
                group.account_type,
                group.accounts.iter().map(|a| a.name.clone()).collect::<Vec<_>>(),
            )
        })
        .collect();
    assert_eq!(
        sections,
        vec![
            (AccountType::Asset, vec!["储蓄卡".to_string(), "现金".to_string()]),
            (AccountType::Liability, vec!["信用卡".to_string()]),
        ]
    );
}

#[test]
fn expense_builds_two_mirrored_entries() {
    let selection = QuickSelection::Expense {
        expense: Some(AccountId::from(2_i64)),
        pay: Some(AccountId::from(5_i64)),
    };
    let book = BookId::from(1_i64);
    let entries = build_entries(
        Some(&book),
        Draft::Quick {
            amount: "12.5",
            selection: &selection,
        },
    )
    .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].account_id, AccountId::from(2_i64));
    assert_eq!(entries[0].direction, Direction::Debit);
    assert_eq!(entries[0].amount.to_string(), "12.50");
    assert_eq!(entries[1].account_id, AccountId::from(5_i64));
    assert_eq!(entries[1].direction, Direction::Credit);
    assert_eq!(entries[1].amount.to_string(), "12.50");
}

#[test]
fn quick_modes_always_mirror() {
    let catalog = book_catalog();
    let cases = [
        (Mode::Expense, [(AccountRole::Expense, 3_i64), (AccountRole::Pay, 7)]),
        (Mode::Income, [(AccountRole::Income, 8_i64), (AccountRole::Deposit, 6)]),
        (Mode::Transfer, [(AccountRole::From, 5_i64), (AccountRole::To, 7)]),
    ];
    for (mode, picks) in cases {
        for amount in ["1", "0.01", "999999.99", "3,3"] {
            let mut form = TransactionForm::new(now()).with_book(BookId::from(1_i64));
            form.set_mode(mode);
            form.amount = amount.to_string();
            for (role, id) in picks {
                form.select_account(role, &AccountId::from(id), &catalog)
                    .unwrap();
            }
            let tx = form.build(&catalog).unwrap();
            assert_eq!(tx.entries.len(), 2);
            assert_eq!(tx.entries[0].amount, tx.entries[1].amount);
            assert_eq!(tx.entries[0].direction, tx.entries[1].direction.opposite());
        }
    }
}

#[test]
fn unbalanced_advanced_reports_both_sums() {
    let rows = vec![
        advanced_row(Some(3), Direction::Debit, "100.00"),
        advanced_row(Some(7), Direction::Credit, "99.99"),
    ];
    let err = build_advanced(&rows).unwrap_err();
    assert_eq!(
        err,
        LedgerError::Unbalanced {
            debit: Money::new(10_000),
            credit: Money::new(9_999),
        }
    );
    assert_eq!(err.to_string(), "debit 100.00 ≠ credit 99.99");
}

#[test]
fn missing_row_account_wins_over_bad_amounts() {
    let rows = vec![
        advanced_row(Some(3), Direction::Debit, ""),
        advanced_row(Some(7), Direction::Credit, "-1"),
        advanced_row(None, Direction::Debit, "5"),
    ];
    assert_eq!(build_advanced(&rows).unwrap_err().kind(), ErrorKind::MissingAccount);
}

#[test]
fn zero_amount_blocks_submission() {
    let catalog = book_catalog();
    let mut form = TransactionForm::new(now()).with_book(BookId::from(1_i64));
    form.amount = "0".to_string();
    form.select_account(AccountRole::Expense, &AccountId::from(2_i64), &catalog)
        .unwrap();
    form.select_account(AccountRole::Pay, &AccountId::from(6_i64), &catalog)
        .unwrap();
    assert_eq!(form.build(&catalog).unwrap_err().kind(), ErrorKind::InvalidAmount);
}

#[test]
fn no_book_comes_before_everything() {
    let catalog = book_catalog();
    let mut form = TransactionForm::new(now());
    assert_eq!(form.build(&catalog), Err(LedgerError::NoBook));
    form.set_mode(Mode::Advanced);
    assert_eq!(form.build(&catalog), Err(LedgerError::NoBook));
}

#[test]
fn advanced_success_iff_complete_positive_and_balanced() {
    let cases: Vec<(Vec<EntryRow>, Option<ErrorKind>)> = vec![
        (
            vec![
                advanced_row(Some(3), Direction::Debit, "50"),
                advanced_row(Some(2), Direction::Debit, "50"),
                advanced_row(Some(7), Direction::Credit, "100"),
            ],
            None,
        ),
        (
            vec![
                advanced_row(Some(3), Direction::Debit, "50"),
                advanced_row(Some(7), Direction::Credit, "0"),
            ],
            Some(ErrorKind::InvalidAmount),
        ),
        (
            vec![
                advanced_row(Some(3), Direction::Debit, "50"),
                advanced_row(Some(7), Direction::Debit, "50"),
            ],
            Some(ErrorKind::Unbalanced),
        ),
        (
            vec![
                advanced_row(None, Direction::Debit, "50"),
                advanced_row(Some(7), Direction::Credit, "49"),
            ],
            Some(ErrorKind::MissingAccount),
        ),
    ];

    for (rows, expected) in cases {
        let result = build_advanced(&rows);
        assert_eq!(result.as_ref().err().map(LedgerError::kind), expected);
        if let Ok(entries) = result {
            assert_eq!(entries.len(), rows.len());
        }
    }
}

#[test]
fn full_transaction_carries_description_date_and_tags() {
    let catalog = book_catalog();
    let mut form = TransactionForm::new(now()).with_book(BookId::from(1_i64));
    form.amount = "88".to_string();
    form.tags.toggle(TagId::from(10_i64));
    form.tags.toggle(TagId::from(11_i64));
    form.select_account(AccountRole::Expense, &AccountId::from(3_i64), &catalog)
        .unwrap();
    form.select_account(AccountRole::Pay, &AccountId::from(7_i64), &catalog)
        .unwrap();

    let tx = form.build(&catalog).unwrap();
    assert_eq!(tx.description, "房租 - 信用卡");
    assert_eq!(tx.date, now());
    assert_eq!(tx.tag_ids, vec![TagId::from(10_i64), TagId::from(11_i64)]);

    form.description = "  October rent ".to_string();
    form.set_date("2024-10-01 09:00").unwrap();
    let tx = form.build(&catalog).unwrap();
    assert_eq!(tx.description, "October rent");
    assert_eq!(ledger::format_transaction_date(&tx.date), "2024-10-01 09:00");
}

#[test]
fn advanced_form_end_to_end() {
    let catalog = book_catalog();
    let mut form = TransactionForm::new(now()).with_book(BookId::from(1_i64));
    form.set_mode(Mode::Advanced);
    form.advanced_mut().add_row();

    form.select_account(AccountRole::Entry(0), &AccountId::from(2_i64), &catalog)
        .unwrap();
    form.select_account(AccountRole::Entry(1), &AccountId::from(6_i64), &catalog)
        .unwrap();
    form.select_account(AccountRole::Entry(2), &AccountId::from(3_i64), &catalog)
        .unwrap();

    let rows = form.advanced_mut();
    rows.row_mut(0).unwrap().amount = "30".to_string();
    rows.row_mut(1).unwrap().amount = "100".to_string();
    rows.row_mut(2).unwrap().amount = "70".to_string();
    assert!(form.advanced().balance().balanced);

    let tx = form.build(&catalog).unwrap();
    assert_eq!(tx.description, "复式记账");
    assert_eq!(tx.entries.len(), 3);
}
