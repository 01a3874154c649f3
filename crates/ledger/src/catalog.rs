//! Account catalog.
//!
//! Turns the flat account list of a book into the set of accounts a
//! transaction may post to: the *leaves* of the hierarchy (accounts that are
//! nobody's parent), optionally restricted to some account types.
//!
//! [`resolve_leaf_accounts`] and [`group_by_type`] are the pure building
//! blocks. [`AccountCatalog`] is the per-session snapshot built once per book
//! load: it indexes the list, keeps a parent → children adjacency map and
//! rejects hierarchies whose parent chains loop.

use std::collections::{HashMap, HashSet};

use crate::{Account, AccountId, AccountType, LedgerError, ResultLedger};

/// Returns the leaf accounts of `accounts` whose type is in `type_filter`
/// (any type when the filter is empty).
///
/// An account is a leaf when no account of the input list names it as
/// `parent_id`. Output keeps input order; duplicate ids keep their first
/// occurrence only.
pub fn resolve_leaf_accounts(accounts: &[Account], type_filter: &[AccountType]) -> Vec<Account> {
    let parent_ids: HashSet<&AccountId> = accounts
        .iter()
        .filter_map(|account| account.parent_id.as_ref())
        .collect();
    let mut seen: HashSet<AccountId> = HashSet::new();

    accounts
        .iter()
        .filter(|account| type_filter.is_empty() || type_filter.contains(&account.account_type))
        .filter(|account| !parent_ids.contains(&account.id))
        .filter(|account| seen.insert(account.id.clone()))
        .cloned()
        .collect()
}

/// Accounts of one type, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountGroup {
    pub account_type: AccountType,
    pub accounts: Vec<Account>,
}

/// Partitions accounts by type for sectioned display.
///
/// Groups appear in the order their type is first met; accounts keep their
/// relative order inside a group.
pub fn group_by_type(accounts: &[Account]) -> Vec<AccountGroup> {
    let mut groups: Vec<AccountGroup> = Vec::new();
    for account in accounts {
        match groups
            .iter_mut()
            .find(|group| group.account_type == account.account_type)
        {
            Some(group) => group.accounts.push(account.clone()),
            None => groups.push(AccountGroup {
                account_type: account.account_type,
                accounts: vec![account.clone()],
            }),
        }
    }
    groups
}

/// Read-only account snapshot of one book.
#[derive(Clone, Debug, Default)]
pub struct AccountCatalog {
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
    children: HashMap<AccountId, Vec<AccountId>>,
}

impl AccountCatalog {
    /// Builds the catalog from a raw directory listing.
    ///
    /// Duplicate ids keep their first occurrence, but any occurrence naming
    /// a parent makes that parent a non-leaf. A parent id that does not
    /// match any account makes that account a root.
    ///
    /// # Errors
    ///
    /// [`LedgerError::CycleDetected`] if following parent links from some
    /// account comes back to an account already on the path.
    pub fn new(accounts: Vec<Account>) -> ResultLedger<Self> {
        // Parent links come from every occurrence, so a dropped duplicate
        // still keeps its parent out of the leaves.
        let mut children: HashMap<AccountId, Vec<AccountId>> = HashMap::new();
        for account in &accounts {
            if let Some(parent_id) = &account.parent_id {
                let siblings = children.entry(parent_id.clone()).or_default();
                if !siblings.contains(&account.id) {
                    siblings.push(account.id.clone());
                }
            }
        }

        let mut deduped = Vec::with_capacity(accounts.len());
        let mut index = HashMap::with_capacity(accounts.len());
        for account in accounts {
            if index.contains_key(&account.id) {
                continue;
            }
            index.insert(account.id.clone(), deduped.len());
            deduped.push(account);
        }

        let catalog = Self {
            accounts: deduped,
            index,
            children,
        };
        catalog.ensure_acyclic()?;
        Ok(catalog)
    }

    fn ensure_acyclic(&self) -> ResultLedger<()> {
        let mut acyclic: HashSet<&AccountId> = HashSet::with_capacity(self.accounts.len());
        for account in &self.accounts {
            let mut path: Vec<&AccountId> = Vec::new();
            let mut on_path: HashSet<&AccountId> = HashSet::new();
            let mut current = Some(&account.id);

            while let Some(id) = current {
                if acyclic.contains(id) {
                    break;
                }
                if !on_path.insert(id) {
                    return Err(LedgerError::CycleDetected(id.clone()));
                }
                path.push(id);
                current = self.get(id).and_then(|a| a.parent_id.as_ref());
            }
            acyclic.extend(path);
        }
        Ok(())
    }

    /// All accounts, deduplicated, in directory order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.index.get(id).map(|&idx| &self.accounts[idx])
    }

    /// Display name of an account, if it is in the catalog.
    pub fn name_of(&self, id: &AccountId) -> Option<&str> {
        self.get(id).map(|account| account.name.as_str())
    }

    pub fn children(&self, id: &AccountId) -> &[AccountId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_leaf(&self, id: &AccountId) -> bool {
        self.children(id).is_empty()
    }

    /// Names from the root down to `id`, joined with `:`.
    pub fn path_of(&self, id: &AccountId) -> Option<String> {
        let mut names = Vec::new();
        let mut current = self.get(id);
        while let Some(account) = current {
            names.push(account.name.as_str());
            current = account.parent_id.as_ref().and_then(|parent| self.get(parent));
        }
        if names.is_empty() {
            return None;
        }
        names.reverse();
        Some(names.join(":"))
    }

    /// Service-provided full name, falling back to the reconstructed path.
    pub fn full_name_of(&self, id: &AccountId) -> Option<String> {
        match self.get(id)?.full_name.as_deref() {
            Some(full) if !full.trim().is_empty() => Some(full.to_string()),
            _ => self.path_of(id),
        }
    }

    /// Leaf accounts eligible for posting; see [`resolve_leaf_accounts`].
    pub fn leaves(&self, type_filter: &[AccountType]) -> Vec<Account> {
        let accepted = |account: &&Account| {
            type_filter.is_empty() || type_filter.contains(&account.account_type)
        };
        self.accounts
            .iter()
            .filter(accepted)
            .filter(|account| self.is_leaf(&account.id))
            .cloned()
            .collect()
    }

    /// Leaf accounts grouped by type, ready for a sectioned picker.
    pub fn grouped_leaves(&self, type_filter: &[AccountType]) -> Vec<AccountGroup> {
        group_by_type(&self.leaves(type_filter))
    }
}
