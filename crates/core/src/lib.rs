pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use log::info;
use models::{
    account::{Account, TaxType},
    analytics::{AccountValue, AllocationSlice},
    holding::Holding,
    journal::{JournalFilter, JournalStats},
    ledger::Ledger,
    settings::Settings,
    summary::PortfolioSummary,
    tax::{TaxLimits, TaxStats},
    transaction::{new_id, Transaction, TransactionDraft, TxType},
};
use providers::traits::{InstrumentLookup, PortfolioAdvisor};
use services::{
    analytics_service::AnalyticsService,
    holdings_service::HoldingsService,
    import_service::{HoldingInput, ImportService},
    journal_service::JournalService,
    summary_service::SummaryService,
    tax_service::TaxService,
    validation_service::ValidationService,
};
use storage::{backup::LedgerBackup, repository::LedgerRepository};

use errors::CoreError;

/// Memo on the DEPOSIT created for a new account's initial budget.
pub const INITIAL_CAPITAL_MEMO: &str = "Initial capital";

/// Main entry point for the AssetFlow core library.
/// Owns the ledger and the services that derive everything from it.
#[must_use]
pub struct AssetFlow {
    ledger: Ledger,
    holdings_service: HoldingsService,
    summary_service: SummaryService,
    tax_service: TaxService,
    validation_service: ValidationService,
    journal_service: JournalService,
    analytics_service: AnalyticsService,
    import_service: ImportService,
    /// Set by every mutation, cleared by load/save.
    dirty: bool,
}

impl std::fmt::Debug for AssetFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetFlow")
            .field("accounts", &self.ledger.accounts.len())
            .field("transactions", &self.ledger.transactions.len())
            .field("settings", &self.ledger.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl AssetFlow {
    /// Start with an empty ledger and default settings.
    pub fn create_new() -> Self {
        Self::build(Ledger::default())
    }

    /// Wrap an already-loaded ledger.
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self::build(ledger)
    }

    /// Load the ledger from a repository.
    pub fn load(repository: &impl LedgerRepository) -> Result<Self, CoreError> {
        Ok(Self::build(repository.load()?))
    }

    /// Save the ledger to a repository and clear the unsaved-changes flag.
    pub fn save(&mut self, repository: &mut impl LedgerRepository) -> Result<(), CoreError> {
        repository.save(&self.ledger)?;
        self.dirty = false;
        Ok(())
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns `true` if the ledger changed since the last load or save.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Accounts ────────────────────────────────────────────────────

    /// Open an account. A positive `initial_budget` is also recorded as a
    /// DEPOSIT dated `today`.
    pub fn add_account(
        &mut self,
        name: &str,
        broker: &str,
        tax_type: TaxType,
        initial_budget: f64,
        today: NaiveDate,
    ) -> Result<String, CoreError> {
        Self::check_account_fields(name, initial_budget)?;

        let account = Account::new(name.trim(), broker.trim(), tax_type, initial_budget);
        let id = account.id.clone();
        self.ledger.accounts.push(account);

        if initial_budget > 0.0 {
            let deposit = Transaction::cash(TxType::Deposit, id.clone(), today, initial_budget)
                .with_memo(INITIAL_CAPITAL_MEMO);
            self.ledger.transactions.push(deposit);
        }

        info!("Added {tax_type} account '{}'", name.trim());
        self.dirty = true;
        Ok(id)
    }

    /// Edit an account's details. Existing transactions are untouched,
    /// including the initial-capital deposit.
    pub fn update_account(
        &mut self,
        account_id: &str,
        name: &str,
        broker: &str,
        tax_type: TaxType,
        initial_budget: f64,
    ) -> Result<(), CoreError> {
        Self::check_account_fields(name, initial_budget)?;

        let account = self
            .ledger
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;

        account.name = name.trim().to_string();
        account.broker = broker.trim().to_string();
        account.tax_type = tax_type;
        account.initial_budget = initial_budget;
        self.dirty = true;
        Ok(())
    }

    /// Delete an account together with every transaction that references it.
    /// Returns how many transactions were removed.
    pub fn delete_account(&mut self, account_id: &str) -> Result<usize, CoreError> {
        let idx = self
            .ledger
            .accounts
            .iter()
            .position(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        let account = self.ledger.accounts.remove(idx);

        let before = self.ledger.transactions.len();
        self.ledger.transactions.retain(|t| t.account_id != account_id);
        let removed = before - self.ledger.transactions.len();

        info!("Deleted account '{}' and {removed} transactions", account.name);
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn get_account(&self, account_id: &str) -> Option<&Account> {
        self.ledger.account(account_id)
    }

    #[must_use]
    pub fn get_accounts(&self) -> &[Account] {
        &self.ledger.accounts
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Problems with a draft, as shown to the user. Empty means acceptable.
    #[must_use]
    pub fn validate_draft(&self, draft: &TransactionDraft) -> Vec<String> {
        self.validation_service.validate(draft)
    }

    /// Validate a draft and append it to the ledger. Returns the new id.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<String, CoreError> {
        let tx = self.validation_service.accept(draft, new_id())?;
        self.require_account(&tx.account_id)?;

        let id = tx.id.clone();
        info!("Recorded {} of {} on {}", tx.tx_type, tx.amount, tx.date);
        self.ledger.transactions.push(tx);
        self.dirty = true;
        Ok(id)
    }

    /// Replace a transaction in place, keeping its id and ledger position.
    pub fn update_transaction(
        &mut self,
        tx_id: &str,
        draft: TransactionDraft,
    ) -> Result<(), CoreError> {
        let idx = self
            .ledger
            .transactions
            .iter()
            .position(|t| t.id == tx_id)
            .ok_or_else(|| CoreError::TransactionNotFound(tx_id.to_string()))?;

        let updated = self.validation_service.accept(draft, tx_id.to_string())?;
        self.require_account(&updated.account_id)?;

        self.ledger.transactions[idx] = updated;
        self.dirty = true;
        Ok(())
    }

    /// Remove a transaction and return it.
    pub fn delete_transaction(&mut self, tx_id: &str) -> Result<Transaction, CoreError> {
        let idx = self
            .ledger
            .transactions
            .iter()
            .position(|t| t.id == tx_id)
            .ok_or_else(|| CoreError::TransactionNotFound(tx_id.to_string()))?;
        let removed = self.ledger.transactions.remove(idx);
        self.dirty = true;
        Ok(removed)
    }

    #[must_use]
    pub fn get_transaction(&self, tx_id: &str) -> Option<&Transaction> {
        self.ledger.transaction(tx_id)
    }

    /// All transactions in ledger (insertion) order.
    #[must_use]
    pub fn get_transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Record holdings the user owned before tracking started as BUYs
    /// dated the day before `today`. All-or-nothing.
    pub fn import_holdings(
        &mut self,
        account_id: &str,
        holdings: &[HoldingInput],
        today: NaiveDate,
    ) -> Result<Vec<String>, CoreError> {
        self.require_account(account_id)?;
        let transactions = self
            .import_service
            .to_transactions(holdings, account_id, today)?;

        let ids = transactions.iter().map(|t| t.id.clone()).collect();
        info!("Imported {} holdings into account {account_id}", transactions.len());
        self.ledger.transactions.extend(transactions);
        self.dirty = true;
        Ok(ids)
    }

    /// [`AssetFlow::import_holdings`] from `name,quantity,avg_price` CSV text.
    pub fn import_holdings_csv(
        &mut self,
        account_id: &str,
        csv: &str,
        today: NaiveDate,
    ) -> Result<Vec<String>, CoreError> {
        let holdings = self.import_service.parse_holdings_csv(csv)?;
        self.import_holdings(account_id, &holdings, today)
    }

    /// Fill the draft's price from an instrument lookup, using the draft's
    /// date when it has one and the latest price otherwise.
    pub async fn quote_draft(
        &self,
        lookup: &dyn InstrumentLookup,
        mut draft: TransactionDraft,
    ) -> Result<TransactionDraft, CoreError> {
        let symbol = draft
            .stock_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CoreError::Validation("Instrument name is required".into()))?
            .to_string();

        let quote = match draft.date {
            Some(date) => lookup.price_on(&symbol, date).await?,
            None => lookup.latest_price(&symbol).await?,
        };
        draft.price = Some(quote.price);
        Ok(draft)
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Current holdings, ordered by instrument name.
    #[must_use]
    pub fn get_holdings(&self) -> Vec<Holding> {
        self.holdings_service.get_holdings(&self.ledger.transactions)
    }

    #[must_use]
    pub fn get_summary(&self) -> PortfolioSummary {
        let holdings = self.get_holdings();
        self.summary_service
            .get_summary(&self.ledger.transactions, &holdings)
    }

    /// Tax-advantaged deposits in `reference_date`'s calendar year.
    #[must_use]
    pub fn get_tax_stats(&self, reference_date: NaiveDate) -> TaxStats {
        self.tax_service.get_tax_stats(
            &self.ledger.transactions,
            &self.ledger.accounts,
            reference_date,
            &self.ledger.settings.tax_limits,
        )
    }

    #[must_use]
    pub fn get_asset_allocation(&self) -> Vec<AllocationSlice> {
        let holdings = self.get_holdings();
        let summary = self
            .summary_service
            .get_summary(&self.ledger.transactions, &holdings);
        self.analytics_service.asset_allocation(&holdings, &summary)
    }

    #[must_use]
    pub fn get_account_distribution(&self) -> Vec<AccountValue> {
        self.analytics_service
            .account_distribution(&self.ledger.accounts, &self.ledger.transactions)
    }

    /// Filtered journal, newest first.
    #[must_use]
    pub fn get_journal(&self, filter: &JournalFilter, today: NaiveDate) -> Vec<&Transaction> {
        self.journal_service
            .filter(&self.ledger.transactions, filter, today)
    }

    #[must_use]
    pub fn get_journal_stats(&self, filter: &JournalFilter, today: NaiveDate) -> JournalStats {
        let entries = self.get_journal(filter, today);
        self.journal_service.stats(&entries)
    }

    /// Ask an advisor about the current holdings.
    pub async fn get_advice(&self, advisor: &dyn PortfolioAdvisor) -> Result<String, CoreError> {
        let holdings = self.get_holdings();
        if holdings.is_empty() {
            return Err(CoreError::Validation("There are no holdings to analyse".into()));
        }
        advisor.advise(&holdings).await
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Set the display currency. Must be a 3-letter code (e.g., KRW, USD).
    pub fn set_display_currency(&mut self, currency: &str) -> Result<(), CoreError> {
        let code = currency.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CoreError::Validation(format!(
                "Invalid currency code '{currency}': must be exactly 3 ASCII letters"
            )));
        }
        self.ledger.settings.display_currency = code;
        self.dirty = true;
        Ok(())
    }

    /// Override the annual contribution limits. Limits must be positive.
    pub fn set_tax_limits(&mut self, limits: TaxLimits) -> Result<(), CoreError> {
        let all_positive = [
            limits.pension,
            limits.irp,
            limits.isa,
            limits.combined_pension_irp,
        ]
        .iter()
        .all(|l| *l > 0.0);
        if !all_positive {
            return Err(CoreError::Validation("Tax limits must be positive".into()));
        }
        self.ledger.settings.tax_limits = limits;
        self.dirty = true;
        Ok(())
    }

    // ── Backup / Reset ──────────────────────────────────────────────

    /// Accounts and transactions as a JSON backup.
    pub fn export_backup(&self) -> Result<String, CoreError> {
        LedgerBackup {
            accounts: self.ledger.accounts.clone(),
            transactions: self.ledger.transactions.clone(),
        }
        .to_json()
    }

    /// Replace accounts and transactions with a JSON backup. Settings stay.
    pub fn import_backup(&mut self, json: &str) -> Result<(), CoreError> {
        let backup = LedgerBackup::from_json(json)?;
        info!(
            "Restored backup with {} accounts and {} transactions",
            backup.accounts.len(),
            backup.transactions.len()
        );
        self.ledger.accounts = backup.accounts;
        self.ledger.transactions = backup.transactions;
        self.dirty = true;
        Ok(())
    }

    /// Drop every account and transaction. Settings stay.
    pub fn reset(&mut self) {
        self.ledger.accounts.clear();
        self.ledger.transactions.clear();
        self.dirty = true;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn require_account(&self, account_id: &str) -> Result<(), CoreError> {
        self.ledger
            .account(account_id)
            .map(|_| ())
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))
    }

    fn check_account_fields(name: &str, initial_budget: f64) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Validation("Account name is required".into()));
        }
        if initial_budget.is_nan() || initial_budget < 0.0 {
            return Err(CoreError::Validation(format!(
                "Initial budget must not be negative (got {initial_budget})"
            )));
        }
        Ok(())
    }

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            holdings_service: HoldingsService::new(),
            summary_service: SummaryService::new(),
            tax_service: TaxService::new(),
            validation_service: ValidationService::new(),
            journal_service: JournalService::new(),
            analytics_service: AnalyticsService::new(),
            import_service: ImportService::new(),
            dirty: false,
        }
    }
}
