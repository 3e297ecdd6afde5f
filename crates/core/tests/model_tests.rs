// ═══════════════════════════════════════════════════════════════════
// Model Tests — Position arithmetic, serde shapes, defaults
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use assetflow_core::models::account::{Account, TaxType};
use assetflow_core::models::holding::Holding;
use assetflow_core::models::ledger::Ledger;
use assetflow_core::models::position::{Position, SellPolicy};
use assetflow_core::models::settings::Settings;
use assetflow_core::models::tax::{TaxLimits, TaxStats, PENSION_LIMIT};
use assetflow_core::models::transaction::{
    Emotion, StrategyGroup, Transaction, TransactionDraft, TxType,
};
use assetflow_core::storage::backup::LedgerBackup;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Position
// ═══════════════════════════════════════════════════════════════════

mod position {
    use super::*;

    #[test]
    fn buy_recomputes_average() {
        let mut p = Position::new();
        p.buy(10.0, 1_000.0);
        p.buy(10.0, 3_000.0);
        assert_eq!(p.quantity, 20.0);
        assert_eq!(p.invested, 4_000.0);
        assert_eq!(p.avg_price, 200.0);
    }

    #[test]
    fn sell_keeps_average_and_returns_cost_basis() {
        let mut p = Position::new();
        p.buy(10.0, 1_000.0);
        let (sold, cost) = p.sell(4.0, SellPolicy::ClampToHeld);
        assert_eq!(sold, 4.0);
        assert_eq!(cost, 400.0);
        assert_eq!(p.quantity, 6.0);
        assert_eq!(p.invested, 600.0);
        assert_eq!(p.avg_price, 100.0);
    }

    #[test]
    fn clamp_never_goes_below_zero() {
        let mut p = Position::new();
        p.buy(3.0, 300.0);
        let (sold, cost) = p.sell(10.0, SellPolicy::ClampToHeld);
        assert_eq!(sold, 3.0);
        assert_eq!(cost, 300.0);
        assert_eq!(p.quantity, 0.0);
        assert_eq!(p.invested, 0.0);
        assert!(p.is_closed());
    }

    #[test]
    fn as_recorded_can_go_short() {
        let mut p = Position::new();
        p.buy(3.0, 300.0);
        let (sold, cost) = p.sell(10.0, SellPolicy::AsRecorded);
        assert_eq!(sold, 10.0);
        assert_eq!(cost, 1_000.0);
        assert_eq!(p.quantity, -7.0);
        assert!(p.is_closed());
    }

    #[test]
    fn buy_into_short_resets_cost() {
        let mut p = Position::new();
        p.sell(5.0, SellPolicy::AsRecorded);
        p.buy(2.0, 200.0);
        assert_eq!(p.quantity, -3.0);
        assert_eq!(p.invested, 0.0);
        assert_eq!(p.avg_price, 0.0);
    }

    #[test]
    fn selling_from_nothing_costs_nothing() {
        let mut p = Position::new();
        assert_eq!(p.sell(5.0, SellPolicy::AsRecorded), (5.0, 0.0));
        assert_eq!(Position::new().sell(5.0, SellPolicy::ClampToHeld), (0.0, 0.0));
    }

    #[test]
    fn holding_never_reports_negative_cost() {
        let p = Position {
            quantity: 1.0,
            invested: -1e-9,
            avg_price: 0.0,
        };
        assert_eq!(Holding::from_position("X", &p).invested, 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Transactions
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn trade_constructor_derives_amount() {
        let tx = Transaction::trade(TxType::Buy, "a", d(2024, 1, 1), "X", 10.0, 50_000.0);
        assert_eq!(tx.amount, 500_000.0);
        assert_eq!(tx.instrument(), Some("X"));
        assert!(!tx.id.is_empty());
    }

    #[test]
    fn empty_name_is_no_instrument() {
        let mut tx = Transaction::cash(TxType::Dividend, "a", d(2024, 1, 1), 10.0);
        assert_eq!(tx.instrument(), None);
        tx.stock_name = Some(String::new());
        assert_eq!(tx.instrument(), None);
    }

    #[test]
    fn ids_are_unique() {
        let a = Transaction::cash(TxType::Deposit, "a", d(2024, 1, 1), 1.0);
        let b = Transaction::cash(TxType::Deposit, "a", d(2024, 1, 1), 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn trade_kinds() {
        assert!(TxType::Buy.is_trade());
        assert!(TxType::Sell.is_trade());
        assert!(!TxType::Deposit.is_trade());
        assert!(!TxType::Withdrawal.is_trade());
        assert!(!TxType::Dividend.is_trade());
        assert_eq!(TxType::Withdrawal.to_string(), "WITHDRAWAL");
    }

    #[test]
    fn serializes_with_web_field_names() {
        let mut tx = Transaction::trade(TxType::Sell, "acc", d(2024, 3, 9), "X", 2.0, 5.0);
        tx.strategy = Some(StrategyGroup::Event);
        tx.emotion = Some(Emotion::Fear);
        let json = serde_json::to_value(&tx).unwrap();

        assert_eq!(json["type"], "SELL");
        assert_eq!(json["accountId"], "acc");
        assert_eq!(json["stockName"], "X");
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["strategy"], "Event");
        assert_eq!(json["emotion"], "Fear");
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let json = r#"{"id":"t1","accountId":"a1","date":"2024-01-01","type":"DEPOSIT","amount":1000}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.tx_type, TxType::Deposit);
        assert_eq!(tx.amount, 1_000.0);
        assert_eq!(tx.stock_name, None);
        assert_eq!(tx.memo, None);
    }

    #[test]
    fn draft_from_transaction_round_trips_fields() {
        let tx = Transaction::trade(TxType::Buy, "a", d(2024, 1, 1), "X", 3.0, 7.0).with_memo("m");
        let draft = TransactionDraft::from_transaction(&tx);
        assert_eq!(draft.account_id.as_deref(), Some("a"));
        assert_eq!(draft.memo.as_deref(), Some("m"));
        assert_eq!(draft.effective_amount(), 21.0);
    }

    #[test]
    fn cash_draft_amount_is_used_as_is() {
        let draft = TransactionDraft::cash(TxType::Deposit, "a", d(2024, 1, 1), 42.0);
        assert_eq!(draft.effective_amount(), 42.0);
        assert_eq!(TransactionDraft::new(TxType::Buy).effective_amount(), 0.0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Accounts, settings, tax figures
// ═══════════════════════════════════════════════════════════════════

mod account_and_settings {
    use super::*;

    #[test]
    fn tax_type_wire_names() {
        assert_eq!(serde_json::to_string(&TaxType::Irp).unwrap(), "\"IRP\"");
        assert_eq!(serde_json::to_string(&TaxType::General).unwrap(), "\"GENERAL\"");
        assert_eq!(TaxType::Isa.to_string(), "ISA");
    }

    #[test]
    fn account_json_shape() {
        let account = Account::new("Main", "Kiwoom", TaxType::Pension, 100.0);
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["taxType"], "PENSION");
        assert_eq!(json["initialBudget"], 100.0);
    }

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.display_currency, "KRW");
        assert_eq!(settings.tax_limits, TaxLimits::default());
        assert_eq!(settings.tax_limits.pension, PENSION_LIMIT);
    }

    #[test]
    fn tax_stats_wire_names() {
        let stats = TaxStats::empty(&TaxLimits::default());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["combinedPensionIRPUsed"], 0.0);
        assert_eq!(json["combinedLimit"], 9_000_000.0);
        assert_eq!(json["isaLimit"], 20_000_000.0);
    }

    #[test]
    fn limit_checks_are_strict() {
        let mut stats = TaxStats::empty(&TaxLimits::default());
        stats.pension_used = PENSION_LIMIT;
        assert!(!stats.pension_exceeded());
        stats.pension_used += 1.0;
        assert!(stats.pension_exceeded());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    /// A backup as written by the web app, including fields we do not model.
    const WEB_BACKUP: &str = r##"{
        "accounts": [
            {"id": "a1", "name": "Main", "broker": "Kiwoom", "taxType": "ISA",
             "initialBudget": 1000000, "color": "bg-indigo-600"}
        ],
        "transactions": [
            {"id": "t1", "accountId": "a1", "date": "2024-01-02", "type": "DEPOSIT",
             "amount": 1000000, "memo": "Initial capital"},
            {"id": "t2", "accountId": "a1", "date": "2024-01-03", "type": "BUY",
             "stockName": "Samsung", "amount": 700000, "price": 70000, "quantity": 10,
             "strategy": "Routine", "emotion": "Calm"}
        ]
    }"##;

    #[test]
    fn web_backup_loads() {
        let backup = LedgerBackup::from_json(WEB_BACKUP).unwrap();
        assert_eq!(backup.accounts[0].tax_type, TaxType::Isa);
        assert_eq!(backup.transactions[1].quantity, Some(10.0));
        assert_eq!(backup.transactions[1].emotion, Some(Emotion::Calm));
    }

    #[test]
    fn ledger_without_settings_gets_defaults() {
        let ledger: Ledger = serde_json::from_str(WEB_BACKUP).unwrap();
        assert_eq!(ledger.settings, Settings::default());
        assert_eq!(ledger.transactions.len(), 2);
    }

    #[test]
    fn lookups() {
        let ledger: Ledger = serde_json::from_str(WEB_BACKUP).unwrap();
        assert_eq!(ledger.account("a1").map(|a| a.name.as_str()), Some("Main"));
        assert!(ledger.account("zz").is_none());
        assert_eq!(ledger.transaction("t2").map(|t| t.tx_type), Some(TxType::Buy));
        assert_eq!(ledger.transactions_for_account("a1").len(), 2);
        assert!(ledger.transactions_for_account("zz").is_empty());
    }
}
