//! End-to-end intent builder flows against mock collaborators.
//!
//! Each mock counts its invocations so the fail-fast guarantees can be
//! asserted directly: no submission after a refusal, no balance lookup
//! without authentication, no tracking for market orders.

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use daqdex_sdk::prelude::*;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn daq_token() -> TokenInfo {
    TokenInfo::new("Daq Token", "DAQ", "daqtoken.cnt", 2)
}

// ─── Mock collaborators ──────────────────────────────────────────────────────

struct MockAccount {
    authenticated: bool,
    name: AccountName,
    authority: Authority,
    balance: Decimal,
    balance_calls: AtomicUsize,
}

impl MockAccount {
    fn new(authenticated: bool, balance: Decimal) -> Self {
        Self {
            authenticated,
            name: AccountName::from("alice.dex"),
            authority: Authority::default(),
            balance,
            balance_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AccountContext for MockAccount {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn account_name(&self) -> &AccountName {
        &self.name
    }

    fn authority(&self) -> &Authority {
        &self.authority
    }

    async fn available_balance(
        &self,
        _symbol: &TokenSymbol,
        _contract: &AccountName,
    ) -> Result<Decimal, SdkError> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balance)
    }
}

#[derive(Default)]
struct MockSubmitter {
    calls: AtomicUsize,
    submitted: Mutex<Vec<(AccountName, TransferPayload)>>,
    fail_with: Option<SubmitError>,
}

impl MockSubmitter {
    fn failing(err: SubmitError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::default()
        }
    }

    fn last_payload(&self) -> TransferPayload {
        self.submitted
            .lock()
            .unwrap()
            .last()
            .expect("no payload submitted")
            .1
            .clone()
    }

    fn last_contract(&self) -> AccountName {
        self.submitted.lock().unwrap().last().unwrap().0.clone()
    }
}

#[async_trait]
impl Submitter for MockSubmitter {
    async fn submit(
        &self,
        contract: &AccountName,
        payload: &TransferPayload,
    ) -> Result<SubmitReceipt, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.submitted
            .lock()
            .unwrap()
            .push((contract.clone(), payload.clone()));
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(SubmitReceipt::new("tx-0001")),
        }
    }
}

struct Harness {
    account: Arc<MockAccount>,
    submitter: Arc<MockSubmitter>,
    tracker: Arc<TrackingQueue>,
    builder: IntentBuilder,
}

fn harness(account: MockAccount, submitter: MockSubmitter) -> Harness {
    let account = Arc::new(account);
    let submitter = Arc::new(submitter);
    let tracker = Arc::new(TrackingQueue::new());
    let builder = IntentBuilder::new(
        daq_token(),
        account.clone(),
        submitter.clone(),
        tracker.clone(),
    );
    Harness {
        account,
        submitter,
        tracker,
        builder,
    }
}

fn memo_of(payload: &TransferPayload) -> serde_json::Value {
    serde_json::from_str(&payload.memo).unwrap()
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn buy_limit_success_submits_once_and_tracks() {
    let h = harness(
        MockAccount::new(true, dec("10.0")),
        MockSubmitter::default(),
    );

    let result = h
        .builder
        .submit(OrderForm::BuyLimit {
            price: dec("2.0"),
            quantity: dec("3.0"),
        })
        .await
        .unwrap();

    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Submission::Tracking { .. }));
    assert_eq!(h.tracker.drain(), vec![TxId::from("tx-0001")]);

    // The settlement asset funds a buy, formatted to its 4 decimals.
    let payload = h.submitter.last_payload();
    assert_eq!(h.submitter.last_contract().as_str(), "eosio.token");
    assert_eq!(payload.symbol.as_str(), "EOS");
    assert_eq!(payload.quantity, "6.0000");
    assert_eq!(payload.precision, 4);
    assert_eq!(payload.account_name.as_str(), "alice.dex");
    assert_eq!(payload.authority_level.as_str(), "active");

    let memo = memo_of(&payload);
    assert_eq!(memo["type"], "BUY_LIMIT");
    assert_eq!(memo["symbol"], "DAQ");
    assert_eq!(memo["market"], "EOS");
    assert_eq!(memo["amount"], "6.0000");
}

#[tokio::test]
async fn buy_limit_insufficient_balance_never_submits() {
    let h = harness(
        MockAccount::new(true, dec("1.0")),
        MockSubmitter::default(),
    );

    let err = h
        .builder
        .submit(OrderForm::BuyLimit {
            price: dec("2.0"),
            quantity: dec("3.0"),
        })
        .await
        .unwrap_err();

    match err {
        OrderError::InsufficientBalance {
            symbol,
            required,
            available,
        } => {
            assert_eq!(symbol.as_str(), "EOS");
            assert_eq!(required, dec("6.0"));
            assert_eq!(available, dec("1.0"));
        }
        other => panic!("unexpected: {other}"),
    }
    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 0);
    assert!(h.tracker.is_empty());
}

#[tokio::test]
async fn exact_balance_is_sufficient() {
    let h = harness(
        MockAccount::new(true, dec("6.0")),
        MockSubmitter::default(),
    );

    h.builder
        .submit(OrderForm::BuyLimit {
            price: dec("2.0"),
            quantity: dec("3.0"),
        })
        .await
        .unwrap();

    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthenticated_skips_balance_lookup() {
    let h = harness(
        MockAccount::new(false, dec("100.0")),
        MockSubmitter::default(),
    );

    let err = h
        .builder
        .submit(OrderForm::BuyMarket { total: dec("1.0") })
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::NotAuthenticated));
    assert_eq!(h.account.balance_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_input_refused_before_balance_lookup() {
    let h = harness(
        MockAccount::new(true, dec("100.0")),
        MockSubmitter::default(),
    );

    let err = h
        .builder
        .submit(OrderForm::BuyLimit {
            price: dec("0"),
            quantity: dec("3.0"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidInput(_)));
    assert_eq!(h.account.balance_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn buy_market_completes_without_tracking() {
    let h = harness(
        MockAccount::new(true, dec("10.0")),
        MockSubmitter::default(),
    );

    let result = h
        .builder
        .submit(OrderForm::BuyMarket { total: dec("0.5") })
        .await
        .unwrap();

    assert!(matches!(result, Submission::Completed(_)));
    assert!(h.tracker.is_empty());

    let memo = memo_of(&h.submitter.last_payload());
    assert_eq!(memo["type"], "BUY_MARKET");
    assert_eq!(memo["amount"], "0.5000");
}

#[tokio::test]
async fn sell_market_quantity_only_no_tracking() {
    let h = harness(
        MockAccount::new(true, dec("5.0")),
        MockSubmitter::default(),
    );

    let result = h
        .builder
        .submit(OrderForm::SellMarket {
            quantity: dec("5.0"),
        })
        .await
        .unwrap();

    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Submission::Completed(_)));
    assert!(h.tracker.is_empty());

    // A sell transfers the traded token from its own contract.
    let payload = h.submitter.last_payload();
    assert_eq!(h.submitter.last_contract().as_str(), "daqtoken.cnt");
    assert_eq!(payload.symbol.as_str(), "DAQ");
    assert_eq!(payload.quantity, "5.00");
    assert_eq!(payload.precision, 2);

    let memo = memo_of(&payload);
    assert_eq!(memo["type"], "SELL_MARKET");
    assert_eq!(memo["price"], "0");
    assert_eq!(memo["amount"], "0.00");
}

#[tokio::test]
async fn sell_limit_checks_traded_balance_and_tracks() {
    // quantity 3.0 > balance 2.5 of the traded token
    let h = harness(
        MockAccount::new(true, dec("2.5")),
        MockSubmitter::default(),
    );

    let err = h
        .builder
        .submit(OrderForm::SellLimit {
            price: dec("0.5"),
            quantity: dec("3.0"),
        })
        .await
        .unwrap_err();

    match err {
        OrderError::InsufficientBalance { symbol, .. } => {
            assert_eq!(symbol.as_str(), "DAQ")
        }
        other => panic!("unexpected: {other}"),
    }
    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 0);

    // With enough balance the order submits and is tracked.
    let h = harness(
        MockAccount::new(true, dec("3.0")),
        MockSubmitter::default(),
    );
    h.builder
        .submit(OrderForm::SellLimit {
            price: dec("0.5"),
            quantity: dec("3.0"),
        })
        .await
        .unwrap();
    assert_eq!(h.tracker.len(), 1);

    // Quote side rounds with the traded token's precision (2dp).
    let memo = memo_of(&h.submitter.last_payload());
    assert_eq!(memo["type"], "SELL_LIMIT");
    assert_eq!(memo["amount"], "1.50");
}

#[tokio::test]
async fn user_rejection_maps_to_cancelled_without_tracking() {
    let h = harness(
        MockAccount::new(true, dec("10.0")),
        MockSubmitter::failing(SubmitError::UserRejected),
    );

    let err = h
        .builder
        .submit(OrderForm::BuyLimit {
            price: dec("2.0"),
            quantity: dec("3.0"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::SubmissionCancelled));
    assert!(h.tracker.is_empty());
}

#[tokio::test]
async fn locked_wallet_maps_to_rejected() {
    let h = harness(
        MockAccount::new(true, dec("10.0")),
        MockSubmitter::failing(SubmitError::WalletLocked),
    );

    let err = h
        .builder
        .submit(OrderForm::SellMarket {
            quantity: dec("1.0"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, OrderError::SubmissionRejected));
}

#[tokio::test]
async fn other_gateway_error_keeps_detail() {
    let h = harness(
        MockAccount::new(true, dec("10.0")),
        MockSubmitter::failing(SubmitError::Other {
            code: Some("chain_busy".to_string()),
            message: "try later".to_string(),
        }),
    );

    let err = h
        .builder
        .submit(OrderForm::BuyMarket { total: dec("1.0") })
        .await
        .unwrap_err();

    match err {
        OrderError::SubmissionFailed(msg) => assert_eq!(msg, "try later"),
        other => panic!("unexpected: {other}"),
    }
}

#[tokio::test]
async fn payload_derivation_is_idempotent() {
    let h = harness(
        MockAccount::new(true, dec("10.0")),
        MockSubmitter::default(),
    );

    let form = OrderForm::BuyLimit {
        price: dec("2.0"),
        quantity: dec("3.0"),
    };
    h.builder.submit(form.clone()).await.unwrap();
    h.builder.submit(form).await.unwrap();

    let submitted = h.submitter.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0].1, submitted[1].1);
}

#[tokio::test]
async fn concurrent_submissions_run_independently() {
    let h = harness(
        MockAccount::new(true, dec("10.0")),
        MockSubmitter::default(),
    );

    let buy = h.builder.submit(OrderForm::BuyLimit {
        price: dec("2.0"),
        quantity: dec("3.0"),
    });
    let sell = h.builder.submit(OrderForm::SellMarket {
        quantity: dec("1.0"),
    });

    let (buy, sell) = tokio::join!(buy, sell);
    buy.unwrap();
    sell.unwrap();
    assert_eq!(h.submitter.calls.load(Ordering::SeqCst), 2);
    // Only the limit order was registered for tracking.
    assert_eq!(h.tracker.len(), 1);
}
