//! Integration tests exercising the exchange from config to settlement.
//!
//! These tests drive the public API end to end: the documented trading
//! scenarios, operations decoded from JSON, configuration loaded from
//! TOML, and token custody including refused transfers.

#![allow(clippy::panic)]

use hydra_dex::Exchange;
use hydra_dex::config::EngineConfig;
use hydra_dex::custody::InMemoryCustody;
use hydra_dex::domain::{
    Amount, BasisPoints, Liquidity, PairView, ProviderId, SwapDirection, TokenId,
};
use hydra_dex::engine::{Operation, Outcome};
use hydra_dex::error::DexError;
use hydra_dex::traits::Custody;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn deployer() -> ProviderId {
    ProviderId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")
}

fn wallet_1() -> ProviderId {
    ProviderId::new("ST1SJ3DTE5DN7X54YDH5D64R3BCB6A2AG2ZQ8YPD5")
}

fn wallet_2() -> ProviderId {
    ProviderId::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG")
}

fn token_a() -> TokenId {
    TokenId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-a")
}

fn token_b() -> TokenId {
    TokenId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-b")
}

fn config() -> EngineConfig {
    let Ok(cfg) = EngineConfig::new(deployer()) else {
        panic!("valid config");
    };
    cfg
}

fn dex_with_pair() -> Exchange {
    init_logging();
    let Ok(mut dex) = Exchange::new(config()) else {
        panic!("exchange built");
    };
    let Ok(()) = dex.create_pair(&token_a(), &token_b()) else {
        panic!("pair created");
    };
    dex
}

fn pair_data<C: Custody>(dex: &Exchange<C>) -> PairView {
    let Some(view) = dex.get_pair_data(&token_a(), &token_b()) else {
        panic!("pair exists");
    };
    view
}

fn add<C: Custody>(dex: &mut Exchange<C>, who: &ProviderId, a: u128, b: u128) -> Liquidity {
    let Ok(minted) = dex.add_liquidity(
        &token_a(),
        &token_b(),
        Amount::new(a),
        Amount::new(b),
        Liquidity::ZERO,
        who,
    ) else {
        panic!("deposit accepted");
    };
    minted
}

// ---------------------------------------------------------------------------
// Documented scenarios
// ---------------------------------------------------------------------------

#[test]
fn first_deposit_mints_geometric_mean() {
    let mut dex = dex_with_pair();
    let r = dex.add_liquidity(
        &token_a(),
        &token_b(),
        Amount::new(1_000),
        Amount::new(1_000),
        Liquidity::new(900),
        &wallet_1(),
    );
    assert_eq!(r, Ok(Liquidity::new(1_000)));
}

#[test]
fn second_deposit_mints_proportionally() {
    let mut dex = dex_with_pair();
    add(&mut dex, &wallet_1(), 1_000, 1_000);
    let r = dex.add_liquidity(
        &token_a(),
        &token_b(),
        Amount::new(500),
        Amount::new(500),
        Liquidity::new(450),
        &wallet_2(),
    );
    assert_eq!(r, Ok(Liquidity::new(500)));

    let view = pair_data(&dex);
    assert_eq!(view.reserve_a, Amount::new(1_500));
    assert_eq!(view.liquidity_total, Liquidity::new(1_500));
    let Some(pos) = dex.get_liquidity_provider_data(&token_a(), &token_b(), &wallet_2()) else {
        panic!("wallet_2 is a provider");
    };
    assert_eq!(pos.liquidity_provided, Liquidity::new(500));
}

#[test]
fn swap_with_default_fee() {
    let mut dex = dex_with_pair();
    add(&mut dex, &wallet_1(), 10_000, 10_000);
    assert_eq!(dex.protocol_fee_bps(), BasisPoints::new(30));

    let Ok(out) = dex.swap_a_for_b(
        &token_a(),
        &token_b(),
        Amount::new(1_000),
        Amount::new(900),
        &wallet_2(),
    ) else {
        panic!("swap accepted");
    };
    assert!(out.get() > 900 && out.get() < 910);
    assert_eq!(out, Amount::new(906));

    let view = pair_data(&dex);
    assert_eq!(view.reserve_a, Amount::new(11_000));
    assert_eq!(view.reserve_b, Amount::new(9_094));
}

#[test]
fn partial_withdrawal_then_overdraw() {
    let mut dex = dex_with_pair();
    add(&mut dex, &wallet_1(), 10_000, 10_000);

    let Ok(w) = dex.remove_liquidity(
        &token_a(),
        &token_b(),
        Liquidity::new(5_000),
        Amount::new(4_900),
        Amount::new(4_900),
        &wallet_1(),
    ) else {
        panic!("withdrawal accepted");
    };
    assert_eq!((w.amount_a, w.amount_b), (Amount::new(5_000), Amount::new(5_000)));

    let r = dex.remove_liquidity(
        &token_a(),
        &token_b(),
        Liquidity::new(6_000),
        Amount::ZERO,
        Amount::ZERO,
        &wallet_1(),
    );
    assert_eq!(r, Err(DexError::InsufficientBalance));
    assert_eq!(r.err().map(|e| e.code()), Some(103));
}

#[test]
fn fee_updates_are_guarded() {
    let mut dex = dex_with_pair();
    let r = dex.set_protocol_fee_percent(BasisPoints::new(1_100), &deployer());
    assert_eq!(r, Err(DexError::FeeTooHigh));
    let r = dex.set_protocol_fee_percent(BasisPoints::new(50), &wallet_1());
    assert_eq!(r, Err(DexError::OwnerOnly));
    assert_eq!(dex.protocol_fee_bps(), BasisPoints::new(30));
}

#[test]
fn pair_creation_rules() {
    let mut dex = dex_with_pair();
    let same = dex.create_pair(&token_a(), &token_a());
    assert_eq!(same.map_err(|e| e.code()), Err(112));
    let again = dex.create_pair(&token_a(), &token_b());
    assert_eq!(again.map_err(|e| e.code()), Err(110));
}

#[test]
fn same_token_operations_find_no_pair() {
    let mut dex = dex_with_pair();
    let (a, w) = (token_a(), wallet_1());
    let (one, zero) = (Amount::new(1), Amount::ZERO);

    let swap = dex.swap_a_for_b(&a, &a, one, zero, &w);
    assert_eq!(swap.map_err(|e| e.code()), Err(111));
    let swap_back = dex.swap_b_for_a(&a, &a, one, zero, &w);
    assert_eq!(swap_back.map_err(|e| e.code()), Err(111));
    let deposit = dex.add_liquidity(&a, &a, one, one, Liquidity::ZERO, &w);
    assert_eq!(deposit.map_err(|e| e.code()), Err(111));
    let withdrawal = dex.remove_liquidity(&a, &a, Liquidity::new(1), zero, zero, &w);
    assert_eq!(withdrawal.map_err(|e| e.code()), Err(111));
    assert_eq!(dex.get_price(&a, &a).map_err(|e| e.code()), Err(111));
    let quote = dex.quote_swap(&a, &a, SwapDirection::AToB, one, zero);
    assert_eq!(quote.map(|_| ()), Err(DexError::PairNotFound));
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn price_queries() {
    let mut dex = dex_with_pair();
    assert_eq!(dex.get_price(&token_a(), &token_b()), Err(DexError::ZeroLiquidity));
    assert_eq!(dex.get_price(&token_b(), &token_a()), Err(DexError::PairNotFound));

    add(&mut dex, &wallet_1(), 1_000, 5_500);
    assert_eq!(dex.get_price(&token_a(), &token_b()), Ok(5));
}

#[test]
fn quote_previews_without_mutation() {
    let mut dex = dex_with_pair();
    add(&mut dex, &wallet_1(), 10_000, 10_000);
    let before = pair_data(&dex);

    let Ok(q) = dex.quote_swap(
        &token_a(),
        &token_b(),
        SwapDirection::BToA,
        Amount::new(1_000),
        Amount::ZERO,
    ) else {
        panic!("quote");
    };
    assert_eq!(q.fee(), Amount::new(3));
    assert_eq!(q.amount_out(), Amount::new(906));
    assert_eq!(pair_data(&dex), before);
}

// ---------------------------------------------------------------------------
// Full lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_drains_to_dust() {
    let mut dex = dex_with_pair();
    let l1 = add(&mut dex, &wallet_1(), 40_000, 10_000);
    let l2 = add(&mut dex, &wallet_2(), 4_000, 1_000);
    assert_eq!(l1, Liquidity::new(20_000));
    assert_eq!(l2, Liquidity::new(2_000));

    let Ok(()) = dex.set_protocol_fee_percent(BasisPoints::new(100), &deployer()) else {
        panic!("owner");
    };
    for i in 0..10u128 {
        let amount = Amount::new(500 + i * 37);
        let r = if i % 2 == 0 {
            dex.swap_a_for_b(&token_a(), &token_b(), amount, Amount::ZERO, &wallet_2())
        } else {
            dex.swap_b_for_a(&token_a(), &token_b(), amount, Amount::ZERO, &wallet_2())
        };
        assert!(r.is_ok());
    }

    for (who, units) in [(wallet_2(), l2), (wallet_1(), l1)] {
        let Ok(_) = dex.remove_liquidity(
            &token_a(),
            &token_b(),
            units,
            Amount::ZERO,
            Amount::ZERO,
            &who,
        ) else {
            panic!("full exit");
        };
        let Some(pos) = dex.get_liquidity_provider_data(&token_a(), &token_b(), &who) else {
            panic!("position retained");
        };
        assert!(pos.liquidity_provided.is_zero());
    }

    let view = pair_data(&dex);
    assert!(view.liquidity_total.is_zero());
    // The last redeemer takes everything left in the pool.
    assert!(view.reserve_a.is_zero());
    assert!(view.reserve_b.is_zero());
}

// ---------------------------------------------------------------------------
// Operations from JSON
// ---------------------------------------------------------------------------

#[test]
fn json_operation_batch() {
    let mut dex = dex_with_pair();
    let batch = r#"[
        {"add_liquidity": {"token_a": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-a",
                           "token_b": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-b",
                           "amount_a": 10000, "amount_b": 10000, "min_liquidity": 9000}},
        {"swap_b_for_a": {"token_a": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-a",
                          "token_b": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-b",
                          "amount_in": 1000, "min_amount_out": 900}},
        {"remove_liquidity": {"token_a": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-a",
                              "token_b": "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.token-b",
                              "liquidity": 5000, "min_amount_a": 0, "min_amount_b": 0}}
    ]"#;
    let Ok(ops) = serde_json::from_str::<Vec<Operation>>(batch) else {
        panic!("valid batch");
    };

    let outcomes: Vec<Outcome> = ops
        .into_iter()
        .map(|op| {
            let Ok(outcome) = dex.apply(&wallet_1(), op) else {
                panic!("operation accepted");
            };
            outcome
        })
        .collect();

    assert_eq!(outcomes[0], Outcome::LiquidityMinted(Liquidity::new(10_000)));
    assert_eq!(outcomes[1], Outcome::Swapped(Amount::new(906)));
    let Outcome::LiquidityRemoved(w) = outcomes[2] else {
        panic!("expected withdrawal");
    };
    // Reserves were 9_094 / 11_000 at redemption time.
    assert_eq!(w.amount_a, Amount::new(4_547));
    assert_eq!(w.amount_b, Amount::new(5_500));
}

#[test]
fn apply_reports_codes() {
    let mut dex = dex_with_pair();
    let op = Operation::CreatePair {
        token_a: token_a(),
        token_b: token_b(),
    };
    let Err(e) = dex.apply(&wallet_1(), op) else {
        panic!("duplicate pair");
    };
    assert_eq!(e.code(), 110);

    let op = Operation::SwapAForB {
        token_a: token_a(),
        token_b: token_b(),
        amount_in: Amount::new(10),
        min_amount_out: Amount::ZERO,
    };
    assert_eq!(dex.apply(&wallet_1(), op), Err(DexError::ZeroLiquidity));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn toml_config_sets_initial_fee() {
    init_logging();
    let src = r#"
        owner = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
        protocol_fee_bps = 0
        vault = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.dex"
    "#;
    let Ok(cfg) = EngineConfig::from_toml_str(src) else {
        panic!("valid TOML");
    };
    let Ok(mut dex) = Exchange::new(cfg) else {
        panic!("exchange built");
    };
    let Ok(()) = dex.create_pair(&token_a(), &token_b()) else {
        panic!("pair");
    };
    add(&mut dex, &wallet_1(), 10_000, 10_000);
    let r = dex.swap_a_for_b(&token_a(), &token_b(), Amount::new(1_000), Amount::ZERO, &wallet_2());
    assert_eq!(r, Ok(Amount::new(909)));
}

#[test]
fn invalid_toml_is_rejected() {
    let Err(e) = EngineConfig::from_toml_str("owner = 42") else {
        panic!("expected Err");
    };
    assert_eq!(e.code(), 116);
    let Err(e) = EngineConfig::from_toml_str("owner = \"x\"\nprotocol_fee_bps = 1001") else {
        panic!("expected Err");
    };
    assert_eq!(e, DexError::FeeTooHigh);
}

// ---------------------------------------------------------------------------
// Custody
// ---------------------------------------------------------------------------

fn funded_dex(balance: u128) -> Exchange<InMemoryCustody> {
    init_logging();
    let mut book = InMemoryCustody::new();
    for who in [wallet_1(), wallet_2()] {
        for token in [token_a(), token_b()] {
            let Ok(()) = book.credit(&who, &token, Amount::new(balance)) else {
                panic!("credit");
            };
        }
    }
    let Ok(mut dex) = Exchange::with_custody(config(), book) else {
        panic!("exchange built");
    };
    let Ok(()) = dex.create_pair(&token_a(), &token_b()) else {
        panic!("pair");
    };
    dex
}

#[test]
fn vault_balances_track_reserves() {
    let mut dex = funded_dex(50_000);
    add(&mut dex, &wallet_1(), 10_000, 10_000);
    let amount = Amount::new(2_000);
    let Ok(_) = dex.swap_a_for_b(&token_a(), &token_b(), amount, Amount::ZERO, &wallet_2()) else {
        panic!("swap");
    };
    let Ok(_) = dex.remove_liquidity(
        &token_a(),
        &token_b(),
        Liquidity::new(2_500),
        Amount::ZERO,
        Amount::ZERO,
        &wallet_1(),
    ) else {
        panic!("withdrawal");
    };

    let vault = dex.config().vault().clone();
    let view = pair_data(&dex);
    assert_eq!(dex.custody().balance_of(&vault, &token_a()), view.reserve_a);
    assert_eq!(dex.custody().balance_of(&vault, &token_b()), view.reserve_b);
}

#[test]
fn unfunded_swap_is_refused_atomically() {
    let mut dex = funded_dex(10_000);
    add(&mut dex, &wallet_1(), 10_000, 10_000);
    let before = pair_data(&dex);

    let amount = Amount::new(10_001);
    let r = dex.swap_a_for_b(&token_a(), &token_b(), amount, Amount::ZERO, &wallet_2());
    assert_eq!(r.map_err(|e| e.code()), Err(115));
    assert_eq!(pair_data(&dex), before);
    assert_eq!(dex.custody().balance_of(&wallet_2(), &token_a()), Amount::new(10_000));
}

/// Custody that accepts deposits but refuses to pay out.
#[derive(Debug, Default)]
struct FrozenPayouts {
    book: InMemoryCustody,
    frozen: bool,
    refunds_frozen: bool,
}

impl Custody for FrozenPayouts {
    fn collect(
        &mut self,
        from: &ProviderId,
        vault: &ProviderId,
        legs: &[(TokenId, Amount)],
    ) -> Result<(), DexError> {
        self.book.collect(from, vault, legs)
    }

    fn release(
        &mut self,
        vault: &ProviderId,
        to: &ProviderId,
        legs: &[(TokenId, Amount)],
    ) -> Result<(), DexError> {
        if self.refunds_frozen {
            return Err(DexError::TransferFailed("vault frozen"));
        }
        // Refunds of the exact collected leg still go through.
        if self.frozen && legs.len() == 1 && legs[0].0 == token_b() {
            return Err(DexError::TransferFailed("payouts frozen"));
        }
        self.book.release(vault, to, legs)
    }
}

#[test]
fn refused_payout_refunds_input() {
    init_logging();
    let mut custody = FrozenPayouts::default();
    for token in [token_a(), token_b()] {
        let Ok(()) = custody.book.credit(&wallet_1(), &token, Amount::new(20_000)) else {
            panic!("credit");
        };
    }
    let Ok(mut dex) = Exchange::with_custody(config(), custody) else {
        panic!("exchange built");
    };
    let Ok(()) = dex.create_pair(&token_a(), &token_b()) else {
        panic!("pair");
    };
    add(&mut dex, &wallet_1(), 10_000, 10_000);
    let before = pair_data(&dex);

    dex.custody_mut().frozen = true;
    let r = dex.swap_a_for_b(&token_a(), &token_b(), Amount::new(1_000), Amount::ZERO, &wallet_1());
    assert_eq!(r, Err(DexError::TransferFailed("payouts frozen")));
    assert_eq!(pair_data(&dex), before);
    assert_eq!(dex.custody().book.balance_of(&wallet_1(), &token_a()), Amount::new(10_000));
    assert_eq!(dex.custody().book.balance_of(&wallet_1(), &token_b()), Amount::new(10_000));
}

#[test]
fn failed_refund_is_reported() {
    init_logging();
    let mut custody = FrozenPayouts::default();
    for token in [token_a(), token_b()] {
        let Ok(()) = custody.book.credit(&wallet_1(), &token, Amount::new(20_000)) else {
            panic!("credit");
        };
    }
    let Ok(mut dex) = Exchange::with_custody(config(), custody) else {
        panic!("exchange built");
    };
    let Ok(()) = dex.create_pair(&token_a(), &token_b()) else {
        panic!("pair");
    };
    add(&mut dex, &wallet_1(), 10_000, 10_000);
    let before = pair_data(&dex);

    dex.custody_mut().refunds_frozen = true;
    let r = dex.swap_a_for_b(&token_a(), &token_b(), Amount::new(1_000), Amount::ZERO, &wallet_1());
    assert_eq!(
        r,
        Err(DexError::TransferFailed("output release refused and input refund failed"))
    );
    assert_eq!(pair_data(&dex), before);
    // The input stays in the vault; the error tells the caller so.
    let vault = dex.config().vault().clone();
    assert_eq!(dex.custody().book.balance_of(&wallet_1(), &token_a()), Amount::new(9_000));
    assert_eq!(dex.custody().book.balance_of(&vault, &token_a()), Amount::new(11_000));
}
