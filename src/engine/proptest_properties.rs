//! Property-based tests using `proptest` for settlement invariants.
//!
//! 1. **Liquidity conservation**: positions always sum to `liquidity_total`.
//! 2. **Bounded payouts**: swaps and withdrawals never exceed reserves.
//! 3. **Monotonic k**: with a non-zero fee, `reserve_a × reserve_b` never
//!    decreases across a swap.
//! 4. **Idempotent failure**: a rejected operation changes nothing.
//! 5. **Exact square root**: bootstrap minting is the floor of `√(a·b)`.

use proptest::prelude::*;

use crate::config::ProtocolFeeConfig;
use crate::domain::{
    Amount, BasisPoints, Liquidity, Pair, PairKey, ProviderId, SwapDirection, TokenId,
};
use crate::math::isqrt_product;

use super::SettlementEngine;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const PROVIDERS: [&str; 3] = ["wallet_1", "wallet_2", "wallet_3"];

fn key() -> PairKey {
    let Ok(k) = PairKey::new(TokenId::new("token-a"), TokenId::new("token-b")) else {
        panic!("distinct tokens");
    };
    k
}

fn owner() -> ProviderId {
    ProviderId::new("deployer")
}

fn engine_with_fee(bps: u16) -> SettlementEngine {
    let Ok(fees) = ProtocolFeeConfig::with_fee(owner(), BasisPoints::new(bps)) else {
        panic!("fee within range");
    };
    SettlementEngine::new(fees)
}

fn seeded(bps: u16, ra: u128, rb: u128) -> (SettlementEngine, Pair) {
    let mut engine = engine_with_fee(bps);
    let mut pair = Pair::empty();
    let Ok(_) = engine.add_liquidity(
        &key(),
        &mut pair,
        Amount::new(ra),
        Amount::new(rb),
        Liquidity::ZERO,
        &ProviderId::new(PROVIDERS[0]),
    ) else {
        panic!("seed deposit");
    };
    (engine, pair)
}

fn k(pair: &Pair) -> u128 {
    pair.reserve_a().get() * pair.reserve_b().get()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// One step of a random operation sequence.
#[derive(Debug, Clone)]
enum Step {
    Add { who: usize, a: u128, b: u128, min: u128 },
    Swap { a_to_b: bool, amount: u128, min_out: u128 },
    Remove { who: usize, liquidity: u128 },
    SetFee { by_owner: bool, bps: u16 },
}

/// Reserve values in range [1_000, 1_000_000_000_000].
fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000_000_000u128
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..PROVIDERS.len(), 0u128..=1_000_000, 0u128..=1_000_000, 0u128..=2_000)
            .prop_map(|(who, a, b, min)| Step::Add { who, a, b, min }),
        (any::<bool>(), 0u128..=500_000, 0u128..=1_000)
            .prop_map(|(a_to_b, amount, min_out)| Step::Swap { a_to_b, amount, min_out }),
        (0..PROVIDERS.len(), 0u128..=400_000)
            .prop_map(|(who, liquidity)| Step::Remove { who, liquidity }),
        (any::<bool>(), 0u16..=1_200).prop_map(|(by_owner, bps)| Step::SetFee { by_owner, bps }),
    ]
}

/// Applies `step`; returns `true` if it committed.
fn apply(engine: &mut SettlementEngine, pair: &mut Pair, step: &Step) -> bool {
    match *step {
        Step::Add { who, a, b, min } => engine
            .add_liquidity(
                &key(),
                pair,
                Amount::new(a),
                Amount::new(b),
                Liquidity::new(min),
                &ProviderId::new(PROVIDERS[who]),
            )
            .is_ok(),
        Step::Swap {
            a_to_b,
            amount,
            min_out,
        } => {
            let direction = if a_to_b {
                SwapDirection::AToB
            } else {
                SwapDirection::BToA
            };
            engine
                .swap(pair, direction, Amount::new(amount), Amount::new(min_out))
                .is_ok()
        }
        Step::Remove { who, liquidity } => engine
            .remove_liquidity(
                &key(),
                pair,
                Liquidity::new(liquidity),
                Amount::ZERO,
                Amount::ZERO,
                &ProviderId::new(PROVIDERS[who]),
            )
            .is_ok(),
        Step::SetFee { by_owner, bps } => {
            let caller = if by_owner {
                owner()
            } else {
                ProviderId::new(PROVIDERS[0])
            };
            engine
                .set_protocol_fee(BasisPoints::new(bps), &caller)
                .is_ok()
        }
    }
}

// ---------------------------------------------------------------------------
// Properties 1 + 4: conservation and idempotent failure over sequences
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_positions_sum_to_total(
        steps in prop::collection::vec(step_strategy(), 1..40),
    ) {
        let mut engine = engine_with_fee(30);
        let mut pair = Pair::empty();

        for step in &steps {
            let _ = apply(&mut engine, &mut pair, step);
            let Ok(sum) = engine.positions().total_for_pair(&key()) else {
                panic!("position sum fits u128");
            };
            prop_assert_eq!(
                sum,
                pair.liquidity_total(),
                "positions diverged from total after {:?}",
                step
            );
        }
    }

    #[test]
    fn prop_failed_step_changes_nothing(
        steps in prop::collection::vec(step_strategy(), 1..40),
    ) {
        let mut engine = engine_with_fee(30);
        let mut pair = Pair::empty();

        for step in &steps {
            let before = (engine.clone(), pair);
            if !apply(&mut engine, &mut pair, step) {
                prop_assert_eq!(&engine, &before.0, "engine mutated by rejected {:?}", step);
                prop_assert_eq!(pair, before.1, "pair mutated by rejected {:?}", step);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Properties 2 + 3: bounded payouts and monotonic k
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_swap_output_below_reserve(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount in 1u128..=u128::from(u64::MAX),
        a_to_b in any::<bool>(),
    ) {
        let (engine, pair) = seeded(30, ra, rb);
        let direction = if a_to_b { SwapDirection::AToB } else { SwapDirection::BToA };
        let (_, reserve_out) = pair.reserves_for(direction);
        if let Ok(q) = engine.quote_swap(&pair, direction, Amount::new(amount), Amount::ZERO) {
            prop_assert!(q.amount_out() < reserve_out);
            prop_assert_eq!(q.amount_in_net().get() + q.fee().get(), amount);
        }
    }

    #[test]
    fn prop_k_never_decreases_with_fee(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        bps in 1u16..=1_000,
        amounts in prop::collection::vec(1u128..=1_000_000_000, 1..8),
    ) {
        let (engine, mut pair) = seeded(bps, ra, rb);
        for (i, amount) in amounts.into_iter().enumerate() {
            let direction = if i % 2 == 0 { SwapDirection::AToB } else { SwapDirection::BToA };
            let k_before = k(&pair);
            if engine.swap(&mut pair, direction, Amount::new(amount), Amount::ZERO).is_ok() {
                prop_assert!(
                    k(&pair) >= k_before,
                    "k decreased: {} < {}",
                    k(&pair),
                    k_before
                );
            }
        }
    }

    #[test]
    fn prop_withdrawal_within_reserves(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        share in 1u128..=1_000,
    ) {
        let (mut engine, mut pair) = seeded(30, ra, rb);
        let total = pair.liquidity_total().get();
        let burn = (total * share / 1_000).max(1);
        let before = pair;
        let Ok(w) = engine.remove_liquidity(
            &key(),
            &mut pair,
            Liquidity::new(burn),
            Amount::ZERO,
            Amount::ZERO,
            &ProviderId::new(PROVIDERS[0]),
        ) else {
            panic!("sole provider may burn up to total");
        };
        prop_assert!(w.amount_a <= before.reserve_a());
        prop_assert!(w.amount_b <= before.reserve_b());
        // Floor rounding never over-pays the exact share.
        prop_assert!(w.amount_a.get() * total <= burn * before.reserve_a().get());
    }
}

// ---------------------------------------------------------------------------
// Property 5: exact integer square root
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_isqrt_is_floor(a in 0u128..=u128::from(u64::MAX), b in 0u128..=u128::from(u64::MAX)) {
        let r = isqrt_product(a, b);
        let product = a * b;
        prop_assert!(r * r <= product);
        prop_assert!((r + 1).checked_mul(r + 1).is_none_or(|next| next > product));
    }
}
