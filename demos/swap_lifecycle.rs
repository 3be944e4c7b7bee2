//! Pair lifecycle example: create, deposit, swap, withdraw.
//!
//! Runs every operation against an [`InMemoryCustody`] book so the token
//! movements between wallets and the vault are visible.
//!
//! # Run
//!
//! ```bash
//! cargo run --example swap_lifecycle
//! ```

use hydra_dex::Exchange;
use hydra_dex::config::EngineConfig;
use hydra_dex::custody::InMemoryCustody;
use hydra_dex::domain::{Amount, BasisPoints, Liquidity, ProviderId, SwapDirection, TokenId};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Pair lifecycle (x · y = k) ===\n");

    // ── 1. Identities and starting balances ─────────────────────────────
    let owner = ProviderId::new("deployer");
    let alice = ProviderId::new("alice");
    let bob = ProviderId::new("bob");
    let usdc = TokenId::new("SP000.usdc");
    let wstx = TokenId::new("SP000.wstx");

    let mut book = InMemoryCustody::new();
    for token in [&usdc, &wstx] {
        book.credit(&alice, token, Amount::new(1_000_000))?;
        book.credit(&bob, token, Amount::new(50_000))?;
    }

    // ── 2. Build the exchange and register the pair ─────────────────────
    let mut dex = Exchange::with_custody(EngineConfig::new(owner.clone())?, book)?;
    dex.create_pair(&usdc, &wstx)?;
    println!("Pair {usdc}/{wstx} created, fee {}", dex.protocol_fee_bps());

    // ── 3. Seed liquidity: the first deposit mints √(a·b) units ─────────
    let minted = dex.add_liquidity(
        &usdc,
        &wstx,
        Amount::new(400_000),
        Amount::new(100_000),
        Liquidity::ZERO,
        &alice,
    )?;
    println!("\n--- Add Liquidity ---");
    println!("  Deposited:   400 000 USDC + 100 000 WSTX");
    println!("  LP minted:   {minted}");
    println!("  Price:       {} WSTX per USDC", dex.get_price(&usdc, &wstx)?);

    // ── 4. Preview, then swap USDC for WSTX ─────────────────────────────
    let amount_in = Amount::new(20_000);
    let quote = dex.quote_swap(&usdc, &wstx, SwapDirection::AToB, amount_in, Amount::ZERO)?;
    let out = dex.swap_a_for_b(&usdc, &wstx, amount_in, quote.amount_out(), &bob)?;
    println!("\n--- Swap: sell {amount_in} USDC ---");
    println!("  Fee kept:    {}", quote.fee());
    println!("  Amount out:  {out}");

    // ── 5. Raise the fee and swap back ──────────────────────────────────
    dex.set_protocol_fee_percent(BasisPoints::new(50), &owner)?;
    let back = dex.swap_b_for_a(&usdc, &wstx, Amount::new(2_000), Amount::ZERO, &bob)?;
    println!("\n--- Swap at {}: sell 2 000 WSTX ---", dex.protocol_fee_bps());
    println!("  Amount out:  {back}");

    // ── 6. Withdraw half of the position ────────────────────────────────
    let half = Liquidity::new(minted.get() / 2);
    let withdrawal =
        dex.remove_liquidity(&usdc, &wstx, half, Amount::ZERO, Amount::ZERO, &alice)?;
    println!("\n--- Remove Liquidity ---");
    println!("  Burned:      {half}");
    println!("  Returned:    {} USDC + {} WSTX", withdrawal.amount_a, withdrawal.amount_b);
    if let Some(position) = dex.get_liquidity_provider_data(&usdc, &wstx, &alice) {
        println!("  Remaining:   {}", position.liquidity_provided);
    }

    // ── 7. Reserves always match what the vault holds ───────────────────
    if let Some(view) = dex.get_pair_data(&usdc, &wstx) {
        let vault = dex.config().vault();
        let held_a = dex.custody().balance_of(vault, &usdc);
        let held_b = dex.custody().balance_of(vault, &wstx);
        println!("\n--- Pair state ---");
        println!("  Reserve A:   {} (vault {held_a})", view.reserve_a);
        println!("  Reserve B:   {} (vault {held_b})", view.reserve_b);
        println!("  Total liq:   {}", view.liquidity_total);
    }

    println!("\n=== Done ===");
    Ok(())
}
