//! Standalone demo of a notifying list behind a price board.
//!
//! A subscriber prints every notification the way a list view would consume
//! them: one `Reset` for the initial bulk load, then individual `Move`s as the
//! board is re-sorted.
//!
//! Run with: cargo run --example sorting
//! Library logging: RUST_LOG=observable_collections=debug cargo run --example sorting

use observable_collections::{ChangeAction, CollectionChange, ObservableCollection, ObservableQueue};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct Quote {
    symbol: &'static str,
    price_cents: u64,
}

fn describe(change: &CollectionChange<'_, Quote>) -> String {
    match change {
        CollectionChange::Add { item, index } => format!("add {} at {}", item.symbol, index),
        CollectionChange::Remove { item, index } => {
            format!("remove {} from {}", item.symbol, index)
        }
        CollectionChange::Replace {
            old_item,
            new_item,
            index,
        } => format!(
            "replace {} ({}) with {} ({}) at {}",
            old_item.symbol, old_item.price_cents, new_item.symbol, new_item.price_cents, index
        ),
        CollectionChange::Move {
            item,
            old_index,
            new_index,
        } => format!("move {} {} -> {}", item.symbol, old_index, new_index),
        CollectionChange::Reset => "reset (re-read everything)".to_string(),
    }
}

fn print_board(board: &ObservableCollection<Quote>) {
    for (rank, quote) in board.iter().enumerate() {
        println!(
            "  {:>2}. {:<5} {:>4}.{:02}",
            rank + 1,
            quote.symbol,
            quote.price_cents / 100,
            quote.price_cents % 100
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Observable Price Board ===\n");

    let mut board: ObservableCollection<Quote> = ObservableCollection::new();
    board.subscribe(|change| println!("  [view] {}", describe(change)));

    println!("Bulk load:");
    board.add_range([
        Quote { symbol: "ACME", price_cents: 12_550 },
        Quote { symbol: "BOLT", price_cents: 4_210 },
        Quote { symbol: "CRUX", price_cents: 88_000 },
        Quote { symbol: "DYNE", price_cents: 910 },
        Quote { symbol: "EPOC", price_cents: 30_075 },
    ]);
    print_board(&board);

    println!("\nSort by price, highest first:");
    let moves = board.sort_by_key_descending(|quote| quote.price_cents);
    print_board(&board);
    info!(moves, "board sorted");

    println!("\nBOLT rallies:");
    if let Some(index) = board.iter().position(|quote| quote.symbol == "BOLT") {
        let updated = Quote { symbol: "BOLT", price_cents: 95_500 };
        if let Err(err) = board.set(index, updated) {
            info!(%err, "update rejected");
        }
    }
    board.sort_by_key_descending(|quote| quote.price_cents);
    print_board(&board);

    println!("\nSorting again changes nothing:");
    let moves = board.sort_by_key_descending(|quote| quote.price_cents);
    println!("  {moves} moves");

    println!("\nTrade tape (every trade is announced):");
    let mut tape = ObservableQueue::new();
    tape.subscribe(|change: &CollectionChange<'_, &'static str>| {
        if change.action() == ChangeAction::Add {
            println!("  [tape] queued {}", change.item().copied().unwrap_or_default());
        }
    });
    tape.extend(["ACME +100", "CRUX -20", "BOLT +5000"]);
    while let Some(trade) = tape.dequeue() {
        println!("  settled {trade}");
    }
}
