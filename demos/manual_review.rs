//! Manual reconciliation workflow example: suggestions, link, undo, ignore

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::utils::MemoryStorage;
use reconciliation_core::{
    Direction, ImportedTransaction, LedgerEntry, ManualAction, ReconciliationEngine,
};
use std::str::FromStr;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧑‍💼 Reconciliation Core - Manual Review Example\n");

    let storage = MemoryStorage::new();

    // A transaction the batch would not auto-link: the amount is off by
    // 5% and the description only partially overlaps
    storage.insert_entry(LedgerEntry::new(
        1,
        BigDecimal::from_str("2000.00")?,
        Direction::Credit,
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        "Honorários contratuais Pereira Advogados".to_string(),
    ));
    storage.insert_entry(LedgerEntry::new(
        2,
        BigDecimal::from_str("1900.00")?,
        Direction::Credit,
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        "Reembolso custas processuais".to_string(),
    ));
    storage.insert_transaction(ImportedTransaction::new(
        1,
        10,
        BigDecimal::from_str("1900.00")?,
        Direction::Credit,
        NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
        "TED PEREIRA ADV HONORARIOS".to_string(),
        Uuid::new_v4(),
    ));

    let mut engine = ReconciliationEngine::new(storage.clone(), storage.clone());

    // 1. Ask for suggestions
    println!("💡 Suggestions for transaction 1:");
    for candidate in engine.suggest(1).await? {
        println!(
            "  Entry {} — score {}, mismatches {:?}",
            candidate.entry_id, candidate.score, candidate.mismatches
        );
    }
    println!();

    // 2. The reviewer picks entry 1 despite the amount difference
    println!("✍️  Reviewer ana.souza links transaction 1 to entry 1...");
    let linked = engine
        .reconcile_manual(1, ManualAction::Link(1), "ana.souza")
        .await?;
    println!(
        "  ✓ Status {:?}, kind {:?}, by {:?}",
        linked.status, linked.reconciliation_kind, linked.reconciled_by
    );
    println!();

    // 3. Second thoughts: undo restores the transaction to pending
    println!("↩️  Undoing the link...");
    let undone = engine.unreconcile(1).await?;
    println!(
        "  ✓ Status {:?}, linked entry {:?}",
        undone.status, undone.linked_entry_id
    );
    println!();

    // 4. The reviewer decides it is bank noise after all
    println!("🚫 Marking transaction 1 as not relevant...");
    let ignored = engine
        .reconcile_manual(1, ManualAction::Ignore, "ana.souza")
        .await?;
    println!("  ✓ Status {:?}", ignored.status);

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
