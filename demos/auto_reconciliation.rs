//! Batch auto-reconciliation example

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use reconciliation_core::utils::MemoryStorage;
use reconciliation_core::{
    BatchFilter, Direction, ImportedTransaction, InstallmentPlan, LedgerEntry,
    ReconciliationEngine,
};
use std::str::FromStr;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏦 Reconciliation Core - Batch Auto-Reconciliation Example\n");

    let storage = MemoryStorage::new();

    // 1. Seed ledger entries: a fee receivable plus an installment plan
    println!("📒 Seeding ledger entries...");
    storage.insert_entry(LedgerEntry::new(
        1,
        BigDecimal::from_str("1500.00")?,
        Direction::Credit,
        NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
        "Honorários João Silva".to_string(),
    ));
    println!("  ✓ Entry 1: Honorários João Silva, R$1500.00, due 2024-03-08");

    let plan = InstallmentPlan::new(
        BigDecimal::from_str("4500.00")?,
        3,
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
    );
    for installment in plan.generate()? {
        let id = 10 + installment.number as i64;
        println!(
            "  ✓ Entry {}: Parcela {}/3, R${}, due {}",
            id, installment.number, installment.amount, installment.due_date
        );
        storage.insert_entry(
            LedgerEntry::new(
                id,
                installment.amount,
                Direction::Credit,
                installment.due_date,
                format!("Parcela {}/3 acordo Maria Souza", installment.number),
            )
            .with_obligation(501),
        );
    }
    println!();

    // 2. Seed imported bank transactions
    println!("📥 Importing bank statement...");
    let batch = Uuid::new_v4();
    let statement = [
        (1, "1500.00", 10, "PAGAMENTO HONORARIOS JOAO SILVA"),
        (2, "1500.00", 6, "TED PARCELA 1/3 ACORDO MARIA SOUZA"),
        (3, "87.90", 12, "TARIFA PACOTE SERVICOS"),
    ];
    for (id, value, day, description) in statement {
        println!("  ✓ Transaction {}: {} R${}", id, description, value);
        storage.insert_transaction(ImportedTransaction::new(
            id,
            10,
            BigDecimal::from_str(value)?,
            Direction::Credit,
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            description.to_string(),
            batch,
        ));
    }
    println!();

    // 3. Run the batch
    println!("⚙️  Running auto-reconciliation...");
    let mut engine = ReconciliationEngine::new(storage.clone(), storage.clone());
    let summary = engine.run_auto_reconciliation(&BatchFilter::default()).await?;

    println!("  Processed:        {}", summary.processed);
    println!("  Auto-linked:      {}", summary.linked);
    println!("  Flagged divergent:{}", summary.flagged_divergent);
    println!("  Left pending:     {}", summary.left_pending);
    println!("  Errors:           {}", summary.errors.len());
    println!();

    // 4. Show the resulting links
    println!("🔗 Resulting links:");
    for id in [1, 2, 3] {
        if let Some(tx) = engine.get_transaction(id).await? {
            match tx.linked_entry_id {
                Some(entry_id) => println!(
                    "  Transaction {} → entry {} ({:?}, score {:?})",
                    id, entry_id, tx.status, tx.match_score
                ),
                None => println!("  Transaction {} → unmatched ({:?})", id, tx.status),
            }
        }
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
