//! SOL denomination conversion and display helpers.
//!
//! SOL uses 9 decimal places (lamports). 1 SOL = 1_000_000_000 lamports.
use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::network::TransactionSummary;

const DECIMALS: usize = 9;

/// Convert lamports to a human-readable SOL string.
/// Examples: 1_500_000_000 -> "1.500000000", 0 -> "0.000000000"
#[must_use]
pub fn lamports_to_sol(lamports: u64) -> String {
    let whole = lamports / LAMPORTS_PER_SOL;
    let frac = lamports % LAMPORTS_PER_SOL;
    format!("{whole}.{frac:09}")
}

/// Signed variant for balance changes: -5_000 -> "-0.000005000"
#[must_use]
pub fn signed_lamports_to_sol(lamports: i64) -> String {
    let sign = if lamports < 0 { "-" } else { "+" };
    format!("{sign}{}", lamports_to_sol(lamports.unsigned_abs()))
}

/// Format a balance for display.
#[must_use]
pub fn format_balance(lamports: u64) -> String {
    format!("{} SOL", lamports_to_sol(lamports))
}

/// Parse a human-readable SOL amount string into lamports.
/// Accepts: "1.5" -> 1_500_000_000, "1" -> 1_000_000_000, "0.001" -> 1_000_000.
/// Digits past the ninth decimal place round to the nearest lamport.
#[must_use = "parsing result should be checked"]
pub fn parse_sol_amount(input: &str) -> Result<u64, String> {
    let input = input.trim();

    if input.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }

    if input.starts_with('-') {
        return Err("Amount must be positive".to_string());
    }

    let (whole_str, frac_str) = match input.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (input, ""),
    };

    if frac_str.contains('.') {
        return Err("Invalid amount format. Use SOL units like '1.5' or '0.001'.".to_string());
    }
    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(format!("Invalid amount: '{input}'"));
    }
    if !frac_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid fractional part: '{frac_str}'"));
    }

    // ".5" is treated as "0.5"
    let whole: u64 = if whole_str.is_empty() {
        0
    } else {
        whole_str
            .parse()
            .map_err(|_| format!("Invalid whole part: '{whole_str}'"))?
    };

    let (kept, rest) = frac_str.split_at(frac_str.len().min(DECIMALS));
    let mut frac_lamports: u64 = if kept.is_empty() {
        0
    } else {
        // Pad to 9 digits
        format!("{kept:0<9}")
            .parse()
            .map_err(|_| format!("Invalid fractional part: '{frac_str}'"))?
    };
    if rest.starts_with(['5', '6', '7', '8', '9']) {
        frac_lamports += 1;
    }

    whole
        .checked_mul(LAMPORTS_PER_SOL)
        .and_then(|w| w.checked_add(frac_lamports))
        .ok_or_else(|| "Amount too large".to_string())
}

/// Format a list of transactions for display.
#[must_use]
pub fn format_transactions(txs: &[TransactionSummary]) -> String {
    if txs.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<88}  {:>10}  {}\n", "Signature", "Slot", "Status"));
    output.push_str(&format!("{:-<88}  {:->10}  {:-<20}\n", "", "", ""));
    for tx in txs {
        let status = if tx.failed { "failed" } else { "ok" };
        output.push_str(&format!("{:<88}  {:>10}  {status}", tx.signature, tx.slot));
        if let Some(ts) = tx.block_time {
            output.push_str(&format!("  [{ts}]"));
        }
        if let Some(change) = tx.balance_change {
            output.push_str(&format!("  {} SOL", signed_lamports_to_sol(change)));
        }
        if let Some(fee) = tx.fee {
            output.push_str(&format!("  fee {fee}"));
        }
        output.push('\n');
    }
    output
}

/// Format balance as JSON.
#[must_use]
pub fn format_balance_json(address: &str, lamports: u64) -> String {
    serde_json::json!({
        "address": address,
        "balance_lamports": lamports,
        "balance_sol": lamports_to_sol(lamports),
    })
    .to_string()
}

/// Format transactions as a JSON array.
#[must_use]
pub fn format_transactions_json(txs: &[TransactionSummary]) -> String {
    let rows: Vec<serde_json::Value> = txs
        .iter()
        .map(|tx| {
            serde_json::json!({
                "signature": tx.signature,
                "slot": tx.slot,
                "block_time": tx.block_time,
                "failed": tx.failed,
                "fee_lamports": tx.fee,
                "balance_change_lamports": tx.balance_change,
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}
