use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rk_dice::{DicePool, RollOptions, build_expression};

use super::Context;

pub fn run(ctx: &Context, roll: u32, keep: u32, bonus: i64, json: bool) -> Result<(), String> {
    let before = DicePool::new(roll, keep, bonus);
    let after = before.normalize(&ctx.rule);

    if json {
        let out = serde_json::to_string_pretty(&after).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Rolled", "Kept", "Bonus"]);
    table.add_row(vec![
        "Requested".to_string(),
        before.roll.to_string(),
        before.keep.to_string(),
        before.bonus.to_string(),
    ]);
    table.add_row(vec![
        "Normalized".to_string(),
        after.roll().to_string(),
        after.keep().to_string(),
        after.bonus().to_string(),
    ]);

    println!("{table}");
    println!(
        "  {} {}{}",
        "Formula".bold(),
        build_expression(&after, RollOptions::default()),
        if ctx.rule.little_truths {
            " (Little Truths)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    Ok(())
}
