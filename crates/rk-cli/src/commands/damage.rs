use rk_dice::{DamageRollConfig, Notation, perform_check};

use super::Context;

pub fn run(ctx: &Context, strength: u32, weapon: &str, bonus: i64, json: bool) -> Result<(), String> {
    let rating: Notation = weapon
        .parse()
        .map_err(|e| format!("bad weapon rating: {e}"))?;

    let config = DamageRollConfig {
        strength,
        weapon_roll: rating.pool.roll,
        weapon_keep: rating.pool.keep,
        bonus: bonus.saturating_add(rating.pool.bonus),
    };

    let mut roller = ctx.roller();
    let result = perform_check(&config, &ctx.rule, &mut roller).map_err(|e| e.to_string())?;
    super::report("Damage", &result, json)
}
