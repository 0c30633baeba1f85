use rk_dice::{TraitRollConfig, perform_check};

use super::{Context, TargetArgs};

pub fn run(
    ctx: &Context,
    trait_value: u32,
    void_spent: bool,
    bonus: i64,
    target: &TargetArgs,
) -> Result<(), String> {
    let config = TraitRollConfig {
        trait_value,
        void_spent,
        total_bonus: bonus,
        target: target.target(ctx),
        ..TraitRollConfig::default()
    };

    let mut roller = ctx.roller();
    let result = perform_check(&config, &ctx.rule, &mut roller).map_err(|e| e.to_string())?;
    super::report("Trait roll", &result, target.json)
}
