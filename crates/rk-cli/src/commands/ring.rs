use rk_dice::{RingRollConfig, perform_check};

use super::{Context, TargetArgs};

pub fn run(
    ctx: &Context,
    ring: u32,
    school_rank: u32,
    void_spent: bool,
    bonus: i64,
    target: &TargetArgs,
) -> Result<(), String> {
    let config = RingRollConfig {
        ring,
        school_rank,
        void_spent,
        total_bonus: bonus,
        target: target.target(ctx),
    };

    let mut roller = ctx.roller();
    let result = perform_check(&config, &ctx.rule, &mut roller).map_err(|e| e.to_string())?;
    super::report("Ring roll", &result, target.json)
}
