use rk_dice::{SkillRollConfig, perform_check};

use super::{Context, TargetArgs};

pub fn run(
    ctx: &Context,
    trait_value: u32,
    skill_rank: u32,
    emphasis: bool,
    bonus: i64,
    target: &TargetArgs,
) -> Result<(), String> {
    let config = SkillRollConfig {
        trait_value,
        skill_rank,
        emphasis,
        total_bonus: bonus,
        target: target.target(ctx),
        ..SkillRollConfig::default()
    };

    let mut roller = ctx.roller();
    let result = perform_check(&config, &ctx.rule, &mut roller).map_err(|e| e.to_string())?;

    let label = if skill_rank == 0 {
        "Skill roll (unskilled)"
    } else {
        "Skill roll"
    };
    super::report(label, &result, target.json)
}
