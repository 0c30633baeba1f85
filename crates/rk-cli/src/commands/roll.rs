use rk_dice::{Notation, notation, perform_parsed};

use super::{Context, TargetArgs};

pub fn run(ctx: &Context, text: &str, lenient: bool, target: &TargetArgs) -> Result<(), String> {
    let parsed = if lenient {
        notation::parse(text, &ctx.rule)
    } else {
        text.parse::<Notation>()
            .map_err(|e| e.to_string())?
            .resolve(&ctx.rule)
    };

    let mut roller = ctx.roller();
    let result = perform_parsed(&parsed, target.target(ctx), &mut roller)
        .map_err(|e| format!("roll failed: {e}"))?;

    let label = if parsed.pool.is_normalized() {
        "Roll"
    } else {
        "Roll (as written)"
    };
    super::report(label, &result, target.json)
}
