pub mod attribute;
pub mod damage;
pub mod normalize;
pub mod ring;
pub mod roll;
pub mod skill;

use clap::Args;
use colored::Colorize;
use rk_dice::{CheckResult, SeededRoller, Target, TenDiceRule, Verdict};

use crate::settings::Settings;

/// Settings resolved against command-line overrides.
pub struct Context {
    pub rule: TenDiceRule,
    pub default_tn: i64,
    pub seed: Option<u64>,
}

impl Context {
    pub fn new(settings: Settings, seed: Option<u64>, little_truths: bool) -> Self {
        let mut rule = settings.ten_dice;
        rule.little_truths |= little_truths;
        Self {
            rule,
            default_tn: settings.default_tn,
            seed: seed.or(settings.seed),
        }
    }

    pub fn roller(&self) -> SeededRoller {
        match self.seed {
            Some(seed) => SeededRoller::new(seed),
            None => SeededRoller::from_os_rng(),
        }
    }
}

/// Target number options shared by every check.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Target number (0 = none)
    #[arg(long)]
    pub tn: Option<i64>,

    /// Raises declared (+5 TN each)
    #[arg(short, long, default_value_t = 0)]
    pub raises: u32,

    /// Wound penalty added to the TN
    #[arg(short, long, default_value_t = 0)]
    pub wounds: i64,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl TargetArgs {
    pub fn target(&self, ctx: &Context) -> Target {
        Target {
            tn: self.tn.unwrap_or(ctx.default_tn),
            raises: self.raises,
            wound_penalty: self.wounds,
        }
    }
}

/// Print a check either as JSON or as a short human-readable report.
fn report(label: &str, result: &CheckResult, json: bool) -> Result<(), String> {
    if json {
        let out = serde_json::to_string_pretty(result).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} {} {}",
        label.bold(),
        result.pool,
        format!("({})", result.expression).dimmed()
    );
    println!("  {:<6} {}", "Dice", result.roll);
    println!("  {:<6} {}", "Total", result.roll.total.to_string().bold());

    let target = &result.target;
    match target.outcome {
        Some(verdict) => {
            let raises = match target.raises {
                0 => String::new(),
                1 => " (1 raise)".to_string(),
                n => format!(" ({n} raises)"),
            };
            let verdict = match verdict {
                Verdict::Success => verdict.to_string().green().bold(),
                Verdict::Failure => verdict.to_string().red().bold(),
            };
            println!("  {:<6} {}{raises}  {verdict}", "TN", target.effective_tn);
        }
        None => println!("  {:<6} {}", "TN", "none".dimmed()),
    }

    Ok(())
}
