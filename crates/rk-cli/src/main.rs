//! Command-line roller for roll-and-keep d10 pools.

mod commands;
mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Context, TargetArgs};
use settings::Settings;

#[derive(Parser)]
#[command(
    name = "rk",
    about = "rk — roll-and-keep dice with the Ten Dice Rule",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (default: ./rk.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable the Little Truths exception
    #[arg(long, global = true)]
    little_truths: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a pool written in compact notation, e.g. 6k3, 8k4x10+5, 4k2e
    Roll {
        /// Roll notation: <roll>k<keep>[x<explode>][+<bonus>][u|e]
        notation: String,

        /// Read malformed notation leniently instead of rejecting it
        #[arg(long)]
        lenient: bool,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Show how the Ten Dice Rule reshapes a pool
    Normalize {
        /// Dice rolled
        roll: u32,

        /// Dice kept
        keep: u32,

        /// Flat bonus
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Roll a trait + skill check
    Skill {
        /// Governing trait
        #[arg(long = "trait")]
        trait_value: u32,

        /// Skill rank (0 = unskilled)
        #[arg(long, default_value_t = 0)]
        skill: u32,

        /// An emphasis applies
        #[arg(short, long)]
        emphasis: bool,

        /// Flat bonus
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i64,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Roll a bare trait
    Trait {
        /// Trait value
        #[arg(long = "trait")]
        trait_value: u32,

        /// Spend a Void point (+1k1)
        #[arg(long = "void")]
        void_spent: bool,

        /// Flat bonus
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i64,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Roll a ring, adding school rank to the rolled dice
    Ring {
        /// Ring value
        #[arg(long)]
        ring: u32,

        /// School rank
        #[arg(long, default_value_t = 0)]
        school_rank: u32,

        /// Spend a Void point (+1k1)
        #[arg(long = "void")]
        void_spent: bool,

        /// Flat bonus
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i64,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Roll weapon damage
    Damage {
        /// Wielder's Strength
        #[arg(long)]
        strength: u32,

        /// Weapon damage rating, e.g. 3k2
        #[arg(long)]
        weapon: String,

        /// Flat damage bonus
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rk=warn,rk_dice=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = Settings::load(cli.config.as_deref())
        .map_err(|e| e.to_string())
        .map(|settings| {
            tracing::debug!(?settings, "settings loaded");
            Context::new(settings, cli.seed, cli.little_truths)
        })
        .and_then(|ctx| match cli.command {
            Commands::Roll {
                notation,
                lenient,
                target,
            } => commands::roll::run(&ctx, &notation, lenient, &target),
            Commands::Normalize {
                roll,
                keep,
                bonus,
                json,
            } => commands::normalize::run(&ctx, roll, keep, bonus, json),
            Commands::Skill {
                trait_value,
                skill,
                emphasis,
                bonus,
                target,
            } => commands::skill::run(&ctx, trait_value, skill, emphasis, bonus, &target),
            Commands::Trait {
                trait_value,
                void_spent,
                bonus,
                target,
            } => commands::attribute::run(&ctx, trait_value, void_spent, bonus, &target),
            Commands::Ring {
                ring,
                school_rank,
                void_spent,
                bonus,
                target,
            } => commands::ring::run(&ctx, ring, school_rank, void_spent, bonus, &target),
            Commands::Damage {
                strength,
                weapon,
                bonus,
                json,
            } => commands::damage::run(&ctx, strength, &weapon, bonus, json),
        });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
