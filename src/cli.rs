use std::env;

use crate::combat::{aggregate, total_melee_damage, DamageInputs, FinalizedStats};
use crate::data::{load_build, load_pet_constants, load_pet_constants_or_empty, Build, PetConstants};
use crate::data::{LoadError, DEFAULT_PET_CONSTANTS_PATH};

pub const PET_CONSTANTS_ENV: &str = "LOADOUT_PET_CONSTANTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Aggregate,
    Preview,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("aggregate") => Some(Command::Aggregate),
        Some("preview") => Some(Command::Preview),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Aggregate) => handle_aggregate(args),
        Some(Command::Preview) => handle_preview(args),
        None => {
            eprintln!("usage: loadout <aggregate|preview>");
            2
        }
    }
}

/// Value following `flag`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

/// `--pets <path>` wins; otherwise `LOADOUT_PET_CONSTANTS`, then the default path (may be absent).
fn resolve_pet_constants(args: &[String]) -> Result<PetConstants, LoadError> {
    if let Some(path) = flag_value(args, "--pets") {
        return load_pet_constants(path);
    }
    let path =
        env::var(PET_CONSTANTS_ENV).unwrap_or_else(|_| DEFAULT_PET_CONSTANTS_PATH.to_string());
    load_pet_constants_or_empty(path)
}

fn handle_aggregate(args: &[String]) -> i32 {
    let Some(build_path) = args.get(2).filter(|arg| !arg.starts_with("--")) else {
        eprintln!("usage: loadout aggregate <build-file> [--pets <constants-file>] [--table]");
        return 2;
    };
    let as_table = args.iter().any(|arg| arg == "--table");

    let build = match load_build(build_path) {
        Ok(build) => build,
        Err(err) => {
            eprintln!("failed to load build '{build_path}': {err}");
            return 1;
        }
    };
    let constants = match resolve_pet_constants(args) {
        Ok(constants) => constants,
        Err(err) => {
            eprintln!("failed to load pet constants: {err}");
            return 1;
        }
    };

    let finalized = match aggregate(&build, &constants) {
        Ok(finalized) => finalized,
        Err(err) => {
            eprintln!("aggregation failed: {err}");
            return 1;
        }
    };

    if as_table {
        print!("{}", render_table(&build, &finalized));
        return 0;
    }
    match serde_json::to_string_pretty(&finalized) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize stats: {err}");
            1
        }
    }
}

/// Stat rows, then (for a non-empty build) one `slot, item, rarity` row per equipped slot.
pub fn render_table(build: &Build, finalized: &FinalizedStats) -> String {
    let mut out = String::from("stat\tvalue\n");
    for (name, value) in finalized.stats.entries() {
        out.push_str(&format!("{name}\t{value}\n"));
    }
    out.push_str(&format!("ehp\t{}\n", finalized.ehp));
    out.push_str(&format!("total_damage\t{}\n", finalized.total_damage));

    if build.is_empty() {
        return out;
    }
    out.push_str("\nslot\titem\trarity\n");
    for (slot, item) in build.equipped() {
        // Unrecognised tiers are shown as given.
        let rarity = match item.rarity() {
            Some(rarity) => rarity.as_str(),
            None => item.tier.as_deref().unwrap_or_default(),
        };
        out.push_str(&format!("{slot}\t{}\t{rarity}\n", item.name()));
    }
    if let Some(pet) = &build.pet {
        out.push_str(&format!("pet\t{}\t{}\n", pet.lookup_key(), pet.rarity_label()));
    }
    out
}

fn handle_preview(args: &[String]) -> i32 {
    const USAGE: &str =
        "usage: loadout preview <damage> <strength> <crit_damage> [bonus_damage_percent]";

    let damage = parse_f64_arg(args.get(2), "damage");
    let strength = parse_f64_arg(args.get(3), "strength");
    let crit_damage = parse_f64_arg(args.get(4), "crit_damage");
    let bonus = match args.get(5) {
        Some(raw) => parse_f64_arg(Some(raw), "bonus_damage_percent"),
        None => Some(0.0),
    };
    let (Some(damage), Some(strength), Some(crit_damage), Some(bonus_damage_percent)) =
        (damage, strength, crit_damage, bonus)
    else {
        eprintln!("{USAGE}");
        return 2;
    };

    let total_damage = total_melee_damage(DamageInputs {
        damage,
        strength,
        crit_damage,
        bonus_damage_percent,
    });
    println!("{}", serde_json::json!({ "total_damage": total_damage }));
    0
}

/// Finite number or `None` (reported to stderr).
fn parse_f64_arg(raw: Option<&String>, name: &str) -> Option<f64> {
    let raw = raw?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            eprintln!("invalid {name} '{raw}'");
            None
        }
    }
}
