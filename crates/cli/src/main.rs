mod autoplay;
mod notation;

use anyhow::{bail, Context};
use cardstrike_core::{
    evaluate_hand, AttackPlan, BattleConfig, BattleRound, ChainDecomposer, ChainResult,
    Combatant, DamageCalculator, DamageTables, Event, EventBus, MAX_HAND_CARDS,
};
use cardstrike_data::{builtin_battle_config, load_battle_config};
use notation::{format_cards, parse_cards};
use serde::Serialize;
use std::path::PathBuf;

const DEFAULT_SEED: u64 = 0xC0FFEE;
const DEFAULT_MAX_TURNS: u32 = 100;

const USAGE: &str = "usage:
  cardstrike eval <cards..> [--json]
  cardstrike chain <cards..> [--rest <cards..>] [--max-links N] [--json]
  cardstrike battle [--seed N] [--config DIR] [--max-turns N] [--json]

options:
  --config DIR   read battle.json, hands.json and roster.json from DIR
  --verbose      log debug output to stderr

cards: rank + suit letter (AS, 10H, KD), JK for a joker,
       trailing * marks a chain card, trailing +N adds damage";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Eval,
    Chain,
    Battle,
    Help,
}

#[derive(Debug, Clone)]
struct CliOptions {
    command: Command,
    cards: Vec<String>,
    rest: Vec<String>,
    max_links: Option<usize>,
    seed: u64,
    max_turns: u32,
    config_dir: Option<PathBuf>,
    json: bool,
    verbose: bool,
}

fn parse_cli_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let command = match args.first().map(String::as_str) {
        Some("eval") => Command::Eval,
        Some("chain") => Command::Chain,
        Some("battle") => Command::Battle,
        None | Some("help" | "--help" | "-h") => Command::Help,
        Some(other) => bail!("unknown command '{other}'"),
    };
    let mut options = CliOptions {
        command,
        cards: Vec::new(),
        rest: Vec::new(),
        max_links: None,
        seed: DEFAULT_SEED,
        max_turns: DEFAULT_MAX_TURNS,
        config_dir: None,
        json: false,
        verbose: false,
    };
    let mut in_rest = false;
    let mut idx = 1usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        match arg {
            "--json" => options.json = true,
            "--verbose" | "-v" => options.verbose = true,
            "--rest" => in_rest = true,
            "--max-links" => {
                let value = flag_value(args, idx, arg)?;
                options.max_links = Some(value.parse().context("--max-links expects a number")?);
                idx += 1;
            }
            "--seed" => {
                let value = flag_value(args, idx, arg)?;
                options.seed = value.parse().context("--seed expects a number")?;
                idx += 1;
            }
            "--max-turns" => {
                let value = flag_value(args, idx, arg)?;
                options.max_turns = value.parse().context("--max-turns expects a number")?;
                idx += 1;
            }
            "--config" => {
                options.config_dir = Some(PathBuf::from(flag_value(args, idx, arg)?));
                idx += 1;
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            card if in_rest => options.rest.push(card.to_string()),
            card => options.cards.push(card.to_string()),
        }
        idx += 1;
    }
    Ok(options)
}

fn flag_value<'a>(args: &'a [String], idx: usize, flag: &str) -> anyhow::Result<&'a str> {
    match args.get(idx + 1) {
        Some(value) => Ok(value.as_str()),
        None => bail!("{flag} needs a value"),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    if let Err(err) = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("logger init failed: {err}");
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    init_logging(options.verbose);
    if let Err(err) = run(&options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    match options.command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Eval => run_eval(options),
        Command::Chain => run_chain(options),
        Command::Battle => run_battle(options),
    }
}

fn load_config(options: &CliOptions) -> anyhow::Result<BattleConfig> {
    match &options.config_dir {
        Some(dir) => load_battle_config(dir),
        None => Ok(builtin_battle_config()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("encode output")?;
    println!("{out}");
    Ok(())
}

fn run_eval(options: &CliOptions) -> anyhow::Result<()> {
    let cards = parse_cards(&options.cards, 1)?;
    if cards.is_empty() || cards.len() > MAX_HAND_CARDS {
        bail!("eval takes 1 to {MAX_HAND_CARDS} cards, got {}", cards.len());
    }
    let config = load_config(options)?;
    let calculator = DamageCalculator::new(DamageTables::from_config(&config));
    let hand = evaluate_hand(&cards)?;
    let breakdown = calculator.breakdown(&hand, &cards);
    if options.json {
        #[derive(Serialize)]
        struct EvalReport<'a> {
            hand: &'a cardstrike_core::PokerHandResult,
            breakdown: &'a cardstrike_core::DamageBreakdown,
        }
        return print_json(&EvalReport {
            hand: &hand,
            breakdown: &breakdown,
        });
    }
    let name = config
        .hand_rule(hand.category)
        .map(|rule| rule.display_name.as_str())
        .unwrap_or_else(|| hand.category.display_name());
    println!("cards: {}", format_cards(&hand.cards));
    println!("hand: {name} {:?}", hand.tie_breakers);
    println!(
        "damage: {} (base {}, values {:.2}, modifiers {})",
        breakdown.total, breakdown.base, breakdown.value_bonus, breakdown.modifier_bonus
    );
    Ok(())
}

fn run_chain(options: &CliOptions) -> anyhow::Result<()> {
    let selected = parse_cards(&options.cards, 1)?;
    let rest = parse_cards(&options.rest, selected.len() as u32 + 1)?;
    let config = load_config(options)?;
    let mut rules = config.chain.clone();
    if let Some(max_links) = options.max_links {
        rules.max_links = max_links;
    }
    let calculator = DamageCalculator::new(DamageTables::from_config(&config));
    let target = Combatant::new("target", i64::MAX, 0);
    let result = ChainDecomposer::new(rules).decompose(&selected, &rest, &calculator, &target)?;
    if options.json {
        return print_json(&result);
    }
    print_chain(&result);
    Ok(())
}

fn print_chain(result: &ChainResult) {
    for (idx, link) in result.links.iter().enumerate() {
        let marker = if link.is_primary { " (primary)" } else { "" };
        println!(
            "{:>2}. {:<16} {:>5}  {}{marker}",
            idx + 1,
            link.label,
            link.damage,
            format_cards(&link.cards)
        );
    }
    println!("total: {}", result.total_damage);
}

fn run_battle(options: &CliOptions) -> anyhow::Result<()> {
    let config = load_config(options)?;
    if config.enemies.is_empty() || config.heroes.is_empty() {
        bail!("battle needs at least one hero and one enemy");
    }
    log::info!("starting battle with seed {}", options.seed);
    let mut round = BattleRound::new(config, options.seed);
    let mut events = EventBus::default();
    let turns = autoplay::play_battle(&mut round, &mut events, options.max_turns)?;
    let event_log: Vec<Event> = events.drain().collect();

    if options.json {
        #[derive(Serialize)]
        struct BattleReport<'a> {
            seed: u64,
            phase: cardstrike_core::BattlePhase,
            turns: &'a [autoplay::TurnRecord],
            events: &'a [Event],
            heroes: &'a [Combatant],
            enemies: &'a [Combatant],
        }
        return print_json(&BattleReport {
            seed: options.seed,
            phase: round.phase(),
            turns: &turns,
            events: &event_log,
            heroes: &round.heroes,
            enemies: &round.enemies,
        });
    }

    for record in &turns {
        println!("-- turn {} --", record.turn);
        if let Some(attack) = &record.attack {
            let enemy = &round.enemies[attack.target].name;
            match &attack.plan {
                AttackPlan::Hand { hand, .. } => println!(
                    "played {} ({}) at {enemy}: {} damage",
                    format_cards(&attack.cards_used),
                    hand.category.display_name(),
                    attack.damage_dealt
                ),
                AttackPlan::Chain(chain) => {
                    println!("chain at {enemy}: {} damage", attack.damage_dealt);
                    print_chain(chain);
                }
            }
            if attack.target_defeated {
                println!("{enemy} falls");
            }
        }
        for strike in &record.counters {
            println!(
                "{} hits {} for {}",
                round.enemies[strike.enemy].name, round.heroes[strike.hero].name, strike.damage
            );
        }
    }
    println!("result: {:?} after {} turns", round.phase(), round.turn);
    for hero in &round.heroes {
        println!("  {} {}/{}", hero.name, hero.health, hero.max_health);
    }
    for enemy in &round.enemies {
        println!("  {} {}/{}", enemy.name, enemy.health, enemy.max_health);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn parses_chain_arguments() {
        let options =
            parse_cli_options(&args("chain 2C 8D* --max-links 3 --rest AS AH")).expect("parse");
        assert_eq!(options.command, Command::Chain);
        assert_eq!(options.cards, vec!["2C", "8D*"]);
        assert_eq!(options.rest, vec!["AS", "AH"]);
        assert_eq!(options.max_links, Some(3));
    }

    #[test]
    fn parses_battle_arguments() {
        let options =
            parse_cli_options(&args("battle --seed 42 --config cfg --json")).expect("parse");
        assert_eq!(options.command, Command::Battle);
        assert_eq!(options.seed, 42);
        assert_eq!(options.config_dir, Some(PathBuf::from("cfg")));
        assert!(options.json);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_cli_options(&args("shuffle")).is_err());
        assert!(parse_cli_options(&args("eval AS --frobnicate")).is_err());
        assert!(parse_cli_options(&args("battle --seed")).is_err());
        assert!(parse_cli_options(&args("battle --seed many")).is_err());
    }

    #[test]
    fn no_arguments_means_help() {
        let options = parse_cli_options(&[]).expect("parse");
        assert_eq!(options.command, Command::Help);
    }
}
