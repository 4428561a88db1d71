use anyhow::{bail, Context};
use jester_core::{
    AbilityCatalog, CardIdentity, Event, EventBus, PurchaseOutcome, RankChips, RunError,
    RunPhase, RunState, ScoreSummary, ScoreTables, ScoringEngine,
};
use jester_data::{load_assets, LoadReport};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

mod logger;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;
const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Score,
    Run,
    Help,
}

#[derive(Debug, Clone)]
struct CliOptions {
    command: Command,
    cards: Option<String>,
    held: Option<String>,
    jokers: Vec<String>,
    assets: PathBuf,
    seed: u64,
    json: bool,
    verbose: bool,
}

fn parse_cli_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions {
        command: Command::Help,
        cards: None,
        held: None,
        jokers: Vec::new(),
        assets: PathBuf::from(DEFAULT_ASSETS_DIR),
        seed: DEFAULT_RUN_SEED,
        json: false,
        verbose: false,
    };
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        let value = args.get(idx + 1);
        match arg {
            "score" => options.command = Command::Score,
            "run" => options.command = Command::Run,
            "help" | "--help" | "-h" => options.command = Command::Help,
            "--json" => options.json = true,
            "--verbose" | "-v" => options.verbose = true,
            "--held" | "--assets" | "--jokers" | "--seed" => {
                let Some(value) = value else {
                    bail!("{arg} needs a value");
                };
                match arg {
                    "--held" => options.held = Some(value.clone()),
                    "--assets" => options.assets = PathBuf::from(value),
                    "--jokers" => {
                        options.jokers = value
                            .split(',')
                            .map(str::trim)
                            .filter(|id| !id.is_empty())
                            .map(str::to_string)
                            .collect();
                    }
                    _ => {
                        options.seed = value
                            .parse::<u64>()
                            .with_context(|| format!("invalid seed '{value}'"))?;
                    }
                }
                idx += 1;
            }
            other if other.starts_with('-') => bail!("unknown option {other}"),
            other => {
                if options.command == Command::Score && options.cards.is_none() {
                    options.cards = Some(other.to_string());
                } else {
                    bail!("unexpected argument '{other}'");
                }
            }
        }
        idx += 1;
    }
    Ok(options)
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err:#}");
            print_usage();
            std::process::exit(2);
        }
    };
    logger::init(options.verbose);
    let result = match options.command {
        Command::Score => run_score(&options),
        Command::Run => run_repl(&options),
        Command::Help => {
            print_usage();
            Ok(())
        }
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("usage:");
    println!("  jester-cli score \"10D JD QD KD AD\" [--held \"QH QS\"] [--jokers id,id] [--assets DIR] [--json]");
    println!("  jester-cli run [--seed N] [--assets DIR]");
    println!("options:");
    println!("  -v, --verbose   debug logging on stderr");
}

fn load(options: &CliOptions) -> anyhow::Result<LoadReport> {
    load_assets(&options.assets)
        .with_context(|| format!("load assets from {}", options.assets.display()))
}

/// Parses space or comma separated short notation ("10D", "QH") into cards
/// with ids starting at `first_id`.
fn parse_cards(
    notation: &str,
    chips: &RankChips,
    first_id: u32,
) -> anyhow::Result<Vec<CardIdentity>> {
    let mut cards = Vec::new();
    for token in notation
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
    {
        let Some((suit, rank)) = CardIdentity::parse_short(token) else {
            bail!("invalid card '{token}'");
        };
        let id = first_id + cards.len() as u32;
        cards.push(CardIdentity::new(suit, rank, chips.chips_for(rank)).with_id(id));
    }
    Ok(cards)
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    category: &'static str,
    scoring_cards: Vec<String>,
    #[serde(flatten)]
    summary: &'a ScoreSummary,
}

fn run_score(options: &CliOptions) -> anyhow::Result<()> {
    let Some(notation) = options.cards.as_deref() else {
        bail!("score needs the played cards, e.g. \"10D JD QD KD AD\"");
    };
    let report = load(options)?;
    let selected = parse_cards(notation, &report.rank_chips, 1)?;
    if selected.len() > report.config.run.max_selection {
        log::warn!(
            "{} cards played, the table allows {}",
            selected.len(),
            report.config.run.max_selection
        );
    }
    let first_held = selected.len() as u32 + 1;
    let held = match options.held.as_deref() {
        Some(held) => parse_cards(held, &report.rank_chips, first_held)?,
        None => Vec::new(),
    };
    let board = instantiate_board(&report.catalog, &options.jokers)?;
    let engine = ScoringEngine::new(ScoreTables::from_config(&report.config));
    let summary = engine.resolve_played_hand(&selected, &held, &board);

    if options.json {
        let out = ScoreReport {
            category: summary.hand.category.display_name(),
            scoring_cards: summary
                .hand
                .scoring_cards(&selected)
                .iter()
                .map(ToString::to_string)
                .collect(),
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    print_score(&summary, &selected);
    Ok(())
}

fn instantiate_board(
    catalog: &AbilityCatalog,
    ids: &[String],
) -> anyhow::Result<Vec<jester_core::BonusCardAbility>> {
    let mut board = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(ability) = catalog.instantiate(id) else {
            let known: Vec<&str> = catalog.ids().collect();
            bail!("unknown joker id '{id}' (known: {})", known.join(", "));
        };
        board.push(ability);
    }
    Ok(board)
}

fn print_score(summary: &ScoreSummary, selected: &[CardIdentity]) {
    let scoring: Vec<String> = summary
        .hand
        .scoring_cards(selected)
        .iter()
        .map(ToString::to_string)
        .collect();
    println!(
        "{} [{}]",
        summary.hand.category.display_name(),
        scoring.join(" ")
    );
    for line in &summary.trigger_log {
        println!("  {line}");
    }
    println!("score: {}", summary.final_score);
}

fn run_repl(options: &CliOptions) -> anyhow::Result<()> {
    let report = load(options)?;
    println!(
        "loaded {} jokers ({} content warnings), seed {}",
        report.catalog.len(),
        report.warnings.len(),
        options.seed
    );
    let mut run = RunState::new(
        report.config,
        report.rank_chips,
        report.catalog,
        options.seed,
    );
    let mut events = EventBus::default();
    run.start_round(&mut events)?;
    drain_events(&mut events);
    print_help();
    print_hand(&run);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}> ", phase_short(run.phase()));
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        if matches!(cmd, "quit" | "exit" | "q") {
            break;
        }
        if let Err(err) = execute(&mut run, cmd, &args, &mut events) {
            println!("! {err}");
        }
        drain_events(&mut events);
    }
    Ok(())
}

#[derive(Debug, Error)]
enum ReplError {
    #[error(transparent)]
    Run(#[from] RunError),
    #[error("{0}")]
    Usage(String),
}

fn execute(
    run: &mut RunState,
    cmd: &str,
    args: &[&str],
    events: &mut EventBus,
) -> Result<(), ReplError> {
    match cmd {
        "help" | "h" | "?" => print_help(),
        "hand" => print_hand(run),
        "status" | "s" => print_status(run),
        "jokers" | "j" => print_jokers(run),
        "shop" => print_shop(run),
        "sel" | "select" => {
            let indices = parse_indices(args)?;
            for idx in indices {
                run.toggle_select(idx)?;
            }
            print_hand(run);
        }
        "play" | "p" => {
            select_from_args(run, args)?;
            let played = run.selected_cards();
            let summary = run.play_selected(events)?;
            print_score(&summary, &played);
            if run.phase() == RunPhase::Play {
                print_hand(run);
            }
        }
        "discard" | "d" => {
            select_from_args(run, args)?;
            let summary = run.discard_selected(events)?;
            for line in &summary.trigger_log {
                println!("  {line}");
            }
            print_hand(run);
        }
        "buy" => {
            let offer = parse_single_index(args)?;
            match run.buy_offer(offer, events)? {
                PurchaseOutcome::Bought { slot } => println!("joker placed in slot {slot}"),
                PurchaseOutcome::NeedsReplacement { .. } => {
                    println!("joker slots full: 'replace <slot>' or 'cancel'");
                    print_jokers(run);
                }
            }
        }
        "replace" => {
            let slot = parse_single_index(args)?;
            run.replace_joker(slot, events)?;
            print_jokers(run);
        }
        "cancel" => {
            run.cancel_purchase();
            println!("purchase cancelled");
        }
        "reroll" | "r" => {
            run.reroll_shop(events)?;
            print_shop(run);
        }
        "sell" => {
            let slot = parse_single_index(args)?;
            run.sell_joker(slot, events)?;
        }
        "next" | "n" => {
            run.next_round(events)?;
            print_hand(run);
        }
        other => {
            return Err(ReplError::Usage(format!(
                "unknown command '{other}', try 'help'"
            )))
        }
    }
    Ok(())
}

/// `play 0 2 4` replaces the current selection; bare `play` uses it.
fn select_from_args(run: &mut RunState, args: &[&str]) -> Result<(), ReplError> {
    if args.is_empty() {
        return Ok(());
    }
    let indices = parse_indices(args)?;
    run.clear_selection();
    for idx in indices {
        if !run.selection.contains(&idx) {
            run.toggle_select(idx)?;
        }
    }
    Ok(())
}

fn parse_indices(args: &[&str]) -> Result<Vec<usize>, ReplError> {
    let mut indices = Vec::new();
    for arg in args {
        for part in arg.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            let idx = part
                .parse::<usize>()
                .map_err(|_| ReplError::Usage(format!("invalid index '{part}'")))?;
            indices.push(idx);
        }
    }
    if indices.is_empty() {
        return Err(ReplError::Usage("missing indices".to_string()));
    }
    Ok(indices)
}

fn parse_single_index(args: &[&str]) -> Result<usize, ReplError> {
    match parse_indices(args)?.as_slice() {
        [idx] => Ok(*idx),
        _ => Err(ReplError::Usage("expected exactly one index".to_string())),
    }
}

fn print_help() {
    println!("commands:");
    println!("  hand | status | jokers | shop | help | quit");
    println!("  sel <i..>       toggle cards in the selection");
    println!("  play [i..]      play the selection (or the given cards)");
    println!("  discard [i..]   discard the selection (or the given cards)");
    println!("  buy <i> | replace <slot> | cancel | reroll | sell <slot> | next");
}

fn print_hand(run: &RunState) {
    println!("== Hand == ({} cards, {} in deck)", run.hand.len(), run.deck.remaining());
    for (idx, card) in run.hand.iter().enumerate() {
        let marker = if run.selection.contains(&idx) { "*" } else { " " };
        println!("{marker}{idx:>3}  {:<4} {:>3} chips", card.to_string(), card.base_chips);
    }
}

fn print_status(run: &RunState) {
    let progress = &run.progress;
    println!(
        "round {} | {} | score {}/{} | hands {} | discards {} | ${} | seed {}",
        progress.round,
        phase_short(progress.phase),
        progress.score,
        progress.target,
        progress.hands_left,
        progress.discards_left,
        progress.money,
        run.rng.seed()
    );
}

fn print_jokers(run: &RunState) {
    println!("== Jokers == ({}/{})", run.jokers.len(), run.jokers.capacity());
    for (idx, ability) in run.jokers.iter().enumerate() {
        println!(
            "{idx:>4}  {:<18} sell ${:<3} {}",
            ability.name,
            ability.sell_value(),
            ability.description
        );
    }
}

fn print_shop(run: &RunState) {
    if run.phase() != RunPhase::Shop {
        println!("shop is closed");
        return;
    }
    println!(
        "== Shop == (${}, reroll ${})",
        run.progress.money, run.shop.reroll_cost
    );
    for (idx, ability) in run.shop.offers.iter().enumerate() {
        let pending = if run.shop.pending == Some(idx) { "*" } else { " " };
        println!(
            "{pending}{idx:>3}  {:<18} ${:<3} {}",
            ability.name, ability.cost, ability.description
        );
    }
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("> {}", format_event(&event));
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::RoundStarted {
            round,
            target,
            hands,
            discards,
        } => format!("round {round} started: target {target}, {hands} hands, {discards} discards"),
        Event::HandDealt { count } => format!("dealt {count} cards"),
        Event::HandScored {
            hand,
            chips,
            mult,
            total,
        } => format!("{} scored {chips} x {mult} = {total}", hand.display_name()),
        Event::Discarded { count, dollars } => format!("discarded {count} cards (+${dollars})"),
        Event::RoundCleared {
            score,
            reward,
            money,
        } => format!("round cleared with {score}: +${reward} (${money})"),
        Event::GameOver { score, target } => format!("game over: {score} of {target}"),
        Event::ShopRestocked { offers, money } => {
            format!("shop stocked with {offers} offers (${money})")
        }
        Event::JokerBought { id, cost, money } => format!("bought {id} for ${cost} (${money})"),
        Event::JokerReplaced {
            sold,
            bought,
            cost,
            money,
        } => format!("replaced {sold} with {bought} for ${cost} (${money})"),
        Event::JokerSold { id, value, money } => format!("sold {id} for ${value} (${money})"),
    }
}

fn phase_short(phase: RunPhase) -> &'static str {
    match phase {
        RunPhase::Setup => "setup",
        RunPhase::Play => "play",
        RunPhase::Shop => "shop",
        RunPhase::GameOver => "over",
    }
}
