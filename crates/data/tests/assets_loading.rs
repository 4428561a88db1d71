use jester_core::{
    resolve_played_hand, CardIdentity, EffectVariant, EventBus, HandCategory, Rank, RunPhase,
    RunState, Suit,
};
use jester_data::{load_assets, load_game_config, LoadReport};
use std::fs;
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn shipped() -> LoadReport {
    load_assets(&assets_root()).expect("load assets")
}

fn card(report: &LoadReport, short: &str) -> CardIdentity {
    let (suit, rank) = CardIdentity::parse_short(short).expect("card notation");
    CardIdentity::new(suit, rank, report.rank_chips.chips_for(rank))
}

#[test]
fn shipped_rank_table_is_complete() {
    let report = shipped();
    assert!(report.rank_chips.missing().is_empty());
    assert_eq!(report.rank_chips.get(Rank::Ten), Some(10));
    assert_eq!(report.rank_chips.get(Rank::Ace), Some(11));
}

#[test]
fn shipped_catalog_builds_every_variant() {
    let report = shipped();
    let effect = |id: &str| report.catalog.get(id).and_then(|ability| ability.effect);
    assert_eq!(effect("j_joker"), Some(EffectVariant::FlatMult { amount: 4 }));
    assert_eq!(
        effect("j_greedy_joker"),
        Some(EffectVariant::SuitConditionalMult {
            amount: 3,
            suit: Suit::Diamonds
        })
    );
    assert_eq!(effect("j_abstract"), Some(EffectVariant::CountScaledMult { per_unit: 3 }));
    assert_eq!(
        effect("j_mail"),
        Some(EffectVariant::DiscardRankRebate {
            dollars: 3,
            rank: Rank::Ace
        })
    );
    assert_eq!(effect("j_cavendish"), Some(EffectVariant::MultFactor { factor: 3.0 }));
    assert_eq!(
        effect("j_shoot_the_moon"),
        Some(EffectVariant::HeldRankMult {
            amount: 13,
            rank: Rank::Queen
        })
    );
}

#[test]
fn unknown_effect_in_shipped_catalog_is_reported() {
    let report = shipped();
    let riff_raff = report.catalog.get("j_riff_raff").expect("riff raff");
    assert!(riff_raff.is_inert());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("j_riff_raff"));
}

#[test]
fn shipped_rules_match_defaults() {
    let config = load_game_config(&assets_root()).expect("load config");
    assert_eq!(config, jester_core::GameConfig::default());
}

#[test]
fn missing_game_file_uses_default_rules() {
    let dir = assets_root().join("does-not-exist");
    let config = load_game_config(&dir).expect("default config");
    assert_eq!(config.run.starting_target, 300);
}

#[test]
fn missing_files_degrade_to_empty_tables() {
    let dir = assets_root().join("does-not-exist");
    let report = load_assets(&dir).expect("degraded load");
    assert!(report.rank_chips.is_empty());
    assert!(report.catalog.is_empty());
    assert_eq!(report.rank_chips.chips_for(Rank::King), 0);
    // One read failure per file plus a warning for each of the 13 ranks.
    assert_eq!(report.warnings.len(), 1 + 13 + 1);
    assert!(report.warnings[0].contains("ranks.json"));
    assert!(report.warnings[1].contains("has no chip value"));
    assert!(report.warnings[14].contains("jokers.json"));
}

#[test]
fn broken_rank_table_keeps_the_catalog() {
    let dir = std::env::temp_dir().join(format!("jester-broken-ranks-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    fs::copy(assets_root().join("jokers.json"), dir.join("jokers.json")).expect("copy jokers");
    fs::write(dir.join("ranks.json"), "{ \"2\": ").expect("write ranks");

    let report = load_assets(&dir).expect("degraded load");
    fs::remove_dir_all(&dir).ok();

    assert!(report.rank_chips.is_empty());
    assert_eq!(report.catalog.len(), 11);
    assert!(report.warnings[0].contains("parse"));
    assert!(report
        .warnings
        .iter()
        .any(|warning| warning.contains("j_riff_raff")));

    let mut run = RunState::new(report.config, report.rank_chips, report.catalog, 3);
    let mut events = EventBus::default();
    run.start_round(&mut events).expect("start round");
    assert!(run.hand.iter().all(|card| card.base_chips == 0));
}

#[test]
fn loaded_jokers_score_a_royal_flush() {
    let report = shipped();
    let selected: Vec<CardIdentity> = ["10D", "JD", "QD", "KD", "AD"]
        .into_iter()
        .map(|short| card(&report, short))
        .collect();
    let board: Vec<_> = ["j_joker", "j_greedy_joker", "j_cavendish"]
        .into_iter()
        .filter_map(|id| report.catalog.instantiate(id))
        .collect();
    let summary = resolve_played_hand(&selected, &[], &board);
    assert_eq!(summary.hand.category, HandCategory::RoyalFlush);
    // 8 base, +3 per diamond, then +4 and X3.
    assert_eq!(summary.final_mult, (8 + 15 + 4) * 3);
    assert_eq!(summary.final_chips, 151);
    assert_eq!(summary.final_score, 151 * 81);
}

#[test]
fn shipped_assets_drive_a_run() {
    let report = shipped();
    let mut run = RunState::new(report.config, report.rank_chips, report.catalog, 11);
    let mut events = EventBus::default();
    run.start_round(&mut events).expect("start round");
    assert_eq!(run.phase(), RunPhase::Play);
    assert!(run.hand.iter().all(|card| card.base_chips > 0));
    run.progress.target = 1;
    run.toggle_select(0).expect("select");
    run.play_selected(&mut events).expect("play");
    assert_eq!(run.phase(), RunPhase::Shop);
    assert_eq!(run.shop.offers.len(), 3);
}
