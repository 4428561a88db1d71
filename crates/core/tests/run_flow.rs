use jester_core::{
    AbilityCatalog, BonusCardAbility, CardIdentity, EffectVariant, Event, EventBus, GameConfig,
    PurchaseOutcome, Rank, RankChips, RunError, RunPhase, RunState, Suit,
};

fn catalog() -> AbilityCatalog {
    AbilityCatalog::new([
        BonusCardAbility::new("j_joker", "Joker", EffectVariant::FlatMult { amount: 4 })
            .with_cost(2),
        BonusCardAbility::new(
            "j_rebate",
            "Mail-In Rebate",
            EffectVariant::DiscardRankRebate {
                dollars: 3,
                rank: Rank::Ace,
            },
        )
        .with_cost(4),
        BonusCardAbility::new("j_blue", "Blue Joker", EffectVariant::FlatChips { amount: 30 })
            .with_cost(5),
    ])
}

fn new_run() -> (RunState, EventBus) {
    let mut run = RunState::new(GameConfig::default(), RankChips::standard(), catalog(), 7);
    let mut events = EventBus::default();
    run.start_round(&mut events).expect("start round");
    (run, events)
}

fn set_hand(run: &mut RunState, cards: &[(Suit, Rank)]) {
    run.hand.clear();
    run.selection.clear();
    for (idx, (suit, rank)) in cards.iter().enumerate() {
        let card = CardIdentity::new(*suit, *rank, RankChips::standard().chips_for(*rank))
            .with_id(1000 + idx as u32);
        run.hand.push(card).expect("hand slot");
    }
}

fn select(run: &mut RunState, indices: &[usize]) {
    for idx in indices {
        run.toggle_select(*idx).expect("select");
    }
}

#[test]
fn start_round_deals_a_full_hand() {
    let (run, mut events) = new_run();
    assert_eq!(run.phase(), RunPhase::Play);
    assert_eq!(run.hand.len(), 8);
    assert_eq!(run.deck.remaining(), 44);
    let drained: Vec<Event> = events.drain().collect();
    assert!(matches!(drained[0], Event::RoundStarted { round: 1, target: 300, .. }));
    assert_eq!(drained[1], Event::HandDealt { count: 8 });
}

#[test]
fn same_seed_deals_the_same_hand() {
    let (a, _) = new_run();
    let (b, _) = new_run();
    assert_eq!(a.hand.as_slice(), b.hand.as_slice());
}

#[test]
fn selection_is_capped_and_toggles() {
    let (mut run, _) = new_run();
    select(&mut run, &[0, 1, 2, 3, 4]);
    assert!(matches!(run.toggle_select(5), Err(RunError::SelectionFull(5))));
    assert_eq!(run.toggle_select(2).ok(), Some(false));
    assert_eq!(run.selection, vec![0, 1, 3, 4]);
    assert!(matches!(run.toggle_select(42), Err(RunError::InvalidCardIndex(42))));
}

#[test]
fn playing_nothing_is_rejected() {
    let (mut run, mut events) = new_run();
    assert!(matches!(
        run.play_selected(&mut events),
        Err(RunError::EmptySelection)
    ));
}

#[test]
fn played_hand_adds_score_and_refills() {
    let (mut run, mut events) = new_run();
    set_hand(
        &mut run,
        &[
            (Suit::Spades, Rank::Nine),
            (Suit::Hearts, Rank::Nine),
            (Suit::Clubs, Rank::Two),
        ],
    );
    run.add_joker("j_joker").expect("joker slot");
    select(&mut run, &[0, 1]);
    let summary = run.play_selected(&mut events).expect("play");
    assert_eq!(summary.final_score, 28 * 6);
    assert_eq!(run.progress.score, 168);
    assert_eq!(run.progress.hands_left, 3);
    assert_eq!(run.hand.len(), 8);
    assert!(run.selection.is_empty());
    assert_eq!(run.hand.get(0).map(|card| card.rank), Some(Rank::Two));
}

#[test]
fn reaching_the_target_clears_the_round() {
    let (mut run, mut events) = new_run();
    run.progress.target = 1;
    select(&mut run, &[0]);
    run.play_selected(&mut events).expect("play");
    assert_eq!(run.phase(), RunPhase::Shop);
    assert_eq!(run.progress.money, 4 + 5);
    assert_eq!(run.progress.round, 2);
    assert_eq!(run.progress.target, 1);
    assert_eq!(run.shop.offers.len(), 3);
    assert!(events
        .drain()
        .any(|event| matches!(event, Event::RoundCleared { reward: 5, .. })));
}

#[test]
fn target_grows_by_half_after_a_clear() {
    let (mut run, mut events) = new_run();
    run.progress.score = 299;
    select(&mut run, &[0]);
    run.play_selected(&mut events).expect("play");
    assert_eq!(run.phase(), RunPhase::Shop);
    assert_eq!(run.progress.target, 450);
}

#[test]
fn last_hand_below_target_ends_the_run() {
    let (mut run, mut events) = new_run();
    run.progress.target = i64::MAX;
    run.progress.hands_left = 1;
    select(&mut run, &[0]);
    run.play_selected(&mut events).expect("play");
    assert_eq!(run.phase(), RunPhase::GameOver);
    select_fails_after_game_over(&mut run);
}

fn select_fails_after_game_over(run: &mut RunState) {
    assert!(matches!(
        run.toggle_select(0),
        Err(RunError::InvalidPhase(RunPhase::GameOver))
    ));
}

#[test]
fn discarding_an_ace_pays_the_rebate() {
    let (mut run, mut events) = new_run();
    run.add_joker("j_rebate").expect("joker slot");
    set_hand(
        &mut run,
        &[
            (Suit::Spades, Rank::Ace),
            (Suit::Hearts, Rank::Seven),
            (Suit::Clubs, Rank::King),
        ],
    );
    select(&mut run, &[0, 1, 2]);
    let summary = run.discard_selected(&mut events).expect("discard");
    assert_eq!(summary.dollars_gained, 3);
    assert_eq!(run.progress.money, 7);
    assert_eq!(run.progress.discards_left, 2);
    assert_eq!(run.progress.hands_left, 4);
    assert_eq!(run.hand.len(), 8);
}

#[test]
fn discards_run_out() {
    let (mut run, mut events) = new_run();
    run.progress.discards_left = 0;
    select(&mut run, &[0]);
    assert!(matches!(
        run.discard_selected(&mut events),
        Err(RunError::NoDiscardsLeft)
    ));
}

#[test]
fn shop_purchase_then_next_round() {
    let (mut run, mut events) = new_run();
    run.progress.target = 1;
    select(&mut run, &[0]);
    run.play_selected(&mut events).expect("play");
    run.progress.money = 100;
    let outcome = run.buy_offer(0, &mut events).expect("buy");
    assert_eq!(outcome, PurchaseOutcome::Bought { slot: 0 });
    assert_eq!(run.jokers.len(), 1);
    assert_eq!(run.shop.offers.len(), 2);

    run.next_round(&mut events).expect("next round");
    assert_eq!(run.phase(), RunPhase::Play);
    assert_eq!(run.progress.score, 0);
    assert_eq!(run.progress.hands_left, 4);
    assert_eq!(run.hand.len(), 8);
    assert_eq!(run.jokers.len(), 1);
}

#[test]
fn full_board_replaces_by_index() {
    let (mut run, mut events) = new_run();
    for _ in 0..5 {
        run.add_joker("j_joker").expect("joker slot");
    }
    assert!(run.add_joker("j_joker").is_none());
    run.progress.target = 1;
    select(&mut run, &[0]);
    run.play_selected(&mut events).expect("play");
    run.progress.money = 100;
    let offer_id = run.shop.offers.get(2).map(|ability| ability.id.clone());
    assert_eq!(
        run.buy_offer(2, &mut events).expect("buy"),
        PurchaseOutcome::NeedsReplacement { offer: 2 }
    );
    run.replace_joker(3, &mut events).expect("replace");
    assert_eq!(run.jokers.len(), 5);
    assert_eq!(run.jokers.get(3).map(|ability| ability.id.clone()), offer_id);
    assert_eq!(run.shop.pending, None);
}

#[test]
fn selling_refunds_half_cost() {
    let (mut run, mut events) = new_run();
    run.add_joker("j_blue").expect("joker slot");
    assert_eq!(run.sell_joker(0, &mut events).expect("sell"), 2);
    assert_eq!(run.progress.money, 6);
    assert!(matches!(
        run.sell_joker(0, &mut events),
        Err(RunError::InvalidJokerIndex(0))
    ));
}

#[test]
fn shop_actions_need_the_shop_phase() {
    let (mut run, mut events) = new_run();
    assert!(matches!(
        run.buy_offer(0, &mut events),
        Err(RunError::InvalidPhase(RunPhase::Play))
    ));
    assert!(matches!(
        run.next_round(&mut events),
        Err(RunError::InvalidPhase(RunPhase::Play))
    ));
}
