//! Round state machine integration tests.

extern crate alloc;

use alloc::rc::Rc;
use core::cell::RefCell;

use bjround::game::dealer::NARRATION_DRAW;
use bjround::{
    ActionError, Card, DealerAction, DeckHandle, DrawPurpose, Game, Outcome, Rank, RoundPhase,
    RoundState, SourceError, Suit, resolve,
};

const fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Hearts)
}

fn cards(ranks: &[Rank]) -> Vec<Card> {
    ranks.iter().map(|&r| card(r)).collect()
}

const fn deck() -> DeckHandle {
    DeckHandle {
        id: 1,
        remaining: 312,
    }
}

/// Deals `[player, dealer up, player, dealer hole]`.
fn dealt_game(ranks: [Rank; 4]) -> Game {
    let mut game = Game::new();
    let generation = game.begin_round();
    game.accept_deck(generation, Ok(deck())).unwrap();
    let request = game.request_deal().unwrap();
    game.complete_draw(request, Ok(cards(&ranks))).unwrap();
    game
}

fn hit(game: &mut Game, rank: Rank) {
    let request = game.request_hit().unwrap();
    game.complete_draw(request, Ok(vec![card(rank)])).unwrap();
}

fn dealer_hit(game: &mut Game, rank: Rank) {
    let request = game.request_dealer_draw().unwrap();
    game.complete_draw(request, Ok(vec![card(rank)])).unwrap();
}

fn record(game: &mut Game) -> Rc<RefCell<Vec<RoundState>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    game.subscribe(move |state: &RoundState| sink.borrow_mut().push(state.clone()));
    log
}

#[test]
fn dealer_hits_sixteen_then_wins_on_twenty_one() {
    let mut game = dealt_game([Rank::Ten, Rank::Seven, Rank::Six, Rank::Nine]);
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);

    game.stand().unwrap();
    assert_eq!(game.phase(), RoundPhase::DealerTurn);
    assert_eq!(game.state().player_score(), Some(16));
    assert_eq!(game.dealer_action().unwrap(), DealerAction::Hit);

    dealer_hit(&mut game, Rank::Five);
    assert_eq!(game.state().dealer_hand().effective_score(), 21);
    assert_eq!(game.dealer_action().unwrap(), DealerAction::Stand);

    assert_eq!(game.settle().unwrap(), Outcome::DealerWins);
    assert_eq!(game.phase(), RoundPhase::RoundOver);
    assert_eq!(game.state().outcome(), Some(Outcome::DealerWins));
}

#[test]
fn player_bust_ends_round_before_dealer_turn() {
    let mut game = dealt_game([Rank::Ten, Rank::Nine, Rank::Eight, Rank::Seven]);
    hit(&mut game, Rank::Five);

    let state = game.state();
    assert_eq!(state.player_hand().value().low_total, 23);
    assert!(state.player_hand().is_busted());
    assert_eq!(state.phase(), RoundPhase::RoundOver);
    assert_eq!(state.outcome(), Some(Outcome::PlayerBusted));
    assert_eq!(state.dealer_hand().len(), 2);
    assert!(state.player_score().is_none());
    assert_eq!(game.dealer_action().unwrap_err(), ActionError::InvalidState);
}

#[test]
fn dealer_bust_wins_for_player_regardless_of_score() {
    let mut game = dealt_game([Rank::Ten, Rank::Ten, Rank::Two, Rank::Six]);
    game.stand().unwrap();
    dealer_hit(&mut game, Rank::King);

    assert_eq!(game.dealer_action().unwrap(), DealerAction::Bust);
    assert_eq!(game.settle().unwrap(), Outcome::DealerBusted);
    assert!(game.state().outcome().unwrap().player_won());
}

#[test]
fn tie_resolves_to_dealer() {
    let mut game = dealt_game([Rank::Nine, Rank::Nine, Rank::Nine, Rank::Nine]);
    game.stand().unwrap();
    assert_eq!(game.dealer_action().unwrap(), DealerAction::Stand);
    assert_eq!(game.settle().unwrap(), Outcome::DealerWins);
}

#[test]
fn higher_player_score_wins() {
    let mut game = dealt_game([Rank::Ace, Rank::Ten, Rank::King, Rank::Seven]);
    assert_eq!(game.state().player_hand().effective_score(), 21);
    game.stand().unwrap();
    assert_eq!(game.settle().unwrap(), Outcome::PlayerWins);
}

#[test]
fn dealer_stands_on_soft_seventeen_and_busts_on_two_aces() {
    let mut soft = dealt_game([Rank::Ten, Rank::Ace, Rank::Eight, Rank::Six]);
    soft.stand().unwrap();
    assert_eq!(soft.dealer_action().unwrap(), DealerAction::Stand);
    assert_eq!(soft.settle().unwrap(), Outcome::PlayerWins);

    let mut aces = dealt_game([Rank::Ten, Rank::Ace, Rank::Eight, Rank::Ace]);
    aces.stand().unwrap();
    assert_eq!(aces.dealer_action().unwrap(), DealerAction::Bust);
    assert_eq!(aces.settle().unwrap(), Outcome::DealerBusted);
}

#[test]
fn player_score_is_fixed_at_stand() {
    let mut game = dealt_game([Rank::Ace, Rank::Five, Rank::Six, Rank::Ten]);
    game.stand().unwrap();
    assert_eq!(game.state().player_score(), Some(17));
    dealer_hit(&mut game, Rank::Two);
    assert_eq!(game.settle().unwrap(), Outcome::DealerWins);
}

#[test]
fn failed_hit_leaves_hand_unchanged_and_can_be_retried() {
    let mut game = dealt_game([Rank::Ten, Rank::Seven, Rank::Two, Rank::Nine]);
    let before = game.state().player_hand().clone();

    let request = game.request_hit().unwrap();
    assert!(game.state().draw_pending());
    assert!(!game.state().can_hit());
    let failed = game.complete_draw(request, Err(SourceError::Unavailable));
    assert_eq!(failed, Err(ActionError::Source(SourceError::Unavailable)));

    assert_eq!(game.phase(), RoundPhase::PlayerTurn);
    assert_eq!(game.state().player_hand(), &before);
    assert!(game.state().can_hit());

    hit(&mut game, Rank::Four);
    assert_eq!(game.state().player_hand().len(), 3);
    assert_eq!(game.state().player_hand().effective_score(), 16);
}

#[test]
fn short_batch_is_treated_as_unavailable() {
    let mut game = Game::new();
    let generation = game.begin_round();
    game.accept_deck(generation, Ok(deck())).unwrap();

    let request = game.request_deal().unwrap();
    assert_eq!(request.count(), 4);
    let short = game.complete_draw(request, Ok(cards(&[Rank::Two, Rank::Three])));
    assert_eq!(short, Err(ActionError::Source(SourceError::Unavailable)));
    assert_eq!(game.phase(), RoundPhase::Dealing);
    assert!(game.state().player_hand().is_empty());
    assert!(game.state().dealer_hand().is_empty());
    assert_eq!(game.deck().unwrap().remaining, 312);

    let retry = game.request_deal().unwrap();
    let batch = cards(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    game.complete_draw(retry, Ok(batch)).unwrap();
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);
    assert_eq!(game.deck().unwrap().remaining, 308);
}

#[test]
fn duplicate_hits_are_rejected_while_draw_pending() {
    let mut game = dealt_game([Rank::Two, Rank::Seven, Rank::Three, Rank::Nine]);
    let request = game.request_hit().unwrap();
    assert_eq!(request.purpose(), DrawPurpose::PlayerHit);

    assert_eq!(game.request_hit().unwrap_err(), ActionError::DrawPending);
    assert_eq!(game.stand().unwrap_err(), ActionError::DrawPending);

    let four = vec![card(Rank::Four)];
    game.complete_draw(request, Ok(four)).unwrap();
    assert_eq!(game.state().player_hand().len(), 3);
    assert!(game.request_hit().is_ok());
}

#[test]
fn stale_draw_is_discarded_after_new_round() {
    let mut game = dealt_game([Rank::Ten, Rank::Seven, Rank::Two, Rank::Nine]);
    let old = game.request_hit().unwrap();

    let generation = game.begin_round();
    assert_ne!(old.generation(), generation);

    let late = game.complete_draw(old, Ok(vec![card(Rank::King)]));
    assert_eq!(late, Err(ActionError::Stale));
    let state = game.state();
    assert_eq!(state.phase(), RoundPhase::Dealing);
    assert!(state.player_hand().is_empty());
    assert!(state.dealer_hand().is_empty());
    assert!(!state.draw_pending());

    let narrated = game.narrate(old.generation(), NARRATION_DRAW);
    assert_eq!(narrated, Err(ActionError::Stale));
    assert!(game.state().dealer_narration().is_none());
}

#[test]
fn stale_dealer_draw_does_not_touch_new_round() {
    let mut game = dealt_game([Rank::Ten, Rank::Six, Rank::Seven, Rank::Six]);
    game.stand().unwrap();
    let old = game.request_dealer_draw().unwrap();

    let generation = game.begin_round();
    game.accept_deck(generation, Ok(deck())).unwrap();
    let request = game.request_deal().unwrap();

    let late = game.complete_draw(old, Ok(vec![card(Rank::Five)]));
    assert_eq!(late, Err(ActionError::Stale));
    let batch = cards(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    game.complete_draw(request, Ok(batch)).unwrap();
    assert_eq!(game.state().dealer_hand().len(), 2);
    assert_eq!(game.state().player_hand().effective_score(), 6);
}

#[test]
fn superseded_draw_is_rejected_after_retry() {
    let mut game = dealt_game([Rank::Ten, Rank::Seven, Rank::Two, Rank::Nine]);
    let first = game.request_hit().unwrap();
    let failed = game.complete_draw(first, Err(SourceError::Unavailable));
    assert_eq!(failed, Err(ActionError::Source(SourceError::Unavailable)));

    let retry = game.request_hit().unwrap();
    assert_ne!(first, retry);
    assert_eq!(first.generation(), retry.generation());
    assert!(retry.sequence() > first.sequence());

    let late = game.complete_draw(first, Ok(vec![card(Rank::King)]));
    assert_eq!(late, Err(ActionError::Stale));
    assert_eq!(game.state().player_hand().len(), 2);
    assert!(game.state().draw_pending());
    assert_eq!(game.request_hit().unwrap_err(), ActionError::DrawPending);

    let four = vec![card(Rank::Four)];
    game.complete_draw(retry, Ok(four)).unwrap();
    assert_eq!(game.state().player_hand().effective_score(), 16);
    assert_eq!(game.phase(), RoundPhase::PlayerTurn);

    let replayed = game.complete_draw(retry, Ok(vec![card(Rank::Four)]));
    assert_eq!(replayed, Err(ActionError::InvalidState));
    assert_eq!(game.state().player_hand().len(), 3);
}

#[test]
fn narration_is_only_accepted_during_dealer_turn() {
    let mut game = Game::new();
    let generation = game.begin_round();
    let dealing = game.narrate(generation, NARRATION_DRAW);
    assert_eq!(dealing, Err(ActionError::InvalidState));

    let mut game = dealt_game([Rank::Ten, Rank::Ten, Rank::Two, Rank::Eight]);
    let generation = game.generation();
    let early = game.narrate(generation, NARRATION_DRAW);
    assert_eq!(early, Err(ActionError::InvalidState));
    assert!(game.state().dealer_narration().is_none());

    game.stand().unwrap();
    game.narrate(generation, NARRATION_DRAW).unwrap();
    assert_eq!(game.state().dealer_narration(), Some(NARRATION_DRAW));

    assert_eq!(game.settle().unwrap(), Outcome::DealerWins);
    let late = game.narrate(generation, "Dealer stands.");
    assert_eq!(late, Err(ActionError::InvalidState));
    assert_eq!(game.state().dealer_narration(), Some(NARRATION_DRAW));
}

#[test]
fn deal_without_deck_is_invalid_state() {
    let mut game = Game::new();
    let generation = game.begin_round();
    assert_eq!(
        game.request_deal().unwrap_err(),
        ActionError::Source(SourceError::InvalidState)
    );

    let refused = game.accept_deck(generation, Err(SourceError::Unavailable));
    assert_eq!(refused, Err(ActionError::Source(SourceError::Unavailable)));
    assert_eq!(game.phase(), RoundPhase::Dealing);
    assert!(game.deck().is_none());
}

#[test]
fn round_over_accepts_only_new_round() {
    let mut game = dealt_game([Rank::Ten, Rank::Nine, Rank::Eight, Rank::Seven]);
    hit(&mut game, Rank::King);
    assert_eq!(game.phase(), RoundPhase::RoundOver);

    assert_eq!(game.request_hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.settle().unwrap_err(), ActionError::InvalidState);
    assert_eq!(
        game.request_dealer_draw().unwrap_err(),
        ActionError::InvalidState
    );
    assert_eq!(game.request_deal().unwrap_err(), ActionError::InvalidState);

    game.begin_round();
    let state = game.state();
    assert_eq!(state.phase(), RoundPhase::Dealing);
    assert!(state.outcome().is_none());
    assert!(state.player_hand().is_empty());
    assert!(state.dealer_hand().is_empty());
    assert!(state.dealer_hole_hidden());
}

#[test]
fn dealer_steps_follow_policy() {
    let mut game = dealt_game([Rank::Ten, Rank::Six, Rank::Eight, Rank::Five]);
    assert_eq!(
        game.request_dealer_draw().unwrap_err(),
        ActionError::InvalidState
    );

    game.stand().unwrap();
    assert_eq!(game.settle().unwrap_err(), ActionError::InvalidState);

    dealer_hit(&mut game, Rank::Six);
    assert_eq!(game.dealer_action().unwrap(), DealerAction::Stand);
    assert_eq!(
        game.request_dealer_draw().unwrap_err(),
        ActionError::InvalidState
    );
    assert_eq!(game.settle().unwrap(), Outcome::PlayerWins);
}

#[test]
fn observers_see_every_step_and_hole_card_invariant_holds() {
    let mut game = Game::new();
    let log = record(&mut game);

    let generation = game.begin_round();
    game.accept_deck(generation, Ok(deck())).unwrap();
    let request = game.request_deal().unwrap();
    let batch = cards(&[Rank::Five, Rank::Six, Rank::Four, Rank::Ten]);
    game.complete_draw(request, Ok(batch)).unwrap();
    hit(&mut game, Rank::Three);
    game.stand().unwrap();
    game.narrate(generation, NARRATION_DRAW).unwrap();
    dealer_hit(&mut game, Rank::Two);
    game.settle().unwrap();

    let states = log.borrow();
    let phases: Vec<RoundPhase> = states.iter().map(RoundState::phase).collect();
    assert_eq!(
        phases,
        vec![
            RoundPhase::Dealing,    // begin_round
            RoundPhase::Dealing,    // deal requested
            RoundPhase::PlayerTurn, // dealt
            RoundPhase::PlayerTurn, // hit requested
            RoundPhase::PlayerTurn, // hit applied
            RoundPhase::DealerTurn, // stand
            RoundPhase::DealerTurn, // narration
            RoundPhase::DealerTurn, // dealer draw requested
            RoundPhase::DealerTurn, // dealer draw applied
            RoundPhase::RoundOver,  // settle
        ]
    );

    for state in states.iter() {
        let hidden_phase = matches!(state.phase(), RoundPhase::Dealing | RoundPhase::PlayerTurn);
        assert_eq!(state.dealer_hole_hidden(), hidden_phase);
        assert_eq!(state.outcome().is_some(), state.is_over());
        assert_eq!(state.generation(), generation);
    }

    let sizes: Vec<(usize, usize)> = states
        .iter()
        .map(|s| (s.player_hand().len(), s.dealer_hand().len()))
        .collect();
    let grows = |w: &[(usize, usize)]| w[0].0 <= w[1].0 && w[0].1 <= w[1].1;
    assert!(sizes.windows(2).all(grows));

    assert_eq!(states[2].dealer_hand().visible_value(), 6);
    assert_eq!(states.last().unwrap().outcome(), Some(Outcome::DealerWins));
}

#[test]
fn resolve_matches_machine_outcomes() {
    let player: bjround::Hand = cards(&[Rank::Nine, Rank::Nine]).into_iter().collect();
    let dealer: bjround::Hand = cards(&[Rank::King, Rank::Queen, Rank::Five])
        .into_iter()
        .collect();
    assert_eq!(bjround::next_action(&dealer), DealerAction::Bust);
    let busted = resolve(&player, &dealer, false, true);
    assert_eq!(busted, Outcome::DealerBusted);
    assert_eq!(
        resolve(&player, &player.clone(), false, false),
        Outcome::DealerWins
    );
}

#[cfg(feature = "serde")]
#[test]
fn round_state_serializes() {
    let game = dealt_game([Rank::Ace, Rank::Seven, Rank::King, Rank::Nine]);
    let json = serde_json::to_string(game.state()).unwrap();
    let back: RoundState = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, game.state());
}
