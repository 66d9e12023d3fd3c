//! CLI blackjack round against the dealer.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjround::{Card, Hand, RoundPhase, RoundState, Shoe, Suit, Table, TableOptions, TokioPacer};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();
    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut table = Table::new(Shoe::new(seed), TokioPacer, TableOptions::default());
    table.subscribe(print_step);

    loop {
        if let Err(err) = table.start_round().await {
            println!("Deal error: {err}");
            break;
        }

        while table.state().phase() == RoundPhase::PlayerTurn {
            match prompt_line("Action ([h]it, [s]tand, [q]uit): ").as_str() {
                "h" | "hit" => {
                    if let Err(err) = table.hit().await {
                        println!("Hit error: {err}");
                    }
                }
                "s" | "stand" | "stay" => {
                    if let Err(err) = table.stand().await {
                        println!("Dealer error: {err}");
                        if let Err(err) = table.resume_dealer().await {
                            println!("Dealer error: {err}");
                            return;
                        }
                    }
                }
                "q" | "quit" => return,
                _ => println!("Unknown action."),
            }
        }

        if let Some(outcome) = table.state().outcome() {
            println!("\n{}", outcome.message());
        }

        match prompt_line("New game? (y/n): ").as_str() {
            "y" | "yes" | "" => {}
            _ => {
                println!("Goodbye.");
                break;
            }
        }
    }
}

fn print_step(state: &RoundState) {
    if state.draw_pending() || state.phase() == RoundPhase::Dealing {
        return;
    }

    if let Some(line) = state.dealer_narration() {
        println!("  {line}");
    }

    let dealer = state.dealer_hand();
    let shown = format_hand(dealer);
    println!("\nDealer: {shown} ({})", dealer.visible_value());
    let player = state.player_hand();
    let held = format_hand(player);
    println!("Player: {held} ({})", player.effective_score());
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    if card.is_face_down() {
        return "??".to_string();
    }

    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.code(), color_code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
