// src/bin/poker_dev_cli.rs

use poker_core::domain::blinds::AnteType;
use poker_core::domain::chips::Chips;
use poker_core::domain::player::PlayerAtTable;
use poker_core::domain::table::{Table, TableConfig, TableStakes};
use poker_core::domain::SeatIndex;
use poker_core::engine::{play_hand, CancelToken, Decision, ScriptedActions};
use poker_core::infra::{DeterministicRng, IdGenerator};
use poker_core::ledger::chip_count;

/// Сценарий тестовой раздачи.
#[derive(Copy, Clone, Debug)]
enum Scenario {
    SimpleCheckCall,
    WithFold,
    WithRaises,
    WithAllInSidePots,
}

impl Scenario {
    const ALL: [Scenario; 4] = [
        Scenario::SimpleCheckCall,
        Scenario::WithFold,
        Scenario::WithRaises,
        Scenario::WithAllInSidePots,
    ];

    /// Решения ботов по местам.
    fn script(self) -> ScriptedActions {
        match self {
            Scenario::SimpleCheckCall => ScriptedActions::new(),
            Scenario::WithFold => ScriptedActions::new()
                .with(1, &[Decision::Fold])
                .with(3, &[Decision::Fold]),
            Scenario::WithRaises => ScriptedActions::new()
                .with(0, &[Decision::RaiseTo(Chips(300))])
                .with(2, &[Decision::RaiseTo(Chips(900))])
                .with(3, &[Decision::Fold]),
            Scenario::WithAllInSidePots => ScriptedActions::new()
                .with(0, &[Decision::AllIn])
                .with(1, &[Decision::AllIn])
                .with(2, &[Decision::AllIn]),
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    println!("poker_dev_cli: стартуем dev-CLI…");

    let ids = IdGenerator::default();
    let mut rng = DeterministicRng::from_seed(42);
    let cancel = CancelToken::new();

    let mut config = TableConfig::new(
        6,
        TableStakes::new(Chips::new(50), Chips::new(100), AnteType::None, Chips::ZERO),
    );
    config.rake.percent_bp = 500;
    config.rake.cap_in_small_blinds = 4;

    let mut table = Table::new(ids.next_table_id(), "DEV TABLE".to_string(), config);
    let stacks = [10_000, 2_500, 6_000, 10_000];
    for (seat, stack) in stacks.iter().enumerate() {
        table.sit(seat as SeatIndex, PlayerAtTable::new(ids.next_player_id(), Chips::new(*stack)));
    }

    let chips_before = table.total_chips();

    for scenario in Scenario::ALL {
        println!();
        println!("================ HAND {scenario:?} =================");

        let mut bots = scenario.script();
        match play_hand(&mut table, &mut rng, &mut bots, ids.next_hand_id(), &cancel) {
            Ok(hand) => {
                let s = &hand.summary;
                println!(
                    "[CLI] hand_id={} street={:?} pot={} rake={} board={}",
                    s.hand_id,
                    s.street_reached,
                    s.total_pot,
                    s.rake,
                    s.board.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
                );
                for r in &s.results {
                    let hand = r.score.as_ref().map(|sc| sc.describe()).unwrap_or_default();
                    println!(
                        "[CLI]   seat={} won={} winner={} {}",
                        r.seat, r.won, r.is_winner, hand
                    );
                }
                println!("[CLI] событий в истории: {}", hand.history.len());
            }
            Err(e) => println!("[CLI] ОШИБКА в play_hand: {e}"),
        }

        debug_print_table_state(&table);
    }

    println!();
    println!(
        "[CLI] фишек до: {}, после: {} (house={})",
        chips_before,
        table.total_chips(),
        table.house.value()
    );
    println!("[CLI] Завершение работы dev-CLI.");
}

fn debug_print_table_state(table: &Table) {
    for (seat, p) in table.occupied() {
        println!(
            "[STATE] seat={} player={} stack={} ({} фишек) status={:?}",
            seat,
            p.player_id,
            p.stack.value(),
            chip_count(&p.stack.chips()),
            p.status
        );
    }
}
