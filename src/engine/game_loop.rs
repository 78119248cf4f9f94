use std::collections::BTreeMap;
use std::time::Instant;

use crate::domain::blinds::AnteType;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{fill_next_slot, CardSlot, HandSummary, PlayerHandResult, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::{ActionProvider, ActionRequest, SeatAction};
use crate::engine::betting::{BettingRound, StageOutcome};
use crate::engine::cancel::CancelToken;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{blind_seats, collect_participating_seats_from, next_actionable_seat, next_dealer};
use crate::engine::showdown::award_pots;
use crate::engine::side_pots::split_side_pots;
use crate::engine::validation::{raise_bounds, resolve_commitment, RaiseContext};
use crate::engine::RandomSource;
use crate::time_ctrl::TurnTiming;

/// Внутреннее состояние раздачи.
#[derive(Debug)]
pub struct HandEngine {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub deck: Deck,
    pub history: HandHistory,
    pub cancel: CancelToken,
    /// Сколько каждое место уже отдало в центральные банки
    /// (нужно, чтобы вернуть фишки при аборте раздачи).
    pub collected: BTreeMap<SeatIndex, Chips>,
}

/// Завершённая раздача: итог + полная история.
#[derive(Clone, Debug)]
pub struct FinishedHand {
    pub summary: HandSummary,
    pub history: HandHistory,
}

impl HandEngine {
    fn new(table_id: TableId, hand_id: HandId, deck: Deck, cancel: CancelToken) -> Self {
        Self {
            table_id,
            hand_id,
            deck,
            history: HandHistory::new(),
            cancel,
            collected: BTreeMap::new(),
        }
    }

    fn check_cancelled(&self) -> Result<(), EngineError> {
        if self.cancel.is_cancelled() {
            return Err(EngineError::RoundCancelled);
        }
        Ok(())
    }
}

/// Старт новой раздачи:
/// - сбрасывает статусы и карты мест;
/// - двигает кнопку, определяет блайнды;
/// - постит анте и блайнды;
/// - раздаёт карманные карты.
///
/// Ошибка после начала постинга откатывает раздачу (`abort_hand`).
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    hand_id: HandId,
    cancel: CancelToken,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }

    for p in table.seats.iter_mut().flatten() {
        p.clear_cards();
        p.status = match p.status {
            PlayerStatus::SittingOut => PlayerStatus::SittingOut,
            _ if p.stack.is_empty() => PlayerStatus::Busted,
            _ => PlayerStatus::Active,
        };
    }

    let participating = table.participating_seats();
    if participating.len() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    let dealer = next_dealer(table).ok_or(EngineError::NotEnoughPlayers)?;
    let (sb_seat, bb_seat) = blind_seats(table, dealer).ok_or(EngineError::NotEnoughPlayers)?;

    table.dealer_button = Some(dealer);
    table.small_blind_seat = Some(sb_seat);
    table.big_blind_seat = Some(bb_seat);
    table.board = [CardSlot::Empty; 5];
    table.street = Street::Preflop;
    table.current_hand_id = Some(hand_id);
    table.hand_in_progress = true;
    table.time.init_seats(participating.iter().copied());

    let mut deck = Deck::standard_52();
    deck.shuffle(rng);

    let mut engine = HandEngine::new(table.id, hand_id, deck, cancel);
    engine.history.push(HandEventKind::HandStarted {
        table_id: table.id,
        hand_id,
    });
    tracing::info!(table = table.id, hand = hand_id, dealer, "hand started");

    // Порядок мест фиксируем до постинга: после него оллын-места
    // уже не считаются «играющими», но карты получают.
    let order = collect_participating_seats_from(table, dealer);
    let setup = post_blinds_and_antes(table, &mut engine, &order, sb_seat, bb_seat)
        .and_then(|()| deal_pocket_cards(table, &mut engine, &order));
    if let Err(err) = setup {
        abort_hand(table, &mut engine, &err);
        return Err(err);
    }

    Ok(engine)
}

/// Принудительная ставка (блайнд/анте): не больше стека.
fn post_forced(table: &mut Table, seat: SeatIndex, amount: Chips) -> Result<Chips, EngineError> {
    let p = table.seat_mut(seat).ok_or(EngineError::InvalidSeat(seat))?;
    let posted = amount.min(p.stack.value());
    p.stack.transfer(&p.pending_bet, posted, Some(seat))?;
    if p.stack.is_empty() {
        p.status = PlayerStatus::AllIn;
    }
    Ok(posted)
}

/// Постинг анте и блайндов.
///
/// Анте сразу собирается в центральные банки и не засчитывается
/// в ставку улицы; блайнды остаются ставками префлопа.
///
/// `seats` – места раздачи по кругу, начиная с дилера.
pub fn post_blinds_and_antes(
    table: &mut Table,
    engine: &mut HandEngine,
    seats: &[SeatIndex],
    sb_seat: SeatIndex,
    bb_seat: SeatIndex,
) -> Result<(), EngineError> {
    let stakes = table.config.stakes.clone();
    let dealer = *seats.first().ok_or(EngineError::NotEnoughPlayers)?;

    let ante_payers = match stakes.ante_type {
        _ if stakes.ante.is_zero() => Vec::new(),
        AnteType::None => Vec::new(),
        AnteType::Classic => seats.to_vec(),
        AnteType::BigBlind => vec![bb_seat],
    };

    let mut antes = Vec::with_capacity(ante_payers.len());
    for seat in ante_payers {
        let posted = post_forced(table, seat, stakes.ante)?;
        if !posted.is_zero() {
            antes.push((seat, posted));
        }
    }
    if !antes.is_empty() {
        collect_bets(table, engine)?;
    }

    let sb = post_forced(table, sb_seat, stakes.small_blind)?;
    let bb = post_forced(table, bb_seat, stakes.big_blind)?;

    tracing::debug!(
        table = table.id,
        dealer,
        sb_seat,
        sb = sb.0,
        bb_seat,
        bb = bb.0,
        antes = antes.len(),
        "blinds posted"
    );
    engine.history.push(HandEventKind::BlindsPosted {
        dealer,
        small_blind: Some((sb_seat, sb)),
        big_blind: Some((bb_seat, bb)),
        ante: antes,
    });
    Ok(())
}

/// Раздать по две карты, по одной за круг, начиная с места после дилера.
fn deal_pocket_cards(table: &mut Table, engine: &mut HandEngine, seats: &[SeatIndex]) -> Result<(), EngineError> {
    let mut order = seats.to_vec();
    order.rotate_left(1);

    for _ in 0..2 {
        for &seat in &order {
            let card = engine.deck.draw_card()?;
            let p = table.seat_mut(seat).ok_or(EngineError::InvalidSeat(seat))?;
            p.give_card(card)?;
        }
    }

    for &seat in &order {
        if let Some(p) = table.seat(seat) {
            engine.history.push(HandEventKind::HoleCardsDealt {
                seat,
                cards: p.pocket_cards(),
            });
        }
    }
    Ok(())
}

/// Открыть карты борда для улицы `street`.
pub fn deal_board(table: &mut Table, engine: &mut HandEngine, street: Street) -> Result<Vec<Card>, EngineError> {
    let cards = engine.deck.draw_n(street.board_cards_to_deal())?;
    for card in &cards {
        if !fill_next_slot(&mut table.board, *card) {
            return Err(EngineError::InvalidHandState("на борде нет места"));
        }
    }
    table.street = street;

    tracing::debug!(table = table.id, ?street, cards = ?cards, "board dealt");
    engine.history.push(HandEventKind::BoardDealt {
        street,
        cards: cards.clone(),
    });
    Ok(cards)
}

/// Собрать ставки улицы в центральные банки и запомнить вклад мест.
pub fn collect_bets(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    for report in split_side_pots(table)? {
        for (seat, amount) in &report.contributions {
            *engine.collected.entry(*seat).or_insert(Chips::ZERO) += *amount;
        }
        engine.history.push(HandEventKind::SidePotCreated {
            pot_index: report.pot_index,
            amount: report.amount,
            eligible_seats: report.eligible_seats,
        });
    }
    Ok(())
}

/// Раунд ставок на одной улице.
///
/// Префлоп обход начинается после большого блайнда, на остальных
/// улицах – после дилера. Раунд заканчивается, когда следующему
/// активному месту нечего делать (все ответили на последнее повышение),
/// когда активных мест не осталось или остался один претендент.
pub fn run_betting_round<P>(
    table: &mut Table,
    engine: &mut HandEngine,
    provider: &mut P,
    street: Street,
) -> Result<StageOutcome, EngineError>
where
    P: ActionProvider + ?Sized,
{
    let (mut round, mut cursor) = match street {
        Street::Preflop => {
            let call = table.max_pending().max(table.config.stakes.big_blind);
            let bb = table.big_blind_seat.ok_or(EngineError::NoActiveHand)?;
            (BettingRound::preflop(call, Some(bb)), bb)
        }
        _ => {
            let dealer = table.dealer_button.ok_or(EngineError::NoActiveHand)?;
            (BettingRound::new(street, Chips::ZERO), dealer)
        }
    };

    loop {
        engine.check_cancelled()?;

        if table.live_seats().len() <= 1 {
            break;
        }
        let Some(seat) = next_actionable_seat(table, cursor) else {
            break;
        };
        let committed = table
            .seat(seat)
            .map(|p| p.pending_bet.value())
            .unwrap_or(Chips::ZERO);
        if !round.owes_action(seat, committed) {
            break;
        }
        if table.actionable_seats().len() == 1 && committed >= round.call_value {
            break;
        }

        act_seat(table, engine, provider, &mut round, seat)?;
        cursor = seat;
    }

    let outcome = if table.live_seats().len() <= 1 {
        StageOutcome::LastManStanding
    } else if table.actionable_seats().len() <= 1 {
        StageOutcome::RevealAllCards
    } else {
        StageOutcome::OpenNextStage
    };
    tracing::debug!(table = table.id, ?street, ?outcome, bets = round.bets_received, "betting round finished");
    Ok(outcome)
}

/// Запросить и применить решение одного места.
fn act_seat<P>(
    table: &mut Table,
    engine: &mut HandEngine,
    provider: &mut P,
    round: &mut BettingRound,
    seat: SeatIndex,
) -> Result<(), EngineError>
where
    P: ActionProvider + ?Sized,
{
    let pot_total = table.center_pot_total() + table.pending_total();
    let timeout = table.time.timeout_for(seat);
    let p = table.seat(seat).ok_or(EngineError::InvalidSeat(seat))?;
    let committed = p.pending_bet.value();
    let stack = p.stack.value();

    let bounds = raise_bounds(&RaiseContext {
        limit: table.config.limit,
        street: round.street,
        big_blind: table.config.stakes.big_blind,
        call_value: round.call_value,
        committed,
        pot_total,
        raises_so_far: round.raises,
        raise_cap: table.config.fixed_limit_raise_cap,
    });

    let request = ActionRequest {
        seat,
        player_id: p.player_id,
        street: round.street,
        call_value: round.call_value,
        committed,
        stack,
        min_raise: bounds.0,
        max_raise: bounds.1.min(committed + stack),
        timeout,
    };

    let started = Instant::now();
    let answer = provider.request_action(&request);
    let timed_out = table.time.settle(seat, started.elapsed()) == TurnTiming::TimedOut;
    let requested = if timed_out { None } else { answer };

    let resolution = resolve_commitment(requested, round.call_value, committed, stack, bounds);

    let p = table.seat_mut(seat).ok_or(EngineError::InvalidSeat(seat))?;
    match resolution.action {
        SeatAction::Folded => p.status = PlayerStatus::Folded,
        _ => {
            p.stack.transfer(&p.pending_bet, resolution.add, Some(seat))?;
            if p.stack.is_empty() {
                p.status = PlayerStatus::AllIn;
            }
        }
    }
    let stack_after = p.stack.value();

    let raised = round.record(seat, &resolution);
    if timed_out {
        tracing::warn!(table = table.id, seat, "seat timed out, folding");
    }
    tracing::debug!(
        table = table.id,
        seat,
        action = ?resolution.action,
        committed = resolution.target.0,
        raised,
        "seat acted"
    );
    engine.history.push(HandEventKind::PlayerActed {
        seat,
        street: round.street,
        action: resolution.action,
        committed: resolution.target,
        stack_after,
        timed_out,
    });
    Ok(())
}

/// Докладываем борд до пяти карт (все в оллыне).
fn run_out_board(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    while table.board_cards().len() < 5 {
        let street = table.street.next();
        deal_board(table, engine, street)?;
    }
    Ok(())
}

/// Сыграть раздачу целиком: блайнды, улицы, сайд-поты, рейк и шоудаун.
///
/// Любая ошибка (отмена, колода, стопки) фатальна только для раздачи:
/// ставки возвращаются в стеки, стол готов к следующей раздаче.
pub fn play_hand<R, P>(
    table: &mut Table,
    rng: &mut R,
    provider: &mut P,
    hand_id: HandId,
    cancel: &CancelToken,
) -> Result<FinishedHand, EngineError>
where
    R: RandomSource,
    P: ActionProvider + ?Sized,
{
    let mut engine = start_hand(table, rng, hand_id, cancel.clone())?;

    match drive_hand(table, &mut engine, provider) {
        Ok(summary) => Ok(FinishedHand {
            summary,
            history: engine.history,
        }),
        Err(err) => {
            abort_hand(table, &mut engine, &err);
            Err(err)
        }
    }
}

fn drive_hand<P>(table: &mut Table, engine: &mut HandEngine, provider: &mut P) -> Result<HandSummary, EngineError>
where
    P: ActionProvider + ?Sized,
{
    let mut street = Street::Preflop;
    loop {
        let outcome = run_betting_round(table, engine, provider, street)?;
        collect_bets(table, engine)?;

        match outcome {
            StageOutcome::LastManStanding => break,
            StageOutcome::RevealAllCards => {
                run_out_board(table, engine)?;
                break;
            }
            StageOutcome::OpenNextStage => {
                if street == Street::River {
                    break;
                }
                engine.check_cancelled()?;
                street = street.next();
                deal_board(table, engine, street)?;
            }
        }
    }

    let contested = table.live_seats().len() > 1;
    let street_reached = if contested { Street::Showdown } else { table.street };
    let total_pot = table.center_pot_total();

    let showdown = award_pots(table, &mut engine.history)?;

    let results = table
        .occupied()
        .filter(|(_, p)| p.has_cards())
        .map(|(seat, p)| {
            let won = showdown.won_by(seat);
            PlayerHandResult {
                seat,
                player_id: p.player_id,
                score: showdown.scores.get(&seat).cloned(),
                won,
                is_winner: showdown.awards.iter().any(|a| a.winners.contains(&seat)),
            }
        })
        .collect();

    for p in table.seats.iter_mut().flatten() {
        if p.stack.is_empty() && p.status != PlayerStatus::SittingOut {
            p.status = PlayerStatus::Busted;
        }
    }
    table.street = street_reached;
    table.hand_in_progress = false;
    table.current_hand_id = None;

    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
    });
    tracing::info!(
        table = table.id,
        hand = engine.hand_id,
        pot = total_pot.0,
        rake = showdown.rake.0,
        "hand finished"
    );

    Ok(HandSummary {
        hand_id: engine.hand_id,
        table_id: engine.table_id,
        street_reached,
        board: table.board_cards(),
        total_pot,
        rake: showdown.rake,
        results,
    })
}

/// Прервать раздачу: вернуть несобранные ставки и вклады в банки,
/// остаток банков (если он есть) уходит в house.
pub fn abort_hand(table: &mut Table, engine: &mut HandEngine, reason: &EngineError) {
    for (_, p) in table.occupied() {
        p.pending_bet.move_all(&p.stack, None);
    }

    for (seat, owed) in &engine.collected {
        let Some(p) = table.seat(*seat) else {
            continue;
        };
        let mut left = *owed;
        for pot in &table.center_pots {
            if left.is_zero() {
                break;
            }
            let take = left.min(pot.value());
            if pot.move_value(&p.stack, take, None) {
                left -= take;
            }
        }
    }

    for pot in &table.center_pots {
        pot.move_all(&table.house, None);
    }
    table.center_pots.clear();
    engine.collected.clear();

    for p in table.seats.iter_mut().flatten() {
        p.clear_cards();
        if matches!(p.status, PlayerStatus::Folded | PlayerStatus::AllIn) {
            p.status = PlayerStatus::Active;
        }
    }
    table.hand_in_progress = false;
    table.current_hand_id = None;

    tracing::warn!(table = table.id, hand = engine.hand_id, %reason, "hand aborted, bets returned");
    engine.history.push(HandEventKind::RoundAborted {
        reason: reason.to_string(),
    });
}
