//! Three-handed Hold'em: the player against two bots.
//!
//! ```text
//! Idle -> Ante -> (deal) -> Betting(Preflop) -> Betting(Flop) -> Betting(Turn)
//!      -> Betting(River) -> showdown -> Settled
//! ```
//!
//! Each `call` or `raise` closes a betting round: the bots still in the hand
//! decide through a [`BotDecider`], then the next community cards are turned
//! (three on the flop, one on the turn, one on the river). Acting on the river
//! goes to showdown. A player `fold` ends the hand at once and the remaining
//! bots play it out for the pot. A bot that folds is out of the hand for good;
//! when both bots are out the player takes the pot.
//!
//! Ties are broken by kickers. Hands that are still exactly equal split the
//! pot, with any odd coin going to the earliest seat.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bankroll::Bankroll;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{best_hand, HandRank};

/// Antes in the pot per committed player bet: the player plus two bots.
pub const ANTE_MULTIPLIER: u64 = 3;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Bot1,
    Bot2,
}

impl Seat {
    pub const ALL: [Seat; 3] = [Seat::Player, Seat::Bot1, Seat::Bot2];
    pub const BOTS: [Seat; 2] = [Seat::Bot1, Seat::Bot2];

    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Bot1 => 1,
            Seat::Bot2 => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Seat::Player => "You",
            Seat::Bot1 => "Bot 1",
            Seat::Bot2 => "Bot 2",
        }
    }
}

/// A betting street, named by the community cards showing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards only
    Preflop,
    /// 3 community cards
    Flop,
    /// 4 community cards
    Turn,
    /// 5 community cards
    River,
}

impl Street {
    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }

    /// The next street and how many community cards it turns over.
    fn next(self) -> Option<(Street, usize)> {
        match self {
            Street::Preflop => Some((Street::Flop, 3)),
            Street::Flop => Some((Street::Turn, 1)),
            Street::Turn => Some((Street::River, 1)),
            Street::River => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    /// Bet chosen and pot funded, cards not dealt yet
    Ante,
    Betting(Street),
    Settled,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Ante => "waiting for the deal",
            Phase::Betting(Street::Preflop) => "betting preflop",
            Phase::Betting(Street::Flop) => "betting on the flop",
            Phase::Betting(Street::Turn) => "betting on the turn",
            Phase::Betting(Street::River) => "betting on the river",
            Phase::Settled => "the hand is settled",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum BotAction {
    Call,
    Fold,
}

impl BotAction {
    pub fn as_str(self) -> &'static str {
        match self {
            BotAction::Call => "call",
            BotAction::Fold => "fold",
        }
    }
}

/// What a bot is allowed to see when it decides.
#[derive(Debug, Clone, Copy)]
pub struct BotView<'a> {
    pub seat: Seat,
    pub hole: &'a [Card],
    pub board: &'a [Card],
    pub street: Street,
    pub pot: u64,
}

/// Decision seam for the two bots. Implemented by the `casino-ai` crate.
pub trait BotDecider {
    fn decide(&mut self, view: &BotView<'_>) -> BotAction;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum SettleReason {
    Showdown,
    PlayerFolded,
    BotsFolded,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PokerSettlement {
    pub reason: SettleReason,
    pub pot: u64,
    /// Winning seats in seat order; more than one means a split pot.
    pub winners: Vec<Seat>,
    /// Evaluated hands of every seat that took part in the comparison.
    pub hands: Vec<(Seat, HandRank)>,
    pub player_payout: u64,
}

impl PokerSettlement {
    pub fn player_won(&self) -> bool {
        self.winners.contains(&Seat::Player)
    }

    pub fn hand_of(&self, seat: Seat) -> Option<&HandRank> {
        self.hands.iter().find(|(s, _)| *s == seat).map(|(_, h)| h)
    }
}

/// Everything that happened while closing one betting round.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PokerReport {
    pub bot_actions: Vec<(Seat, BotAction)>,
    pub revealed: Vec<Card>,
    pub street: Option<Street>,
    pub settlement: Option<PokerSettlement>,
}

#[derive(Debug, Clone)]
pub struct PokerTable {
    deck: Deck,
    holes: [Vec<Card>; 3],
    board: Vec<Card>,
    folded: [bool; 3],
    bet: u64,
    pot: u64,
    committed: u64,
    phase: Phase,
    settlement: Option<PokerSettlement>,
}

impl PokerTable {
    pub fn new(seed: u64) -> Self {
        Self {
            deck: Deck::new_with_seed(seed),
            holes: [Vec::with_capacity(2), Vec::with_capacity(2), Vec::with_capacity(2)],
            board: Vec::with_capacity(5),
            folded: [false; 3],
            bet: 0,
            pot: 0,
            committed: 0,
            phase: Phase::Idle,
            settlement: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    /// Coins the player has put in this hand: the ante plus every raise.
    pub fn committed(&self) -> u64 {
        self.committed
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn hole(&self, seat: Seat) -> &[Card] {
        &self.holes[seat.index()]
    }

    pub fn is_folded(&self, seat: Seat) -> bool {
        self.folded[seat.index()]
    }

    pub fn active_bots(&self) -> Vec<Seat> {
        Seat::BOTS
            .into_iter()
            .filter(|s| !self.is_folded(*s))
            .collect()
    }

    pub fn settlement(&self) -> Option<&PokerSettlement> {
        self.settlement.as_ref()
    }

    /// The player's best hand with the cards showing, once hole cards are dealt.
    pub fn player_hand(&self) -> Option<HandRank> {
        let hole = self.hole(Seat::Player);
        if hole.is_empty() {
            return None;
        }
        best_hand(hole, &self.board).ok()
    }

    /// Chooses the per-player bet and funds the pot with three antes.
    pub fn set_bet(&mut self, amount: u64, bankroll: &Bankroll) -> Result<(), GameError> {
        self.require_any(&[Phase::Idle, Phase::Ante, Phase::Settled], "set a bet")?;
        bankroll.check_wager(amount)?;
        self.bet = amount;
        self.pot = amount * ANTE_MULTIPLIER;
        self.phase = Phase::Ante;
        Ok(())
    }

    /// Debits the bet and deals two hole cards to each seat, player first.
    pub fn deal(&mut self, bankroll: &mut Bankroll) -> Result<(), GameError> {
        self.require_any(&[Phase::Ante], "deal")?;
        bankroll.debit(self.bet)?;
        self.committed = self.bet;

        for hole in &mut self.holes {
            hole.clear();
        }
        self.board.clear();
        self.folded = [false; 3];
        self.settlement = None;
        self.deck.shuffle();
        for _ in 0..2 {
            for seat in Seat::ALL {
                let card = self.deck.draw()?;
                self.holes[seat.index()].push(card);
            }
        }
        self.phase = Phase::Betting(Street::Preflop);
        debug!(bet = self.bet, pot = self.pot, "poker dealt");
        Ok(())
    }

    /// Stays in at no extra cost and closes the betting round.
    pub fn call(
        &mut self,
        bankroll: &mut Bankroll,
        bots: &mut dyn BotDecider,
    ) -> Result<PokerReport, GameError> {
        let street = self.require_betting("call")?;
        self.advance(street, bankroll, bots)
    }

    /// Puts the bet in again, then closes the betting round.
    pub fn raise(
        &mut self,
        bankroll: &mut Bankroll,
        bots: &mut dyn BotDecider,
    ) -> Result<PokerReport, GameError> {
        let street = self.require_betting("raise")?;
        bankroll.debit(self.bet)?;
        self.pot += self.bet;
        self.committed += self.bet;
        self.advance(street, bankroll, bots)
    }

    /// The player gives up; the bots still in the hand contest the pot.
    pub fn fold(&mut self) -> Result<PokerSettlement, GameError> {
        self.require_betting("fold")?;
        self.folded[Seat::Player.index()] = true;
        let contenders = self.active_bots();
        let settlement = self.award(SettleReason::PlayerFolded, &contenders)?;
        Ok(self.finish(settlement, None))
    }

    fn advance(
        &mut self,
        street: Street,
        bankroll: &mut Bankroll,
        bots: &mut dyn BotDecider,
    ) -> Result<PokerReport, GameError> {
        let mut report = PokerReport::default();

        for seat in self.active_bots() {
            let action = bots.decide(&BotView {
                seat,
                hole: self.hole(seat),
                board: &self.board,
                street,
                pot: self.pot,
            });
            debug!(seat = seat.name(), action = action.as_str(), "bot acts");
            if action == BotAction::Fold {
                self.folded[seat.index()] = true;
            }
            report.bot_actions.push((seat, action));
        }

        if self.active_bots().is_empty() {
            let settlement = self.award(SettleReason::BotsFolded, &[Seat::Player])?;
            report.settlement = Some(self.finish(settlement, Some(bankroll)));
            return Ok(report);
        }

        match street.next() {
            Some((next, count)) => {
                let cards = self.deck.draw_n(count)?;
                self.board.extend_from_slice(&cards);
                report.revealed = cards;
                report.street = Some(next);
                self.phase = Phase::Betting(next);
            }
            None => {
                let mut contenders = vec![Seat::Player];
                contenders.extend(self.active_bots());
                let settlement = self.award(SettleReason::Showdown, &contenders)?;
                report.settlement = Some(self.finish(settlement, Some(bankroll)));
            }
        }
        Ok(report)
    }

    /// Compares the contenders' best hands and splits the pot among the best.
    fn award(&self, reason: SettleReason, contenders: &[Seat]) -> Result<PokerSettlement, GameError> {
        let mut hands = Vec::with_capacity(contenders.len());
        for &seat in contenders {
            hands.push((seat, best_hand(self.hole(seat), &self.board)?));
        }
        let winners: Vec<Seat> = match hands.iter().map(|(_, h)| *h).max() {
            Some(top) => hands
                .iter()
                .filter(|(_, h)| *h == top)
                .map(|(s, _)| *s)
                .collect(),
            None => Vec::new(),
        };
        let player_payout = split_pot(self.pot, &winners)
            .into_iter()
            .find(|(s, _)| *s == Seat::Player)
            .map_or(0, |(_, share)| share);

        Ok(PokerSettlement {
            reason,
            pot: self.pot,
            winners,
            hands,
            player_payout,
        })
    }

    fn finish(
        &mut self,
        settlement: PokerSettlement,
        bankroll: Option<&mut Bankroll>,
    ) -> PokerSettlement {
        if let Some(bankroll) = bankroll {
            bankroll.credit(settlement.player_payout);
        }
        debug!(
            reason = ?settlement.reason,
            pot = settlement.pot,
            payout = settlement.player_payout,
            "poker settled"
        );
        self.phase = Phase::Settled;
        self.settlement = Some(settlement.clone());
        settlement
    }

    #[cfg(test)]
    pub(crate) fn rig(
        &mut self,
        holes: [Vec<Card>; 3],
        board: Vec<Card>,
        folded: [bool; 3],
        pot: u64,
        phase: Phase,
    ) {
        self.holes = holes;
        self.board = board;
        self.folded = folded;
        self.pot = pot;
        self.phase = phase;
    }

    fn require_betting(&self, action: &'static str) -> Result<Street, GameError> {
        match self.phase {
            Phase::Betting(street) => Ok(street),
            other => Err(GameError::InvalidPhase {
                action,
                phase: other.as_str(),
            }),
        }
    }

    fn require_any(&self, allowed: &[Phase], action: &'static str) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                action,
                phase: self.phase.as_str(),
            })
        }
    }
}

/// Equal shares for every winner; the remainder goes one coin at a time in seat order.
pub fn split_pot(pot: u64, winners: &[Seat]) -> Vec<(Seat, u64)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u64;
    let base = pot / n;
    let mut odd = pot % n;
    let mut ordered = winners.to_vec();
    ordered.sort_by_key(|s| s.index());
    ordered
        .into_iter()
        .map(|seat| {
            let extra = if odd > 0 {
                odd -= 1;
                1
            } else {
                0
            };
            (seat, base + extra)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bankroll::MAX_BET;
    use crate::cards::parse_cards;

    struct Caller;

    impl BotDecider for Caller {
        fn decide(&mut self, _view: &BotView<'_>) -> BotAction {
            BotAction::Call
        }
    }

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn river_table(holes: [&str; 3], board: &str, folded: [bool; 3], pot: u64) -> PokerTable {
        let mut t = PokerTable::new(1);
        t.rig(
            holes.map(cards),
            cards(board),
            folded,
            pot,
            Phase::Betting(Street::River),
        );
        t
    }

    #[test]
    fn board_that_plays_splits_three_ways_with_odd_coin_to_player() {
        let mut t = river_table(
            ["2c 3d", "4c 5d", "6c 7d"],
            "Ts Js Qs Ks As",
            [false; 3],
            91,
        );
        let mut bank = Bankroll::new(100);
        let report = t.call(&mut bank, &mut Caller).unwrap();
        let s = report.settlement.unwrap();
        assert_eq!(s.reason, SettleReason::Showdown);
        assert_eq!(s.winners, vec![Seat::Player, Seat::Bot1, Seat::Bot2]);
        assert_eq!(s.player_payout, 31);
        assert_eq!(
            split_pot(s.pot, &s.winners),
            vec![(Seat::Player, 31), (Seat::Bot1, 30), (Seat::Bot2, 30)]
        );
        assert_eq!(bank.balance(), 131);
        assert_eq!(t.phase(), Phase::Settled);
    }

    #[test]
    fn player_and_bot_tie_at_showdown() {
        let mut t = river_table(
            ["2c 3d", "4c 5d", "6c 7d"],
            "Ts Js Qs Ks As",
            [false, false, true],
            45,
        );
        let mut bank = Bankroll::new(0);
        let s = t.call(&mut bank, &mut Caller).unwrap().settlement.unwrap();
        assert_eq!(s.winners, vec![Seat::Player, Seat::Bot1]);
        assert_eq!(s.player_payout, 23);
        assert_eq!(bank.balance(), 23);
    }

    #[test]
    fn kicker_breaks_a_high_card_tie() {
        let mut t = river_table(
            ["Qc 3d", "Jc 4d", "6c 7d"],
            "Ah Kd 8c 5s 2h",
            [false, false, true],
            60,
        );
        let mut bank = Bankroll::new(0);
        let s = t.call(&mut bank, &mut Caller).unwrap().settlement.unwrap();
        assert_eq!(s.winners, vec![Seat::Player]);
        assert_eq!(s.player_payout, 60);
    }

    #[test]
    fn tied_bots_split_after_player_folds() {
        let mut t = river_table(
            ["7c 8d", "3c 4d", "5c 6d"],
            "Ah Ad Kc Ks Qh",
            [false; 3],
            61,
        );
        let s = t.fold().unwrap();
        assert_eq!(s.reason, SettleReason::PlayerFolded);
        assert_eq!(s.winners, vec![Seat::Bot1, Seat::Bot2]);
        assert_eq!(s.player_payout, 0);
        assert_eq!(
            split_pot(s.pot, &s.winners),
            vec![(Seat::Bot1, 31), (Seat::Bot2, 30)]
        );
    }

    #[test]
    fn set_bet_at_the_limit_keeps_the_pot_in_range() {
        let bank = Bankroll::new(u64::MAX);
        let mut t = PokerTable::new(1);
        assert_eq!(
            t.set_bet(u64::MAX / 2, &bank),
            Err(GameError::BetTooLarge { max: MAX_BET })
        );
        assert_eq!(t.phase(), Phase::Idle);
        t.set_bet(MAX_BET, &bank).unwrap();
        assert_eq!(t.pot(), MAX_BET * ANTE_MULTIPLIER);
    }

    #[test]
    fn split_pot_gives_odd_coin_to_earliest_seat() {
        let shares = split_pot(100, &[Seat::Bot2, Seat::Player, Seat::Bot1]);
        assert_eq!(
            shares,
            vec![(Seat::Player, 34), (Seat::Bot1, 33), (Seat::Bot2, 33)]
        );
        assert_eq!(split_pot(90, &[Seat::Bot1]), vec![(Seat::Bot1, 90)]);
        assert!(split_pot(90, &[]).is_empty());
    }

    #[test]
    fn street_progression() {
        assert_eq!(Street::Preflop.next(), Some((Street::Flop, 3)));
        assert_eq!(Street::Flop.next(), Some((Street::Turn, 1)));
        assert_eq!(Street::Turn.next(), Some((Street::River, 1)));
        assert_eq!(Street::River.next(), None);
    }
}
