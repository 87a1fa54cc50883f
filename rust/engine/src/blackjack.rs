//! Blackjack against a dealer who draws to 17.
//!
//! The table is an explicit state machine:
//!
//! ```text
//! Idle -> BetPlaced -> (deal) -> PlayerTurn -> DealerTurn -> Settled -> BetPlaced ...
//!                         \-> Settled (natural 21)
//! ```
//!
//! Every action checks the current [`Phase`] and returns
//! [`GameError::InvalidPhase`] when it does not apply. Coins move through a
//! [`Bankroll`] passed in by the caller: the bet is debited on `deal` (and again
//! on `double_down`), the payout is credited once at settlement.
//!
//! ```
//! use casino_engine::bankroll::Bankroll;
//! use casino_engine::blackjack::{Blackjack, Phase};
//! use casino_engine::pacing::NoDelay;
//!
//! let mut bank = Bankroll::new(1000);
//! let mut table = Blackjack::new(7);
//! table.place_bet(100, &bank).unwrap();
//! if table.deal(&mut bank).unwrap().is_none() {
//!     table.stand().unwrap();
//!     table.play_dealer(&mut bank, &mut NoDelay).unwrap();
//! }
//! assert_eq!(table.phase(), Phase::Settled);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bankroll::Bankroll;
use crate::cards::{Card, Rank};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::pacing::Pacer;

/// Dealer keeps drawing while below this total.
pub const DEALER_STANDS_ON: u32 = 17;
pub const BLACKJACK: u32 = 21;

/// Hand total with soft-ace reduction.
///
/// Aces start at 11; while the total exceeds 21 one Ace at a time is demoted
/// to 1.
pub fn score(cards: &[Card]) -> u32 {
    let mut total: u32 = cards.iter().map(|c| c.rank.blackjack_value()).sum();
    let mut soft_aces = cards.iter().filter(|c| c.rank == Rank::Ace).count();
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    total
}

pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && score(cards) == BLACKJACK
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    BetPlaced,
    PlayerTurn,
    DealerTurn,
    Settled,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::BetPlaced => "waiting for the deal",
            Phase::PlayerTurn => "the player is acting",
            Phase::DealerTurn => "the dealer is playing",
            Phase::Settled => "the round is settled",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Natural 21 on the first two cards.
    Blackjack,
    PlayerBust,
    DealerBust,
    DealerWins,
    PlayerWins,
    Push,
}

impl Outcome {
    /// Coins returned to the player for a round wagered at `bet`.
    pub fn payout(self, bet: u64) -> u64 {
        match self {
            Outcome::Blackjack => bet * 5 / 2,
            Outcome::DealerBust | Outcome::PlayerWins => bet * 2,
            Outcome::Push => bet,
            Outcome::PlayerBust | Outcome::DealerWins => 0,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Blackjack => "Blackjack! You win!",
            Outcome::PlayerBust => "Bust! You lose.",
            Outcome::DealerBust => "Dealer busts! You win!",
            Outcome::DealerWins => "Dealer wins.",
            Outcome::PlayerWins => "You win!",
            Outcome::Push => "Push. Your bet is returned.",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub outcome: Outcome,
    pub bet: u64,
    pub payout: u64,
    pub player_score: u32,
    pub dealer_score: u32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DealerStep {
    Draw(Card),
    Settled(Settlement),
}

#[derive(Debug, Clone)]
pub struct Blackjack {
    deck: Deck,
    player: Vec<Card>,
    dealer: Vec<Card>,
    bet: u64,
    phase: Phase,
    settlement: Option<Settlement>,
}

impl Blackjack {
    pub fn new(seed: u64) -> Self {
        Self {
            deck: Deck::new_with_seed(seed),
            player: Vec::with_capacity(8),
            dealer: Vec::with_capacity(8),
            bet: 0,
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

    pub fn player_hand(&self) -> &[Card] {
        &self.player
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer
    }

    pub fn player_score(&self) -> u32 {
        score(&self.player)
    }

    pub fn dealer_score(&self) -> u32 {
        score(&self.dealer)
    }

    /// Whether the dealer's second card is still face down.
    pub fn dealer_hole_hidden(&self) -> bool {
        self.phase == Phase::PlayerTurn
    }

    /// The dealer total a player may see: only the upcard while the hole card is hidden.
    pub fn dealer_visible_score(&self) -> u32 {
        if self.dealer_hole_hidden() {
            self.dealer.first().map_or(0, |c| c.rank.blackjack_value())
        } else {
            self.dealer_score()
        }
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn can_double_down(&self, bankroll: &Bankroll) -> bool {
        self.phase == Phase::PlayerTurn
            && self.player.len() == 2
            && bankroll.check_wager(self.bet).is_ok()
    }

    pub fn place_bet(&mut self, amount: u64, bankroll: &Bankroll) -> Result<(), GameError> {
        self.require(&[Phase::Idle, Phase::BetPlaced, Phase::Settled], "place a bet")?;
        bankroll.check_wager(amount)?;
        self.bet = amount;
        self.phase = Phase::BetPlaced;
        Ok(())
    }

    /// Debits the bet and deals two cards each, player first.
    ///
    /// Returns the settlement when the player's first two cards make 21.
    pub fn deal(&mut self, bankroll: &mut Bankroll) -> Result<Option<Settlement>, GameError> {
        self.require(&[Phase::BetPlaced], "deal")?;
        bankroll.debit(self.bet)?;

        self.player.clear();
        self.dealer.clear();
        self.settlement = None;
        self.deck.shuffle();
        for _ in 0..2 {
            self.player.push(self.deck.draw()?);
            self.dealer.push(self.deck.draw()?);
        }
        debug!(bet = self.bet, player = self.player_score(), "blackjack dealt");

        if self.player_score() == BLACKJACK {
            return Ok(Some(self.settle(Outcome::Blackjack, bankroll)));
        }
        self.phase = Phase::PlayerTurn;
        Ok(None)
    }

    /// Draws one card. A bust settles the round; exactly 21 stands automatically.
    pub fn hit(&mut self, bankroll: &mut Bankroll) -> Result<Option<Settlement>, GameError> {
        self.require(&[Phase::PlayerTurn], "hit")?;
        let card = self.deck.draw()?;
        self.player.push(card);
        Ok(self.after_player_draw(bankroll))
    }

    pub fn stand(&mut self) -> Result<(), GameError> {
        self.require(&[Phase::PlayerTurn], "stand")?;
        self.phase = Phase::DealerTurn;
        Ok(())
    }

    /// Doubles the bet, draws exactly one card, then stands unless busted.
    pub fn double_down(
        &mut self,
        bankroll: &mut Bankroll,
    ) -> Result<Option<Settlement>, GameError> {
        self.require(&[Phase::PlayerTurn], "double down")?;
        if self.player.len() != 2 {
            return Err(GameError::DoubleDownUnavailable);
        }
        bankroll.debit(self.bet)?;
        self.bet *= 2;
        let card = self.deck.draw()?;
        self.player.push(card);
        let settled = self.after_player_draw(bankroll);
        if self.phase == Phase::PlayerTurn {
            self.phase = Phase::DealerTurn;
        }
        Ok(settled)
    }

    /// Advances the dealer by one step: a draw below 17, otherwise settlement.
    pub fn dealer_step(&mut self, bankroll: &mut Bankroll) -> Result<DealerStep, GameError> {
        self.require(&[Phase::DealerTurn], "advance the dealer")?;
        if self.dealer_score() < DEALER_STANDS_ON {
            let card = self.deck.draw()?;
            self.dealer.push(card);
            debug!(card = %card, total = self.dealer_score(), "dealer draws");
            return Ok(DealerStep::Draw(card));
        }

        let player = self.player_score();
        let dealer = self.dealer_score();
        let outcome = if dealer > BLACKJACK {
            Outcome::DealerBust
        } else if dealer > player {
            Outcome::DealerWins
        } else if player > dealer {
            Outcome::PlayerWins
        } else {
            Outcome::Push
        };
        Ok(DealerStep::Settled(self.settle(outcome, bankroll)))
    }

    /// Iterator over the remaining dealer steps, ending with the settlement.
    pub fn dealer_steps<'a>(&'a mut self, bankroll: &'a mut Bankroll) -> DealerSteps<'a> {
        DealerSteps {
            table: self,
            bankroll,
            done: false,
        }
    }

    /// Plays the dealer hand to completion, pausing before every step.
    pub fn play_dealer(
        &mut self,
        bankroll: &mut Bankroll,
        pacer: &mut dyn Pacer,
    ) -> Result<Settlement, GameError> {
        let mut steps = self.dealer_steps(bankroll);
        loop {
            pacer.pause();
            match steps.next() {
                Some(Ok(DealerStep::Draw(_))) => continue,
                Some(Ok(DealerStep::Settled(s))) => return Ok(s),
                Some(Err(e)) => return Err(e),
                None => return Err(GameError::DeckExhausted),
            }
        }
    }

    fn after_player_draw(&mut self, bankroll: &mut Bankroll) -> Option<Settlement> {
        let total = self.player_score();
        if total > BLACKJACK {
            Some(self.settle(Outcome::PlayerBust, bankroll))
        } else {
            if total == BLACKJACK {
                self.phase = Phase::DealerTurn;
            }
            None
        }
    }

    fn settle(&mut self, outcome: Outcome, bankroll: &mut Bankroll) -> Settlement {
        let settlement = Settlement {
            outcome,
            bet: self.bet,
            payout: outcome.payout(self.bet),
            player_score: self.player_score(),
            dealer_score: self.dealer_score(),
        };
        bankroll.credit(settlement.payout);
        self.phase = Phase::Settled;
        self.settlement = Some(settlement);
        debug!(?outcome, payout = settlement.payout, "blackjack settled");
        settlement
    }

    fn require(&self, allowed: &[Phase], action: &'static str) -> Result<(), GameError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidPhase {
                action,
                phase: self.phase.as_str(),
            })
        }
    }

    #[cfg(test)]
    pub(crate) fn rig(&mut self, player: Vec<Card>, dealer: Vec<Card>, bet: u64, phase: Phase) {
        self.player = player;
        self.dealer = dealer;
        self.bet = bet;
        self.phase = phase;
    }
}

/// Step driver for the dealer turn. Yields `Draw` steps, then one `Settled`.
pub struct DealerSteps<'a> {
    table: &'a mut Blackjack,
    bankroll: &'a mut Bankroll,
    done: bool,
}

impl Iterator for DealerSteps<'_> {
    type Item = Result<DealerStep, GameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = self.table.dealer_step(self.bankroll);
        if !matches!(step, Ok(DealerStep::Draw(_))) {
            self.done = true;
        }
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::pacing::CountingPacer;

    fn c(r: Rank) -> Card {
        Card::new(r, Suit::Hearts)
    }

    #[test]
    fn dealer_on_eighteen_never_draws() {
        let mut bank = Bankroll::new(900);
        let mut t = Blackjack::new(1);
        t.rig(
            vec![c(Rank::Ten), c(Rank::Nine)],
            vec![c(Rank::Ten), c(Rank::Eight)],
            100,
            Phase::DealerTurn,
        );
        let steps: Vec<_> = t.dealer_steps(&mut bank).collect::<Result<_, _>>().unwrap();
        assert_eq!(steps.len(), 1);
        match steps[0] {
            DealerStep::Settled(s) => {
                assert_eq!(s.outcome, Outcome::PlayerWins);
                assert_eq!(s.payout, 200);
            }
            DealerStep::Draw(_) => panic!("dealer on 18 must not draw"),
        }
        assert_eq!(bank.balance(), 1100);
        assert_eq!(t.dealer_hand().len(), 2);
    }

    #[test]
    fn dealer_draws_until_seventeen() {
        let mut bank = Bankroll::new(0);
        let mut t = Blackjack::new(99);
        t.deck.shuffle();
        t.rig(
            vec![c(Rank::Ten), c(Rank::Ten)],
            vec![c(Rank::Two), c(Rank::Three)],
            10,
            Phase::DealerTurn,
        );
        let mut pacer = CountingPacer::default();
        let s = t.play_dealer(&mut bank, &mut pacer).unwrap();
        assert!(t.dealer_score() >= DEALER_STANDS_ON);
        // every card before the last left the dealer under 17
        let drawn = t.dealer_hand().len();
        assert!(score(&t.dealer_hand()[..drawn - 1]) < DEALER_STANDS_ON);
        assert_eq!(pacer.pauses, drawn - 2 + 1);
        assert_eq!(bank.balance(), s.payout);
    }

    #[test]
    fn tie_is_a_push() {
        let mut bank = Bankroll::new(0);
        let mut t = Blackjack::new(1);
        t.rig(
            vec![c(Rank::King), c(Rank::Seven)],
            vec![c(Rank::Queen), c(Rank::Seven)],
            40,
            Phase::DealerTurn,
        );
        match t.dealer_step(&mut bank).unwrap() {
            DealerStep::Settled(s) => assert_eq!(s.outcome, Outcome::Push),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(bank.balance(), 40);
    }

    #[test]
    fn dealer_higher_wins() {
        let mut bank = Bankroll::new(0);
        let mut t = Blackjack::new(1);
        t.rig(
            vec![c(Rank::King), c(Rank::Seven)],
            vec![c(Rank::Queen), c(Rank::Nine)],
            40,
            Phase::DealerTurn,
        );
        let s = t.play_dealer(&mut bank, &mut CountingPacer::default()).unwrap();
        assert_eq!(s.outcome, Outcome::DealerWins);
        assert_eq!(bank.balance(), 0);
    }

    #[test]
    fn dealer_step_outside_dealer_turn_is_rejected() {
        let mut bank = Bankroll::new(0);
        let mut t = Blackjack::new(1);
        assert!(matches!(
            t.dealer_step(&mut bank),
            Err(GameError::InvalidPhase { .. })
        ));
        let mut steps = t.dealer_steps(&mut bank);
        assert!(matches!(steps.next(), Some(Err(_))));
        assert!(steps.next().is_none());
    }

    #[test]
    fn hit_to_exactly_21_hands_over_to_dealer() {
        let mut bank = Bankroll::new(0);
        let mut t = Blackjack::new(5);
        t.deck.reset();
        // deck pops from the end: King of Clubs is next
        t.rig(
            vec![c(Rank::Five), c(Rank::Six)],
            vec![c(Rank::Two), c(Rank::Three)],
            10,
            Phase::PlayerTurn,
        );
        assert_eq!(t.hit(&mut bank).unwrap(), None);
        assert_eq!(t.player_score(), 21);
        assert_eq!(t.phase(), Phase::DealerTurn);
    }

    #[test]
    fn blackjack_payout_is_two_and_a_half() {
        assert_eq!(Outcome::Blackjack.payout(100), 250);
        assert_eq!(Outcome::Blackjack.payout(10), 25);
        assert_eq!(Outcome::PlayerWins.payout(100), 200);
        assert_eq!(Outcome::Push.payout(100), 100);
        assert_eq!(Outcome::PlayerBust.payout(100), 0);
    }

    #[test]
    fn hole_card_hidden_only_during_player_turn() {
        let mut t = Blackjack::new(1);
        t.rig(
            vec![c(Rank::Five), c(Rank::Six)],
            vec![c(Rank::Nine), c(Rank::Ace)],
            10,
            Phase::PlayerTurn,
        );
        assert!(t.dealer_hole_hidden());
        assert_eq!(t.dealer_visible_score(), 9);
        t.stand().unwrap();
        assert_eq!(t.dealer_visible_score(), 20);
    }
}
