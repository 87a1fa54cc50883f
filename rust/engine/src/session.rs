use crate::bankroll::Bankroll;
use crate::blackjack::{Blackjack, DealerStep, Settlement};
use crate::errors::GameError;
use crate::pacing::Pacer;
use crate::poker::{BotDecider, PokerReport, PokerSettlement, PokerTable};

/// All mutable state of one casino visit: the shared balance and both tables.
///
/// Every user-facing action goes through here so that settled rounds are
/// counted in one place.
#[derive(Debug, Clone)]
pub struct Session {
    seed: u64,
    bankroll: Bankroll,
    blackjack: Blackjack,
    poker: PokerTable,
    rounds_played: u32,
}

impl Session {
    pub fn new(balance: u64, seed: u64) -> Self {
        Self {
            seed,
            bankroll: Bankroll::new(balance),
            blackjack: Blackjack::new(seed),
            // separate stream so the two tables never share a shuffle
            poker: PokerTable::new(seed ^ 0x9E37_79B9_7F4A_7C15),
            rounds_played: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn balance(&self) -> u64 {
        self.bankroll.balance()
    }

    pub fn bankroll(&self) -> &Bankroll {
        &self.bankroll
    }

    pub fn bankroll_mut(&mut self) -> &mut Bankroll {
        &mut self.bankroll
    }

    pub fn blackjack(&self) -> &Blackjack {
        &self.blackjack
    }

    pub fn poker(&self) -> &PokerTable {
        &self.poker
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn place_bet(&mut self, amount: u64) -> Result<(), GameError> {
        self.blackjack.place_bet(amount, &self.bankroll)
    }

    pub fn deal(&mut self) -> Result<Option<Settlement>, GameError> {
        let settled = self.blackjack.deal(&mut self.bankroll)?;
        Ok(self.count(settled))
    }

    pub fn hit(&mut self) -> Result<Option<Settlement>, GameError> {
        let settled = self.blackjack.hit(&mut self.bankroll)?;
        Ok(self.count(settled))
    }

    pub fn stand(&mut self) -> Result<(), GameError> {
        self.blackjack.stand()
    }

    pub fn double_down(&mut self) -> Result<Option<Settlement>, GameError> {
        let settled = self.blackjack.double_down(&mut self.bankroll)?;
        Ok(self.count(settled))
    }

    /// One dealer step, for front ends that show each draw as it happens.
    pub fn dealer_step(&mut self) -> Result<DealerStep, GameError> {
        let step = self.blackjack.dealer_step(&mut self.bankroll)?;
        if matches!(step, DealerStep::Settled(_)) {
            self.rounds_played += 1;
        }
        Ok(step)
    }

    pub fn play_dealer(&mut self, pacer: &mut dyn Pacer) -> Result<Settlement, GameError> {
        let settlement = self.blackjack.play_dealer(&mut self.bankroll, pacer)?;
        self.rounds_played += 1;
        Ok(settlement)
    }

    pub fn set_poker_bet(&mut self, amount: u64) -> Result<(), GameError> {
        self.poker.set_bet(amount, &self.bankroll)
    }

    pub fn deal_poker(&mut self) -> Result<(), GameError> {
        self.poker.deal(&mut self.bankroll)
    }

    pub fn call(&mut self, bots: &mut dyn BotDecider) -> Result<PokerReport, GameError> {
        let report = self.poker.call(&mut self.bankroll, bots)?;
        Ok(self.count_report(report))
    }

    pub fn raise(&mut self, bots: &mut dyn BotDecider) -> Result<PokerReport, GameError> {
        let report = self.poker.raise(&mut self.bankroll, bots)?;
        Ok(self.count_report(report))
    }

    pub fn fold(&mut self) -> Result<PokerSettlement, GameError> {
        let settlement = self.poker.fold()?;
        self.rounds_played += 1;
        Ok(settlement)
    }

    fn count<T>(&mut self, settled: Option<T>) -> Option<T> {
        if settled.is_some() {
            self.rounds_played += 1;
        }
        settled
    }

    fn count_report(&mut self, report: PokerReport) -> PokerReport {
        if report.settlement.is_some() {
            self.rounds_played += 1;
        }
        report
    }
}
