use serde::{Serialize, Deserialize};

use crate::constants::DEFAULT_CREDIT_AMOUNT;
use crate::ledger::{CreditStore, Ledger};
use crate::paytable::calculate_points;
use crate::shared_slot_game::{SlotMachine, SpinPlan};

/// What came of a play request.
#[derive(Debug, Clone)]
pub enum PlayOutcome {
    /// The stake was taken and the reels are moving; the plan schedules
    /// the animation and already carries the resolved pay-line.
    Started(SpinPlan),
    /// The stake exceeds the balance; nothing was taken.
    InsufficientFunds,
    /// A spin is already running; the request was dropped.
    Busy,
}

/// Result of a finished spin, handed back to the UI for display.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinResult {
    pub pay_line: Vec<String>,
    pub points: u32,
    /// Points multiplied by the stake of the play; zero on a losing line.
    pub award: i64,
}

/// One player's machine and credits, owned by the game page for the life
/// of the session.
#[derive(Debug)]
pub struct SlotSession<S: CreditStore> {
    pub machine: SlotMachine,
    pub ledger: Ledger<S>,
}

impl<S: CreditStore> SlotSession<S> {
    pub fn new(machine: SlotMachine, ledger: Ledger<S>) -> Self {
        Self { machine, ledger }
    }

    /// Stakes `stake` credits and starts a spin. The debit happens only
    /// after the busy check, so a dropped request never touches the
    /// balance.
    pub fn play(&mut self, stake: i64, rng: impl FnMut() -> f64) -> PlayOutcome {
        if self.machine.is_spinning {
            return PlayOutcome::Busy;
        }
        if !self.ledger.try_debit(stake) {
            return PlayOutcome::InsufficientFunds;
        }

        let Some(plan) = self.machine.play(rng) else {
            self.ledger.credit(stake);
            return PlayOutcome::Busy;
        };
        PlayOutcome::Started(plan)
    }

    /// Debug spin: loads the forced queues and spins without staking
    /// credits. Wins still pay against the stake of the last normal play.
    pub fn play_forced(
        &mut self,
        selections: &[usize],
        rng: impl FnMut() -> f64,
    ) -> Option<SpinPlan> {
        if self.machine.is_spinning {
            return None;
        }
        self.machine.force_selections(selections);
        self.machine.play(rng)
    }

    /// Reported by the animation layer at the last reel stop. Scores the
    /// pay-line, credits any award, and frees the machine for the next
    /// play.
    pub fn finish_spin(&mut self, pay_line: &[String]) -> SpinResult {
        let points = calculate_points(pay_line);
        let award = points as i64 * self.ledger.last_stake();
        if award > 0 {
            self.ledger.credit(award);
            log::info!("pay-line {:?} won {} credits", pay_line, award);
        }
        self.machine.finish_spin();

        SpinResult {
            pay_line: pay_line.to_vec(),
            points,
            award,
        }
    }

    /// Restores the default balance. Refused while the reels are moving.
    pub fn reset(&mut self) -> bool {
        if self.machine.is_spinning {
            return false;
        }
        self.ledger.reset(DEFAULT_CREDIT_AMOUNT);
        true
    }

    /// Administrative balance override; see [`Ledger::set_balance`].
    pub fn set_balance(&mut self, amount: i64) {
        self.ledger.set_balance(amount);
    }

    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }

    pub fn is_spinning(&self) -> bool {
        self.machine.is_spinning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CreditStore;
    use crate::shared_slot_game::standard_machine;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(HashMap<String, String>);

    impl CreditStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str, _ttl_days: u32) {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    fn session() -> SlotSession<MemoryStore> {
        SlotSession::new(standard_machine(), Ledger::load(MemoryStore::default()))
    }

    #[test]
    fn test_full_winning_cycle_pays_points_times_stake() {
        let mut session = session();
        // "seven" is index 3; three sevens pay 50 points.
        session.machine.force_selections(&[3, 3, 3]);

        let plan = match session.play(100, || 0.5) {
            PlayOutcome::Started(plan) => plan,
            other => panic!("expected a started spin, got {:?}", other),
        };
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT - 100);

        let result = session.finish_spin(&plan.pay_line);
        assert_eq!(result.points, 50);
        assert_eq!(result.award, 5_000);
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT - 100 + 5_000);
        assert!(!session.is_spinning());
    }

    #[test]
    fn test_losing_cycle_only_costs_the_stake() {
        let mut session = session();
        // oneBar, twoBar, threeBar pays nothing.
        session.machine.force_selections(&[1, 2, 0]);

        let plan = match session.play(1_000, || 0.5) {
            PlayOutcome::Started(plan) => plan,
            other => panic!("expected a started spin, got {:?}", other),
        };
        let result = session.finish_spin(&plan.pay_line);
        assert_eq!(result.award, 0);
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT - 1_000);
    }

    #[test]
    fn test_insufficient_funds_leaves_balance_alone() {
        let mut session = session();
        let outcome = session.play(DEFAULT_CREDIT_AMOUNT + 1, || 0.5);
        assert!(matches!(outcome, PlayOutcome::InsufficientFunds));
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT);
        assert!(!session.is_spinning());
    }

    #[test]
    fn test_second_play_during_a_spin_is_dropped_without_a_debit() {
        let mut session = session();
        assert!(matches!(session.play(100, || 0.5), PlayOutcome::Started(_)));
        let balance_mid_spin = session.balance();

        assert!(matches!(session.play(100, || 0.5), PlayOutcome::Busy));
        assert_eq!(session.balance(), balance_mid_spin);
    }

    #[test]
    fn test_reset_refused_mid_spin_and_allowed_when_idle() {
        let mut session = session();
        let plan = match session.play(100, || 0.5) {
            PlayOutcome::Started(plan) => plan,
            other => panic!("expected a started spin, got {:?}", other),
        };

        assert!(!session.reset());
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT - 100);

        session.finish_spin(&plan.pay_line);
        assert!(session.reset());
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT);
    }

    #[test]
    fn test_forced_play_skips_the_debit() {
        let mut session = session();
        let plan = session
            .play_forced(&[4, 4, 4], || 0.5)
            .expect("machine is idle");
        assert_eq!(plan.pay_line, vec!["cherry", "cherry", "cherry"]);
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT);

        // The default stake multiplier is 1 until a normal play runs.
        let result = session.finish_spin(&plan.pay_line);
        assert_eq!(result.award, 150);
        assert_eq!(session.balance(), DEFAULT_CREDIT_AMOUNT + 150);
    }

    #[test]
    fn test_forced_play_respects_the_busy_guard() {
        let mut session = session();
        assert!(matches!(session.play(100, || 0.5), PlayOutcome::Started(_)));
        assert!(session.play_forced(&[3, 3, 3], || 0.5).is_none());
    }
}
