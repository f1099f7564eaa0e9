use crate::constants::{CREDIT_COOKIE_KEY, CREDIT_COOKIE_TTL_DAYS, DEFAULT_CREDIT_AMOUNT};

/// Narrow persistence contract the ledger writes through. The browser
/// build backs this with `document.cookie`; tests use an in-memory map.
pub trait CreditStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str, ttl_days: u32);
}

/// Session credit balance. Every mutation persists before returning, so a
/// reload can never observe a half-applied play.
#[derive(Debug)]
pub struct Ledger<S: CreditStore> {
    store: S,
    balance: i64,
    last_stake: i64,
}

impl<S: CreditStore> Ledger<S> {
    /// Restores the balance from the store, seeding and persisting the
    /// default amount on first run.
    pub fn load(store: S) -> Self {
        let stored = store
            .get(CREDIT_COOKIE_KEY)
            .and_then(|v| v.parse::<i64>().ok());

        let mut ledger = Self {
            store,
            balance: stored.unwrap_or(0),
            last_stake: 1,
        };

        if stored.is_none() {
            ledger.balance = DEFAULT_CREDIT_AMOUNT;
            ledger.persist();
        }
        ledger
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Stake of the most recent accepted play; wins multiply against it.
    pub fn last_stake(&self) -> i64 {
        self.last_stake
    }

    /// Withdraws `amount` if the balance covers it. Returns `false` and
    /// leaves the balance untouched otherwise.
    pub fn try_debit(&mut self, amount: i64) -> bool {
        if self.balance < amount {
            log::info!("debit of {} refused, balance is {}", amount, self.balance);
            return false;
        }
        self.balance -= amount;
        self.last_stake = amount;
        self.persist();
        true
    }

    /// Adds `amount` (zero is allowed) and persists.
    pub fn credit(&mut self, amount: i64) {
        self.balance += amount;
        self.persist();
    }

    /// Unconditionally restores the balance to `default_amount`.
    pub fn reset(&mut self, default_amount: i64) {
        self.balance = default_amount;
        self.persist();
        log::info!("credits reset to {}", default_amount);
    }

    /// Administrative override: zeroes the balance, then credits it back
    /// up to `amount`. Non-positive amounts are ignored.
    pub fn set_balance(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        self.balance = 0;
        self.credit(amount);
    }

    fn persist(&mut self) {
        self.store.set(
            CREDIT_COOKIE_KEY,
            &self.balance.to_string(),
            CREDIT_COOKIE_TTL_DAYS,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default, Clone)]
    struct MemoryStore(HashMap<String, String>);

    impl CreditStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str, _ttl_days: u32) {
            self.0.insert(key.to_string(), value.to_string());
        }
    }

    fn store_with_balance(balance: i64) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.set(CREDIT_COOKIE_KEY, &balance.to_string(), CREDIT_COOKIE_TTL_DAYS);
        store
    }

    #[test]
    fn test_first_run_seeds_and_persists_the_default() {
        let ledger = Ledger::load(MemoryStore::default());
        assert_eq!(ledger.balance(), DEFAULT_CREDIT_AMOUNT);
        assert_eq!(
            ledger.store.get(CREDIT_COOKIE_KEY),
            Some(DEFAULT_CREDIT_AMOUNT.to_string())
        );
    }

    #[test]
    fn test_unparsable_stored_value_reseeds_the_default() {
        let mut store = MemoryStore::default();
        store.set(CREDIT_COOKIE_KEY, "not a number", CREDIT_COOKIE_TTL_DAYS);

        let ledger = Ledger::load(store);
        assert_eq!(ledger.balance(), DEFAULT_CREDIT_AMOUNT);
    }

    #[test]
    fn test_debit_is_all_or_nothing() {
        let mut ledger = Ledger::load(store_with_balance(500));

        assert!(!ledger.try_debit(501));
        assert_eq!(ledger.balance(), 500);

        assert!(ledger.try_debit(500));
        assert_eq!(ledger.balance(), 0);
        assert_eq!(ledger.last_stake(), 500);
    }

    #[test]
    fn test_refused_debit_does_not_touch_the_store() {
        let mut ledger = Ledger::load(store_with_balance(100));
        assert!(!ledger.try_debit(1_000));
        assert_eq!(ledger.store.get(CREDIT_COOKIE_KEY), Some("100".to_string()));
    }

    #[test]
    fn test_credit_zero_is_allowed() {
        let mut ledger = Ledger::load(store_with_balance(100));
        ledger.credit(0);
        assert_eq!(ledger.balance(), 100);
    }

    #[test]
    fn test_persistence_round_trip() {
        let mut ledger = Ledger::load(store_with_balance(2_000));
        assert!(ledger.try_debit(300));
        ledger.credit(50);

        // Simulated reload: a fresh ledger over the same store.
        let reloaded = Ledger::load(ledger.store.clone());
        assert_eq!(reloaded.balance(), 1_750);
    }

    #[test]
    fn test_reset_restores_the_default() {
        let mut ledger = Ledger::load(store_with_balance(3));
        ledger.reset(DEFAULT_CREDIT_AMOUNT);
        assert_eq!(ledger.balance(), DEFAULT_CREDIT_AMOUNT);
    }

    #[test]
    fn test_set_balance_overrides_and_ignores_non_positive() {
        let mut ledger = Ledger::load(store_with_balance(777));

        ledger.set_balance(42);
        assert_eq!(ledger.balance(), 42);

        ledger.set_balance(0);
        assert_eq!(ledger.balance(), 42);
        ledger.set_balance(-5);
        assert_eq!(ledger.balance(), 42);
    }
}
