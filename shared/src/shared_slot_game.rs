use std::collections::VecDeque;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::constants::{FIRST_REEL_STOP_MS, REEL_STOP_INTERVAL_MS};

/// One entry on a reel strip.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    /// Relative draw weight, never normalized.
    pub weight: u32,
    /// Strip background offset the render layer lines this symbol up with.
    pub display_offset: f64,
}

impl Symbol {
    pub fn new(name: impl Into<String>, weight: u32, display_offset: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            display_offset,
        }
    }
}

/// A single spinning strip of weighted symbols.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Reel {
    pub symbols: Vec<Symbol>,
    /// Index of the symbol the reel last landed on.
    pub current: usize,
    /// Symbol indices consumed front-to-back instead of drawing.
    /// An index of 0 is a valid forced selection.
    pub forced_queue: VecDeque<usize>,
}

impl Reel {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self {
            symbols,
            current: 0,
            forced_queue: VecDeque::new(),
        }
    }

    /// Resolves the next landing position: forced entries win over the
    /// random draw.
    fn next_selection(&mut self, rng: &mut impl FnMut() -> f64) -> usize {
        match self.forced_queue.pop_front() {
            Some(index) if index < self.symbols.len() => index,
            Some(index) => {
                log::warn!("forced index {} out of range, drawing instead", index);
                select_weighted_index(&self.symbols, rng)
            }
            None => select_weighted_index(&self.symbols, rng),
        }
    }
}

/// Selects a symbol index proportionally to weight using a roll in [0, 1).
///
/// Walks the strip subtracting each skipped weight from the scaled roll.
/// Floating-point drift can carry the roll past the final boundary; the
/// last symbol is returned in that case.
pub fn select_weighted_index(symbols: &[Symbol], rng: &mut impl FnMut() -> f64) -> usize {
    let total_weight: u32 = symbols.iter().map(|s| s.weight).sum();
    let mut rand_num = rng() * total_weight as f64;

    for (index, symbol) in symbols.iter().enumerate() {
        if rand_num < symbol.weight as f64 {
            return index;
        }
        rand_num -= symbol.weight as f64;
    }

    symbols.len() - 1
}

/// Selects a symbol by weight using a supplied random source in [0, 1).
pub fn select_weighted<'a>(symbols: &'a [Symbol], mut rng: impl FnMut() -> f64) -> &'a Symbol {
    &symbols[select_weighted_index(symbols, &mut rng)]
}

/// Where and when one reel comes to rest.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReelStop {
    pub reel_index: usize,
    pub symbol_index: usize,
    pub symbol_name: String,
    pub target_offset: f64,
    /// Milliseconds after spin start at which this reel stops.
    pub stop_at_ms: u32,
}

/// The outcome of a spin, fixed the moment the spin starts.
///
/// `pay_line` is the logical result; `stops` only schedule the animation
/// and never influence which symbols were selected.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpinPlan {
    pub pay_line: Vec<String>,
    pub stops: Vec<ReelStop>,
}

impl SpinPlan {
    /// Delay of the final reel stop, after which the machine is idle again.
    pub fn last_stop_ms(&self) -> u32 {
        self.stops.last().map(|s| s.stop_at_ms).unwrap_or(0)
    }
}

/// Construction failed before any spin could run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotConfigError {
    NoReels,
}

impl fmt::Display for SlotConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotConfigError::NoReels => write!(f, "failed to initialize (missing reels)"),
        }
    }
}

impl std::error::Error for SlotConfigError {}

/// Drives the reels through a spin and hands the caller a stop schedule.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlotMachine {
    pub reels: Vec<Reel>,
    pub is_spinning: bool,
}

impl SlotMachine {
    pub fn new(reels: Vec<Reel>) -> Result<Self, SlotConfigError> {
        if reels.is_empty() {
            return Err(SlotConfigError::NoReels);
        }
        Ok(Self {
            reels,
            is_spinning: false,
        })
    }

    /// Starts a spin and resolves the full pay-line up front.
    ///
    /// Returns `None` while a previous spin is still running, so a caller
    /// gets exactly one plan per spin cycle. The busy flag stays set until
    /// `finish_spin` reports the last reel stop.
    pub fn play(&mut self, mut rng: impl FnMut() -> f64) -> Option<SpinPlan> {
        if self.is_spinning {
            log::debug!("play requested while reels are moving, dropped");
            return None;
        }
        self.is_spinning = true;

        let mut pay_line = Vec::with_capacity(self.reels.len());
        let mut stops = Vec::with_capacity(self.reels.len());

        for (reel_index, reel) in self.reels.iter_mut().enumerate() {
            let symbol_index = reel.next_selection(&mut rng);
            reel.current = symbol_index;

            let symbol = &reel.symbols[symbol_index];
            pay_line.push(symbol.name.clone());
            stops.push(ReelStop {
                reel_index,
                symbol_index,
                symbol_name: symbol.name.clone(),
                target_offset: symbol.display_offset,
                stop_at_ms: FIRST_REEL_STOP_MS + reel_index as u32 * REEL_STOP_INTERVAL_MS,
            });
        }

        log::info!("spin resolved: {:?}", pay_line);
        Some(SpinPlan { pay_line, stops })
    }

    /// Reported by the animation layer once the last reel has stopped.
    pub fn finish_spin(&mut self) {
        self.is_spinning = false;
    }

    /// Queues one forced symbol index per reel for the next spin.
    pub fn force_selections(&mut self, selections: &[usize]) {
        for (reel, &index) in self.reels.iter_mut().zip(selections) {
            reel.forced_queue.push_back(index);
        }
    }
}

/// The five-symbol strip of the original cabinet, heavily biased toward
/// the low-paying bars.
pub fn standard_symbols() -> Vec<Symbol> {
    vec![
        Symbol::new("threeBar", 2, 100.0),
        Symbol::new("oneBar", 6, 300.0),
        Symbol::new("twoBar", 5, 500.0),
        Symbol::new("seven", 1, 700.0),
        Symbol::new("cherry", 3, 900.0),
    ]
}

/// Three identical reels over the standard strip.
pub fn standard_machine() -> SlotMachine {
    let reels = (0..3).map(|_| Reel::new(standard_symbols())).collect();
    SlotMachine::new(reels).expect("standard reel set is not empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_zero_reels_is_a_construction_error() {
        let result = SlotMachine::new(Vec::new());
        assert!(matches!(result, Err(SlotConfigError::NoReels)));
    }

    #[test]
    fn test_weighted_draw_matches_weight_proportions() {
        let symbols = standard_symbols();
        let total: u32 = symbols.iter().map(|s| s.weight).sum();
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = vec![0u32; symbols.len()];

        let draws = 100_000;
        for _ in 0..draws {
            counts[select_weighted_index(&symbols, &mut || rng.gen::<f64>())] += 1;
        }

        for (symbol, &count) in symbols.iter().zip(&counts) {
            let expected = symbol.weight as f64 / total as f64;
            let observed = count as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "{}: expected {:.4}, observed {:.4}",
                symbol.name,
                expected,
                observed
            );
        }
    }

    #[test]
    fn test_weighted_draw_falls_back_to_last_symbol() {
        let symbols = standard_symbols();
        // Simulates drift past the top of the range: the walk clears every
        // boundary and must settle on the last symbol instead of failing.
        let index = select_weighted_index(&symbols, &mut || 1.0);
        assert_eq!(index, symbols.len() - 1);
    }

    #[test]
    fn test_weighted_draw_zero_roll_selects_first_symbol() {
        let symbols = standard_symbols();
        assert_eq!(select_weighted_index(&symbols, &mut || 0.0), 0);
        assert_eq!(select_weighted(&symbols, || 0.0).name, "threeBar");
    }

    #[test]
    fn test_forced_queue_overrides_random_draw() {
        let mut machine = standard_machine();
        // "seven" sits at index 3 on the standard strip.
        machine.force_selections(&[3, 3, 3]);

        let plan = machine.play(|| 0.0).expect("machine is idle");
        assert_eq!(plan.pay_line, vec!["seven", "seven", "seven"]);
    }

    #[test]
    fn test_forced_index_zero_is_honored() {
        let mut machine = standard_machine();
        // Index 0 must be treated as present, not skipped as empty.
        machine.force_selections(&[0, 0, 0]);

        // An rng that would land every reel on "oneBar" if it were consulted.
        let plan = machine.play(|| 0.2).expect("machine is idle");
        assert_eq!(plan.pay_line, vec!["threeBar", "threeBar", "threeBar"]);
    }

    #[test]
    fn test_forced_queue_is_consumed_front_to_back() {
        let mut reel = Reel::new(standard_symbols());
        reel.forced_queue.push_back(4);
        reel.forced_queue.push_back(1);

        assert_eq!(reel.next_selection(&mut || 0.0), 4);
        assert_eq!(reel.next_selection(&mut || 0.0), 1);
        // Queue drained: falls back to the weighted draw.
        assert_eq!(reel.next_selection(&mut || 0.0), 0);
    }

    #[test]
    fn test_play_is_rejected_while_spinning() {
        let mut machine = standard_machine();
        assert!(machine.play(|| 0.5).is_some());
        assert!(machine.play(|| 0.5).is_none());

        machine.finish_spin();
        assert!(machine.play(|| 0.5).is_some());
    }

    #[test]
    fn test_stop_schedule_is_staggered_in_reel_order() {
        let mut machine = standard_machine();
        let plan = machine.play(|| 0.5).expect("machine is idle");

        let delays: Vec<u32> = plan.stops.iter().map(|s| s.stop_at_ms).collect();
        assert_eq!(delays, vec![2_000, 2_500, 3_000]);
        assert_eq!(plan.last_stop_ms(), 3_000);
    }

    #[test]
    fn test_result_is_fixed_at_spin_start() {
        let mut machine = standard_machine();
        machine.force_selections(&[3, 3, 3]);

        let plan = machine.play(|| 0.0).expect("machine is idle");
        // The landed selection is already recorded on every reel before
        // any stop timer would have fired.
        for (reel, stop) in machine.reels.iter().zip(&plan.stops) {
            assert_eq!(reel.current, stop.symbol_index);
        }
    }
}
