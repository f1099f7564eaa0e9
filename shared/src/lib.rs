pub mod constants;
pub mod ledger;
pub mod paytable;
pub mod session;
pub mod shared_slot_game;
