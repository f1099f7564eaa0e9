pub mod slot_game;
