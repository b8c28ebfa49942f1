pub mod cache_board;
pub mod controls;
pub mod status_panel;
