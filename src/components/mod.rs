mod filter_bar;
mod game_grid;
mod header;

pub use filter_bar::FilterBar;
pub use game_grid::GameGrid;
pub use header::Header;
