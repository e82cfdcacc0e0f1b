pub use grid::*;
pub use history::*;
pub use moves::*;
pub use session::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod grid;
mod history;
mod moves;
mod session;
mod visualization;
