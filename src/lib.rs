pub mod codec;
pub mod command;
pub mod grid;
pub mod history;
pub mod io;
pub mod rules;

mod parse_util;

pub use codec::DecodeError;
pub use grid::Grid;
pub use grid::GridError;
pub use history::Cycle;
pub use history::History;
pub use history::HistoryError;
pub use parse_util::ConvertError;
