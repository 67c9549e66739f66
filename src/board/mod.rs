//! Types for cells, digits and other things on a sudoku board
mod candidate;
mod cell_status;
mod digit;
mod grid;
pub mod positions;
mod solver;

pub(crate) use self::positions::{block, col, row};

pub use self::{
    candidate::Candidate,
    cell_status::CellStatus,
    digit::Digit,
    grid::Grid,
    positions::{Block, Cell, Col, House, HouseType, MiniLine, Row},
};
