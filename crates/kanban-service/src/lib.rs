mod attachments;
mod board;
mod catalog;
mod columns;
pub mod drag;
mod error;
mod tasks;

pub use board::{BoardColumn, BoardService};
pub use drag::{DragState, DropOutcome, Point, TouchGesture, TouchOutcome};
pub use error::ServiceError;
