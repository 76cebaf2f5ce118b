//! Appeal board.
//!
//! A party to a ruled dispute may contest the ruling by filing an appeal with
//! a reason and a fee. Arbitrators accept or reject each appeal exactly once.
//! At most one appeal per dispute is pending at any time.

pub mod appeal;
pub mod board;
pub mod error;
pub mod event;

pub use appeal::Appeal;
pub use board::AppealBoard;
pub use error::AppealError;
pub use event::AppealEvent;
