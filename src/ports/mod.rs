//! Ports (trait boundaries) between the game core and its drivers.
//!
//! Move-selection strategies implement [`Learner`]; anything that wants to
//! watch a training run or a match implements [`Observer`].

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
