//! Terminal Flappy Bird: a scrolling wall-and-item spawner, a
//! collision-driven score state machine, and persisted best scores.
//!
//! Game logic lives in [`compute`] as pure functions over the data in
//! [`entities`]; all terminal I/O stays in the binary. [`store`] is the
//! injected persistence port for the best scores.

pub mod compute;
pub mod entities;
pub mod store;
