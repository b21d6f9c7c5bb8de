#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative grid and rover state for the Mars rover simulator.
//!
//! A [`Grid`] owns the wrapping coordinate space and its obstacles. A
//! [`Rover`] takes ownership of one grid together with a validated starting
//! pose and interprets the `F`, `B`, `L`, `R` command language against it.

mod grid;
mod rover;

pub use grid::Grid;
pub use rover::Rover;
