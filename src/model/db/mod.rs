pub mod nominee;
pub mod vote;
