pub mod id;
pub mod nominee;
pub mod vote;
