
pub mod eightball;
pub mod rps;
