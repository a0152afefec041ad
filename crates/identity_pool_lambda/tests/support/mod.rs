pub mod fakes;
pub mod events;
