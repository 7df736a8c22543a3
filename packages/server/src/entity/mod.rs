pub mod item;
pub mod top;
