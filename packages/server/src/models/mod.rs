pub mod shared;
pub mod top;
