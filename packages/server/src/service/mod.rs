pub mod top;

pub use top::{TopError, TopService};
