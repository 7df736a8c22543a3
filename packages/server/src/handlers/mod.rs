pub mod top;
