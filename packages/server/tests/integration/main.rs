mod common;
mod postgres;
