pub mod assembler;
pub mod client;
pub mod convert;
pub mod et0;
pub mod model;
