pub mod channels;
pub mod in_memory;
