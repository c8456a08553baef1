/// Engine operation parameters and result shapes.
pub mod types;
