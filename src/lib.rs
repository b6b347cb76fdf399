pub mod ipv4;

pub use crate::ipv4::{logical_shr, matches, parse_addr, Error, Ipv4Cidr};
