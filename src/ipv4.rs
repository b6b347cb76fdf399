use lazy_static::lazy_static;
use regex::Captures;
use regex::Regex;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

lazy_static! {
    static ref ADDR_RE: Regex =
        Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").expect("Not possible");
    static ref CIDR_RE: Regex =
        Regex::new(r"^((?:\d{1,3}\.){3}\d{1,3})/(\d{1,2})$").expect("Not possible");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

// A shift by 32 overflows a bare `u32` shift, the result here is defined to be zero.
pub fn logical_shr(value: u32, bits: u8) -> Result<u32, Error> {
    if bits > 32 {
        return Err(Error::InvalidArgument(format!(
            "shift width {} exceeds 32",
            bits
        )));
    }
    Ok(value.checked_shr(u32::from(bits)).unwrap_or(0))
}

// The pattern only bounds the width of each group, the value bound lives in `octet`.
pub fn parse_addr(s: &str) -> Result<Ipv4Addr, Error> {
    match ADDR_RE.captures(s) {
        Some(ref v) => Ok(Ipv4Addr::from(
            (octet(1, v)? << 24) + (octet(2, v)? << 16) + (octet(3, v)? << 8) + octet(4, v)?,
        )),
        _ => Err(Error::InvalidArgument(format!("bad address: {:?}", s))),
    }
}

fn octet(ind: usize, v: &Captures) -> Result<u32, Error> {
    let d = v
        .get(ind)
        .map(|r| r.as_str().parse::<u32>())
        .ok_or_else(|| Error::InvalidArgument("Not possible".to_string()))?
        .map_err(|e| Error::InvalidArgument(e.to_string()))?;
    if d > 255 {
        return Err(Error::InvalidArgument(format!("octet {} exceeds 255", d)));
    }
    Ok(d)
}

pub fn matches(addr: &str, cidr: &str) -> Result<bool, Error> {
    let ip = parse_addr(addr)?;
    let range = Ipv4Cidr::from_str(cidr)?;
    Ok(range.contains(ip))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Cidr {
    net: u32,
    mask: u8,
}

impl Ipv4Cidr {
    pub fn new(mut net: u32, mask: u8) -> Result<Self, Error> {
        if mask > 32 {
            return Err(Error::InvalidArgument(format!(
                "prefix length {} exceeds 32",
                mask
            )));
        }
        // clear the host bits so equal ranges compare equal
        if mask == 0 {
            net = 0;
        } else if mask < 32 {
            net = (net >> (32 - mask)) << (32 - mask);
        }
        Ok(Ipv4Cidr { net, mask })
    }

    pub fn first_ip(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.net)
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        let b = 32 - self.mask;
        if b == 32 {
            return true;
        }
        u32::from(ip) >> b == self.net >> b
    }
}

impl FromStr for Ipv4Cidr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match CIDR_RE.captures(s) {
            Some(ref v) => {
                let net = parse_addr(v.get(1).expect("Not possible").as_str())?;
                let mask = v
                    .get(2)
                    .expect("Not possible")
                    .as_str()
                    .parse::<u8>()
                    .map_err(|e| Error::InvalidArgument(e.to_string()))?;
                Ipv4Cidr::new(u32::from(net), mask)
            }
            _ => Err(Error::InvalidArgument(format!("bad range: {:?}", s))),
        }
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.first_ip(), self.mask())
    }
}
