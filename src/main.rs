use cidr_match::ipv4::{parse_addr, Ipv4Cidr};
use clap::Parser;
use std::io::{self, BufRead};
use std::str::FromStr;

#[derive(Parser)]
#[command(about = "Filter stdin for IPv4 addresses inside a CIDR range")]
struct Opts {
    /// Range to match against, e.g. 10.0.0.0/8
    cidr: String,

    /// Print the addresses outside the range instead
    #[arg(short, long)]
    invert: bool,
}

fn main() {
    let opts = Opts::parse();
    let range = match Ipv4Cidr::from_str(&opts.cidr) {
        Ok(range) => range,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if let Ok(l) = line {
            if let Ok(ip) = parse_addr(&l) {
                if range.contains(ip) != opts.invert {
                    println!("{}", l);
                }
            }
        }
    }
}
