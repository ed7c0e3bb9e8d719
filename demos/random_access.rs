use std::net::Ipv4Addr;

use patricia_bits::*;

use ipnet::Ipv4Net;
use rand::prelude::*;

fn main() {
    let mut tree = RadixTree::<Ipv4Net, u32>::new();
    let mut versions = Vec::new();

    let mut rng = thread_rng();

    for i in 0..1_000_000 {
        let prefix = Ipv4Net::new(Ipv4Addr::new(rng.gen(), 0, 0, 0), rng.gen_range(1..=8))
            .unwrap()
            .trunc();

        if rng.gen_bool(0.7) {
            let value: u32 = rng.gen::<u8>() as u32;
            tree = tree.put(prefix, value);
        } else if rng.gen_bool(0.1) {
            // combine all siblings whose values agree
            tree = tree.prune(
                |s| {
                    if s.left.1 == s.right.1 {
                        Combine::Accept(*s.left.1)
                    } else {
                        Combine::Reject
                    }
                },
                Pruning::Recurse,
            );
        } else {
            tree = tree.delete(&prefix);
        }

        // old versions stay valid
        if i % 100_000 == 0 {
            versions.push(tree.clone());
        }
    }

    for (i, version) in versions.iter().enumerate() {
        println!(
            "version {i}: {} prefixes, {} adjacent pairs",
            version.len(),
            version.adjacencies().len()
        );
    }
}
