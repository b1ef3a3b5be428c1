use clap::Parser;
use int_long_map::IntLongHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "initial_capacity", default_value_t = 16)]
    initial_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f32,

    #[arg(short = 'n', long = "count", default_value_t = 100_000)]
    count: usize,

    /// Insert sequential keys instead of random ones.
    #[arg(long)]
    sequential: bool,

    #[arg(short = 's', long = "seed", default_value_t = 0x5eed)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating IntLongHashMap with capacity {} and load factor {}",
        args.initial_capacity, args.load_factor
    );

    let mut map =
        IntLongHashMap::with_capacity_and_load_factor(args.initial_capacity, args.load_factor);
    let mut rng = SmallRng::seed_from_u64(args.seed);

    let mut growths = 0;
    let mut capacity = map.capacity();
    for i in 0..args.count {
        let key = if args.sequential {
            i as i32
        } else {
            loop {
                let key: i32 = rng.random();
                if key != IntLongHashMap::RESERVED_KEY {
                    break key;
                }
            }
        };

        map.put(key, i as i64);
        if map.capacity() != capacity {
            growths += 1;
            capacity = map.capacity();
        }
    }

    println!(
        "Inserted {} distinct keys ({} puts, {} growths)",
        map.len(),
        args.count,
        growths
    );
    println!(
        "Final capacity: {} (next growth at {})",
        map.capacity(),
        map.max_populated()
    );

    map.probe_histogram().print();
    map.debug_stats().print();
}
