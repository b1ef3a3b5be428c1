use alloc::vec::Vec;

/// Utilization and probe statistics for an
/// [`IntLongHashMap`](crate::IntLongHashMap).
///
/// Only available with the `stats` feature (and in tests).
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of keys stored
    pub populated: usize,
    /// Number of slots allocated
    pub capacity: usize,
    /// Population at which the next insert grows the table
    pub max_populated: usize,
    /// Number of slots holding a key, counted by scanning the table
    pub occupied_slots: usize,
    /// populated / capacity
    pub load: f64,
    /// Largest distance of any key from its home slot
    pub longest_probe: usize,
    /// Mean distance of keys from their home slots
    pub mean_probe: f64,
    /// Bytes used by the key and value arrays
    pub total_bytes: usize,
    /// Bytes used by empty slots
    pub wasted_bytes: usize,
}

impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load, grows at {})",
            self.populated,
            self.capacity,
            self.load * 100.0,
            self.max_populated
        );
        println!("Occupied Slots: {}", self.occupied_slots);
        println!(
            "Probe Length: {:.3} mean, {} max",
            self.mean_probe, self.longest_probe
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
        println!(
            "Memory: {} bytes wasted ({:.02}%)",
            self.wasted_bytes,
            if self.total_bytes == 0 {
                0.0
            } else {
                (self.wasted_bytes as f64 / self.total_bytes as f64) * 100.0
            }
        );
    }
}

/// Histogram of probe lengths.
///
/// `bins[n]` is the number of keys stored `n` slots past their home slot.
#[derive(Debug, Clone, Default)]
pub struct ProbeHistogram {
    /// Key counts per probe length
    pub bins: Vec<usize>,
}

impl ProbeHistogram {
    /// Total number of keys counted.
    pub fn total(&self) -> usize {
        self.bins.iter().sum()
    }

    /// Pretty-prints the histogram as a horizontal bar chart.
    ///
    /// Trailing bins are grouped into a single `>=` row past 16 rows.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        const MAX_ROWS: usize = 16;

        let total = self.total();
        if total == 0 {
            println!("probe histogram: empty");
            return;
        }

        let mut rows: Vec<(alloc::string::String, usize)> = self
            .bins
            .iter()
            .take(MAX_ROWS)
            .enumerate()
            .map(|(length, &count)| (alloc::format!("{:>3}", length), count))
            .collect();
        if self.bins.len() > MAX_ROWS {
            let tail = self.bins[MAX_ROWS..].iter().sum();
            rows.push((alloc::format!(">={}", MAX_ROWS), tail));
        }

        let max = rows.iter().map(|&(_, count)| count).max().unwrap_or(0);
        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", total);

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 || max == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let full = units / 8;
            let rem = units % 8;
            let mut bar = "█".repeat(full);
            if rem > 0 {
                let ch = match rem {
                    1 => '▏',
                    2 => '▎',
                    3 => '▍',
                    4 => '▌',
                    5 => '▋',
                    6 => '▊',
                    7 => '▉',
                    _ => unreachable!(),
                };
                bar.push(ch);
            }
            bar
        };

        for (label, count) in rows {
            println!("{} | {} ({})", label, make_bar(count), count);
        }
    }
}
