use std::fmt;

/// Depth calculates minimum, maximum, average and percentile of leaf
/// depths in a tree. A leaf is sampled for every absent child link, so
/// a tree with `n` entries yields `n + 1` samples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Depth {
    samples: usize,
    min: usize,
    max: usize,
    total: usize,
    depths: Vec<usize>, // histogram, indexed by depth.
}

impl Depth {
    pub(crate) fn new() -> Depth {
        Default::default()
    }

    pub(crate) fn sample(&mut self, depth: usize) {
        if self.samples == 0 || depth < self.min {
            self.min = depth
        }
        if depth > self.max {
            self.max = depth
        }
        if self.depths.len() <= depth {
            self.depths.resize(depth + 1, 0);
        }
        self.depths[depth] += 1;
        self.samples += 1;
        self.total += depth;
    }

    /// Return number of leaves sampled.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Return minimum leaf depth.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Return maximum leaf depth, which is the height of the tree.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Return the average leaf depth, rounded down.
    pub fn mean(&self) -> usize {
        match self.samples {
            0 => 0,
            n => self.total / n,
        }
    }

    /// Return depth as tuple of percentiles, each tuple provides
    /// (percentile, depth). Returned percentiles from 90, 91 .. 100
    pub fn percentiles(&self) -> Vec<(u8, usize)> {
        let mut percentiles: Vec<(u8, usize)> = vec![];
        let (mut acc, mut prev_perc) = (0_usize, 90_u8);
        let iter = self.depths.iter().enumerate().filter(|(_, &n)| n > 0);
        for (depth, n) in iter {
            acc += *n;
            let perc = ((acc as f64 / self.samples as f64) * 100_f64) as u8;
            if perc >= prev_perc {
                percentiles.push((perc, depth));
                prev_perc = perc;
            }
        }
        percentiles
    }

    /// Convert depth statistics to JSON format, useful for plotting.
    pub fn json(&self) -> String {
        let ps: Vec<String> = self
            .percentiles()
            .into_iter()
            .map(|(p, d)| format!("\"{}\": {}", p, d))
            .collect();
        format!(
            "{{ \"min\": {}, \"mean\": {}, \"max\": {}, \"percentiles\": {{ {} }} }}",
            self.min,
            self.mean(),
            self.max,
            ps.join(", ")
        )
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "depth (min, mean, max): {:?}",
            (self.min, self.mean(), self.max)
        )?;
        for (perc, depth) in self.percentiles().into_iter() {
            write!(f, "\n  {} percentile = {}", perc, depth)?;
        }
        Ok(())
    }
}
