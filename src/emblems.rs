use std::collections::HashMap;

/// Process-wide count of emblem URL sightings, appended to during
/// classification and read exactly once at the end of the run. Insertion
/// order is kept so ties break toward the first URL seen.
#[derive(Debug, Default)]
pub struct EmblemTally {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl EmblemTally {
    pub fn record(&mut self, url: &str) {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return;
        }
        let count = self.counts.entry(trimmed.to_string()).or_insert(0);
        if *count == 0 {
            self.order.push(trimmed.to_string());
        }
        *count += 1;
    }

    /// The most frequent URL, first-seen winning ties; `None` when no
    /// emblem was observed.
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for url in &self.order {
            let count = self.counts.get(url).copied().unwrap_or(0);
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((url, count));
            }
        }
        best.map(|(url, _)| url)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
