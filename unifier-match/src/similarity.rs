//! Fuzzy name similarity
//!
//! Two scorers over normalized names. `SequenceRatio` is the classic
//! matching-blocks ratio computed over the whole strings. `PartialRatio`
//! compares the shorter string against same-length windows of the longer
//! one and keeps the best window ratio, so a name embedded inside a more
//! verbose listing still scores close to 1.0.

use crate::normalize::normalize;
use std::fmt;

/// Which ratio drives record matching.
///
/// Selected once at configuration time; the engine never switches
/// algorithms per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityAlgo {
    /// Best same-length window of the longer string against the shorter one
    #[default]
    PartialRatio,
    /// Matching-blocks ratio over the two whole strings
    SequenceRatio,
}

impl SimilarityAlgo {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityAlgo::PartialRatio => "partial-ratio",
            SimilarityAlgo::SequenceRatio => "sequence-ratio",
        }
    }
}

impl fmt::Display for SimilarityAlgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SimilarityAlgo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "partial-ratio" | "partial" => Ok(SimilarityAlgo::PartialRatio),
            "sequence-ratio" | "sequence" => Ok(SimilarityAlgo::SequenceRatio),
            _ => Err(format!("Unknown similarity algorithm: {}", s)),
        }
    }
}

/// Scores pairs of raw product names
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    algo: SimilarityAlgo,
}

impl SimilarityScorer {
    pub fn new(algo: SimilarityAlgo) -> Self {
        Self { algo }
    }

    pub fn algo(&self) -> SimilarityAlgo {
        self.algo
    }

    /// Similarity of two raw names, in [0, 1].
    ///
    /// Both names are normalized first; if either normalizes to the empty
    /// string the score is exactly 0.0.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let a = normalize(a);
        let b = normalize(b);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        match self.algo {
            SimilarityAlgo::PartialRatio => partial_ratio(a.as_bytes(), b.as_bytes()),
            SimilarityAlgo::SequenceRatio => sequence_ratio(a.as_bytes(), b.as_bytes()),
        }
    }
}

/// A common run of bytes: `a[a_start..a_start+len] == b[b_start..b_start+len]`.
#[derive(Debug, Clone, Copy)]
struct Block {
    a_start: usize,
    b_start: usize,
    len: usize,
}

/// Longest common run inside `a[a_lo..a_hi]` / `b[b_lo..b_hi]`.
/// Ties resolve to the earliest start in `a`, then in `b`.
fn longest_match(
    a: &[u8],
    b: &[u8],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> Block {
    let mut best = Block {
        a_start: a_lo,
        b_start: b_lo,
        len: 0,
    };
    let width = b_hi - b_lo;
    // run_lens[j - b_lo + 1] holds the run length ending at (previous i, j)
    let mut run_lens = vec![0usize; width + 1];

    for i in a_lo..a_hi {
        let mut next = vec![0usize; width + 1];
        for j in b_lo..b_hi {
            if a[i] == b[j] {
                let len = run_lens[j - b_lo] + 1;
                next[j - b_lo + 1] = len;
                if len > best.len {
                    best = Block {
                        a_start: i + 1 - len,
                        b_start: j + 1 - len,
                        len,
                    };
                }
            }
        }
        run_lens = next;
    }
    best
}

/// All maximal matching runs in ascending position order, found by
/// recursing on either side of the longest one.
fn matching_blocks(a: &[u8], b: &[u8]) -> Vec<Block> {
    fn walk(
        a: &[u8],
        b: &[u8],
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
        out: &mut Vec<Block>,
    ) {
        let block = longest_match(a, b, a_lo, a_hi, b_lo, b_hi);
        if block.len == 0 {
            return;
        }
        walk(a, b, a_lo, block.a_start, b_lo, block.b_start, out);
        out.push(block);
        walk(
            a,
            b,
            block.a_start + block.len,
            a_hi,
            block.b_start + block.len,
            b_hi,
            out,
        );
    }

    let mut out = Vec::new();
    walk(a, b, 0, a.len(), 0, b.len(), &mut out);
    out
}

/// Classic matching-blocks ratio: `2 * matched / (len(a) + len(b))`.
fn sequence_ratio(a: &[u8], b: &[u8]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(a, b).iter().map(|block| block.len).sum();
    2.0 * matched as f64 / total as f64
}

/// Best ratio between the shorter input and any same-length window of the
/// longer one. Candidate windows are anchored where matching blocks align,
/// clamped so the window stays in bounds; a near-perfect window short
/// circuits to 1.0.
fn partial_ratio(a: &[u8], b: &[u8]) -> f64 {
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = shorter.len();
    let n = longer.len();
    if m == 0 {
        return 0.0;
    }

    let mut best = 0.0_f64;
    for block in matching_blocks(shorter, longer) {
        let offset = block.b_start as isize - block.a_start as isize;
        let start = offset.clamp(0, (n - m) as isize) as usize;
        let ratio = sequence_ratio(shorter, &longer[start..start + m]);
        if ratio > 0.995 {
            return 1.0;
        }
        if ratio > best {
            best = ratio;
        }
    }
    best
}
