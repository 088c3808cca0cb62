//! Recursive Jensen-Shannon segmentation.
//!
//! Each pending span is scanned for the cut of maximal weighted divergence.
//! If the significance of that cut clears the threshold the span is replaced
//! by its two halves, otherwise it becomes a leaf. Pending spans live on an
//! explicit LIFO stack (suffix pushed before prefix), so leaves are emitted
//! left to right without native recursion and their concatenation is the
//! input sequence.

use crate::config::Config;
use crate::error::Result;
use crate::information::divergence;
use crate::sequence::{Alphabet, SymbolCounts};
use crate::significance::{CalibrationParameters, SignificanceTest};
use log::{debug, info, trace};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

/// The best cut found in a span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cut {
    /// Cut offset relative to the start of the scanned span (1..len).
    pub position: usize,
    /// Weighted Jensen-Shannon divergence of the two halves, in bits.
    pub divergence: f64,
}

/// A leaf segment of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Char offset of the first symbol.
    pub start: usize,
    /// Char offset after the last symbol (exclusive).
    pub end: usize,
    /// The symbols of the segment.
    pub text: String,
}

impl Segment {
    /// Number of symbols in the segment.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for the empty segment of an empty input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Outcome of evaluating one span for splitting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutDecision {
    /// Char offset of the span start.
    pub start: usize,
    /// Char offset of the span end (exclusive).
    pub end: usize,
    /// Depth of the span in the segmentation tree (root = 0).
    pub depth: usize,
    /// Absolute char offset of the best cut, if the span had any.
    pub position: Option<usize>,
    /// Divergence of the best cut.
    pub divergence: Option<f64>,
    /// Significance score of the best cut.
    pub significance: f64,
    /// Whether the span was split.
    pub accepted: bool,
}

/// Result of segmenting one sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitResult {
    /// Leaf segments in sequence order.
    pub segments: Vec<Segment>,
    /// Start offsets of every segment after the first.
    pub boundaries: Vec<usize>,
    /// Every evaluated span in evaluation order.
    pub cuts: Vec<CutDecision>,
    /// Length of the input in symbols.
    pub sequence_length: usize,
    /// Deepest tree level visited.
    pub max_depth_reached: usize,
}

impl SplitResult {
    /// Returns true if the sequence was cut at least once.
    pub fn is_split(&self) -> bool {
        self.segments.len() > 1
    }

    /// Number of leaf segments.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Leaf texts in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.text.as_str())
    }

    /// Consumes the result, keeping only the leaf texts.
    pub fn into_texts(self) -> Vec<String> {
        self.segments.into_iter().map(|s| s.text).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    depth: usize,
}

/// Significance-gated recursive splitter.
///
/// The alphabet and calibration are fixed at construction and only read
/// afterwards, so one splitter can be shared across threads.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    alphabet: Alphabet,
    test: SignificanceTest,
    max_depth: Option<usize>,
}

impl RecursiveSplitter {
    /// Creates a splitter with explicit calibration.
    pub fn new(alphabet: Alphabet, params: CalibrationParameters) -> Result<Self> {
        params.validate()?;
        let test = SignificanceTest::new(alphabet.len(), params)?;
        Ok(Self {
            alphabet,
            test,
            max_depth: None,
        })
    }

    /// Creates a splitter with the published preset for the alphabet size.
    pub fn with_preset(alphabet: Alphabet) -> Result<Self> {
        let params = CalibrationParameters::preset(alphabet.len())?;
        Self::new(alphabet, params)
    }

    /// Creates a splitter from a configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let alphabet = config.alphabet()?;
        let params = config.calibration_for(alphabet.len())?;
        Ok(Self::new(alphabet, params)?.with_max_depth(config.max_depth))
    }

    /// Caps the tree depth; spans at the cap become leaves.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The alphabet sequences are checked against.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The calibration in use.
    pub fn params(&self) -> &CalibrationParameters {
        self.test.params()
    }

    /// Finds the first cut of maximal divergence in encoded `symbols`.
    ///
    /// Returns `None` for spans shorter than two symbols. Prefix and suffix
    /// counts are updated by one symbol per position.
    pub fn best_cut(&self, symbols: &[usize]) -> Result<Option<Cut>> {
        let n = symbols.len();
        if n < 2 {
            return Ok(None);
        }

        let k = self.alphabet.len();
        let total = n as f64;
        let mut prefix = SymbolCounts::new(k);
        let mut suffix = SymbolCounts::from_symbols(k, symbols);

        (1..n).try_fold(None, |best: Option<Cut>, position| -> Result<Option<Cut>> {
            let moved = symbols[position - 1];
            prefix.increment(moved);
            suffix.decrement(moved);

            let d = divergence(
                &prefix.frequencies()?,
                &suffix.frequencies()?,
                position as f64 / total,
                (n - position) as f64 / total,
            );

            Ok(match best {
                Some(cut) if d <= cut.divergence => Some(cut),
                _ => Some(Cut {
                    position,
                    divergence: d,
                }),
            })
        })
    }

    /// Segments `sequence` and reports every decision taken.
    pub fn segment(&self, sequence: &str) -> Result<SplitResult> {
        let start_time = Instant::now();
        let chars: Vec<char> = sequence.chars().collect();
        let symbols = self.alphabet.encode(sequence)?;
        let n = symbols.len();
        let min_length = self.params().min_segment_length;

        let mut stack = vec![Span {
            start: 0,
            end: n,
            depth: 0,
        }];
        let mut segments = Vec::new();
        let mut cuts = Vec::new();
        let mut max_depth_reached = 0;

        while let Some(span) = stack.pop() {
            max_depth_reached = max_depth_reached.max(span.depth);
            let len = span.end - span.start;

            let capped = self.max_depth.map_or(false, |cap| span.depth >= cap);
            if len < min_length || capped {
                trace!(
                    "leaf [{}, {}) depth {} (len {}, capped {})",
                    span.start, span.end, span.depth, len, capped
                );
                segments.push(leaf(&chars, span));
                continue;
            }

            let best = self.best_cut(&symbols[span.start..span.end])?;
            let significance = self.test.score(best.map(|c| c.divergence), len);
            let accepted = best.is_some() && self.test.is_significant(significance);

            debug!(
                "span [{}, {}) depth {}: cut {:?}, significance {:.6}, {}",
                span.start,
                span.end,
                span.depth,
                best,
                significance,
                if accepted { "split" } else { "leaf" }
            );

            cuts.push(CutDecision {
                start: span.start,
                end: span.end,
                depth: span.depth,
                position: best.map(|c| span.start + c.position),
                divergence: best.map(|c| c.divergence),
                significance,
                accepted,
            });

            match best {
                Some(cut) if accepted => {
                    let mid = span.start + cut.position;
                    let depth = span.depth + 1;
                    stack.push(Span {
                        start: mid,
                        end: span.end,
                        depth,
                    });
                    stack.push(Span {
                        start: span.start,
                        end: mid,
                        depth,
                    });
                }
                _ => segments.push(leaf(&chars, span)),
            }
        }

        let boundaries = segments.iter().skip(1).map(|s| s.start).collect();

        info!(
            "Segmented {} symbols into {} segments ({} spans evaluated, depth {}) in {:?}",
            n,
            segments.len(),
            cuts.len(),
            max_depth_reached,
            start_time.elapsed()
        );

        Ok(SplitResult {
            segments,
            boundaries,
            cuts,
            sequence_length: n,
            max_depth_reached,
        })
    }

    /// Segments `sequence`, returning only the leaf texts.
    pub fn split(&self, sequence: &str) -> Result<Vec<String>> {
        Ok(self.segment(sequence)?.into_texts())
    }

    /// Segments independent sequences in parallel.
    ///
    /// Results are returned in input order; an error in one sequence does
    /// not affect the others.
    pub fn split_batch<S>(&self, sequences: &[S]) -> Vec<Result<SplitResult>>
    where
        S: AsRef<str> + Sync,
    {
        sequences
            .par_iter()
            .map(|sequence| self.segment(sequence.as_ref()))
            .collect()
    }
}

fn leaf(chars: &[char], span: Span) -> Segment {
    Segment {
        start: span.start,
        end: span.end,
        text: chars[span.start..span.end].iter().collect(),
    }
}

/// Splits `sequence` into homogeneous segments.
///
/// Convenience wrapper around [`RecursiveSplitter`].
pub fn split(
    sequence: &str,
    alphabet: &Alphabet,
    params: &CalibrationParameters,
) -> Result<Vec<String>> {
    RecursiveSplitter::new(alphabet.clone(), *params)?.split(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JsdSegError;
    use crate::information::divergence_at;

    fn binary_splitter() -> RecursiveSplitter {
        RecursiveSplitter::with_preset("AC".parse().unwrap()).unwrap()
    }

    /// Splits on any positive divergence.
    fn eager_splitter(alphabet: &str) -> RecursiveSplitter {
        let params = CalibrationParameters::new(0.8, 2.0, -5.0)
            .with_threshold(0.0)
            .with_min_segment_length(1);
        RecursiveSplitter::new(alphabet.parse().unwrap(), params).unwrap()
    }

    #[test]
    fn test_two_blocks() {
        let splitter = binary_splitter();
        let symbols = splitter.alphabet().encode("AAAAACCCCC").unwrap();
        let cut = splitter.best_cut(&symbols).unwrap().unwrap();
        assert_eq!(cut.position, 5);
        assert!((cut.divergence - 1.0).abs() < 1e-12);

        let result = splitter.segment("AAAAACCCCC").unwrap();
        assert_eq!(result.into_texts(), vec!["AAAAA", "CCCCC"]);
    }

    #[test]
    fn test_homogeneous_sequence_is_single_leaf() {
        let splitter = RecursiveSplitter::with_preset("ACGT".parse().unwrap()).unwrap();
        let symbols = splitter.alphabet().encode("AAAAAAAAAA").unwrap();
        let cut = splitter.best_cut(&symbols).unwrap().unwrap();
        assert_eq!(cut.divergence, 0.0);
        // All positions tie at zero; the first one is kept.
        assert_eq!(cut.position, 1);

        let result = splitter.segment("AAAAAAAAAA").unwrap();
        assert!(!result.is_split());
        assert_eq!(result.cuts.len(), 1);
        assert_eq!(result.cuts[0].significance, 0.0);
        assert_eq!(result.into_texts(), vec!["AAAAAAAAAA"]);
    }

    #[test]
    fn test_short_sequence_is_leaf() {
        let params = CalibrationParameters::preset(2)
            .unwrap()
            .with_min_segment_length(20);
        let splitter = RecursiveSplitter::new("AC".parse().unwrap(), params).unwrap();
        let result = splitter.segment("AAAAACCCCC").unwrap();
        assert_eq!(result.into_texts(), vec!["AAAAACCCCC"]);
    }

    #[test]
    fn test_empty_sequence() {
        let result = binary_splitter().segment("").unwrap();
        assert_eq!(result.sequence_length, 0);
        assert_eq!(result.into_texts(), vec![String::new()]);
    }

    #[test]
    fn test_invalid_symbol_aborts() {
        assert!(matches!(
            binary_splitter().split("AAAAACCCCCG"),
            Err(JsdSegError::InvalidSymbol { symbol: 'G', position: 10 })
        ));
    }

    #[test]
    fn test_tie_break_keeps_first_maximum() {
        // Symmetric around the middle: cuts at 2 and 4 have equal divergence.
        let splitter = binary_splitter();
        let symbols = splitter.alphabet().encode("AACCAA").unwrap();
        let cut = splitter.best_cut(&symbols).unwrap().unwrap();
        let alphabet = splitter.alphabet();
        let d2 = divergence_at(alphabet, "AACCAA", 2).unwrap();
        let d4 = divergence_at(alphabet, "AACCAA", 4).unwrap();
        assert_eq!(d2, d4);
        assert_eq!(cut.position, 2);
    }

    #[test]
    fn test_incremental_scan_matches_naive() {
        let splitter = RecursiveSplitter::with_preset("ACGT".parse().unwrap()).unwrap();
        let sequence = "ACGTTTGACCCAGTAGGGATTACAGATTTTACGCGCGCA";
        let symbols = splitter.alphabet().encode(sequence).unwrap();
        let cut = splitter.best_cut(&symbols).unwrap().unwrap();

        let mut naive: Option<Cut> = None;
        for position in 1..symbols.len() {
            let d = divergence_at(splitter.alphabet(), sequence, position).unwrap();
            if naive.map_or(true, |c| d > c.divergence) {
                naive = Some(Cut {
                    position,
                    divergence: d,
                });
            }
        }
        assert_eq!(Some(cut), naive);
    }

    #[test]
    fn test_short_segment_with_fractional_effective_size() {
        // N = 16, k = 2: NEff = 2.96·ln 16 - 7.88 ≈ 0.33, score ≈ 0.97.
        let splitter = binary_splitter();
        let result = splitter.segment("CAAAAAAAAAAAAAAA").unwrap();
        assert!(result.cuts[0].accepted);
        assert_eq!(result.cuts[0].position, Some(1));
        assert!(result.cuts[0].significance > 0.95);
        assert_eq!(result.into_texts(), vec!["C".to_string(), "A".repeat(15)]);
    }

    #[test]
    fn test_nested_blocks() {
        let sequence = format!("{}{}{}", "A".repeat(40), "C".repeat(40), "A".repeat(40));
        let result = binary_splitter().segment(&sequence).unwrap();
        assert_eq!(result.boundaries, vec![40, 80]);
        assert_eq!(result.segments[1].text, "C".repeat(40));
        assert_eq!(result.max_depth_reached, 2);
    }

    #[test]
    fn test_boundaries_and_offsets() {
        let result = binary_splitter().segment("AAAAACCCCC").unwrap();
        assert_eq!(result.boundaries, vec![5]);
        assert_eq!(result.segments[0].start, 0);
        assert_eq!(result.segments[0].end, 5);
        assert_eq!(result.segments[1].len(), 5);
        assert!(result.cuts[0].accepted);
        assert_eq!(result.cuts[0].position, Some(5));
    }

    #[test]
    fn test_max_depth_cap() {
        let sequence = "AC".repeat(50);
        let uncapped = eager_splitter("AC").segment(&sequence).unwrap();
        assert_eq!(uncapped.num_segments(), 100);

        let capped = eager_splitter("AC")
            .with_max_depth(Some(1))
            .segment(&sequence)
            .unwrap();
        assert_eq!(capped.num_segments(), 2);
        assert_eq!(capped.texts().collect::<String>(), sequence);
    }

    #[test]
    fn test_deep_chain_without_recursion() {
        let sequence = "AC".repeat(1_000);
        let result = eager_splitter("AC").segment(&sequence).unwrap();
        assert_eq!(result.num_segments(), 2_000);
        assert!(result.max_depth_reached >= 11);
        assert_eq!(result.texts().collect::<String>(), sequence);
    }

    #[test]
    fn test_split_batch_preserves_order() {
        let splitter = binary_splitter();
        let inputs = vec!["AAAAACCCCC", "ACGA", "CCCCCCCC"];
        let results = splitter.split_batch(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().num_segments(), 2);
        assert!(matches!(results[1], Err(JsdSegError::InvalidSymbol { .. })));
        assert_eq!(results[2].as_ref().unwrap().num_segments(), 1);
    }

    #[test]
    fn test_free_split() {
        let alphabet: Alphabet = "AC".parse().unwrap();
        let params = CalibrationParameters::preset(2).unwrap();
        let leaves = split("AAAAACCCCC", &alphabet, &params).unwrap();
        assert_eq!(leaves, vec!["AAAAA", "CCCCC"]);
    }
}
