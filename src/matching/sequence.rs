use std::collections::HashMap;

/// Sequences at least this long drop "popular" characters from the index.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Longest-matching-block aligner over two character sequences.
///
/// Finds the longest contiguous match, then recurses into the pieces to the
/// left and right of it. The total size of all blocks found this way drives
/// [`sequence_ratio`].
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of every indexed character in `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Returns `(i, j, size)` of the longest block with `a[i..i+size] ==
    /// b[j..j+size]` inside the given ranges. Ties go to the block starting
    /// earliest in `a`, then earliest in `b`.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = if j > 0 {
                        j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                    } else {
                        1
                    };
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular characters were left out of the index; grow the block over
        // them on both sides.
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        (besti, bestj, bestsize)
    }

    /// Total number of characters covered by the matching blocks.
    fn matched_len(&self) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

/// Sequence-overlap similarity: `2 * M / (len(a) + len(b))`, where `M` is
/// the number of characters in the matching blocks. Two empty strings score
/// 1.0.
///
/// Not symmetric in general; callers that need symmetry must order the
/// arguments themselves.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = BlockMatcher::new(&a, &b).matched_len();
    2.0 * matched as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio_identical() {
        assert!(approx(sequence_ratio("john smith", "john smith"), 1.0));
    }

    #[test]
    fn test_ratio_disjoint() {
        assert!(approx(sequence_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_ratio_empty() {
        assert!(approx(sequence_ratio("", ""), 1.0));
        assert!(approx(sequence_ratio("abc", ""), 0.0));
    }

    #[test]
    fn test_ratio_known_values() {
        // "bcd" is the only block.
        assert!(approx(sequence_ratio("abcd", "bcde"), 0.75));
        // Blocks "jo", "n sm", "th".
        assert!(approx(sequence_ratio("jon smyth", "john smith"), 16.0 / 19.0));
    }

    #[test]
    fn test_ratio_recurses_on_both_sides() {
        // Longest block "xyz" splits the rest into "ab"/"ab" and "cd"/"cd".
        assert!(approx(sequence_ratio("abxyzcd", "ab_xyz_cd"), 14.0 / 16.0));
    }

    #[test]
    fn test_ratio_grows_blocks_over_popular_characters() {
        let a = "a".repeat(250);
        // Nothing is indexed, but the empty block still extends over the
        // equal prefix.
        assert!(approx(sequence_ratio(&a, &a), 1.0));
    }

    #[test]
    fn test_ratio_popular_characters_are_not_indexed() {
        let a = "ab".repeat(150);
        let b = format!("{}x", "ba".repeat(150));
        assert!(approx(sequence_ratio(&a, &b), 0.0));
        // The same shape below the cutoff still matches.
        assert!(sequence_ratio("abab", "baba") > 0.7);
    }
}
