//! Polynomial term expansion
//!
//! A power matrix has one row per term and one column per input feature; each
//! entry is the exponent of that feature in the term. Rows are ordered by total
//! degree, and within a degree by combinations-with-replacement of feature
//! indices, so `[a, b]` at degree 2 expands to `a, b, a², ab, b²`.

/// Term × feature exponent matrix
pub type PowerMatrix = Vec<Vec<u32>>;

/// Build the power matrix for `n_features` inputs up to `degree`.
///
/// With `interaction_only` set, terms that raise a single feature above the
/// first power are left out.
pub fn power_matrix(n_features: usize, degree: u32, interaction_only: bool) -> PowerMatrix {
    let mut powers = Vec::new();
    for total in 1..=degree as usize {
        let mut combination = Vec::with_capacity(total);
        push_combinations(n_features, total, 0, interaction_only, &mut combination, &mut powers);
    }
    powers
}

fn push_combinations(
    n_features: usize,
    remaining: usize,
    start: usize,
    interaction_only: bool,
    combination: &mut Vec<usize>,
    out: &mut PowerMatrix,
) {
    if remaining == 0 {
        let mut row = vec![0u32; n_features];
        for &feature in combination.iter() {
            row[feature] += 1;
        }
        out.push(row);
        return;
    }

    for feature in start..n_features {
        combination.push(feature);
        let next = if interaction_only { feature + 1 } else { feature };
        push_combinations(n_features, remaining - 1, next, interaction_only, combination, out);
        combination.pop();
    }
}

/// Evaluate every term of the power matrix for one input row
pub fn expand_row(row: &[f64], powers: &[Vec<u32>]) -> Vec<f64> {
    powers
        .iter()
        .map(|term| {
            term.iter()
                .zip(row)
                .map(|(&p, &x)| if p == 0 { 1.0 } else { x.powi(p as i32) })
                .product()
        })
        .collect()
}

/// Expand all rows
pub fn expand(rows: &[Vec<f64>], powers: &[Vec<u32>]) -> Vec<Vec<f64>> {
    rows.iter().map(|row| expand_row(row, powers)).collect()
}

/// Powers `[[1], [2], ..., [n]]` of a single-input polynomial
pub fn univariate_powers(n_terms: usize) -> PowerMatrix {
    (1..=n_terms as u32).map(|p| vec![p]).collect()
}

/// True when the matrix is the consecutive single-feature sequence `x, x², ...`
pub fn is_univariate_sequence(powers: &[Vec<u32>]) -> bool {
    powers
        .iter()
        .enumerate()
        .all(|(i, row)| row.len() == 1 && row[0] as usize == i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_features_degree_two() {
        let powers = power_matrix(2, 2, false);
        assert_eq!(
            powers,
            vec![vec![1, 0], vec![0, 1], vec![2, 0], vec![1, 1], vec![0, 2]]
        );
    }

    #[test]
    fn test_interaction_only() {
        let powers = power_matrix(3, 3, true);
        assert_eq!(
            powers,
            vec![
                vec![1, 0, 0],
                vec![0, 1, 0],
                vec![0, 0, 1],
                vec![1, 1, 0],
                vec![1, 0, 1],
                vec![0, 1, 1],
                vec![1, 1, 1],
            ]
        );
        // A single feature has no interactions to offer
        assert_eq!(power_matrix(1, 3, true), vec![vec![1]]);
    }

    #[test]
    fn test_single_feature_matches_univariate_sequence() {
        let powers = power_matrix(1, 4, false);
        assert_eq!(powers, univariate_powers(4));
        assert!(is_univariate_sequence(&powers));
        assert!(!is_univariate_sequence(&power_matrix(2, 1, false)));
    }

    #[test]
    fn test_term_count_for_three_features() {
        // C(3+3, 3) - 1 terms without bias
        assert_eq!(power_matrix(3, 3, false).len(), 19);
    }

    #[test]
    fn test_expand_row() {
        let powers = power_matrix(2, 2, false);
        assert_eq!(expand_row(&[2.0, 3.0], &powers), vec![2.0, 3.0, 4.0, 6.0, 9.0]);
    }
}
