//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};
use ndarray::{Array1, Array2};

use hmmgen_hmm::HmmParameters;

use crate::config::ModelToml;

/// Converts row-major nested vectors into a matrix.
///
/// All rows must have the same length. An empty list yields a 0×0 matrix.
pub fn rows_to_array(name: &str, rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        bail!(
            "{name}: row {i} has {} entries, row 0 has {n_cols}",
            row.len()
        );
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((n_rows, n_cols), flat)
        .with_context(|| format!("{name}: cannot build {n_rows}x{n_cols} matrix"))
}

/// Builds validated [`HmmParameters`] from the TOML model section.
pub fn build_parameters(model: &ModelToml) -> Result<HmmParameters> {
    let transition = rows_to_array("transition", &model.transition)?;
    let emission = rows_to_array("emission", &model.emission)?;
    let prior = Array1::from_vec(model.prior.clone());

    let params = if model.validate_distributions {
        HmmParameters::new(transition, emission, prior)
    } else {
        HmmParameters::new_unchecked_distributions(transition, emission, prior)
    };
    params.context("invalid HMM parameters")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn model(transition: Vec<Vec<f64>>, validate: bool) -> ModelToml {
        ModelToml {
            transition,
            emission: vec![vec![0.8, 0.2], vec![0.2, 0.8]],
            prior: vec![1.0, 0.0],
            validate_distributions: validate,
        }
    }

    #[test]
    fn rows_become_matrix() {
        let m = rows_to_array("t", &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = rows_to_array("emission", &[vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(err.to_string().contains("emission: row 1 has 1 entries"));
    }

    #[test]
    fn empty_rows_give_empty_matrix() {
        let m = rows_to_array("t", &[]).unwrap();
        assert_eq!(m.dim(), (0, 0));
    }

    #[test]
    fn builds_parameters() {
        let params = build_parameters(&model(vec![vec![0.9, 0.1], vec![0.1, 0.9]], true)).unwrap();
        assert_eq!(params.n_states(), 2);
        assert_eq!(params.transition()[[0, 1]], 0.1);
    }

    #[test]
    fn validation_can_be_disabled() {
        let improper = vec![vec![0.5, 0.1], vec![0.1, 0.5]];
        assert!(build_parameters(&model(improper.clone(), true)).is_err());
        assert!(build_parameters(&model(improper, false)).is_ok());
    }

    #[test]
    fn dimension_error_surfaces() {
        let err = build_parameters(&model(vec![vec![1.0, 0.0, 0.0]], true)).unwrap_err();
        assert!(format!("{err:#}").contains("not square"));
    }
}
