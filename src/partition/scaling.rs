//! column scaling and one hot encoding of categorical labels

use ndarray::{Array1, Array2};

/// Scales each column to \[0,1\] with min and max fitted on data.
/// A constant column has its range replaced by 1, so it is mapped to 0.
pub struct MinMaxScaler {
    min: Array1<f64>,
    scale: Array1<f64>,
} // end of struct MinMaxScaler

impl MinMaxScaler {
    /// fit min and range of each column
    pub fn fit(data: &Array2<f64>) -> Self {
        let (nb_row, nb_col) = data.dim();
        let mut min = Array1::<f64>::zeros(nb_col);
        let mut scale = Array1::<f64>::ones(nb_col);
        if nb_row == 0 {
            return MinMaxScaler { min, scale };
        }
        for (j, column) in data.columns().into_iter().enumerate() {
            let col_min = column.fold(f64::INFINITY, |acc, v| acc.min(*v));
            let col_max = column.fold(f64::NEG_INFINITY, |acc, v| acc.max(*v));
            min[j] = col_min;
            let range = col_max - col_min;
            if range > 0. {
                scale[j] = 1. / range;
            }
        }
        MinMaxScaler { min, scale }
    } // end of fit

    /// transform data in place. data must have the column dimension of fitted data
    pub fn transform(&self, data: &mut Array2<f64>) {
        assert_eq!(data.ncols(), self.min.len());
        for mut row in data.rows_mut() {
            row -= &self.min;
            row *= &self.scale;
        }
    }
} // end of impl MinMaxScaler

//========================================================================================

/// Encodes a categorical value as a one hot vector.
/// Categories are the sorted distinct values seen at fit time.
pub struct OneHotEncoder {
    categories: Vec<f64>,
}

impl OneHotEncoder {
    pub fn fit(values: &[f64]) -> Self {
        let mut categories = values.to_vec();
        categories.sort_by(|a, b| a.total_cmp(b));
        categories.dedup_by(|a, b| a.total_cmp(b).is_eq());
        log::debug!("OneHotEncoder got {} categories", categories.len());
        OneHotEncoder { categories }
    }

    pub fn get_nb_categories(&self) -> usize {
        self.categories.len()
    }

    /// returns one row by value. A value not seen at fit time gives a null row
    pub fn transform(&self, values: &[f64]) -> Array2<f64> {
        let mut encoded = Array2::<f64>::zeros((values.len(), self.categories.len()));
        for (i, v) in values.iter().enumerate() {
            match self.categories.binary_search_by(|c| c.total_cmp(v)) {
                Ok(j) => encoded[[i, j]] = 1.,
                Err(_) => {
                    log::debug!("OneHotEncoder unknown category {}", v);
                }
            }
        }
        encoded
    } // end of transform
} // end of impl OneHotEncoder
