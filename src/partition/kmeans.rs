//! k-means clustering (Lloyd iterations) with k-means++ initialization.
//!
//! All random draws come from the generator given by the caller, so a clustering is reproducible
//! from the seed of that generator.
//!
//! Iterations stop when assignments do not change any more, when the squared displacement of centroids
//! drops under tol times the mean variance of columns, or after max_iter iterations.

use anyhow::anyhow;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand_xoshiro::Xoshiro256PlusPlus;

#[derive(Debug, Copy, Clone)]
pub struct KMeans {
    /// number of clusters
    nb_cluster: usize,
    ///
    max_iter: usize,
    /// relative tolerance on centroid displacement
    tol: f64,
} // end of struct KMeans

/// result of a clustering
pub struct KMeansResult {
    centroids: Array2<f64>,
    assignments: Vec<usize>,
    inertia: f64,
    nb_iter: usize,
}

impl KMeansResult {
    /// cluster of each point
    pub fn get_assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// centroids, one by row
    pub fn get_centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    /// sum of squared distances of points to their centroid
    pub fn get_inertia(&self) -> f64 {
        self.inertia
    }

    pub fn get_nb_iter(&self) -> usize {
        self.nb_iter
    }
} // end of impl KMeansResult

impl KMeans {
    pub fn new(nb_cluster: usize) -> Self {
        KMeans { nb_cluster, max_iter: 300, tol: 1.0e-4 }
    }

    /// to modify default max_iter (300) and tol (1.e-4)
    pub fn set_stop(&mut self, max_iter: usize, tol: f64) {
        self.max_iter = max_iter;
        self.tol = tol;
    }

    /// clusters rows of data
    pub fn fit(&self, data: ArrayView2<f64>, rng: &mut Xoshiro256PlusPlus) -> Result<KMeansResult, anyhow::Error> {
        let nb_points = data.nrows();
        if self.nb_cluster == 0 {
            log::error!("kmeans asked for 0 cluster");
            return Err(anyhow!("number of clusters must be positive"));
        }
        if self.nb_cluster > nb_points {
            log::error!("kmeans nb_cluster {} greater than number of points {}", self.nb_cluster, nb_points);
            return Err(anyhow!(
                "number of clusters {} greater than number of points {}",
                self.nb_cluster,
                nb_points
            ));
        }
        // absolute tolerance
        let mean_var = data.var_axis(Axis(0), 0.).mean().unwrap_or(0.);
        let tol = self.tol * mean_var;
        //
        let mut centroids = self.init_plusplus(data, rng)?;
        let mut assignments = assign(data, &centroids);
        let mut nb_iter = 0;
        for iter in 0..self.max_iter {
            nb_iter = iter + 1;
            let new_centroids = self.update_centroids(data, &mut assignments, &centroids);
            let shift: f64 = (&new_centroids - &centroids).iter().map(|d| d * d).sum();
            centroids = new_centroids;
            let new_assignments = assign(data, &centroids);
            let changed = new_assignments != assignments;
            assignments = new_assignments;
            if !changed || shift <= tol {
                log::debug!("kmeans stopping at iteration {}, centroid shift {:.3e}", iter, shift);
                break;
            }
        }
        let inertia = data
            .rows()
            .into_iter()
            .zip(assignments.iter())
            .map(|(row, c)| squared_distance(row, centroids.row(*c)))
            .sum();
        log::info!("kmeans nb_cluster : {}, nb_iter : {}, inertia : {:.3e}", self.nb_cluster, nb_iter, inertia);
        Ok(KMeansResult { centroids, assignments, inertia, nb_iter })
    } // end of fit

    // greedy k-means++ : first center uniform, then for each center 2 + ln(k) candidates are drawn
    // with probability proportional to squared distance to the nearest chosen center and
    // the candidate giving the lowest potential is kept.
    fn init_plusplus(&self, data: ArrayView2<f64>, rng: &mut Xoshiro256PlusPlus) -> Result<Array2<f64>, anyhow::Error> {
        let nb_points = data.nrows();
        let nb_trials = 2 + (self.nb_cluster as f64).ln().floor() as usize;
        let mut centroids = Array2::<f64>::zeros((self.nb_cluster, data.ncols()));
        let uniform = Uniform::<usize>::new(0, nb_points);
        let first = uniform.sample(rng);
        centroids.row_mut(0).assign(&data.row(first));
        let mut closest: Vec<f64> = data
            .rows()
            .into_iter()
            .map(|row| squared_distance(row, data.row(first)))
            .collect();
        for c in 1..self.nb_cluster {
            let total: f64 = closest.iter().sum();
            // all points already coincide with a center
            if total <= 0. {
                let chosen = uniform.sample(rng);
                centroids.row_mut(c).assign(&data.row(chosen));
                continue;
            }
            let distribution = WeightedIndex::new(&closest)?;
            let mut best: Option<(f64, Vec<f64>, usize)> = None;
            for _ in 0..nb_trials {
                let candidate = distribution.sample(rng);
                let updated: Vec<f64> = data
                    .rows()
                    .into_iter()
                    .zip(closest.iter())
                    .map(|(row, d)| d.min(squared_distance(row, data.row(candidate))))
                    .collect();
                let potential: f64 = updated.iter().sum();
                if best.as_ref().map_or(true, |(p, _, _)| potential < *p) {
                    best = Some((potential, updated, candidate));
                }
            }
            if let Some((_, updated, chosen)) = best {
                centroids.row_mut(c).assign(&data.row(chosen));
                closest = updated;
            }
        }
        Ok(centroids)
    } // end of init_plusplus

    // mean of points of each cluster. An empty cluster takes the point farthest from its centroid
    // among clusters with more than one point, and assignments are updated accordingly.
    fn update_centroids(&self, data: ArrayView2<f64>, assignments: &mut [usize], centroids: &Array2<f64>) -> Array2<f64> {
        let dim = data.ncols();
        let mut sums = Array2::<f64>::zeros((self.nb_cluster, dim));
        let mut counts = vec![0usize; self.nb_cluster];
        for (row, c) in data.rows().into_iter().zip(assignments.iter()) {
            let mut sum = sums.row_mut(*c);
            sum += &row;
            counts[*c] += 1;
        }
        for c in 0..self.nb_cluster {
            if counts[c] > 0 {
                continue;
            }
            let mut farthest: Option<(usize, f64)> = None;
            for (i, row) in data.rows().into_iter().enumerate() {
                let owner = assignments[i];
                if counts[owner] <= 1 {
                    continue;
                }
                let d = squared_distance(row, centroids.row(owner));
                if farthest.map_or(true, |(_, best)| d > best) {
                    farthest = Some((i, d));
                }
            }
            if let Some((i, _)) = farthest {
                log::debug!("kmeans relocating point {} to empty cluster {}", i, c);
                let owner = assignments[i];
                let point: Array1<f64> = data.row(i).to_owned();
                let mut sum = sums.row_mut(owner);
                sum -= &point;
                counts[owner] -= 1;
                sums.row_mut(c).assign(&point);
                counts[c] = 1;
                assignments[i] = c;
            }
        }
        for (c, mut row) in sums.rows_mut().into_iter().enumerate() {
            if counts[c] > 0 {
                row /= counts[c] as f64;
            } else {
                row.assign(&centroids.row(c));
            }
        }
        sums
    } // end of update_centroids
} // end of impl KMeans

fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

// nearest centroid of each row, lowest rank wins ties
fn assign(data: ArrayView2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
    data.rows()
        .into_iter()
        .map(|row| {
            let mut best = 0;
            let mut best_dist = f64::INFINITY;
            for (c, centroid) in centroids.rows().into_iter().enumerate() {
                let d = squared_distance(row, centroid);
                if d < best_dist {
                    best = c;
                    best_dist = d;
                }
            }
            best
        })
        .collect()
} // end of assign

#[cfg(test)]
mod tests {

    use super::*;
    use rand::Rng;
    use rand_xoshiro::rand_core::SeedableRng;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn kmeans_separated_blobs() {
        log_init_test();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let centers = [[0., 0.], [100., 0.], [0., 100.]];
        let mut data = Array2::<f64>::zeros((60, 2));
        for i in 0..60 {
            let center = centers[i % 3];
            data[[i, 0]] = center[0] + rng.gen_range(-1.0..1.0);
            data[[i, 1]] = center[1] + rng.gen_range(-1.0..1.0);
        }
        let result = KMeans::new(3).fit(data.view(), &mut rng).unwrap();
        let assignments = result.get_assignments();
        // points generated around the same center share their cluster, and clusters are distinct
        for i in 3..60 {
            assert_eq!(assignments[i], assignments[i % 3]);
        }
        assert_ne!(assignments[0], assignments[1]);
        assert_ne!(assignments[0], assignments[2]);
        assert_ne!(assignments[1], assignments[2]);
        assert!(result.get_inertia() < 60. * 2.);
    }

    #[test]
    fn kmeans_reproducible() {
        log_init_test();
        let data = Array2::<f64>::from_shape_fn((30, 3), |(i, j)| ((i * 7 + j * 3) % 11) as f64);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let first = KMeans::new(4).fit(data.view(), &mut rng).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let second = KMeans::new(4).fit(data.view(), &mut rng).unwrap();
        assert_eq!(first.get_assignments(), second.get_assignments());
    }

    #[test]
    fn kmeans_degenerate() {
        log_init_test();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let data = Array2::<f64>::zeros((3, 2));
        assert!(KMeans::new(4).fit(data.view(), &mut rng).is_err());
        assert!(KMeans::new(0).fit(data.view(), &mut rng).is_err());
        // duplicated points, more clusters than distinct points
        let result = KMeans::new(2).fit(data.view(), &mut rng).unwrap();
        assert_eq!(result.get_assignments().len(), 3);
        assert_eq!(result.get_inertia(), 0.);
    }
}
