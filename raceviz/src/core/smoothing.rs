use helpers::general::AnalysisError;

/// savgol smooths a series with a Savitzky-Golay filter: every output value is the value of a
/// polynomial of the given order fitted by least squares to the surrounding window. The first and
/// last window / 2 values are taken from the polynomial fitted to the first and last full window.
/// The result is meant for display only.
pub fn savgol(series: &[f64], window: usize, order: usize) -> Result<Vec<f64>, AnalysisError> {
    if window < 5 || window % 2 == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "window must be an odd number of at least 5, but is {}!",
            window
        )));
    }
    if order >= window {
        return Err(AnalysisError::InvalidInput(format!(
            "order ({}) must be less than window ({})!",
            order, window
        )));
    }
    if series.len() < window {
        return Err(AnalysisError::InsufficientData(format!(
            "series contains {} values, but the window requires at least {}!",
            series.len(),
            window
        )));
    }

    let half = window / 2;
    let n = series.len();
    let basis = polynomial_basis(window, order)?;
    let mut smoothed = Vec::with_capacity(n);

    // left edge -> evaluate the fit of the first window at its first half nodes
    for i in 0..half {
        smoothed.push(apply_weights(&projection_weights(&basis, i), &series[..window]));
    }

    // interior -> centred window, the weights are the same for all points
    let weights_center = projection_weights(&basis, half);
    for i in half..n - half {
        smoothed.push(apply_weights(&weights_center, &series[i - half..=i + half]));
    }

    // right edge -> evaluate the fit of the last window at its last half nodes
    for i in n - half..n {
        smoothed.push(apply_weights(
            &projection_weights(&basis, i + window - n),
            &series[n - window..],
        ));
    }

    Ok(smoothed)
}

fn apply_weights(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values.iter()).map(|(w, v)| w * v).sum()
}

/// projection_weights returns the weights w such that sum(w_j * y_j) is the value of the
/// least-squares polynomial through the window at node i. With the orthonormal basis Q of the
/// polynomials on the window nodes the fit is Q Q^T y, therefore w is row i of Q Q^T.
fn projection_weights(basis: &[Vec<f64>], i: usize) -> Vec<f64> {
    basis
        .iter()
        .map(|row_j| row_j.iter().zip(basis[i].iter()).map(|(q_j, q_i)| q_j * q_i).sum())
        .collect()
}

/// polynomial_basis returns an orthonormal basis (window rows x order + 1 columns) of the
/// polynomials up to the given order evaluated at the window nodes, taken from a Householder QR
/// decomposition of the Vandermonde matrix. Node offsets are normalized to [-1, 1].
fn polynomial_basis(window: usize, order: usize) -> Result<Vec<Vec<f64>>, AnalysisError> {
    let half = (window / 2) as f64;
    let n_coeffs = order + 1;

    // Vandermonde matrix a_jk = t_j^k
    let mut a: Vec<Vec<f64>> = (0..window)
        .map(|j| {
            let t = (j as f64 - half) / half;
            (0..n_coeffs).map(|k| t.powi(k as i32)).collect()
        })
        .collect();

    // QR decomposition, the Householder vectors are kept to build Q afterwards
    let mut reflectors: Vec<Vec<f64>> = Vec::with_capacity(n_coeffs);

    for k in 0..n_coeffs {
        let norm = (k..window).map(|j| a[j][k].powi(2)).sum::<f64>().sqrt();

        if norm < f64::EPSILON {
            return Err(AnalysisError::InvalidInput(format!(
                "Smoothing polynomial of order {} cannot be fitted to a window of {}!",
                order, window
            )));
        }

        let alpha = if a[k][k] > 0.0 { -norm } else { norm };
        let mut v: Vec<f64> = (k..window).map(|j| a[j][k]).collect();
        v[0] -= alpha;
        let v_sq: f64 = v.iter().map(|x| x * x).sum();

        for c in k..n_coeffs {
            let s: f64 = (k..window).map(|j| v[j - k] * a[j][c]).sum::<f64>() * 2.0 / v_sq;
            for j in k..window {
                a[j][c] -= s * v[j - k];
            }
        }

        reflectors.push(v);
    }

    // Q = H_0 H_1 ... H_order applied to the first order + 1 unit vectors
    let mut q: Vec<Vec<f64>> = (0..window)
        .map(|j| (0..n_coeffs).map(|c| if j == c { 1.0 } else { 0.0 }).collect())
        .collect();

    for (k, v) in reflectors.iter().enumerate().rev() {
        let v_sq: f64 = v.iter().map(|x| x * x).sum();

        for c in 0..n_coeffs {
            let s: f64 = (k..window).map(|j| v[j - k] * q[j][c]).sum::<f64>() * 2.0 / v_sq;
            for j in k..window {
                q[j][c] -= s * v[j - k];
            }
        }
    }

    Ok(q)
}
