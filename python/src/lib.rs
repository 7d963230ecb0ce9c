//! Python bindings for the `lloyd` crate.

use std::path::PathBuf;

use numpy::{PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

use lloyd::error::Error;
use lloyd::io::{read_job, write_centroids};
use lloyd::kmeans::{DEFAULT_EPSILON, DEFAULT_MAX_ITER, KMeans};
use lloyd::matrix::Matrix;

fn to_py_err(err: Error) -> PyErr {
    match err {
        Error::Io(err) => PyOSError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Cluster `points` with Lloyd's k-means.
///
/// `points` is a 2-D float64 array, `observations` the distinct row
/// indices seeding the centroids. Returns the k x n centroid array.
#[pyfunction]
#[pyo3(signature = (points, observations, max_iter = DEFAULT_MAX_ITER, epsilon = DEFAULT_EPSILON))]
fn fit<'py>(
    py: Python<'py>,
    points: PyReadonlyArray2<'py, f64>,
    observations: Vec<usize>,
    max_iter: u32,
    epsilon: f64,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let array = points.as_array();
    let (m, n) = (array.nrows(), array.ncols());
    let mut data = Vec::with_capacity(m * n);
    for row in array.outer_iter() {
        data.extend(row.iter().copied());
    }
    let points = Matrix::from_vec(m, n, data).map_err(to_py_err)?;
    let centroids = KMeans::new(max_iter, epsilon)
        .fit(&points, &observations)
        .map_err(to_py_err)?;
    let rows: Vec<Vec<f64>> = centroids.iter_rows().map(<[f64]>::to_vec).collect();
    Ok(PyArray2::from_vec2(py, &rows)?)
}

/// Run the job file at `path` and write the centroids back over it.
///
/// The file starts with a `m,n,k,max_iter,epsilon` header line, then a
/// line with the k observation indices, then the m point rows.
#[pyfunction]
fn fit_file(path: PathBuf) -> PyResult<()> {
    let job = read_job(&path).map_err(to_py_err)?;
    let centroids = KMeans::new(job.max_iter, job.epsilon)
        .fit(&job.points, &job.observations)
        .map_err(to_py_err)?;
    write_centroids(&path, &centroids).map_err(to_py_err)?;
    Ok(())
}

#[pymodule]
fn lloydpy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(fit, m)?)?;
    m.add_function(wrap_pyfunction!(fit_file, m)?)?;
    Ok(())
}
