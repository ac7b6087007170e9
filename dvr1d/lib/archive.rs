//! Persistent storage for the results of a single DVR calculation.
//!
//! An archive is a NumPy `.npz` file (a zip of `.npy` members, written
//! uncompressed) holding exactly four `f64` arrays:
//!
//! | entry       | shape  | contents                                       |
//! |-------------|--------|------------------------------------------------|
//! | `grid`      | `N`    | coordinate grid                                |
//! | `potential` | `N`    | potential sampled on `grid`                    |
//! | `energies`  | `N`    | eigenvalues, ascending                         |
//! | `wfns`      | `N, N` | eigenvectors; column `k` belongs to `energies[k]` |
//!
//! Files written by `numpy.savez` with the same entry names can be read
//! directly, and files written here can be loaded with `numpy.load`.

use std::{
    ffi::OsString,
    fs::{ self, File },
    io::{ BufWriter, Write },
    path::{ Path, PathBuf },
};
use ndarray as nd;
use ndarray_npy::{ NpzReader, NpzWriter };
use crate::{
    error::{ DvrError, LengthError },
    NPZ_EXT,
};

pub type ArchiveResult<T> = Result<T, DvrError>;

/// Entry name of the coordinate grid.
pub const GRID: &str = "grid";
/// Entry name of the sampled potential.
pub const POTENTIAL: &str = "potential";
/// Entry name of the eigenvalues.
pub const ENERGIES: &str = "energies";
/// Entry name of the eigenvector matrix.
pub const WFNS: &str = "wfns";

/// Append `.npz` to `path` if it does not already end with it.
///
/// The extension is appended rather than substituted, so `run.v2` becomes
/// `run.v2.npz`.
pub fn with_npz_ext<P>(path: P) -> PathBuf
where P: AsRef<Path>
{
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == NPZ_EXT) {
        path.to_path_buf()
    } else {
        let mut name: OsString = path.as_os_str().to_owned();
        name.push(".");
        name.push(NPZ_EXT);
        PathBuf::from(name)
    }
}

/// The four arrays produced by one solver run.
///
/// Fields are private so that every `Archive` in existence satisfies the shape
/// invariant checked by [`Archive::new`].
#[derive(Clone, Debug, PartialEq)]
pub struct Archive {
    grid: nd::Array1<f64>,
    potential: nd::Array1<f64>,
    energies: nd::Array1<f64>,
    wfns: nd::Array2<f64>,
}

impl Archive {
    /// Bundle the results of a calculation, checking that all arrays describe
    /// the same `N`-point grid.
    pub fn new(
        grid: nd::Array1<f64>,
        potential: nd::Array1<f64>,
        energies: nd::Array1<f64>,
        wfns: nd::Array2<f64>,
    ) -> ArchiveResult<Self>
    {
        LengthError::check(&grid, &potential)?;
        LengthError::check(&grid, &energies)?;
        let n = grid.len();
        if wfns.dim() != (n, n) {
            return Err(DvrError::Shape {
                name: WFNS,
                got: wfns.shape().to_vec(),
                expected: vec![n, n],
            });
        }
        Ok(Self { grid, potential, energies, wfns })
    }

    /// Number of grid points (and states).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Get a reference to the coordinate grid.
    pub fn grid(&self) -> &nd::Array1<f64> { &self.grid }

    /// Get a reference to the sampled potential.
    pub fn potential(&self) -> &nd::Array1<f64> { &self.potential }

    /// Get a reference to the eigenvalues.
    pub fn energies(&self) -> &nd::Array1<f64> { &self.energies }

    /// Get a reference to the eigenvector matrix.
    pub fn wfns(&self) -> &nd::Array2<f64> { &self.wfns }

    /// Decompose into `(grid, potential, energies, wfns)`.
    pub fn into_parts(self)
        -> (nd::Array1<f64>, nd::Array1<f64>, nd::Array1<f64>, nd::Array2<f64>)
    {
        (self.grid, self.potential, self.energies, self.wfns)
    }

    /// Write to `path` (with `.npz` appended if missing), replacing any
    /// existing file. Parent directories must already exist.
    ///
    /// The arrays go to a sibling `<path>.tmp` file that is renamed over
    /// `path` only once complete, so a failed write leaves any previous
    /// archive untouched.
    ///
    /// Returns the path actually written.
    pub fn write<P>(&self, path: P) -> ArchiveResult<PathBuf>
    where P: AsRef<Path>
    {
        let path = with_npz_ext(path);
        let tmp = tmp_path(&path);
        match self.write_npz(&tmp) {
            Ok(()) => {
                fs::rename(&tmp, &path)?;
                Ok(path)
            },
            Err(err) => {
                if tmp.is_file() { fs::remove_file(&tmp).ok(); }
                Err(err)
            },
        }
    }

    fn write_npz(&self, path: &Path) -> ArchiveResult<()> {
        let file = BufWriter::new(File::create(path)?);
        let mut npz = NpzWriter::new(file);
        npz.add_array(GRID, &self.grid)?;
        npz.add_array(POTENTIAL, &self.potential)?;
        npz.add_array(ENERGIES, &self.energies)?;
        npz.add_array(WFNS, &self.wfns)?;
        let mut file = npz.finish()?;
        file.flush()?;
        file.get_ref().sync_all()?;
        Ok(())
    }

    /// Read from `path` (with `.npz` appended if missing) and check the shape
    /// invariant.
    pub fn read<P>(path: P) -> ArchiveResult<Self>
    where P: AsRef<Path>
    {
        let file = File::open(with_npz_ext(path))?;
        let mut npz = NpzReader::new(file)?;
        let names = npz.names()?;
        let grid: nd::Array1<f64> = read_entry(&mut npz, &names, GRID)?;
        let potential: nd::Array1<f64>
            = read_entry(&mut npz, &names, POTENTIAL)?;
        let energies: nd::Array1<f64>
            = read_entry(&mut npz, &names, ENERGIES)?;
        let wfns: nd::Array2<f64> = read_entry(&mut npz, &names, WFNS)?;
        Self::new(grid, potential, energies, wfns)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

// numpy stores entries as `<key>.npy`; accept bare keys as well
fn read_entry<D>(
    npz: &mut NpzReader<File>,
    names: &[String],
    key: &'static str,
) -> ArchiveResult<nd::Array<f64, D>>
where D: nd::Dimension
{
    let npy = format!("{key}.npy");
    let name
        = names.iter()
        .find(|name| name.as_str() == npy || name.as_str() == key)
        .ok_or(DvrError::MissingEntry(key))?;
    Ok(npz.by_name(name)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use ndarray as nd;
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("dvr1d-archive-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample(n: usize) -> Archive {
        let grid: nd::Array1<f64> = nd::Array1::linspace(-1.0, 1.0, n);
        let potential = grid.mapv(|x| x.powi(2) + 0.1 * x);
        let energies: nd::Array1<f64> = (0..n).map(|k| k as f64 * 0.37).collect();
        let wfns: nd::Array2<f64>
            = nd::Array2::from_shape_fn((n, n), |(i, j)| ((i * n + j) as f64).sin());
        Archive::new(grid, potential, energies, wfns).unwrap()
    }

    #[test]
    fn extension_appended_once() {
        assert_eq!(with_npz_ext("out/run"), PathBuf::from("out/run.npz"));
        assert_eq!(with_npz_ext("out/run.npz"), PathBuf::from("out/run.npz"));
        assert_eq!(with_npz_ext("run.v2"), PathBuf::from("run.v2.npz"));
    }

    #[test]
    fn write_read_exact() {
        let dir = scratch("exact");
        let arch = sample(7);
        let path = arch.write(dir.join("sample")).unwrap();
        assert_eq!(path, dir.join("sample.npz"));
        let read = Archive::read(dir.join("sample")).unwrap();
        assert_eq!(read, arch);
        let read = Archive::read(&path).unwrap();
        assert_eq!(read.wfns(), arch.wfns());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn overwrite_existing() {
        let dir = scratch("overwrite");
        sample(5).write(dir.join("a")).unwrap();
        let second = sample(3);
        second.write(dir.join("a.npz")).unwrap();
        let read = Archive::read(dir.join("a.npz")).unwrap();
        assert_eq!(read.len(), 3);
        assert_eq!(read, second);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failed_write_keeps_previous() {
        let dir = scratch("failed");
        let first = sample(4);
        let path = first.write(dir.join("keep")).unwrap();
        assert!(!tmp_path(&path).exists());
        // a directory in the way of the staging file makes the write fail
        fs::create_dir(tmp_path(&path)).unwrap();
        let res = sample(6).write(&path);
        assert!(matches!(res, Err(DvrError::Io(_))));
        assert_eq!(Archive::read(&path).unwrap(), first);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn numpy_member_names() {
        // numpy.savez names its members `<key>.npy`
        let dir = scratch("numpy");
        let arch = sample(2);
        let file = File::create(dir.join("saved.npz")).unwrap();
        let mut npz = NpzWriter::new(file);
        npz.add_array("grid.npy", arch.grid()).unwrap();
        npz.add_array("potential.npy", arch.potential()).unwrap();
        npz.add_array("energies.npy", arch.energies()).unwrap();
        npz.add_array("wfns.npy", arch.wfns()).unwrap();
        npz.finish().unwrap();

        let mut names = NpzReader::new(File::open(dir.join("saved.npz")).unwrap())
            .unwrap()
            .names()
            .unwrap();
        names.sort();
        assert_eq!(names, ["energies.npy", "grid.npy", "potential.npy", "wfns.npy"]);

        let read = Archive::read(dir.join("saved")).unwrap();
        assert_eq!(read, arch);
        // and survives being rewritten with bare member names
        let path = read.write(dir.join("rewritten")).unwrap();
        assert_eq!(Archive::read(path).unwrap(), arch);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn shape_mismatch_rejected() {
        let grid: nd::Array1<f64> = nd::Array1::zeros(4);
        let res = Archive::new(
            grid.clone(), nd::Array1::zeros(3), grid.clone(), nd::Array2::zeros((4, 4)));
        assert!(matches!(res, Err(DvrError::Length(_))));
        let res = Archive::new(
            grid.clone(), grid.clone(), grid, nd::Array2::zeros((4, 3)));
        assert!(matches!(res, Err(DvrError::Shape { name: WFNS, .. })));
    }

    #[test]
    fn missing_and_corrupt_files() {
        let dir = scratch("bad");
        let res = Archive::read(dir.join("nothing"));
        assert!(matches!(res, Err(DvrError::Io(_))));

        fs::write(dir.join("junk.npz"), b"not a zip file").unwrap();
        let res = Archive::read(dir.join("junk"));
        assert!(matches!(res, Err(DvrError::ReadNpz(_))));

        let file = File::create(dir.join("partial.npz")).unwrap();
        let mut npz = NpzWriter::new(file);
        npz.add_array(GRID, &nd::Array1::<f64>::zeros(2)).unwrap();
        npz.finish().unwrap();
        let res = Archive::read(dir.join("partial"));
        assert!(matches!(res, Err(DvrError::MissingEntry(POTENTIAL))));
        fs::remove_dir_all(dir).unwrap();
    }
}
