use ndarray as nd;
use dvr1d::{ analyze::Analyzer, dvr::Dvr, units::{ self, Unit } };

// solve for the eigenstates of a 3000 cm⁻¹ harmonic oscillator

const MASS: f64 = 1.0; // mₑ
const OMEGA: f64 = 3000.0; // cm⁻¹
const NUM_STATES: usize = 5;

fn main() -> anyhow::Result<()> {
    let w: f64 = units::convert(OMEGA, Unit::Wavenumbers, true);
    let dvr = Dvr::new_range(
        (-50.0, 50.0, 0.1),
        |xk| 0.5 * MASS * w.powi(2) * xk.powi(2),
        MASS,
    )?
        .with_res_file("harmonic")
        .with_res_dir("output");
    let path = dvr.run()?;
    println!("wrote {}", path.display());

    let res = Analyzer::open(&path)?;
    let e: nd::Array1<f64> = units::convert(res.energies(), Unit::Wavenumbers, false);
    let x2 = res.grid().mapv(|xk| xk.powi(2));
    println!(" n       E (cm⁻¹)   expected      <x>          <x²>         σ(x)      r_e");
    for n in 0..NUM_STATES {
        println!(
            "{:2} {:14.6} {:10.1} {:+.3e} {:12.6} {:10.6} {:+.3}",
            n,
            e[n],
            OMEGA * (n as f64 + 0.5),
            Analyzer::exp_val(res.grid(), res.wfns(), n)?,
            res.state_exp_val(&x2, n)?,
            res.state_std_dev(n)?,
            res.state_re(n)?,
        );
    }
    println!("analytic σ(x) of ground state: {:.6}", (2.0 * MASS * w).recip().sqrt());
    Ok(())
}
