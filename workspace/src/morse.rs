use ndarray as nd;
use dvr1d::{ analyze::Analyzer, dvr::Dvr, units::{ self, Unit } };

// vibrational levels of the OH stretch as a Morse oscillator

const DE: f64 = 37778.617; // dissociation energy; cm⁻¹
const WE: f64 = 3737.76; // harmonic frequency; cm⁻¹
const RE: f64 = 0.96966; // equilibrium bond length; Å
const M_O: f64 = 15.99491462; // amu
const M_H: f64 = 1.00782503; // amu

fn main() -> anyhow::Result<()> {
    let mass: f64 = units::convert(M_O * M_H / (M_O + M_H), Unit::Amu, true);
    let de: f64 = units::convert(DE, Unit::Wavenumbers, true);
    let we: f64 = units::convert(WE, Unit::Wavenumbers, true);
    let re: f64 = units::convert(RE, Unit::Angstrom, true);
    let a = (mass / 2.0 / de).sqrt() * we;

    let dvr = Dvr::new_range(
        (re - 1.0, re + 3.0, 0.005),
        |r| de * (1.0 - (-a * (r - re)).exp()).powi(2),
        mass,
    )?
        .with_res_file("morse")
        .with_res_dir("output");
    let path = dvr.run()?;
    println!("wrote {}", path.display());

    // E_n = ωₑ (n + ½) - ωₑxₑ (n + ½)², ωₑxₑ = ωₑ² / 4Dₑ
    let wexe = WE.powi(2) / 4.0 / DE;
    let morse = |n: usize| WE * (n as f64 + 0.5) - wexe * (n as f64 + 0.5).powi(2);

    let res = Analyzer::open(&path)?;
    let e: nd::Array1<f64> = units::convert(res.energies(), Unit::Wavenumbers, false);
    println!(" n   E_n - E_0 (cm⁻¹)   analytic    <r> (Å)   σ(r) (Å)");
    for n in 0..4 {
        let r_avg: f64 = units::convert(
            Analyzer::exp_val(res.grid(), res.wfns(), n)?, Unit::Angstrom, false);
        let r_sd: f64 = units::convert(res.state_std_dev(n)?, Unit::Angstrom, false);
        println!(
            "{:2} {:16.3} {:12.3} {:10.5} {:10.5}",
            n,
            e[n] - e[0],
            morse(n) - morse(0),
            r_avg,
            r_sd,
        );
    }
    Ok(())
}
