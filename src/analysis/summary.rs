// Global aggregates of the per-cell balances, printed after a run.

use crate::models::cell::{CellPotential, RooftopRecord};

/// World totals per technology [EJ/yr] with capacity-weighted EROI.
#[derive(Debug, Clone, Default)]
pub struct GlobalPotential {
    pub cells: usize,
    pub wind_onshore_e: f64,
    pub wind_offshore_e: f64,
    pub wind_e_in: f64,
    pub wind_eroi: f64,
    pub pv_e: f64,
    pub pv_e_in: f64,
    pub pv_eroi: f64,
    pub rooftop_e: f64,
    pub rooftop_e_in: f64,
    pub rooftop_eroi: f64,
}

/// Sum the finite per-cell balances into world totals. Cells with an
/// undefined wind climate contribute nothing rather than poisoning the
/// totals with NaN.
pub fn aggregate(potentials: &[CellPotential], rooftop: &[RooftopRecord]) -> GlobalPotential {
    let mut totals = GlobalPotential {
        cells: potentials.len(),
        ..Default::default()
    };
    let mut wind_e = 0.0;

    for potential in potentials {
        if potential.wind_e.is_finite() && potential.wind_e_in.is_finite() {
            totals.wind_onshore_e += potential.wind_onshore_e;
            totals.wind_offshore_e += potential.wind_offshore_e;
            wind_e += potential.wind_e;
            totals.wind_e_in += potential.wind_e_in;
        }
        if potential.pv_e.is_finite() && potential.pv_e_in.is_finite() {
            totals.pv_e += potential.pv_e;
            totals.pv_e_in += potential.pv_e_in;
        }
    }
    for record in rooftop {
        if record.pv_e.is_finite() && record.pv_e_in.is_finite() {
            totals.rooftop_e += record.pv_e;
            totals.rooftop_e_in += record.pv_e_in;
        }
    }

    totals.wind_eroi = wind_e / totals.wind_e_in;
    totals.pv_eroi = totals.pv_e / totals.pv_e_in;
    totals.rooftop_eroi = totals.rooftop_e / totals.rooftop_e_in;
    totals
}

pub fn print_summary(totals: &GlobalPotential) {
    println!("\nGlobal Potential Summary");
    println!("========================");
    println!("Grid cells retained: {}", totals.cells);
    println!(
        "Wind onshore:  {:>10.2} EJ/yr",
        totals.wind_onshore_e
    );
    println!(
        "Wind offshore: {:>10.2} EJ/yr",
        totals.wind_offshore_e
    );
    println!(
        "Wind combined EROI: {:.2} (inputs {:.2} EJ/yr)",
        totals.wind_eroi, totals.wind_e_in
    );
    println!(
        "Utility PV:    {:>10.2} EJ/yr, EROI {:.2}",
        totals.pv_e, totals.pv_eroi
    );
    println!(
        "Rooftop PV:    {:>10.2} EJ/yr, EROI {:.2}",
        totals.rooftop_e, totals.rooftop_eroi
    );
    println!("========================\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cell::GridCell;

    fn blank_cell() -> GridCell {
        GridCell {
            country: "France".to_string(),
            lat: 0.0,
            lon: 0.0,
            elev: 0.0,
            dist_coast: 0.0,
            ghi: 0.0,
            v_r_opti: 0.0,
            n_opti: 0.0,
            area: 0.0,
            wind_sf_onshore: 0.0,
            wind_sf_offshore: 0.0,
            pv_sf: 0.0,
            csp_sf: 0.0,
            wind_area_onshore: 0.0,
            wind_area_offshore: 0.0,
            pv_area: 0.0,
            csp_area: 0.0,
            wind_mean100: 0.0,
            wind_std100: 0.0,
            weibull_k: f64::NAN,
            weibull_c: f64::NAN,
            air_density: 1.225,
        }
    }

    fn potential(wind_e: f64, wind_e_in: f64) -> CellPotential {
        CellPotential {
            cell: blank_cell(),
            inputs_gw_onshore: 0.0,
            inputs_gw_offshore: 0.0,
            wind_onshore_e: wind_e,
            wind_offshore_e: 0.0,
            wind_e,
            wind_onshore_e_in: wind_e_in,
            wind_offshore_e_in: 0.0,
            wind_e_in,
            wind_onshore_eroi: wind_e / wind_e_in,
            wind_offshore_eroi: f64::NAN,
            wind_eroi: wind_e / wind_e_in,
            pv_e: 1.0,
            pv_e_in: 0.1,
            pv_eroi: 10.0,
        }
    }

    #[test]
    fn nan_cells_do_not_poison_the_totals() {
        let potentials = vec![potential(4.0, 0.5), potential(f64::NAN, f64::NAN)];
        let totals = aggregate(&potentials, &[]);
        assert!((totals.wind_eroi - 8.0).abs() < 1e-12);
        assert!((totals.pv_e - 2.0).abs() < 1e-12);
    }
}
