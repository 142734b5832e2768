use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::eddington::eddingtoninversion::DEFAULT_N_QUAD;
use crate::godicerror::GodicResult;
use crate::model::sphericalmodel::ModelKind;
use crate::phasespace::phasespace::DEFAULT_MAX_DEPTH;

/// Parameters of one Eddington inversion run.
///
/// Every field has a default, so a configuration file only lists what it
/// changes, e.g. `{ "model": "Jaffe", "xi_min": -3.0 }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfiguration {
    pub model: ModelKind,
    /// Overrides the model's own regularization offset.
    pub offset: Option<f64>,
    /// Log-radius range sampled for the density-potential splines.
    pub xi_min: f64,
    pub xi_max: f64,
    pub n_radial: usize,
    /// Number of energies on which the antiderivative of the DF is sampled.
    pub n_energy: usize,
    pub degree: usize,
    pub n_quad: usize,
    pub max_depth: usize,
    /// Radii of the velocity profiles.
    pub radii: Vec<f64>,
}

impl Default for PipelineConfiguration {
    fn default() -> Self {
        PipelineConfiguration {
            model: ModelKind::Plummer,
            offset: None,
            xi_min: -10.0,
            xi_max: 10.0,
            n_radial: 1000,
            n_energy: 400,
            degree: 3,
            n_quad: DEFAULT_N_QUAD,
            max_depth: DEFAULT_MAX_DEPTH,
            radii: vec![0.1, 0.25, 0.5, 1.0, 2.0, 4.0],
        }
    }
}

impl PipelineConfiguration {
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> GodicResult<PipelineConfiguration> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: PipelineConfiguration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }
}
